//! Bounded mailbox for handing values into the tick loop
//!
//! Touch interrupts, UI threads and network tasks post into a [`Mailbox`];
//! the tick loop takes from it. Access is guarded by `critical-section`, so
//! posting is safe from interrupt context. Storage is a fixed-size
//! `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;
use thiserror::Error;

/// Error returned when posting into a full mailbox
///
/// Carries the rejected value back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("mailbox is full")]
pub struct TrySendError<T>(pub T);

/// Fixed-capacity FIFO shared between contexts
pub struct Mailbox<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Mailbox<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for posting values
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { mailbox: self }
    }

    /// Handle for taking values
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { mailbox: self }
    }

    /// Append a value, returning it back if the mailbox is full
    pub fn post(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(value)
                .map_err(TrySendError)
        })
    }

    /// Remove the oldest value
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every queued value
    pub fn clear(&self) {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().clear());
    }
}

impl<T, const SIZE: usize> Default for Mailbox<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting end of a [`Mailbox`]
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    mailbox: &'a Mailbox<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.mailbox.post(value)
    }
}

/// Taking end of a [`Mailbox`]
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    mailbox: &'a Mailbox<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Option<T> {
        self.mailbox.take()
    }

    /// Take every queued value, oldest first
    pub fn drain(&self) -> impl Iterator<Item = T> + '_ {
        core::iter::from_fn(|| self.mailbox.take())
    }
}
