mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_marble_clock::frame_scheduler::DEFAULT_FRAME_DURATION;
    use myrtio_marble_clock::{
        ClockConfig, ClockReading, EveryRow, FrameScheduler, IdleHook, IntentChannel,
        MarbleClock, Palette, PhaseKind, Point, RenderSurface, Rgb, TimeSource, TimeText,
    };

    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    /// Surface recording every paint call
    struct RecordingSurface {
        log: Log,
        paints: Vec<(Point, Rgb, u16)>,
    }

    impl RenderSurface for RecordingSurface {
        fn paint_slot(&mut self, point: Point, color: Rgb, size: u16) {
            if self.paints.is_empty() {
                self.log.borrow_mut().push("draw");
            }
            self.paints.push((point, color, size));
        }

        fn width(&self) -> i32 {
            320
        }

        fn height(&self) -> i32 {
            200
        }
    }

    struct LoggedTime {
        log: Log,
        text: TimeText,
    }

    impl TimeSource for LoggedTime {
        fn read(&mut self) -> Option<ClockReading> {
            self.log.borrow_mut().push("time");
            Some(ClockReading {
                text: self.text,
                epoch: 0,
            })
        }
    }

    struct LoggedIdle(Log);

    impl IdleHook for LoggedIdle {
        fn idle(&mut self, _now: Instant) {
            self.0.borrow_mut().push("idle");
        }
    }

    fn surface(log: &Log) -> RecordingSurface {
        RecordingSurface {
            log: log.clone(),
            paints: Vec::new(),
        }
    }

    #[test]
    fn test_tick_order_and_full_redraw() {
        let log = Log::default();
        let intents: IntentChannel<2> = IntentChannel::new();
        let config = ClockConfig::for_screen(320, 240, 40);
        let clock = MarbleClock::new(intents.receiver(), &config, EveryRow).unwrap();
        let time = LoggedTime {
            log: log.clone(),
            text: TimeText::parse("12:00").unwrap(),
        };
        let mut scheduler = FrameScheduler::new(clock, surface(&log), time, LoggedIdle(log.clone()));

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.phase, PhaseKind::FillTop);
        assert_eq!(*log.borrow(), vec!["idle", "time", "draw"]);

        let slots = scheduler.clock().grid().slots().count();
        assert_eq!(scheduler.surface().paints.len(), slots);
        assert!(
            scheduler
                .surface()
                .paints
                .iter()
                .all(|&(_, color, size)| color == Palette::DEFAULT.empty && size == 4)
        );

        // Second frame: a token sits at every head
        scheduler.surface_mut().paints.clear();
        scheduler.tick(Instant::from_millis(50));
        assert_eq!(scheduler.surface().paints.len(), slots);
        let tokens = scheduler
            .surface()
            .paints
            .iter()
            .filter(|&&(_, color, _)| color != Palette::DEFAULT.empty)
            .count();
        assert_eq!(tokens, 7);
    }

    #[test]
    fn test_frame_pacing() {
        let log = Log::default();
        let intents: IntentChannel<2> = IntentChannel::new();
        let config = ClockConfig::for_screen(320, 240, 40);
        let clock = MarbleClock::new(intents.receiver(), &config, EveryRow).unwrap();
        let time = LoggedTime {
            log: log.clone(),
            text: TimeText::parse("12:00").unwrap(),
        };
        let mut scheduler = FrameScheduler::new(clock, surface(&log), time, ());

        let first = scheduler.tick(Instant::from_millis(0));
        assert_eq!(first.next_deadline, Instant::from_millis(50));
        assert_eq!(first.sleep_duration, DEFAULT_FRAME_DURATION);

        let late = scheduler.tick(Instant::from_millis(70));
        assert_eq!(late.next_deadline, Instant::from_millis(100));
        assert_eq!(late.sleep_duration, Duration::from_millis(30));

        // Far behind: no catch-up burst
        let stalled = scheduler.tick(Instant::from_millis(1_000));
        assert_eq!(stalled.next_deadline, Instant::from_millis(1_050));
        assert_eq!(stalled.sleep_duration, Duration::from_millis(50));

        // Slightly behind: zero sleep
        let behind = scheduler.tick(Instant::from_millis(1_120));
        assert_eq!(behind.next_deadline, Instant::from_millis(1_100));
        assert_eq!(behind.sleep_duration, Duration::from_millis(0));
    }
}
