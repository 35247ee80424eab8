//! Header band around the clock face
//!
//! Runs as the scheduler's idle hook: one touch query per tick, the light
//! toggle behind the bulb icon, and a periodic temperature refresh.
//! Collaborator failures are logged and swallowed here; the clock face never
//! sees them.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::collaborator::{LightControl, TemperatureSource, TouchInput};
use crate::frame_scheduler::IdleHook;
use crate::touch::{TouchAction, TouchZones};

/// Default height of the header band in pixels
pub const DEFAULT_HEADER_HEIGHT: i32 = 40;

/// Default interval between temperature lookups
pub const DEFAULT_TEMPERATURE_INTERVAL: Duration = Duration::from_secs(600);

/// Configuration for the header band
#[derive(Debug, Clone, Copy)]
pub struct ChromeConfig<'a> {
    /// Screen width in pixels
    pub width: i32,
    pub header_height: i32,
    pub temperature_interval: Duration,
    /// Location or sensor entity passed to the temperature source
    pub location: &'a str,
}

/// State of the header band
pub struct Chrome<'a, L: LightControl, W: TemperatureSource, I: TouchInput> {
    light: L,
    weather: W,
    touch: I,
    zones: TouchZones,
    location: &'a str,
    temperature_interval: Duration,

    light_id: Option<L::Id>,
    light_on: Option<bool>,
    temperature: Option<f32>,
    next_temperature: Option<Instant>,
    settings_open: bool,
}

impl<'a, L: LightControl, W: TemperatureSource, I: TouchInput> Chrome<'a, L, W, I> {
    pub fn new(config: &ChromeConfig<'a>, light: L, weather: W, touch: I) -> Self {
        Self {
            light,
            weather,
            touch,
            zones: TouchZones::header(config.width, config.header_height),
            location: config.location,
            temperature_interval: config.temperature_interval,
            light_id: None,
            light_on: None,
            temperature: None,
            next_temperature: None,
            settings_open: false,
        }
    }

    /// Discover lights and select the first one if none is selected yet
    ///
    /// Identifiers are written into `found`; returns how many were found.
    pub fn discover_lights(&mut self, found: &mut [L::Id]) -> Result<usize, L::Error> {
        let count = self.light.discover(found)?;
        if self.light_id.is_none() {
            if let Some(first) = found.get(..count).and_then(<[L::Id]>::first) {
                self.select_light(first.clone());
            }
        }
        Ok(count)
    }

    /// Select the light behind the bulb icon
    pub fn select_light(&mut self, id: L::Id) {
        self.light_on = self.light.state(&id).ok();
        self.light_id = Some(id);
    }

    /// Perform a touch action
    pub fn handle(&mut self, action: TouchAction) {
        match action {
            TouchAction::ToggleLight => self.toggle_light(),
            TouchAction::ToggleSettings => self.settings_open = !self.settings_open,
        }
    }

    /// Flip the selected light
    ///
    /// The cached state only changes once the light has accepted the change.
    fn toggle_light(&mut self) {
        let Some(id) = self.light_id.as_ref() else {
            return;
        };
        let result = self
            .light
            .state(id)
            .and_then(|on| self.light.set_state(id, !on).map(|()| !on));
        match result {
            Ok(on) => self.light_on = Some(on),
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[Chrome.toggle_light] light call failed: {:?}", _err);
            }
        }
    }

    /// Look up the temperature if the refresh interval has passed
    pub fn refresh_temperature(&mut self, now: Instant) {
        if self.next_temperature.is_some_and(|next| now < next) {
            return;
        }
        self.next_temperature = Some(now + self.temperature_interval);
        match self.weather.temperature(self.location) {
            Ok(temperature) => self.temperature = Some(temperature),
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[Chrome.refresh_temperature] lookup failed: {:?}", _err);
            }
        }
    }

    /// Last known temperature
    pub const fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Last known state of the selected light
    pub const fn light_on(&self) -> Option<bool> {
        self.light_on
    }

    pub const fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub const fn zones(&self) -> &TouchZones {
        &self.zones
    }

    pub const fn light(&self) -> &L {
        &self.light
    }

    pub fn light_mut(&mut self) -> &mut L {
        &mut self.light
    }

    pub const fn weather(&self) -> &W {
        &self.weather
    }

    pub fn weather_mut(&mut self) -> &mut W {
        &mut self.weather
    }
}

impl<L: LightControl, W: TemperatureSource, I: TouchInput> IdleHook for Chrome<'_, L, W, I> {
    fn idle(&mut self, now: Instant) {
        if let Some(point) = self.touch.poll() {
            if let Some(action) = self.zones.hit(point) {
                self.handle(action);
            }
        }
        self.refresh_temperature(now);
    }
}
