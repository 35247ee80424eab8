//! Desktop preview app for the marble clock
//!
//! Renders the clock face and its header band in a window. Time runs on a
//! synthetic clock that can be paused, sped up or skipped ahead, and all
//! settings changes go through the intent channel.

use std::time::{Instant as StdInstant, SystemTime, UNIX_EPOCH};

use eframe::egui::{self};
use myrtio_marble_clock::mailbox::Receiver;
use myrtio_marble_clock::{
    Chrome, ChromeConfig, ClockConfig, ClockIntent, ClockReading, Duration, FrameScheduler,
    Instant, IntentChannel, IntentSender, LightControl, MarbleClock, Palette, Point,
    RandomRows, RenderSurface, Rgb, TemperatureSource, TimeSource, TimeText, TouchQueue,
    chrome::DEFAULT_HEADER_HEIGHT,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Simulated screen size
const SCREEN_WIDTH: i32 = 320;
const SCREEN_HEIGHT: i32 = 240;

/// Intent channel size
const INTENT_CHANNEL_SIZE: usize = 16;

/// Touch queue size
const TOUCH_QUEUE_SIZE: usize = 8;

/// Static intent channel for communication between UI and clock
static INTENTS_CHANNEL: IntentChannel<INTENT_CHANNEL_SIZE> =
    IntentChannel::<INTENT_CHANNEL_SIZE>::new();

/// Static touch queue fed by mouse clicks
static TOUCH_QUEUE: TouchQueue<TOUCH_QUEUE_SIZE> = TouchQueue::<TOUCH_QUEUE_SIZE>::new();

type PreviewChrome =
    Chrome<'static, SimLights, SimWeather, Receiver<'static, Point, TOUCH_QUEUE_SIZE>>;

type PreviewScheduler = FrameScheduler<
    'static,
    FrameBuffer,
    SimulatedTime,
    PreviewChrome,
    RandomRows<SmallRng>,
    INTENT_CHANNEL_SIZE,
>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_title("Marble Clock Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-marble-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

/// Paint calls of the last frame, replayed by egui
#[derive(Default)]
struct FrameBuffer {
    dots: Vec<(Point, Rgb, u16)>,
}

impl RenderSurface for FrameBuffer {
    fn paint_slot(&mut self, point: Point, color: Rgb, size: u16) {
        self.dots.push((point, color, size));
    }

    fn width(&self) -> i32 {
        SCREEN_WIDTH
    }

    fn height(&self) -> i32 {
        SCREEN_HEIGHT - DEFAULT_HEADER_HEIGHT
    }
}

/// Wall clock derived from the synthetic time
struct SimulatedTime {
    /// Unix seconds at synthetic time zero
    base_epoch: u64,
    /// Synthetic milliseconds, updated by the app
    t_ms: u64,
    /// Skipped minutes
    offset_minutes: u64,
}

impl SimulatedTime {
    fn epoch(&self) -> u64 {
        self.base_epoch + self.t_ms / 1000 + self.offset_minutes * 60
    }
}

impl TimeSource for SimulatedTime {
    fn read(&mut self) -> Option<ClockReading> {
        let epoch = self.epoch();
        let minutes = epoch / 60;
        #[allow(clippy::cast_possible_truncation)]
        let text = TimeText::from_hm((minutes / 60 % 24) as u8, (minutes % 60) as u8).ok()?;
        Some(ClockReading { text, epoch })
    }
}

/// In-memory smart lights
struct SimLights {
    lights: Vec<(&'static str, bool)>,
}

impl LightControl for SimLights {
    type Error = &'static str;
    type Id = &'static str;

    fn discover(&mut self, found: &mut [Self::Id]) -> Result<usize, Self::Error> {
        for (slot, (id, _)) in found.iter_mut().zip(&self.lights) {
            *slot = *id;
        }
        Ok(self.lights.len().min(found.len()))
    }

    fn state(&mut self, id: &Self::Id) -> Result<bool, Self::Error> {
        self.lights
            .iter()
            .find(|(light, _)| light == id)
            .map(|(_, on)| *on)
            .ok_or("unknown light")
    }

    fn set_state(&mut self, id: &Self::Id, on: bool) -> Result<(), Self::Error> {
        let light = self
            .lights
            .iter_mut()
            .find(|(light, _)| light == id)
            .ok_or("unknown light")?;
        light.1 = on;
        Ok(())
    }
}

/// Temperature drifting with each lookup
struct SimWeather {
    lookups: u32,
}

impl TemperatureSource for SimWeather {
    type Error = &'static str;

    fn temperature(&mut self, _location: &str) -> Result<f32, Self::Error> {
        self.lookups += 1;
        #[allow(clippy::cast_precision_loss)]
        let drift = (self.lookups % 10) as f32 * 0.3;
        Ok(18.0 + drift)
    }
}

struct PreviewApp {
    scheduler: PreviewScheduler,
    /// Intent sender for UI changes
    intent_sender: IntentSender<'static, INTENT_CHANNEL_SIZE>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Synthetic time of the next clock frame
    next_frame: Instant,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Screen pixel scale
    zoom: f32,
    /// Hold duration in seconds
    hold_secs: u64,
    light_color: [u8; 3],
    dark_color: [u8; 3],
}

impl PreviewApp {
    fn new() -> Self {
        let base_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());

        let config = ClockConfig::for_screen(SCREEN_WIDTH, SCREEN_HEIGHT, DEFAULT_HEADER_HEIGHT);
        let clock = MarbleClock::new(
            INTENTS_CHANNEL.receiver(),
            &config,
            RandomRows::new(SmallRng::seed_from_u64(base_epoch)),
        )
        .expect("default geometry fits the preview screen");

        let chrome_config = ChromeConfig {
            width: SCREEN_WIDTH,
            header_height: DEFAULT_HEADER_HEIGHT,
            temperature_interval: Duration::from_secs(60),
            location: "sensor.outdoor",
        };
        let mut chrome = Chrome::new(
            &chrome_config,
            SimLights {
                lights: vec![("light.desk", false), ("light.ceiling", true)],
            },
            SimWeather { lookups: 0 },
            TOUCH_QUEUE.receiver(),
        );
        let mut found = [""; 4];
        let _ = chrome.discover_lights(&mut found);

        let time = SimulatedTime {
            base_epoch,
            t_ms: 0,
            offset_minutes: 0,
        };

        Self {
            scheduler: FrameScheduler::new(clock, FrameBuffer::default(), time, chrome),
            intent_sender: INTENTS_CHANNEL.sender(),
            t_ms: 0,
            next_frame: Instant::from_millis(0),
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            zoom: 2.0,
            hold_secs: config.hold.as_secs(),
            light_color: [config.palette.light.r, config.palette.light.g, config.palette.light.b],
            dark_color: [config.palette.dark.r, config.palette.dark.g, config.palette.dark.b],
        }
    }

    /// Send a palette change intent
    fn send_palette_change(&self) {
        let [r, g, b] = self.light_color;
        let [dr, dg, db] = self.dark_color;
        let palette = Palette {
            light: Rgb { r, g, b },
            dark: Rgb {
                r: dr,
                g: dg,
                b: db,
            },
            ..Palette::DEFAULT
        };
        let _ = self.intent_sender.try_send(ClockIntent::SetPalette(palette));
    }

    /// Send a hold change intent
    fn send_hold_change(&self) {
        let intent = ClockIntent::SetHold(Duration::from_secs(self.hold_secs));
        let _ = self.intent_sender.try_send(intent);
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
        self.scheduler.time_source_mut().t_ms = self.t_ms;
    }

    /// Run every frame that is due at the current synthetic time
    fn run_frames(&mut self) {
        let now = Instant::from_millis(self.t_ms);
        while now >= self.next_frame {
            self.scheduler.surface_mut().dots.clear();
            let result = self.scheduler.tick(now);
            self.next_frame = result.next_deadline;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_header(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let chrome = self.scheduler.idle_hook();
        let zones = chrome.zones();
        let scale = self.zoom;
        let to_screen =
            |x: i32, y: i32| egui::pos2(origin.x + x as f32 * scale, origin.y + y as f32 * scale);

        let flow = self.scheduler.clock().flow();
        let time = flow.shown();
        let label = time.as_ref().map_or("--:--", TimeText::as_str);
        painter.text(
            to_screen(8, DEFAULT_HEADER_HEIGHT / 3),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::monospace(10.0 * scale),
            egui::Color32::WHITE,
        );
        if let Some(date) = flow.date() {
            painter.text(
                to_screen(8, DEFAULT_HEADER_HEIGHT * 3 / 4),
                egui::Align2::LEFT_CENTER,
                date.to_string(),
                egui::FontId::monospace(6.0 * scale),
                egui::Color32::LIGHT_GRAY,
            );
        }

        let bulb = zones.light;
        let bulb_color = match chrome.light_on() {
            Some(true) => egui::Color32::from_rgb(255, 220, 80),
            Some(false) => egui::Color32::from_gray(90),
            None => egui::Color32::DARK_RED,
        };
        painter.circle_filled(
            to_screen(bulb.x + bulb.width / 2, bulb.y + bulb.height / 2),
            bulb.width as f32 * scale * 0.3,
            bulb_color,
        );

        if let Some(temperature) = chrome.temperature() {
            painter.text(
                to_screen(bulb.x + bulb.width + 16, DEFAULT_HEADER_HEIGHT / 2),
                egui::Align2::LEFT_CENTER,
                format!("{temperature:.1}°"),
                egui::FontId::proportional(9.0 * scale),
                egui::Color32::LIGHT_GRAY,
            );
        }

        let settings = zones.settings;
        let settings_color = if chrome.settings_open() {
            egui::Color32::LIGHT_BLUE
        } else {
            egui::Color32::GRAY
        };
        painter.text(
            to_screen(settings.x + settings.width / 2, settings.y + settings.height / 2),
            egui::Align2::CENTER_CENTER,
            "⚙",
            egui::FontId::proportional(14.0 * scale),
            settings_color,
        );
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.run_frames();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlaybackControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui
                            .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                            .clicked()
                        {
                            self.playing = !self.playing;
                        }
                        if ui.button("+1 min").clicked() {
                            self.scheduler.time_source_mut().offset_minutes += 1;
                        }
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        let secs = self.t_ms / 1000;
                        let ms = self.t_ms % 1000;
                        ui.label(format!("Time: {secs}.{ms:03}s"));
                        ui.label(format!(
                            "Phase: {}",
                            self.scheduler.clock().flow().phase_kind().as_str()
                        ));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=20.0).logarithmic(true));
                    });
                });
                // </PlaybackControls>
                ui.add_space(16.0);
                // <ClockControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Zoom:");
                        ui.add(egui::Slider::new(&mut self.zoom, 1.0..=4.0));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Hold (s):");
                        let old_hold = self.hold_secs;
                        ui.add(egui::DragValue::new(&mut self.hold_secs).range(0u64..=120u64));
                        if self.hold_secs != old_hold {
                            self.send_hold_change();
                        }
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Colors:");
                        let light = ui.color_edit_button_srgb(&mut self.light_color).changed();
                        let dark = ui.color_edit_button_srgb(&mut self.dark_color).changed();
                        if light || dark {
                            self.send_palette_change();
                        }
                    });
                });
                // </ClockControls>
            });

            ui.add_space(16.0);

            // === Screen ===
            #[allow(clippy::cast_precision_loss)]
            let size = egui::vec2(
                SCREEN_WIDTH as f32 * self.zoom,
                SCREEN_HEIGHT as f32 * self.zoom,
            );
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
            let origin = response.rect.min;
            painter.rect_filled(response.rect, 0.0, egui::Color32::BLACK);

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    #[allow(clippy::cast_possible_truncation)]
                    let point = Point::new(
                        ((pos.x - origin.x) / self.zoom) as i32,
                        ((pos.y - origin.y) / self.zoom) as i32,
                    );
                    let _ = TOUCH_QUEUE.post(point);
                }
            }

            self.draw_header(&painter, origin);

            #[allow(clippy::cast_precision_loss)]
            for &(point, color, dot) in &self.scheduler.surface().dots {
                let rect = egui::Rect::from_min_size(
                    egui::pos2(
                        origin.x + point.x as f32 * self.zoom,
                        origin.y + point.y as f32 * self.zoom,
                    ),
                    egui::vec2(f32::from(dot) * self.zoom, f32::from(dot) * self.zoom),
                );
                let color = egui::Color32::from_rgb(color.r, color.g, color.b);
                painter.rect_filled(rect, 1.0, color);
            }
        });
    }
}
