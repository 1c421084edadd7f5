//! Video consultation: simulated connect, call timer, auto-hiding
//! controls and the mic/camera toggles.
//!
//! Three timers run from the moment the screen opens:
//!
//! | Label           | Kind     | Default | Effect                  |
//! |-----------------|----------|---------|-------------------------|
//! | `connect`       | one-shot | 3 s     | "Connecting..." ends    |
//! | `call-duration` | periodic | 1 s     | duration += 1           |
//! | `controls-hide` | one-shot | 5 s     | controls hidden         |

use log::{debug, info, warn};
use serde::Serialize;

use crate::app::ports::{DirectoryPort, SchedulerDelegate};
use crate::config::SimulatorConfig;
use crate::directory::ConsultingDoctor;
use crate::navigation::{NavIntent, Route};
use crate::scheduler::{Fired, Schedule, Scheduler};

/// Lit bars on the call-quality indicator, out of four.
pub const SIGNAL_BARS: [bool; 4] = [true, true, true, false];

/// `MM:SS`; minutes keep counting past 59.
pub fn format_duration(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct CallState {
    connecting: bool,
    duration_s: u32,
    controls_visible: bool,
}

impl SchedulerDelegate for CallState {
    fn on_timer_fired(&mut self, fired: &Fired) {
        match fired.label {
            "connect" => {
                self.connecting = false;
                info!("video: connected at {}ms", fired.at_ms);
            }
            "call-duration" => {
                let seconds = u32::try_from(fired.periods).unwrap_or(u32::MAX);
                self.duration_s = self.duration_s.saturating_add(seconds);
            }
            "controls-hide" => {
                self.controls_visible = false;
                debug!("video: controls auto-hidden");
            }
            other => warn!("video: unexpected timer '{other}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCallView {
    pub doctor: ConsultingDoctor,
    pub connecting: bool,
    /// "Connecting..." or "Connected".
    pub status: &'static str,
    pub duration: String,
    pub controls_visible: bool,
    pub mic_on: bool,
    pub video_on: bool,
    pub quality: &'static str,
    pub signal_bars: [bool; 4],
}

pub struct VideoCallScreen {
    doctor: ConsultingDoctor,
    state: CallState,
    mic_on: bool,
    video_on: bool,
    scheduler: Scheduler,
    ended: bool,
}

impl VideoCallScreen {
    /// Open the call and arm its timers.
    pub fn new(directory: &impl DirectoryPort, config: &SimulatorConfig) -> Self {
        let mut scheduler = Scheduler::new();
        for schedule in [
            Schedule::one_shot("connect", config.video_connect_delay_ms),
            Schedule::periodic("call-duration", config.call_duration_tick_ms),
            Schedule::one_shot("controls-hide", config.video_controls_hide_ms),
        ] {
            if scheduler.add(schedule).is_none() {
                warn!("video: could not arm '{}'", schedule.label);
            }
        }

        let doctor = directory.consulting_doctor();
        info!("video: calling {}", doctor.name);
        Self {
            doctor,
            state: CallState {
                connecting: true,
                duration_s: 0,
                controls_visible: true,
            },
            mic_on: true,
            video_on: true,
            scheduler,
            ended: false,
        }
    }

    pub fn advance(&mut self, elapsed_ms: u64) {
        self.scheduler.advance(elapsed_ms, &mut self.state);
    }

    pub fn is_connecting(&self) -> bool {
        self.state.connecting
    }

    pub fn duration_s(&self) -> u32 {
        self.state.duration_s
    }

    pub fn controls_visible(&self) -> bool {
        self.state.controls_visible
    }

    pub fn is_mic_on(&self) -> bool {
        self.mic_on
    }

    pub fn is_video_on(&self) -> bool {
        self.video_on
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.active_count()
    }

    /// Tap on the video area.
    pub fn toggle_controls(&mut self) {
        self.state.controls_visible = !self.state.controls_visible;
    }

    pub fn toggle_mic(&mut self) {
        self.mic_on = !self.mic_on;
        debug!("video: mic {}", if self.mic_on { "on" } else { "off" });
    }

    pub fn toggle_video(&mut self) {
        self.video_on = !self.video_on;
        debug!("video: camera {}", if self.video_on { "on" } else { "off" });
    }

    /// Hang up: stop every timer and go home.
    pub fn end_call(&mut self) -> NavIntent {
        if !self.ended {
            self.ended = true;
            self.scheduler.clear();
            info!(
                "video: call ended after {}",
                format_duration(self.state.duration_s)
            );
        }
        NavIntent::Go(Route::Home)
    }

    pub fn view(&self) -> VideoCallView {
        VideoCallView {
            doctor: self.doctor.clone(),
            connecting: self.state.connecting,
            status: if self.state.connecting {
                "Connecting..."
            } else {
                "Connected"
            },
            duration: format_duration(self.state.duration_s),
            controls_visible: self.state.controls_visible,
            mic_on: self.mic_on,
            video_on: self.video_on,
            quality: "HD",
            signal_bars: SIGNAL_BARS,
        }
    }
}
