//! App shell: owns the active screen, the history and the event sink.
//!
//! ```text
//!  UiAction ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!               │          MedMapApp           │
//!  advance ───▶ │  History · active Screen     │
//!               └─────────────────────────────┘
//!                        │ NavIntent
//!                        ▼
//!                 navigate / back
//! ```
//!
//! Exactly one screen is alive at a time.  Navigating away drops the old
//! screen together with its timers; the emergency screen additionally
//! stops its simulator so the sink sees a `Stopped` event.

use core::str::FromStr;

use log::{info, warn};
use serde::Serialize;

use crate::app::commands::CommandOutcome;
use crate::app::ports::{DirectoryPort, EventSink};
use crate::config::SimulatorConfig;
use crate::error::{Error, Result};
use crate::navigation::{self, History, NavIntent, NavItem, Route};
use crate::screens::emergency::{EmergencyScreen, EmergencyView};
use crate::screens::home::{HomeScreen, HomeView};
use crate::screens::map::{MapFilter, MapScreen, MapView};
use crate::screens::resources::{ResourceListScreen, ResourceListView};
use crate::screens::video_call::{VideoCallScreen, VideoCallView};

// ───────────────────────────────────────────────────────────────
// Screens and views
// ───────────────────────────────────────────────────────────────

pub enum Screen {
    Home(HomeScreen),
    Map(MapScreen),
    Resources(ResourceListScreen),
    VideoCall(VideoCallScreen),
    Emergency(EmergencyScreen),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", content = "view", rename_all = "kebab-case")]
pub enum ScreenView {
    Home(HomeView),
    Map(MapView),
    Resources(ResourceListView),
    VideoCall(VideoCallView),
    Emergency(EmergencyView),
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppView {
    pub path: String,
    pub nav: Vec<NavItem>,
    pub screen: ScreenView,
}

// ───────────────────────────────────────────────────────────────
// UI actions
// ───────────────────────────────────────────────────────────────

/// Longest `wait:<ms>` a script may ask for: one day of simulated time.
pub const MAX_WAIT_MS: u64 = 86_400_000;

/// A user action, addressed to whichever screen is showing.
///
/// The text form (`FromStr`) is what the demo binary's `--script`
/// accepts, e.g. `sos`, `wait:2000`, `nav:/resources?type=icu`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Let simulated time pass.
    Wait(u64),
    Navigate(Route),
    Back,
    // Home
    RequestHelp,
    QuickAccess(String),
    // Emergency
    Sos,
    Cancel,
    TrackLive,
    HeaderButton,
    ReturnHome,
    // Resources
    Search(String),
    Consult(u32),
    BookAmbulance(u32),
    // Map
    MapFilter(MapFilter),
    LocateMe,
    // Video call
    ToggleMic,
    ToggleVideo,
    ToggleControls,
    EndCall,
}

impl FromStr for UiAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (verb, arg) = match s.split_once(':') {
            Some((v, a)) => (v, Some(a)),
            None => (s, None),
        };
        let id = |a: Option<&str>| {
            a.and_then(|a| a.parse::<u32>().ok())
                .ok_or(Error::Script("expected a numeric id"))
        };

        let action = match (verb, arg) {
            ("wait", Some(ms)) => {
                let ms: u64 = ms
                    .parse()
                    .map_err(|_| Error::Script("expected milliseconds"))?;
                if ms > MAX_WAIT_MS {
                    return Err(Error::Script("wait longer than one day"));
                }
                Self::Wait(ms)
            }
            ("nav", Some(path)) => Self::Navigate(Route::parse(path)?),
            ("back", None) => Self::Back,
            ("help", None) => Self::RequestHelp,
            ("quick", Some(card)) => Self::QuickAccess(card.to_string()),
            ("sos", None) => Self::Sos,
            ("cancel", None) => Self::Cancel,
            ("track", None) => Self::TrackLive,
            ("header", None) => Self::HeaderButton,
            ("return-home", None) => Self::ReturnHome,
            ("search", Some(text)) => Self::Search(text.to_string()),
            ("consult", arg) => Self::Consult(id(arg)?),
            ("book", arg) => Self::BookAmbulance(id(arg)?),
            ("filter", Some(f)) => {
                Self::MapFilter(MapFilter::parse(f).ok_or(Error::Script("unknown map filter"))?)
            }
            ("locate", None) => Self::LocateMe,
            ("mic", None) => Self::ToggleMic,
            ("camera", None) => Self::ToggleVideo,
            ("controls", None) => Self::ToggleControls,
            ("end-call", None) => Self::EndCall,
            _ => return Err(Error::Script("unknown action")),
        };
        Ok(action)
    }
}

/// What a screen made of an action.
enum Reply {
    Done(CommandOutcome),
    Go(NavIntent),
}

impl From<Option<NavIntent>> for Reply {
    fn from(intent: Option<NavIntent>) -> Self {
        intent.map_or(Self::Done(CommandOutcome::Ignored), Self::Go)
    }
}

fn outcome(changed: bool) -> CommandOutcome {
    if changed {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Ignored
    }
}

// ───────────────────────────────────────────────────────────────
// MedMapApp
// ───────────────────────────────────────────────────────────────

pub struct MedMapApp<D: DirectoryPort, S: EventSink> {
    config: SimulatorConfig,
    directory: D,
    sink: S,
    history: History,
    screen: Screen,
}

impl<D: DirectoryPort, S: EventSink> MedMapApp<D, S> {
    /// Validate `config` and open the home screen.
    pub fn new(config: SimulatorConfig, directory: D, sink: S) -> Result<Self> {
        config.validate()?;
        info!("MedMapApp starting on {}", Route::Home);
        Ok(Self {
            config,
            directory,
            sink,
            history: History::new(Route::Home),
            screen: Screen::Home(HomeScreen::default()),
        })
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn route(&self) -> Route {
        self.history.current()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    // ── Navigation ────────────────────────────────────────────

    /// Show `route`.  Returns `false` when it is already showing.
    pub fn navigate(&mut self, route: Route) -> bool {
        let from = self.history.current();
        if route == from {
            return false;
        }
        self.teardown();
        self.history.push(route);
        self.screen = self.build(route);
        info!("NAV   | {} -> {}", from, route);
        true
    }

    pub fn navigate_path(&mut self, path: &str) -> Result<bool> {
        Ok(self.navigate(Route::parse(path)?))
    }

    /// Browser-style back.  Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        let from = self.history.current();
        let Some(to) = self.history.back() else {
            return false;
        };
        self.teardown();
        self.screen = self.build(to);
        info!("NAV   | {} <- back {}", to, from);
        true
    }

    pub fn follow(&mut self, intent: NavIntent) -> bool {
        match intent {
            NavIntent::Go(route) => self.navigate(route),
            NavIntent::Back => self.back(),
        }
    }

    fn build(&mut self, route: Route) -> Screen {
        match route {
            Route::Home => Screen::Home(HomeScreen::default()),
            Route::Map => Screen::Map(MapScreen::new(&self.directory, &self.config)),
            Route::Resources(filter) => {
                Screen::Resources(ResourceListScreen::new(filter, &self.directory))
            }
            Route::VideoCall => {
                Screen::VideoCall(VideoCallScreen::new(&self.directory, &self.config))
            }
            Route::Emergency => Screen::Emergency(EmergencyScreen::open(
                self.config.clone(),
                self.directory.assigned_unit().clone(),
                &mut self.sink,
            )),
        }
    }

    fn teardown(&mut self) {
        if let Screen::Emergency(screen) = &mut self.screen {
            screen.leave(&mut self.sink);
        }
    }

    // ── Time ──────────────────────────────────────────────────

    /// Let `elapsed_ms` pass on the active screen's timers.
    pub fn advance(&mut self, elapsed_ms: u64) {
        match &mut self.screen {
            Screen::Map(s) => s.advance(elapsed_ms),
            Screen::VideoCall(s) => s.advance(elapsed_ms),
            Screen::Emergency(s) => s.advance(elapsed_ms, &mut self.sink),
            Screen::Home(_) | Screen::Resources(_) => {}
        }
    }

    // ── Actions ───────────────────────────────────────────────

    /// Apply one user action.  Actions addressed to a screen that is not
    /// showing are ignored.
    pub fn perform(&mut self, action: UiAction) -> CommandOutcome {
        match action {
            UiAction::Wait(ms) => {
                self.advance(ms);
                return CommandOutcome::Applied;
            }
            UiAction::Navigate(route) => return outcome(self.navigate(route)),
            UiAction::Back => return outcome(self.back()),
            _ => {}
        }
        match self.on_screen(&action) {
            Reply::Done(result) => result,
            Reply::Go(intent) => outcome(self.follow(intent)),
        }
    }

    fn on_screen(&mut self, action: &UiAction) -> Reply {
        let sink = &mut self.sink;
        match (&mut self.screen, action) {
            (Screen::Home(s), UiAction::RequestHelp) => Reply::Go(s.request_help()),
            (Screen::Home(s), UiAction::QuickAccess(card)) => Reply::from(s.open_quick_access(card)),

            (Screen::Emergency(s), UiAction::Sos) => Reply::Done(s.press_sos(sink)),
            (Screen::Emergency(s), UiAction::Cancel) => Reply::Done(s.cancel(sink)),
            (Screen::Emergency(s), UiAction::TrackLive) => Reply::Done(s.track_live(sink)),
            (Screen::Emergency(s), UiAction::HeaderButton) => {
                if s.view().header.is_none() {
                    return Reply::Done(CommandOutcome::Ignored);
                }
                match s.header_action(sink) {
                    Some(intent) => Reply::Go(intent),
                    None => Reply::Done(CommandOutcome::Applied),
                }
            }
            (Screen::Emergency(s), UiAction::ReturnHome) => Reply::from(s.return_home()),

            (Screen::Resources(s), UiAction::Search(text)) => {
                s.set_search(text);
                Reply::Done(CommandOutcome::Applied)
            }
            (Screen::Resources(s), UiAction::Consult(id)) => Reply::from(s.consult(*id)),
            (Screen::Resources(s), UiAction::BookAmbulance(id)) => {
                Reply::from(s.book_ambulance(*id))
            }

            (Screen::Map(s), UiAction::MapFilter(f)) => {
                s.set_filter(*f);
                Reply::Done(CommandOutcome::Applied)
            }
            (Screen::Map(s), UiAction::LocateMe) => Reply::Done(s.locate_me()),

            (Screen::VideoCall(s), UiAction::ToggleMic) => {
                s.toggle_mic();
                Reply::Done(CommandOutcome::Applied)
            }
            (Screen::VideoCall(s), UiAction::ToggleVideo) => {
                s.toggle_video();
                Reply::Done(CommandOutcome::Applied)
            }
            (Screen::VideoCall(s), UiAction::ToggleControls) => {
                s.toggle_controls();
                Reply::Done(CommandOutcome::Applied)
            }
            (Screen::VideoCall(s), UiAction::EndCall) => Reply::Go(s.end_call()),

            _ => {
                warn!("{:?} does not apply on {}", action, self.history.current());
                Reply::Done(CommandOutcome::Ignored)
            }
        }
    }

    // ── View ──────────────────────────────────────────────────

    pub fn nav_bar(&self) -> Vec<NavItem> {
        navigation::nav_bar(self.history.current())
    }

    pub fn view(&self) -> AppView {
        let screen = match &self.screen {
            Screen::Home(s) => ScreenView::Home(s.view()),
            Screen::Map(s) => ScreenView::Map(s.view()),
            Screen::Resources(s) => ScreenView::Resources(s.view()),
            Screen::VideoCall(s) => ScreenView::VideoCall(s.view()),
            Screen::Emergency(s) => ScreenView::Emergency(s.view()),
        };
        AppView {
            path: self.history.current().href(),
            nav: self.nav_bar(),
            screen,
        }
    }

    /// Shut down: stop the emergency simulator if it is showing.
    pub fn close(mut self) -> S {
        self.teardown();
        self.sink
    }
}
