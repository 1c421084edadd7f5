//! Routes, bottom navigation bar and history.
//!
//! Paths follow the app's URL scheme:
//!
//! | Path                    | Screen              | Nav item  |
//! |-------------------------|---------------------|-----------|
//! | `/`                     | Home dashboard      | Home      |
//! | `/map`                  | Resource map        | Map       |
//! | `/resources?type=<t>`   | Resource list       | Resources |
//! | `/video-call`           | Video consultation  | Consult   |
//! | `/emergency`            | Emergency request   | SOS       |

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::error::{Result, RouteError};
use crate::screens::resources::ResourceFilter;
use crate::screens::{Icon, Tone};

// ───────────────────────────────────────────────────────────────
// Routes
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "filter", rename_all = "kebab-case")]
pub enum Route {
    Home,
    Map,
    Resources(ResourceFilter),
    VideoCall,
    Emergency,
}

impl Route {
    /// Path without query string; what the nav bar matches against.
    pub fn pathname(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Map => "/map",
            Self::Resources(_) => "/resources",
            Self::VideoCall => "/video-call",
            Self::Emergency => "/emergency",
        }
    }

    /// Full path including the resource type query, if any.
    pub fn href(self) -> String {
        match self {
            Self::Resources(filter) => match filter.as_query() {
                Some(t) => format!("/resources?type={t}"),
                None => "/resources".to_string(),
            },
            other => other.pathname().to_string(),
        }
    }

    pub fn parse(path: &str) -> Result<Self> {
        if !path.starts_with('/') {
            return Err(RouteError::NotAbsolute.into());
        }
        let (pathname, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let pathname = match pathname.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        let route = match pathname {
            "/" => Self::Home,
            "/map" => Self::Map,
            "/resources" => Self::Resources(ResourceFilter::from_query(query_value(query, "type"))),
            "/video-call" => Self::VideoCall,
            "/emergency" => Self::Emergency,
            _ => return Err(RouteError::UnknownPath.into()),
        };
        Ok(route)
    }
}

impl FromStr for Route {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

/// Value of `key` in a `a=b&c=d` query string.
fn query_value<'a>(query: Option<&'a str>, key: &str) -> Option<&'a str> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// A navigation request raised by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Go(Route),
    /// Browser-style back.
    Back,
}

// ───────────────────────────────────────────────────────────────
// History
// ───────────────────────────────────────────────────────────────

/// Navigation history.  The last entry is the current route; the stack
/// is never empty.
#[derive(Debug, Clone)]
pub struct History {
    stack: Vec<Route>,
}

impl History {
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> Route {
        // The stack always holds the root.
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Pop the current route.  Returns the new current route, or `None`
    /// when already at the root.
    pub fn back(&mut self) -> Option<Route> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop();
        Some(self.current())
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

// ───────────────────────────────────────────────────────────────
// Bottom navigation bar
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: Icon,
    pub active: bool,
    /// Rendered in the destructive tone.
    pub emergency: bool,
}

impl NavItem {
    pub fn tone(&self) -> Option<Tone> {
        if self.active {
            Some(Tone::Primary)
        } else if self.emergency {
            Some(Tone::Destructive)
        } else {
            None
        }
    }
}

const NAV_ITEMS: [(&str, &str, Icon); 5] = [
    ("/", "Home", Icon::Home),
    ("/map", "Map", Icon::MapPin),
    ("/resources", "Resources", Icon::List),
    ("/video-call", "Consult", Icon::PhoneCall),
    ("/emergency", "SOS", Icon::AlertTriangle),
];

/// The bottom bar as seen from `current`.
pub fn nav_bar(current: Route) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .map(|&(path, label, icon)| NavItem {
            path,
            label,
            icon,
            active: current.pathname() == path,
            emergency: path == "/emergency",
        })
        .collect()
}
