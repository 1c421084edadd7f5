//! Screen view-models.
//!
//! Each screen owns its local UI state (toggles, search text, its own
//! timers) and produces a serialisable view on demand.  Screens never
//! talk to each other; navigation requests go back to the shell as
//! [`NavIntent`](crate::navigation::NavIntent)s.

pub mod emergency;
pub mod home;
pub mod map;
pub mod resources;
pub mod video_call;

use serde::Serialize;

/// Colour role of an element.  Front ends map these to their palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Primary,
    Accent,
    Success,
    Warning,
    Destructive,
    Secondary,
    Muted,
}

/// Icon names, matching the app's icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Ambulance,
    Bed,
    Wind,
    Droplets,
    Heart,
    Stethoscope,
    MapPin,
    Phone,
    AlertTriangle,
    Car,
    Activity,
    Calendar,
    Home,
    List,
    PhoneCall,
}
