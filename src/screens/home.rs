//! Home dashboard.  Static content plus the entry points into the SOS
//! flow and the resource list.

use serde::Serialize;

use crate::navigation::{NavIntent, Route};

use super::{Icon, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAccessCard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    pub tone: Tone,
    pub href: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub label: &'static str,
    pub icon: Icon,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub title: &'static str,
    pub detail: &'static str,
    pub icon: Icon,
    pub tone: Tone,
    /// Rating, duration or status badge shown on the right.
    pub badge: &'static str,
    pub when: &'static str,
}

pub const QUICK_ACCESS: [QuickAccessCard; 4] = [
    QuickAccessCard {
        id: "ambulance",
        title: "Ambulance",
        description: "Emergency transport",
        icon: Icon::Ambulance,
        tone: Tone::Destructive,
        href: "/resources?type=ambulance",
    },
    QuickAccessCard {
        id: "icu",
        title: "ICU Beds",
        description: "Available beds",
        icon: Icon::Bed,
        tone: Tone::Primary,
        href: "/resources?type=icu",
    },
    QuickAccessCard {
        id: "oxygen",
        title: "Oxygen",
        description: "Oxygen supply",
        icon: Icon::Wind,
        tone: Tone::Accent,
        href: "/resources?type=oxygen",
    },
    QuickAccessCard {
        id: "blood",
        title: "Blood Units",
        description: "Blood bank",
        icon: Icon::Droplets,
        tone: Tone::Secondary,
        href: "/resources?type=blood",
    },
];

pub const CATEGORIES: [Category; 4] = [
    Category { label: "Cardiology", icon: Icon::Heart, tone: Tone::Destructive },
    Category { label: "General", icon: Icon::Stethoscope, tone: Tone::Primary },
    Category { label: "Nearby", icon: Icon::MapPin, tone: Tone::Secondary },
    Category { label: "Telehealth", icon: Icon::Phone, tone: Tone::Accent },
];

pub const INSIGHTS: [Insight; 3] = [
    Insight { value: "98%", label: "Health Score" },
    Insight { value: "3", label: "Consultations" },
    Insight { value: "12", label: "Prescriptions" },
];

pub const RECENT_ACTIVITY: [Activity; 3] = [
    Activity {
        title: "Video Consultation",
        detail: "Dr. Smith - Completed",
        icon: Icon::Phone,
        tone: Tone::Success,
        badge: "4.8",
        when: "2 hours ago",
    },
    Activity {
        title: "Ambulance Booking",
        detail: "City Hospital - Delivered",
        icon: Icon::MapPin,
        tone: Tone::Primary,
        badge: "15 min",
        when: "Yesterday",
    },
    Activity {
        title: "Health Checkup",
        detail: "Scheduled for next week",
        icon: Icon::Calendar,
        tone: Tone::Accent,
        badge: "Upcoming",
        when: "Mar 15",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeView {
    pub greeting: String,
    pub avatar_initial: Option<char>,
    pub subtitle: &'static str,
    pub presence: &'static str,
    pub sos_title: &'static str,
    pub sos_subtitle: &'static str,
    pub sos_action: &'static str,
    pub quick_access: [QuickAccessCard; 4],
    pub categories: [Category; 4],
    pub insights: [Insight; 3],
    pub recent_activity: [Activity; 3],
}

pub struct HomeScreen {
    user_name: String,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new("Sarah")
    }
}

impl HomeScreen {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }

    /// "Request Emergency Help".
    pub fn request_help(&self) -> NavIntent {
        NavIntent::Go(Route::Emergency)
    }

    /// Tap on a quick-access card.  `None` for an unknown card id.
    pub fn open_quick_access(&self, id: &str) -> Option<NavIntent> {
        let card = QUICK_ACCESS.iter().find(|c| c.id == id)?;
        Route::parse(card.href).ok().map(NavIntent::Go)
    }

    pub fn view(&self) -> HomeView {
        HomeView {
            greeting: format!("Hello, {}!", self.user_name),
            avatar_initial: self.user_name.chars().next(),
            subtitle: "Your health companion is ready",
            presence: "Online",
            sos_title: "Emergency SOS",
            sos_subtitle: "Get immediate help in crisis",
            sos_action: "Request Emergency Help",
            quick_access: QUICK_ACCESS,
            categories: CATEGORIES,
            insights: INSIGHTS,
            recent_activity: RECENT_ACTIVITY,
        }
    }
}
