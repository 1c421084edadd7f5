//! MedMap library.
//!
//! Screen view-models, navigation and the emergency dispatch simulator of
//! the MedMap assistance app.  Everything is driven by simulated time, so
//! the whole app can be exercised deterministically from tests or from
//! the `medmap` demo binary.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod directory;
pub mod error;
pub mod fsm;
pub mod navigation;
pub mod scheduler;
pub mod screens;
pub mod shell;
