//! Application core: pure domain logic, zero I/O.
//!
//! The emergency request simulator and the ports it talks through.
//! Fixture data, event output and timer notifications all cross the
//! boundary as **port traits** defined in [`ports`], so the core runs
//! under tests with recording adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
