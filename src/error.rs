//! Unified error types for the MedMap crate.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level error handling uniform.  All variants are `Copy`.
//!
//! The emergency simulator itself has no failure path; these errors come
//! from the edges: configuration, fixture data, route parsing and the
//! demo's action scripts.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
    /// Demo fixture data could not be loaded.
    Fixture(FixtureError),
    /// A navigation path could not be resolved to a screen.
    Route(RouteError),
    /// A scripted UI action could not be parsed.
    Script(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Fixture(e) => write!(f, "fixture: {e}"),
            Self::Route(e) => write!(f, "route: {e}"),
            Self::Script(msg) => write!(f, "script: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Fixture errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureError {
    /// The embedded fixture document is not valid JSON for the schema.
    Malformed,
    /// A cross-reference names a record the document does not contain.
    Missing { what: &'static str, id: u32 },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed fixture document"),
            Self::Missing { what, id } => write!(f, "{what} id {id} matches no record"),
        }
    }
}

impl From<FixtureError> for Error {
    fn from(e: FixtureError) -> Self {
        Self::Fixture(e)
    }
}

// ---------------------------------------------------------------------------
// Route errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Path is empty or does not start with `/`.
    NotAbsolute,
    /// Path does not name any screen.
    UnknownPath,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAbsolute => write!(f, "path must start with '/'"),
            Self::UnknownPath => write!(f, "unknown path"),
        }
    }
}

impl From<RouteError> for Error {
    fn from(e: RouteError) -> Self {
        Self::Route(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_the_concern() {
        assert_eq!(
            Error::from(RouteError::UnknownPath).to_string(),
            "route: unknown path"
        );
        assert_eq!(
            Error::from(FixtureError::Missing {
                what: "consulting doctor",
                id: 99
            })
            .to_string(),
            "fixture: consulting doctor id 99 matches no record"
        );
        assert_eq!(Error::Config("bad").to_string(), "config: bad");
        assert_eq!(
            Error::Script("unknown action").to_string(),
            "script: unknown action"
        );
    }
}
