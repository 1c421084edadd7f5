//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter            | Implements     | Connects to                 |
//! |--------------------|----------------|-----------------------------|
//! | `static_directory` | DirectoryPort  | Embedded JSON fixtures      |
//! | `log_sink`         | EventSink      | `log` facade                |
//! | `recording_sink`   | EventSink      | In-memory event list        |

pub mod log_sink;
pub mod recording_sink;
pub mod static_directory;
