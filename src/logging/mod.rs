//! Console and log-file output for installer runs.
//!
//! Every backend renders the same lines: a `==>` header per program and one
//! status line per action.  [`Logger`] routes them through `tracing`,
//! [`MemoryLog`] keeps them for inspection.

mod file;
mod logger;
mod memory;
mod render;
mod subscriber;
mod types;

pub use logger::Logger;
pub use memory::MemoryLog;
pub use subscriber::init_subscriber;
pub use types::{ActionEntry, ActionStatus, Log, summarize};
