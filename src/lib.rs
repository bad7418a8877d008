//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof and owns the pieces that
//! only the terminal binary needs, such as the JSON event log.

pub mod event_log;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use event_log::{EventLog, EventRecord};
