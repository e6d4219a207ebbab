//! System-level modules
//!
//! Process plumbing that sits outside the redirect engine:
//! - Logging initialization

pub mod logging;

pub use logging::init_logging;
