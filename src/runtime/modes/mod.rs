//! Mode routing
//!
//! The binary has a single long-running mode, the HTTP server.

pub mod server;

pub use server::run_server;
