// We Meet Offline - API Core
//
// This crate provides the backend API for an event-organizing social
// application: accounts, events, attendance approval, and comment threads.
// Every operation is a single request-scoped read/modify/write against the
// database, guarded by ownership checks.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
