//! Audit domain - append-only log sink for client-side events.

pub mod models;

pub use models::AuditLog;
