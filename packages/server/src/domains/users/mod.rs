//! Users domain - credential workflow, profiles, phone verification.

pub mod actions;
pub mod models;
