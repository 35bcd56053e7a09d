//! Events domain - the event aggregate: CRUD, the attendance workflow, and
//! comment threads. One event row owns its attendance lists and comments;
//! every mutation is load, change in memory, persist whole.

pub mod actions;
pub mod models;
