// REST route handlers. POST with JSON bodies throughout, matching the
// client's wire format.
pub mod events;
pub mod health;
pub mod logs;
pub mod users;

pub use events::*;
pub use health::*;
pub use logs::*;
pub use users::*;
