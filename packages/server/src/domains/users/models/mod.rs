pub mod user;

pub use user::{User, UserSummary, DEFAULT_PFP_URL};
