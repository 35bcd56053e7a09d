// Business domains
pub mod audit;
pub mod auth;
pub mod events;
pub mod users;
