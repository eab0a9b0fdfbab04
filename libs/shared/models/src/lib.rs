pub mod auth;
pub mod error;
pub mod schedule;
pub mod slots;
