//! Entities

pub mod user;

pub use user::{NewUser, ProfileChanges, User};
