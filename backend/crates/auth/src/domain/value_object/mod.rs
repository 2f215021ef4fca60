//! Value Object Module

pub mod avatar_path;
pub mod email;
pub mod user_name;
pub mod user_password;
