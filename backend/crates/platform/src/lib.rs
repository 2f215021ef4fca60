//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, PHC strings, zeroized plaintext)
//! - Session token signing and verification (HS256 JWT)

pub mod password;
pub mod token;
