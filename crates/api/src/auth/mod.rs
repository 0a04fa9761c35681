//! Group password hashing.

pub mod password;
