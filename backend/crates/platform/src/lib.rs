//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure random tokens)
//! - Cookie management
//! - Object storage client (profile image uploads)

pub mod cookie;
pub mod crypto;
pub mod storage;
