//! # Domain Layer
//!
//! Pure logic for RT header signing. No clock reads, no randomness, no I/O.

pub mod canonical;
pub mod config;
pub mod errors;
pub mod headers;
pub mod signature;
