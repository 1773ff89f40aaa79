//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.
//!
//! - `clock`: System time and a settable test clock
//! - `request_id`: UUID v4 ids and a fixed test id

pub mod clock;
pub mod request_id;
