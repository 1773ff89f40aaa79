//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that callers use to sign requests
//! - **Outbound (Driven)**: Capabilities the signer needs (time, ids, encoding)

pub mod inbound;
pub mod outbound;
