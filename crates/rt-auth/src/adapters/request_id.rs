//! Request id adapters.
//!
//! Production ids are UUID v4 in the 32-char "simple" form, which is what the
//! eSIM access API documents for `RT-RequestID`.

use uuid::Uuid;

use crate::ports::outbound::RequestIdGenerator;

/// Random UUID v4 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestIdGenerator;

impl RequestIdGenerator for UuidRequestIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Always returns the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRequestId(String);

impl FixedRequestId {
    /// Create a generator that always yields `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl RequestIdGenerator for FixedRequestId {
    fn next_id(&self) -> String {
        self.0.clone()
    }
}
