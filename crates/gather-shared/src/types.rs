//! Common types

use chrono::Utc;

/// Entity identifier as assigned by the platform API.
pub type EntityId = i64;

/// Milliseconds since the Unix epoch, the unit token expirations are
/// expressed in on the wire.
pub type EpochMillis = i64;

pub fn now_millis() -> EpochMillis {
    Utc::now().timestamp_millis()
}
