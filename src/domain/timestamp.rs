// src/domain/timestamp.rs
use chrono::{DateTime, SubsecRound, Utc};

/// Current time at millisecond precision, the resolution `lastEdited` is stored with.
///
/// Stamping with this keeps in-memory records equal to what the next process reads back.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
