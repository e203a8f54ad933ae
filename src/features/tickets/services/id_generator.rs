use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::features::tickets::models::TicketId;

/// Issues creation-time ticket ids
///
/// Ids are millisecond timestamps; two captures in the same millisecond get
/// consecutive values, so ids stay unique and strictly increasing.
#[derive(Debug, Default)]
pub struct TicketIdGenerator {
    last: AtomicI64,
}

impl TicketIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_at(&self, now: DateTime<Utc>) -> TicketId {
        let candidate = now.timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last + 1))
            })
            .unwrap_or_else(|last| last);

        TicketId(candidate.max(previous + 1))
    }
}
