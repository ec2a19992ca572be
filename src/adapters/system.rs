use crate::domain::value_objects::BookingId;
use crate::ports::{Clock, IdGenerator};
use chrono::Utc;

/// `chrono::Utc` による実時計
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// UUID v4による予約ID採番
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> BookingId {
        BookingId::new()
    }
}
