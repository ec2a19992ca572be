use crate::domain::value_objects::BookingId;
use crate::ports::IdGenerator;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// 連番でIDを払い出すモック
///
/// 1件目は `00000000-0000-0000-0000-000000000001`。
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> BookingId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        BookingId::from_uuid(Uuid::from_u128(u128::from(n)))
    }
}

/// 常に同じIDを返すモック（ID重複の検証用）
#[derive(Debug)]
pub struct FixedIdGenerator {
    id: BookingId,
}

impl FixedIdGenerator {
    pub fn new(id: BookingId) -> Self {
        Self { id }
    }
}

impl IdGenerator for FixedIdGenerator {
    fn next_id(&self) -> BookingId {
        self.id
    }
}
