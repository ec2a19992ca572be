use serde::{Deserialize, Serialize};

use super::booking::Booking;
use super::BookingId;

/// イベント：予約が追加された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingAdded {
    pub booking: Booking,
}

/// イベント：予約が削除された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDeleted {
    pub booking_id: BookingId,
}

/// イベント：選択中の予約が変わった
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChanged {
    pub selected_booking_id: Option<BookingId>,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    BookingAdded(BookingAdded),
    BookingDeleted(BookingDeleted),
    SelectionChanged(SelectionChanged),
}
