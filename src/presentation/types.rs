use serde::Serialize;
use uuid::Uuid;

use crate::application::booking::BookingStore;
use crate::domain::booking::Booking;
use crate::domain::dates::{format_created_at, format_date, format_range, nights_between};

/// 一覧が空のときの表示
pub const EMPTY_LIST_MESSAGE: &str = "No bookings yet.";

/// 詳細パネルで何も選択されていないときの表示
pub const NO_SELECTION_MESSAGE: &str = "Select a booking to view details.";

/// "1 night" / "3 nights"
pub fn nights_label(nights: i64) -> String {
    format!("{} night{}", nights, if nights == 1 { "" } else { "s" })
}

/// 詳細パネルの泊数バッジ（単複を区別しない）
pub fn nights_badge(nights: i64) -> String {
    format!("{} nights", nights)
}

/// "1 guest" / "2 guests"
pub fn guests_label(guests: u32) -> String {
    format!("{} guest{}", guests, if guests == 1 { "" } else { "s" })
}

/// 一覧の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingListItem {
    pub booking_id: Uuid,
    pub guest_name: String,
    pub hotel_name: String,
    pub room_type: String,
    pub date_range: String,
    pub nights: String,
    pub guests: String,
    pub selected: bool,
}

impl BookingListItem {
    pub fn new(booking: &Booking, selected: bool) -> Self {
        Self {
            booking_id: booking.id.value(),
            guest_name: booking.guest_name.clone(),
            hotel_name: booking.hotel_name.clone(),
            room_type: booking.room_type.to_string(),
            date_range: format_range(booking.check_in, booking.check_out),
            nights: nights_label(nights_between(booking.check_in, booking.check_out)),
            guests: guests_label(booking.guests.value()),
            selected,
        }
    }
}

/// 予約一覧（表示順に並べ済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingListView {
    pub items: Vec<BookingListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl BookingListView {
    pub fn from_store(store: &BookingStore) -> Self {
        let selected = store.selected_booking_id();
        let items: Vec<BookingListItem> = store
            .sorted_bookings()
            .into_iter()
            .map(|b| BookingListItem::new(b, Some(b.id) == selected))
            .collect();
        let empty_message = items.is_empty().then(|| EMPTY_LIST_MESSAGE.to_string());

        Self {
            items,
            empty_message,
        }
    }
}

/// 詳細パネルの1行（ラベルと値）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

impl DetailRow {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// 選択中の予約の詳細
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingDetailView {
    pub booking_id: Uuid,
    pub guest_name: String,
    pub hotel_name: String,
    pub room_type: String,
    pub nights: String,
    pub rows: Vec<DetailRow>,
}

impl From<&Booking> for BookingDetailView {
    fn from(booking: &Booking) -> Self {
        let rows = vec![
            DetailRow::new("Date range", format_range(booking.check_in, booking.check_out)),
            DetailRow::new("Check-in", format_date(booking.check_in)),
            DetailRow::new("Check-out", format_date(booking.check_out)),
            DetailRow::new("Guests", guests_label(booking.guests.value())),
            DetailRow::new("Created", format_created_at(booking.created_at)),
        ];

        Self {
            booking_id: booking.id.value(),
            guest_name: booking.guest_name.clone(),
            hotel_name: booking.hotel_name.clone(),
            room_type: booking.room_type.to_string(),
            nights: nights_badge(nights_between(booking.check_in, booking.check_out)),
            rows,
        }
    }
}

impl BookingDetailView {
    /// 選択中の予約があれば詳細を返す
    pub fn from_store(store: &BookingStore) -> Option<Self> {
        store.selected_booking().map(Self::from)
    }
}
