use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{BookingId, GuestCount, RoomType};

/// 新規フォームの宿泊人数の初期値
pub const DEFAULT_GUESTS: f64 = 2.0;

/// 予約集約 - 1件のホテル予約
///
/// 作成後は不変。更新操作は存在しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    // 識別子
    pub id: BookingId,

    // 予約内容
    pub guest_name: String,
    pub hotel_name: String,
    pub room_type: RoomType,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: GuestCount,

    // 監査情報（エポックミリ秒）
    pub created_at: i64,
}

/// 予約フォームの下書き
///
/// 入力ウィジェットが返すままの値を保持する。
/// - 日付は `yyyy-mm-dd` 文字列（空文字は未入力）
/// - 人数は数値入力欄の値（数値でなければ NaN）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub guest_name: String,
    pub hotel_name: String,
    pub room_type: RoomType,
    pub check_in: String,
    pub check_out: String,
    pub guests: f64,
}

impl Default for NewBooking {
    fn default() -> Self {
        Self {
            guest_name: String::new(),
            hotel_name: String::new(),
            room_type: RoomType::default(),
            check_in: String::new(),
            check_out: String::new(),
            guests: DEFAULT_GUESTS,
        }
    }
}

/// 検証済みの予約入力
///
/// `validation::validate_booking` だけが生成できる。
/// ストアはこの型しか受け付けないため、未検証の入力は登録できない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    guest_name: String,
    hotel_name: String,
    room_type: RoomType,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: GuestCount,
}

impl ValidatedBooking {
    pub(in crate::domain) fn new(
        guest_name: String,
        hotel_name: String,
        room_type: RoomType,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: GuestCount,
    ) -> Self {
        Self {
            guest_name,
            hotel_name,
            room_type,
            check_in,
            check_out,
            guests,
        }
    }

    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    pub fn hotel_name(&self) -> &str {
        &self.hotel_name
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn guests(&self) -> GuestCount {
        self.guests
    }
}

/// 純粋関数：予約を作成する
///
/// IDと作成時刻は呼び出し側（ストア）が採番して渡す。
/// 副作用なし。
pub fn create_booking(input: ValidatedBooking, id: BookingId, created_at: i64) -> Booking {
    Booking {
        id,
        guest_name: input.guest_name,
        hotel_name: input.hotel_name,
        room_type: input.room_type,
        check_in: input.check_in,
        check_out: input.check_out,
        guests: input.guests,
        created_at,
    }
}

/// 一覧表示の並び順
///
/// - 第1キー：チェックイン日の昇順
/// - 第2キー：作成時刻の降順（同日なら新しい予約が先）
pub fn compare_for_listing(a: &Booking, b: &Booking) -> Ordering {
    a.check_in
        .cmp(&b.check_in)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// 保持順を変えずに、一覧表示順に並べた参照を返す
pub fn sort_for_listing(bookings: &[Booking]) -> Vec<&Booking> {
    let mut sorted: Vec<&Booking> = bookings.iter().collect();
    sorted.sort_by(|a, b| compare_for_listing(a, b));
    sorted
}
