use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::booking::{NewBooking, ValidatedBooking};
use super::dates::parse_calendar_date;
use super::GuestCount;

pub const GUEST_NAME_REQUIRED: &str = "Guest name is required.";
pub const HOTEL_NAME_REQUIRED: &str = "Hotel name is required.";
pub const CHECK_IN_REQUIRED: &str = "Check-in date is required.";
pub const CHECK_IN_INVALID: &str = "Check-in date is invalid.";
pub const CHECK_OUT_REQUIRED: &str = "Check-out date is required.";
pub const CHECK_OUT_INVALID: &str = "Check-out date is invalid.";
pub const CHECK_OUT_NOT_AFTER_CHECK_IN: &str = "Check-out must be after check-in.";

/// フォームの入力項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    GuestName,
    HotelName,
    RoomType,
    CheckIn,
    CheckOut,
    Guests,
}

impl BookingField {
    pub const ALL: [BookingField; 6] = [
        BookingField::GuestName,
        BookingField::HotelName,
        BookingField::RoomType,
        BookingField::CheckIn,
        BookingField::CheckOut,
        BookingField::Guests,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::GuestName => "guest_name",
            BookingField::HotelName => "hotel_name",
            BookingField::RoomType => "room_type",
            BookingField::CheckIn => "check_in",
            BookingField::CheckOut => "check_out",
            BookingField::Guests => "guests",
        }
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 項目ごとのエラーメッセージ
///
/// キーが無い項目は有効。空ならフォームは送信可能。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<BookingField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: BookingField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: BookingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: BookingField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookingField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// 純粋関数：予約の下書きを検証する
///
/// すべてのルールを独立に評価する（途中で打ち切らない）。
pub fn validate(draft: &NewBooking) -> FieldErrors {
    validate_booking(draft).err().unwrap_or_default()
}

/// 純粋関数：下書きを検証し、通れば検証済み入力に変換する
///
/// ビジネスルール：
/// - 宿泊者名・ホテル名は前後の空白を除いて空でないこと
/// - チェックイン日・チェックアウト日が入力済みで、日付として読めること
/// - チェックアウト日はチェックイン日より後であること（エラーはチェックアウト側）
/// - 宿泊人数は1以上の整数であること
///
/// 名前は前後の空白を除去した値で登録される。
pub fn validate_booking(draft: &NewBooking) -> Result<ValidatedBooking, FieldErrors> {
    let mut errors = FieldErrors::new();

    let guest_name = draft.guest_name.trim();
    if guest_name.is_empty() {
        errors.insert(BookingField::GuestName, GUEST_NAME_REQUIRED);
    }

    let hotel_name = draft.hotel_name.trim();
    if hotel_name.is_empty() {
        errors.insert(BookingField::HotelName, HOTEL_NAME_REQUIRED);
    }

    let check_in = match parse_calendar_date(&draft.check_in) {
        Ok(Some(date)) => Some(date),
        Ok(None) => {
            errors.insert(BookingField::CheckIn, CHECK_IN_REQUIRED);
            None
        }
        Err(_) => {
            errors.insert(BookingField::CheckIn, CHECK_IN_INVALID);
            None
        }
    };

    let check_out = match parse_calendar_date(&draft.check_out) {
        Ok(Some(date)) => Some(date),
        Ok(None) => {
            errors.insert(BookingField::CheckOut, CHECK_OUT_REQUIRED);
            None
        }
        Err(_) => {
            errors.insert(BookingField::CheckOut, CHECK_OUT_INVALID);
            None
        }
    };

    if matches!((check_in, check_out), (Some(check_in), Some(check_out)) if check_out <= check_in) {
        errors.insert(BookingField::CheckOut, CHECK_OUT_NOT_AFTER_CHECK_IN);
    }

    let guests = GuestCount::from_input(draft.guests);
    if let Err(err) = &guests {
        errors.insert(BookingField::Guests, err.to_string());
    }

    match (check_in, check_out, guests) {
        (Some(check_in), Some(check_out), Ok(guests)) if errors.is_empty() => {
            Ok(ValidatedBooking::new(
                guest_name.to_string(),
                hotel_name.to_string(),
                draft.room_type,
                check_in,
                check_out,
                guests,
            ))
        }
        _ => Err(errors),
    }
}
