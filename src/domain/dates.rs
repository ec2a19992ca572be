//! 日付ユーティリティ
//!
//! 検証と、宿泊期間を表示するすべての画面から使う。
//! どの関数も失敗しない。未入力や読めない値はダッシュ表示、または0泊として扱う。

use chrono::{DateTime, NaiveDate};

use super::DateError;

/// 日付入力欄の形式
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// 日付が無いときの表示
pub const DATE_PLACEHOLDER: &str = "—";

const DISPLAY_FORMAT: &str = "%b %-d, %Y";
const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// 日付として解釈できる値（`NaiveDate` または `yyyy-mm-dd` 形式の文字列）
pub trait ToCalendarDate {
    fn to_calendar_date(&self) -> Option<NaiveDate>;
}

impl ToCalendarDate for NaiveDate {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl ToCalendarDate for Option<NaiveDate> {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        *self
    }
}

impl ToCalendarDate for str {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(self).ok().flatten()
    }
}

impl ToCalendarDate for String {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        self.as_str().to_calendar_date()
    }
}

impl<T: ToCalendarDate + ?Sized> ToCalendarDate for &T {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        (**self).to_calendar_date()
    }
}

/// 日付入力欄の値を読む。空文字は未入力（`None`）。
pub fn parse_calendar_date(input: &str) -> Result<Option<NaiveDate>, DateError> {
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)
        .map(Some)
        .map_err(|_| DateError::Malformed(input.to_string()))
}

/// `Jan 5, 2025` 形式。日付が無ければダッシュ。
pub fn format_date(date: impl ToCalendarDate) -> String {
    match date.to_calendar_date() {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

/// 2つの日付の間の泊数
///
/// 負にはならない。どちらかが無ければ0。
pub fn nights_between(check_in: impl ToCalendarDate, check_out: impl ToCalendarDate) -> i64 {
    match (check_in.to_calendar_date(), check_out.to_calendar_date()) {
        (Some(check_in), Some(check_out)) => (check_out - check_in).num_days().max(0),
        _ => 0,
    }
}

/// `Jan 5, 2025 → Jan 8, 2025`
pub fn format_range(check_in: impl ToCalendarDate, check_out: impl ToCalendarDate) -> String {
    format!("{} → {}", format_date(check_in), format_date(check_out))
}

/// 作成日時（エポックからのミリ秒）を時刻付きで表示する。タイムゾーンはUTC。
pub fn format_created_at(created_at_millis: i64) -> String {
    match DateTime::from_timestamp_millis(created_at_millis) {
        Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}
