use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::GuestCountError;

/// 予約ID - 予約集約の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 部屋タイプ
///
/// 入力ウィジェットが固定の選択肢しか出さないため、閉じた列挙型で表現する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomType {
    #[default]
    Standard,
    Deluxe,
    Suite,
}

impl RoomType {
    /// 選択肢の表示順
    pub const ALL: [RoomType; 3] = [RoomType::Standard, RoomType::Deluxe, RoomType::Suite];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "Standard",
            RoomType::Deluxe => "Deluxe",
            RoomType::Suite => "Suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Standard" => Ok(RoomType::Standard),
            "Deluxe" => Ok(RoomType::Deluxe),
            "Suite" => Ok(RoomType::Suite),
            other => Err(format!("Unknown room type: {}", other)),
        }
    }
}

/// 宿泊人数
///
/// 不変条件：1人以上。
/// 型システムでこの制約を強制し、0人の予約を作成できないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct GuestCount(u32);

impl GuestCount {
    pub const MIN: u32 = 1;

    pub fn new(value: u32) -> Result<Self, GuestCountError> {
        if value < Self::MIN {
            return Err(GuestCountError::BelowMinimum);
        }
        Ok(Self(value))
    }

    /// 数値入力欄の値から変換する
    ///
    /// # エラー
    /// - 非有限値・1未満: `BelowMinimum`
    /// - 小数: `NotWhole`
    /// - `u32`の範囲外: `Overflow`
    pub fn from_input(value: f64) -> Result<Self, GuestCountError> {
        if !value.is_finite() || value < f64::from(Self::MIN) {
            return Err(GuestCountError::BelowMinimum);
        }
        if value.fract() != 0.0 {
            return Err(GuestCountError::NotWhole);
        }
        if value > f64::from(u32::MAX) {
            return Err(GuestCountError::Overflow);
        }
        Ok(Self(value as u32))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for GuestCount {
    type Error = GuestCountError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GuestCount> for u32 {
    fn from(count: GuestCount) -> Self {
        count.0
    }
}

impl fmt::Display for GuestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
