use thiserror::Error;

/// 日付入力のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// yyyy-mm-dd として解釈できない
    #[error("Malformed calendar date: {0:?}")]
    Malformed(String),
}

/// 宿泊人数のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuestCountError {
    /// 1未満、または数値でない
    #[error("Guests must be at least 1.")]
    BelowMinimum,
    /// 小数
    #[error("Guests must be a whole number.")]
    NotWhole,
    /// 表現できる上限を超えた
    #[error("Guests is too large.")]
    Overflow,
}
