use thiserror::Error;
use tokio::task::JoinError;

use crate::domain::validation::FieldErrors;
use crate::domain::BookingId;

/// 予約ストアのエラー
///
/// 利用者向けではなく、ID採番器の不具合を示すロジック上の障害。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingStoreError {
    /// 採番したIDが既存の予約と重複し続けた
    #[error("Booking id collision: {0}")]
    IdCollision(BookingId),
}

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// 入力検証エラー（項目ごとのメッセージ付き）
    #[error("Booking input is invalid: {0}")]
    ValidationFailed(FieldErrors),

    /// 送信処理中の再送信
    #[error("A booking submission is already in progress")]
    SubmissionInProgress,

    /// ストアのエラー
    #[error("Booking store error")]
    Store(#[from] BookingStoreError),

    /// NotificationServiceのエラー
    #[error("Notification service error")]
    NotificationError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 登録タスクが完了しなかった（panicまたはランタイム終了）
    #[error("Booking submission task failed")]
    Interrupted(#[from] JoinError),
}

impl BookingApplicationError {
    /// ストアへの変更は反映済みで、通知だけが失敗したか
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::NotificationError(_))
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
