use crate::domain::value_objects::BookingId;

/// 予約ID採番ポート
///
/// 一意性は実装側の責務。ストアは重複を検出した場合に再採番する。
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> BookingId;
}
