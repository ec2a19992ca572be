use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 通知サービスポート
///
/// 利用者への通知配信メカニズムを抽象化する。
/// 画面ではトースト表示、テストでは記録用のモックになる。
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// 予約作成の通知
    ///
    /// 予約がストアに登録された直後に呼ばれる。
    async fn send_booking_created(&self, guest_name: &str, hotel_name: &str) -> Result<()>;

    /// 予約削除の通知
    ///
    /// 選択中の予約が削除された直後に呼ばれる。
    async fn send_booking_deleted(&self, guest_name: &str, hotel_name: &str) -> Result<()>;
}
