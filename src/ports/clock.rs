/// 時計ポート
///
/// 予約の作成時刻を採番する。テストでは固定時刻に差し替える。
pub trait Clock: Send + Sync {
    /// 現在時刻（Unixエポックからのミリ秒）
    fn now_millis(&self) -> i64;
}
