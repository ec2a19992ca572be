use crate::config::AppConfig;
use crate::domain::booking::{Booking, NewBooking, ValidatedBooking};
use crate::domain::validation;
use crate::domain::BookingId;
use crate::ports::NotificationService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};
use super::store::{SharedBookingStore, lock_store};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 画面層の操作はすべてこの構造体を受け取る関数として実装する。
///
/// cloneしたインスタンスはストアと送信中フラグを共有する。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub store: SharedBookingStore,
    pub notification_service: Arc<dyn NotificationService>,
    pub config: AppConfig,
    submission_in_flight: Arc<AtomicBool>,
}

impl ServiceDependencies {
    pub fn new(
        store: SharedBookingStore,
        notification_service: Arc<dyn NotificationService>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            notification_service,
            config,
            submission_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 予約の送信処理中か
    pub fn is_submitting(&self) -> bool {
        self.submission_in_flight.load(Ordering::Acquire)
    }
}

/// 送信中フラグ。dropで解除される。
///
/// 登録タスクへ移動できるよう、共有フラグのArcを保持する。
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn begin(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 予約を送信する
///
/// 処理フロー：
/// 1. 下書きを検証する（失敗時は項目ごとのエラーを返す）
/// 2. 送信中フラグを立てる（処理中の再送信は拒否）
/// 3. 疑似的な通信待ちを入れる（必ず完了し、途中で失敗しない）
/// 4. ストアに登録する（新しい予約が選択状態になる）
/// 5. 作成完了を通知する
///
/// 3〜5は別タスクで実行する。呼び出し側がこのfutureを途中で破棄しても、
/// 待ち時間の後に登録と通知は必ず行われ、完了時に送信中フラグも解除される。
///
/// # 戻り値
/// 作成された予約のID
pub async fn submit_booking(deps: &ServiceDependencies, draft: &NewBooking) -> Result<BookingId> {
    // 1. 入力検証
    let validated =
        validation::validate_booking(draft).map_err(BookingApplicationError::ValidationFailed)?;

    // 2. 再送信の防止
    let in_flight = InFlight::begin(&deps.submission_in_flight)
        .ok_or(BookingApplicationError::SubmissionInProgress)?;

    // 3〜5. 破棄されても完走する登録タスク
    let task = tokio::spawn(commit_after_delay(deps.clone(), validated, in_flight));
    task.await?
}

async fn commit_after_delay(
    deps: ServiceDependencies,
    validated: ValidatedBooking,
    _in_flight: InFlight,
) -> Result<BookingId> {
    // 3. 疑似レイテンシ
    if !deps.config.submission_delay.is_zero() {
        tracing::debug!(
            delay_ms = deps.config.submission_delay.as_millis() as u64,
            "Waiting before committing booking"
        );
        tokio::time::sleep(deps.config.submission_delay).await;
    }

    // 4. ストアに登録（ロックはawaitをまたがない）
    let guest_name = validated.guest_name().to_string();
    let hotel_name = validated.hotel_name().to_string();
    let booking_id = lock_store(&deps.store).add_booking(validated)?;

    tracing::info!(booking_id = %booking_id, guest = %guest_name, hotel = %hotel_name, "Booking created");

    // 5. 通知
    deps.notification_service
        .send_booking_created(&guest_name, &hotel_name)
        .await
        .map_err(BookingApplicationError::NotificationError)?;

    Ok(booking_id)
}

/// 予約を削除する
///
/// 存在しないIDは何もせず `None` を返す（通知もしない）。
pub async fn delete_booking(deps: &ServiceDependencies, id: BookingId) -> Result<Option<Booking>> {
    let removed = lock_store(&deps.store).delete_booking(id);

    let Some(booking) = removed else {
        return Ok(None);
    };

    tracing::info!(booking_id = %booking.id, "Booking deleted");

    deps.notification_service
        .send_booking_deleted(&booking.guest_name, &booking.hotel_name)
        .await
        .map_err(BookingApplicationError::NotificationError)?;

    Ok(Some(booking))
}

/// 選択中の予約を削除する
///
/// 選択が無い、または選択IDに該当する予約が無い場合は何もしない。
pub async fn delete_selected_booking(deps: &ServiceDependencies) -> Result<Option<Booking>> {
    let selected = lock_store(&deps.store).selected_booking().map(|b| b.id);

    match selected {
        Some(id) => delete_booking(deps, id).await,
        None => Ok(None),
    }
}

/// 予約を選択する（存在確認なし）
pub fn select_booking(deps: &ServiceDependencies, id: BookingId) {
    lock_store(&deps.store).select_booking(id);
}
