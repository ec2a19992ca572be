use std::collections::BTreeSet;

use crate::application::booking::{
    BookingApplicationError, Result, ServiceDependencies, submit_booking,
};
use crate::domain::booking::NewBooking;
use crate::domain::validation::{self, BookingField, FieldErrors};
use crate::domain::{BookingId, RoomType};

pub const SUBMIT_LABEL: &str = "Create booking";
pub const SUBMITTING_LABEL: &str = "Creating...";

/// 予約フォームの状態
///
/// 下書きと操作済み（touched）の項目を持つ。
/// エラーは毎回下書きから計算し、操作済みの項目にだけ表示する。
/// 送信中の状態は `ServiceDependencies` が持つので、送信を待っている間も外から見える。
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    value: NewBooking,
    touched: BTreeSet<BookingField>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &NewBooking {
        &self.value
    }

    pub fn set_guest_name(&mut self, guest_name: impl Into<String>) {
        self.value.guest_name = guest_name.into();
    }

    pub fn set_hotel_name(&mut self, hotel_name: impl Into<String>) {
        self.value.hotel_name = hotel_name.into();
    }

    pub fn set_room_type(&mut self, room_type: RoomType) {
        self.value.room_type = room_type;
    }

    pub fn set_check_in(&mut self, check_in: impl Into<String>) {
        self.value.check_in = check_in.into();
    }

    pub fn set_check_out(&mut self, check_out: impl Into<String>) {
        self.value.check_out = check_out.into();
    }

    pub fn set_guests(&mut self, guests: f64) {
        self.value.guests = guests;
    }

    /// 数値入力欄の生の値を反映する
    ///
    /// 空欄は0、数値として読めない値は NaN になる。
    pub fn set_guests_input(&mut self, raw: &str) {
        let raw = raw.trim();
        self.value.guests = if raw.is_empty() {
            0.0
        } else {
            raw.parse().unwrap_or(f64::NAN)
        };
    }

    /// 項目からフォーカスが外れた
    pub fn touch(&mut self, field: BookingField) {
        self.touched.insert(field);
    }

    pub fn touch_all(&mut self) {
        self.touched.extend(BookingField::ALL);
    }

    pub fn is_touched(&self, field: BookingField) -> bool {
        self.touched.contains(&field)
    }

    pub fn errors(&self) -> FieldErrors {
        validation::validate(&self.value)
    }

    /// 表示すべきエラー（操作済みの項目のみ）
    pub fn visible_error(&self, field: BookingField) -> Option<String> {
        if !self.is_touched(field) {
            return None;
        }
        self.errors().get(field).map(str::to_string)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// 送信ボタンが押せるか
    ///
    /// 送信中かどうかは依存関係側の共有フラグで判定する。
    pub fn can_submit(&self, deps: &ServiceDependencies) -> bool {
        self.is_valid() && !deps.is_submitting()
    }

    /// 下書き・操作済み項目を初期状態に戻す
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// フォームを送信する
    ///
    /// すべての項目を操作済みにしてから検証する。
    /// 検証に通らなければ送信せず、エラーを返す（下書きはそのまま）。
    /// ストアへの登録が済んだら、通知に失敗した場合も含めてフォームを初期状態に戻す。
    pub async fn submit(&mut self, deps: &ServiceDependencies) -> Result<BookingId> {
        self.touch_all();

        let errors = self.errors();
        if !errors.is_empty() {
            return Err(BookingApplicationError::ValidationFailed(errors));
        }

        let result = submit_booking(deps, &self.value).await;

        let committed = match &result {
            Ok(_) => true,
            Err(err) => err.is_committed(),
        };
        if committed {
            self.reset();
        }
        result
    }
}

/// 送信ボタンの表示
pub fn submit_label(deps: &ServiceDependencies) -> &'static str {
    if deps.is_submitting() {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{ManualClock, NotificationService, SequentialIdGenerator};
    use crate::application::booking::{BookingStore, lock_store};
    use crate::config::AppConfig;
    use crate::domain::validation::{CHECK_OUT_NOT_AFTER_CHECK_IN, GUEST_NAME_REQUIRED};
    use std::sync::Arc;
    use std::time::Duration;

    fn deps_with(config: AppConfig) -> (ServiceDependencies, Arc<NotificationService>) {
        let store = BookingStore::new(
            Arc::new(ManualClock::new(0)),
            Arc::new(SequentialIdGenerator::new()),
        )
        .into_shared();
        let notifications = Arc::new(NotificationService::new());
        let deps = ServiceDependencies::new(store, notifications.clone(), config);
        (deps, notifications)
    }

    fn deps() -> ServiceDependencies {
        deps_with(AppConfig::immediate()).0
    }

    fn filled_form() -> BookingForm {
        let mut form = BookingForm::new();
        form.set_guest_name(" Ada ");
        form.set_hotel_name("Harbour Grand");
        form.set_room_type(RoomType::Deluxe);
        form.set_check_in("2025-01-05");
        form.set_check_out("2025-01-08");
        form
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = BookingForm::new();
        assert!(!form.is_valid());
        assert_eq!(form.visible_error(BookingField::GuestName), None);

        form.touch(BookingField::GuestName);
        assert_eq!(
            form.visible_error(BookingField::GuestName).as_deref(),
            Some(GUEST_NAME_REQUIRED)
        );
        assert_eq!(form.visible_error(BookingField::HotelName), None);
    }

    #[test]
    fn test_errors_follow_edits() {
        let deps = deps();
        let mut form = filled_form();
        form.touch_all();
        assert!(form.can_submit(&deps));

        form.set_check_out("2025-01-04");
        assert_eq!(
            form.visible_error(BookingField::CheckOut).as_deref(),
            Some(CHECK_OUT_NOT_AFTER_CHECK_IN)
        );
        assert!(!form.can_submit(&deps));
    }

    #[test]
    fn test_guests_input_parsing() {
        let mut form = filled_form();

        form.set_guests_input("");
        assert!(form.errors().contains(BookingField::Guests));

        form.set_guests_input("two");
        assert!(form.value().guests.is_nan());
        assert!(form.errors().contains(BookingField::Guests));

        form.set_guests_input(" 4 ");
        assert_eq!(form.value().guests, 4.0);
        assert!(form.is_valid());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submitting_state_is_visible_while_in_flight() {
        let (deps, _notifications) = deps_with(AppConfig::default());
        let other = filled_form();
        assert_eq!(submit_label(&deps), SUBMIT_LABEL);
        assert!(other.can_submit(&deps));

        let task = {
            let deps = deps.clone();
            let mut form = filled_form();
            tokio::spawn(async move { form.submit(&deps).await })
        };
        tokio::task::yield_now().await;

        assert!(deps.is_submitting());
        assert_eq!(submit_label(&deps), SUBMITTING_LABEL);
        assert!(!other.can_submit(&deps));

        task.await.unwrap().unwrap();

        assert_eq!(submit_label(&deps), SUBMIT_LABEL);
        assert!(other.can_submit(&deps));
    }

    #[tokio::test]
    async fn test_submit_invalid_form_touches_everything() {
        let deps = deps();
        let mut form = BookingForm::new();
        form.set_guest_name("Ada");

        let err = form.submit(&deps).await.unwrap_err();

        assert!(matches!(err, BookingApplicationError::ValidationFailed(_)));
        assert!(BookingField::ALL.iter().all(|f| form.is_touched(*f)));
        assert_eq!(form.value().guest_name, "Ada");
        assert!(lock_store(&deps.store).is_empty());
    }

    #[tokio::test]
    async fn test_submit_valid_form_resets() {
        let deps = deps();
        let mut form = filled_form();

        let id = form.submit(&deps).await.unwrap();

        assert_eq!(
            lock_store(&deps.store).find(id).map(|b| b.guest_name.clone()),
            Some("Ada".to_string())
        );
        assert_eq!(form.value(), &NewBooking::default());
        assert!(!form.is_touched(BookingField::GuestName));
        assert!(!deps.is_submitting());
    }

    #[tokio::test]
    async fn test_form_resets_when_only_notification_fails() {
        let (deps, notifications) = deps_with(AppConfig::immediate());
        notifications.fail_next();
        let mut form = filled_form();

        let err = form.submit(&deps).await.unwrap_err();

        assert!(err.is_committed());
        assert_eq!(lock_store(&deps.store).len(), 1);
        // 同じ下書きを再送信して重複登録しないよう、フォームは空に戻る
        assert_eq!(form.value(), &NewBooking::default());
        assert!(!form.can_submit(&deps));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_submit_commits_and_form_recovers() {
        let (deps, _notifications) = deps_with(AppConfig::default());
        let mut form = filled_form();

        let abandoned = tokio::time::timeout(Duration::from_millis(100), form.submit(&deps)).await;
        assert!(abandoned.is_err());
        assert!(!form.can_submit(&deps));

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(lock_store(&deps.store).len(), 1);
        assert!(form.can_submit(&deps));
        form.submit(&deps).await.unwrap();
        assert_eq!(lock_store(&deps.store).len(), 2);
    }
}
