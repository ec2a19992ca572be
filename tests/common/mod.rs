#![allow(dead_code)]

use hotel_bookings::adapters::mock::{ManualClock, NotificationService, SequentialIdGenerator};
use hotel_bookings::application::booking::{BookingStore, ServiceDependencies};
use hotel_bookings::config::AppConfig;
use hotel_bookings::domain::RoomType;
use hotel_bookings::domain::booking::NewBooking;
use std::sync::Arc;

/// テスト開始時刻（2025-01-05T14:30:00Z）
pub const TEST_NOW_MILLIS: i64 = 1_736_087_400_000;

/// テスト用の依存関係
///
/// 時計と採番器は決定的なモック、通知は記録用モックを使う。
pub struct TestContext {
    pub deps: ServiceDependencies,
    pub clock: Arc<ManualClock>,
    pub notifications: Arc<NotificationService>,
}

pub fn create_test_context(config: AppConfig) -> TestContext {
    let clock = Arc::new(ManualClock::new(TEST_NOW_MILLIS));
    let notifications = Arc::new(NotificationService::new());
    let store = BookingStore::new(clock.clone(), Arc::new(SequentialIdGenerator::new())).into_shared();

    TestContext {
        deps: ServiceDependencies::new(store, notifications.clone(), config),
        clock,
        notifications,
    }
}

/// 検証を通る下書き
pub fn draft(guest_name: &str, check_in: &str, check_out: &str) -> NewBooking {
    NewBooking {
        guest_name: guest_name.to_string(),
        hotel_name: "Harbour Grand".to_string(),
        room_type: RoomType::Standard,
        check_in: check_in.to_string(),
        check_out: check_out.to_string(),
        guests: 2.0,
    }
}
