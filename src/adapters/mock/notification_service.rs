use crate::ports::notification_service::{NotificationService as NotificationServiceTrait, Result};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};

/// 記録された通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentNotification {
    BookingCreated { guest_name: String, hotel_name: String },
    BookingDeleted { guest_name: String, hotel_name: String },
}

/// NotificationServiceのモック実装
///
/// 何も表示しない。
/// 送った通知をすべて記録し、次の1回を失敗させることもできる。
#[derive(Debug, Default)]
pub struct NotificationService {
    sent: Mutex<Vec<SentNotification>>,
    fail_next: AtomicBool,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録済みの通知（古い順）
    pub fn sent(&self) -> Vec<SentNotification> {
        self.lock_sent().clone()
    }

    /// 次の通知を失敗させる
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn lock_sent(&self) -> MutexGuard<'_, Vec<SentNotification>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, notification: SentNotification) -> Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err("mock notification failure".into());
        }
        self.lock_sent().push(notification);
        Ok(())
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn send_booking_created(&self, guest_name: &str, hotel_name: &str) -> Result<()> {
        self.record(SentNotification::BookingCreated {
            guest_name: guest_name.to_string(),
            hotel_name: hotel_name.to_string(),
        })
    }

    async fn send_booking_deleted(&self, guest_name: &str, hotel_name: &str) -> Result<()> {
        self.record(SentNotification::BookingDeleted {
            guest_name: guest_name.to_string(),
            hotel_name: hotel_name.to_string(),
        })
    }
}
