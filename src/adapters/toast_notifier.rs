use crate::application::toast::{ToastInput, ToastQueue, ToastVariant};
use crate::ports::notification_service::{NotificationService as NotificationServiceTrait, Result};
use async_trait::async_trait;

/// 通知をトーストとして表示するNotificationService
#[derive(Clone)]
pub struct ToastNotificationService {
    queue: ToastQueue,
}

impl ToastNotificationService {
    pub fn new(queue: ToastQueue) -> Self {
        Self { queue }
    }

    pub fn queue(&self) -> &ToastQueue {
        &self.queue
    }
}

#[async_trait]
impl NotificationServiceTrait for ToastNotificationService {
    async fn send_booking_created(&self, guest_name: &str, hotel_name: &str) -> Result<()> {
        self.queue.toast(
            ToastInput::new("Booking created")
                .description(format!("{} at {}", guest_name, hotel_name))
                .variant(ToastVariant::Success),
        );
        Ok(())
    }

    async fn send_booking_deleted(&self, guest_name: &str, hotel_name: &str) -> Result<()> {
        self.queue.toast(
            ToastInput::new("Booking deleted")
                .description(format!("{} at {}", guest_name, hotel_name))
                .variant(ToastVariant::Destructive),
        );
        Ok(())
    }
}
