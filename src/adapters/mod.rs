pub mod mock;
pub mod system;
pub mod toast_notifier;

pub use system::{SystemClock, UuidIdGenerator};
pub use toast_notifier::ToastNotificationService;
