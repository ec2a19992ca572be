pub mod clock;
pub mod id_generator;
pub mod notification_service;

pub use clock::ManualClock;
pub use id_generator::{FixedIdGenerator, SequentialIdGenerator};
pub use notification_service::{NotificationService, SentNotification};
