pub mod clock;
pub mod id_generator;
pub mod notification_service;

pub use clock::*;
pub use id_generator::*;
pub use notification_service::NotificationService;
