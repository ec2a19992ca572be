pub mod booking;
pub mod toast;
