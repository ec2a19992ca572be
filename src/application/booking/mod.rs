mod booking_service;
mod errors;
mod store;

pub use booking_service::{
    ServiceDependencies, delete_booking, delete_selected_booking, select_booking, submit_booking,
};
pub use errors::{BookingApplicationError, BookingStoreError, Result};
pub use store::{BookingStore, SharedBookingStore, lock_store};
