pub mod form;
pub mod types;

pub use form::{BookingForm, SUBMIT_LABEL, SUBMITTING_LABEL, submit_label};
pub use types::{BookingDetailView, BookingListItem, BookingListView, DetailRow};
