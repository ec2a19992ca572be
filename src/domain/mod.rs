pub mod booking;
pub mod dates;
pub mod errors;
pub mod events;
pub mod validation;
pub mod value_objects;

pub use errors::*;
pub use events::*;
pub use value_objects::*;
