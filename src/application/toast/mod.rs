mod queue;

pub use queue::{Toast, ToastHandle, ToastId, ToastInput, ToastQueue, ToastUpdate, ToastVariant};
