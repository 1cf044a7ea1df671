pub mod admission;
pub mod error;

// Re-export commonly used types
pub use admission::{AdmissionQueue, QueuedPayment};
pub use error::AdmissionError;
