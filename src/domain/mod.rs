pub mod amount;
pub mod error;
pub mod payment;
pub mod summary;

// Re-export commonly used types
pub use amount::Amount;
pub use error::DomainError;
pub use payment::{DispatchRecord, OutcomeEntry, PaymentRequest, Processor};
pub use summary::{PaymentsSummary, ProcessorSummary, TimeWindow};
