pub mod error;
pub mod handlers;
pub mod parse;
pub mod routes;

// Re-export commonly used types
pub use error::ApiError;
pub use parse::{RawPayment, SummaryParams};
pub use routes::router;
