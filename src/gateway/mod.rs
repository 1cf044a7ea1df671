pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use error::GatewayError;
pub use http::{HttpProcessorGateway, ProcessorEndpoints};
pub use traits::ProcessorGateway;
