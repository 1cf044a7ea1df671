pub mod config;
pub mod context;
pub mod error;
pub mod server;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use context::AppContext;
pub use error::AppError;
pub use server::{ServerApp, wait_for_signal};
