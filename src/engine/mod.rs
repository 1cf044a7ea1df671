pub mod dispatcher;
pub mod error;
pub mod pool;
pub mod retry;
pub mod stats;
pub mod summary;

// Re-export commonly used types
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::EngineError;
pub use pool::{PoolReport, RunningPool, WorkerPool, WorkerReport};
pub use retry::RetryPolicy;
pub use stats::{PipelineStats, StatsSnapshot};
pub use summary::SummaryAggregator;
