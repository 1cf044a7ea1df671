//! Prelude module for convenient imports
//!
//! Import everything you need with: `use payrelay::prelude::*;`

// Domain types
pub use crate::domain::{
    Amount, DispatchRecord, DomainError, OutcomeEntry, PaymentRequest, PaymentsSummary, Processor,
    ProcessorSummary, TimeWindow,
};

// Storage types
pub use crate::storage::{ConcurrentOutcomeStore, InsertOutcome, OutcomeStore, StorageError};

// Queue types
pub use crate::queue::{AdmissionError, AdmissionQueue, QueuedPayment};

// Gateway types
pub use crate::gateway::{GatewayError, HttpProcessorGateway, ProcessorEndpoints, ProcessorGateway};

// Engine types
pub use crate::engine::{
    DispatchOutcome, Dispatcher, EngineError, PipelineStats, PoolReport, RetryPolicy,
    RunningPool, StatsSnapshot, SummaryAggregator, WorkerPool,
};

// HTTP types
pub use crate::http::{ApiError, router};

// App types
pub use crate::app::{AppConfig, AppContext, AppError, ConfigError, ServerApp};
