//! Payment relay: admits payments over HTTP under backpressure, dispatches
//! them to a default or fallback processor from a worker pool, and serves
//! per-processor totals over time windows.

pub mod app;
pub mod domain;
pub mod engine;
pub mod gateway;
pub mod http;
pub mod prelude;
pub mod queue;
pub mod storage;
