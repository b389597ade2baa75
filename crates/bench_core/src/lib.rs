//! Core benchmark harness logic that remains independent of any GPU backend.
//!
//! This crate hosts:
//! - the workload partitioner and the per-iteration math term
//! - the [`ExecutionStrategy`] seam shared by the thread and device paths
//! - the timer/aggregator that turns partial sums into a [`BenchmarkReport`]

pub mod config;
pub mod error;
pub mod partition;
pub mod report;
pub mod strategy;
pub mod workload;

pub use config::BenchSettings;
pub use error::{BenchError, Result};
pub use partition::{Partition, WorkloadSpec};
pub use report::BenchmarkReport;
pub use strategy::{ExecutionResult, ExecutionStrategy, ThreadStrategy};
