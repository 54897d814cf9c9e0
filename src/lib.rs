// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # feagi-functrace
//!
//! Per-function tracing for FEAGI: structured log lines plus a fixed set of
//! Prometheus metrics (start count, end count, duration histogram, success
//! count, failure count), every sample labeled with the logical function name.
//!
//! One [`Tracer`] is created per module name at initialization (expensive:
//! registers five metric families, must happen at most once per module name
//! per registry). Traced functions then call the recording operations on the
//! shared handle; no per-call objects are allocated.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use feagi_functrace::{current_function, Tracer, TracerConfig};
//!
//! let tracer = Tracer::new("orders", TracerConfig::default())?;
//!
//! fn handle(tracer: &Tracer, trace_no: &str) {
//!     let func = current_function!();
//!     let start = tracer.start_function(func, trace_no);
//!     // ... business logic ...
//!     tracer.function_succeed(func, trace_no);
//!     tracer.end_function_with_duration_since(func, trace_no, start);
//! }
//! # Ok::<(), feagi_functrace::TracerError>(())
//! ```
//!
//! Hot call sites can pre-bind the label once at module load with
//! [`Tracer::for_function`] and skip the per-call label lookup.
//!
//! ## What this is not
//!
//! Not a distributed tracing system: no span trees, no cross-process trace
//! context, no sampling. The trace token is a caller-supplied correlation
//! string that only ever appears in log lines, never as a metric label.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod caller;
pub mod config;
pub mod init;
pub mod tracer;

mod metrics;
mod namespace;

pub use caller::UNKNOWN_FUNCTION;
pub use config::{TracerConfig, DEFAULT_DURATION_BUCKETS};
pub use init::init_logging;
pub use tracer::{FunctionTracer, Tracer};

/// Tracer bootstrap error types
#[derive(Debug, thiserror::Error)]
pub enum TracerError {
    #[error("module name must not be empty")]
    EmptyModuleName,

    #[error("failed to derive metric namespace: {0}")]
    Namespace(String),

    #[error("metric registration failed: {0}")]
    Registration(#[from] prometheus::Error),
}

/// Create a tracer for `module_name` with default configuration, registered
/// in the process-wide default registry.
///
/// # Panics
///
/// Panics if the namespace cannot be derived or if a tracer for the same
/// module name was already registered. Bootstrap failures represent a
/// misconfigured deployment, not a transient condition; there is no runtime
/// recovery path. Use [`Tracer::new`] to handle the error instead.
pub fn must_get_tracer(module_name: &str) -> Tracer {
    match Tracer::new(module_name, TracerConfig::default()) {
        Ok(tracer) => tracer,
        Err(e) => panic!("failed to create tracer for module '{}': {}", module_name, e),
    }
}
