// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The per-module tracer handle and its recording protocol
//!
//! A [`Tracer`] is created once per module name and shared across every call
//! site in that module. Each recording operation performs two independent
//! writes: a log line through the `tracing` facade and a labeled sample into
//! the module's metric families. The two sinks are not transactional; no
//! ordering is guaranteed between them, and neither write can fail or alter
//! the control flow of the instrumented function.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use prometheus::{Histogram, IntCounter, Registry};
use tracing::{debug, info};

use crate::caller;
use crate::config::TracerConfig;
use crate::metrics::TracerMetrics;
use crate::{namespace, TracerError};

fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Per-module instrumentation handle.
///
/// All recording operations take `&self` and are safe to call from
/// arbitrarily many threads; the metric families are internally
/// synchronized. `trace_no` is a caller-supplied correlation token that
/// appears only in log lines, never as a metric label, so its cardinality
/// is unbounded without risk.
pub struct Tracer {
    target: Arc<str>,
    namespace: Arc<str>,
    metrics: TracerMetrics,
}

impl Tracer {
    /// Create a tracer for `module_name`, registering its five metric
    /// families in the process-wide default registry.
    ///
    /// Call at most once per module name per process; a second call for the
    /// same name fails with [`TracerError::Registration`].
    pub fn new(module_name: &str, config: TracerConfig) -> Result<Self, TracerError> {
        Self::with_registry(module_name, config, prometheus::default_registry())
    }

    /// Create a tracer whose metric families are registered in an explicit
    /// registry owned by the embedding application. Tests use this to get
    /// isolated registries instead of sharing process-wide state.
    pub fn with_registry(
        module_name: &str,
        config: TracerConfig,
        registry: &Registry,
    ) -> Result<Self, TracerError> {
        if module_name.is_empty() {
            return Err(TracerError::EmptyModuleName);
        }
        let namespace = namespace::resolve(config.namespace.as_deref())?;
        let metrics = TracerMetrics::register(
            &namespace,
            module_name,
            &config.duration_buckets,
            registry,
        )?;
        Ok(Tracer {
            target: Arc::from(module_name),
            namespace: Arc::from(namespace.as_str()),
            metrics,
        })
    }

    /// The module name this tracer was created for.
    pub fn module_name(&self) -> &str {
        &self.target
    }

    /// The resolved metric namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Pre-bind the metric label for one logical function.
    ///
    /// The returned handle skips the per-call label lookup; create it once
    /// at module load for hot call sites.
    pub fn for_function(&self, func: &str) -> FunctionTracer {
        let func = caller::bare_name(func);
        FunctionTracer {
            target: Arc::clone(&self.target),
            namespace: Arc::clone(&self.namespace),
            func: func.to_string(),
            count_start: self.metrics.count_start.with_label_values(&[func]),
            count_end: self.metrics.count_end.with_label_values(&[func]),
            duration: self.metrics.duration.with_label_values(&[func]),
            count_succeed: self.metrics.count_succeed.with_label_values(&[func]),
            count_failed: self.metrics.count_failed.with_label_values(&[func]),
        }
    }

    /// Record function entry: info log line plus start counter, returning
    /// the start time for a later duration measurement.
    pub fn start_function(&self, func: &str, trace_no: &str) -> Instant {
        self.for_function(func).start_function(trace_no)
    }

    /// Same as [`Tracer::start_function`] but logs at debug level.
    pub fn start_function_debug(&self, func: &str, trace_no: &str) -> Instant {
        self.for_function(func).start_function_debug(trace_no)
    }

    /// Record function completion: info log line plus end counter.
    pub fn end_function(&self, func: &str, trace_no: &str) {
        self.for_function(func).end_function(trace_no);
    }

    /// Same as [`Tracer::end_function`] but logs at debug level.
    pub fn end_function_debug(&self, func: &str, trace_no: &str) {
        self.for_function(func).end_function_debug(trace_no);
    }

    /// Record function completion with elapsed time: info log line, end
    /// counter, and a duration histogram sample in milliseconds.
    ///
    /// `start` is typically the value returned by [`Tracer::start_function`].
    pub fn end_function_with_duration_since(&self, func: &str, trace_no: &str, start: Instant) {
        self.for_function(func)
            .end_function_with_duration_since(trace_no, start);
    }

    /// Same as [`Tracer::end_function_with_duration_since`] but logs at
    /// debug level.
    pub fn end_function_with_duration_since_debug(
        &self,
        func: &str,
        trace_no: &str,
        start: Instant,
    ) {
        self.for_function(func)
            .end_function_with_duration_since_debug(trace_no, start);
    }

    /// Count a successful outcome. No log line.
    pub fn function_succeed(&self, func: &str, trace_no: &str) {
        self.for_function(func).function_succeed(trace_no);
    }

    /// Count a failed outcome. No log line.
    pub fn function_failed(&self, func: &str, trace_no: &str) {
        self.for_function(func).function_failed(trace_no);
    }
}

/// A tracer pre-bound to one logical function's label.
///
/// Obtained from [`Tracer::for_function`]; holds the label children directly
/// so recording operations are a single atomic increment or observe.
pub struct FunctionTracer {
    target: Arc<str>,
    namespace: Arc<str>,
    func: String,
    count_start: IntCounter,
    count_end: IntCounter,
    duration: Histogram,
    count_succeed: IntCounter,
    count_failed: IntCounter,
}

impl FunctionTracer {
    /// The bound function label value.
    pub fn func(&self) -> &str {
        &self.func
    }

    /// Record function entry at info level, returning the start time.
    pub fn start_function(&self, trace_no: &str) -> Instant {
        let start = Instant::now();
        info!(
            module = %self.target,
            "{} [{}] StartFunction at {}",
            self.namespace,
            trace_no,
            epoch_millis()
        );
        self.count_start.inc();
        start
    }

    /// Same as [`FunctionTracer::start_function`] but logs at debug level.
    pub fn start_function_debug(&self, trace_no: &str) -> Instant {
        let start = Instant::now();
        debug!(
            module = %self.target,
            "{} [{}] StartFunction at {}",
            self.namespace,
            trace_no,
            epoch_millis()
        );
        self.count_start.inc();
        start
    }

    /// Record function completion at info level.
    pub fn end_function(&self, trace_no: &str) {
        info!(
            module = %self.target,
            "{} [{}] EndFunction at {}",
            self.namespace,
            trace_no,
            epoch_millis()
        );
        self.count_end.inc();
    }

    /// Same as [`FunctionTracer::end_function`] but logs at debug level.
    pub fn end_function_debug(&self, trace_no: &str) {
        debug!(
            module = %self.target,
            "{} [{}] EndFunction at {}",
            self.namespace,
            trace_no,
            epoch_millis()
        );
        self.count_end.inc();
    }

    /// Record completion plus a duration sample, measured from `start` with
    /// the monotonic clock and observed in whole milliseconds.
    ///
    /// The end counter is incremented as well, so callers using the duration
    /// variant do not also call [`FunctionTracer::end_function`]. Outcome
    /// counting stays separate: pair with
    /// [`FunctionTracer::function_succeed`] or
    /// [`FunctionTracer::function_failed`] as appropriate.
    pub fn end_function_with_duration_since(&self, trace_no: &str, start: Instant) {
        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            module = %self.target,
            "{} [{}] EndFunction at {}, duration={}ms",
            self.namespace,
            trace_no,
            epoch_millis(),
            elapsed_ms
        );
        self.count_end.inc();
        self.duration.observe(elapsed_ms as f64);
    }

    /// Same as [`FunctionTracer::end_function_with_duration_since`] but logs
    /// at debug level.
    pub fn end_function_with_duration_since_debug(&self, trace_no: &str, start: Instant) {
        let elapsed_ms = start.elapsed().as_millis() as u64;
        debug!(
            module = %self.target,
            "{} [{}] EndFunction at {}, duration={}ms",
            self.namespace,
            trace_no,
            epoch_millis(),
            elapsed_ms
        );
        self.count_end.inc();
        self.duration.observe(elapsed_ms as f64);
    }

    /// Count a successful outcome. Metric only, no log line; the token is
    /// accepted for call-site symmetry with the other operations.
    pub fn function_succeed(&self, _trace_no: &str) {
        self.count_succeed.inc();
    }

    /// Count a failed outcome. Metric only, no log line.
    pub fn function_failed(&self, _trace_no: &str) {
        self.count_failed.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tracer(module: &str) -> Tracer {
        let registry = Registry::new();
        let config = TracerConfig::default().with_namespace("feagitest");
        Tracer::with_registry(module, config, &registry).unwrap()
    }

    #[test]
    fn test_empty_module_name_rejected() {
        let registry = Registry::new();
        let result = Tracer::with_registry("", TracerConfig::default(), &registry);
        assert!(matches!(result, Err(TracerError::EmptyModuleName)));
    }

    #[test]
    fn test_namespace_accessor_is_sanitized() {
        let registry = Registry::new();
        let config = TracerConfig::default().with_namespace("my-app_v2!!");
        let tracer = Tracer::with_registry("orders", config, &registry).unwrap();
        assert_eq!(tracer.namespace(), "myappv2");
        assert_eq!(tracer.module_name(), "orders");
    }

    #[test]
    fn test_empty_func_degrades_to_sentinel() {
        let tracer = test_tracer("mod_sentinel");
        // Must not panic, and must land in the "unknown" bucket.
        tracer.start_function("", "tx-0");
        tracer.end_function("", "tx-0");
        let bound = tracer.for_function("");
        assert_eq!(bound.func(), "unknown");
        bound.function_failed("tx-0");
    }

    #[test]
    fn test_for_function_strips_qualification() {
        let tracer = test_tracer("mod_bare");
        let bound = tracer.for_function("feagi_api::routes::get_genome");
        assert_eq!(bound.func(), "get_genome");
    }

    #[test]
    fn test_start_end_increment_counters() {
        let tracer = test_tracer("mod_counts");
        let handler = tracer.for_function("handler");

        let start = handler.start_function("tx-1");
        handler.end_function_with_duration_since("tx-1", start);
        handler.function_succeed("tx-1");

        assert_eq!(handler.count_start.get(), 1);
        assert_eq!(handler.count_end.get(), 1);
        assert_eq!(handler.count_succeed.get(), 1);
        assert_eq!(handler.count_failed.get(), 0);
        assert_eq!(handler.duration.get_sample_count(), 1);
    }

    #[test]
    fn test_duration_variant_does_not_touch_outcomes() {
        let tracer = test_tracer("mod_outcomes");
        let handler = tracer.for_function("handler");

        let start = handler.start_function("tx-2");
        handler.end_function_with_duration_since_debug("tx-2", start);

        assert_eq!(handler.count_succeed.get(), 0);
        assert_eq!(handler.count_failed.get(), 0);
    }

    #[test]
    fn test_tracer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Tracer>();
        assert_send_sync::<FunctionTracer>();
    }
}
