// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Metric family creation and registration
//!
//! Five families per tracer, all keyed by the single label dimension `func`:
//! start/end counters, a duration histogram (milliseconds), and
//! success/failure counters. Full metric names follow the Prometheus
//! namespace/subsystem convention: `{namespace}_{module}_{name}`.

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

use crate::TracerError;

/// The one metric label dimension: the logical function name.
pub(crate) const FUNC_LABEL: &str = "func";

/// The five metric family handles owned by a tracer.
///
/// Registering two sets with the same (namespace, subsystem) pair in one
/// registry fails: module names must be unique per process within a
/// namespace.
pub(crate) struct TracerMetrics {
    pub(crate) count_start: IntCounterVec,
    pub(crate) count_end: IntCounterVec,
    pub(crate) duration: HistogramVec,
    pub(crate) count_succeed: IntCounterVec,
    pub(crate) count_failed: IntCounterVec,
}

impl TracerMetrics {
    /// Create the five families for (namespace, subsystem) and register them
    /// all in `registry`.
    pub(crate) fn register(
        namespace: &str,
        subsystem: &str,
        duration_buckets: &[f64],
        registry: &Registry,
    ) -> Result<Self, TracerError> {
        let count_start = IntCounterVec::new(
            Opts::new("count_start", "Number of function called")
                .namespace(namespace)
                .subsystem(subsystem),
            &[FUNC_LABEL],
        )?;
        let count_end = IntCounterVec::new(
            Opts::new("count_end", "Number of function done")
                .namespace(namespace)
                .subsystem(subsystem),
            &[FUNC_LABEL],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new("duration", "Amount of time spent to process a transaction")
                .namespace(namespace)
                .subsystem(subsystem)
                .buckets(duration_buckets.to_vec()),
            &[FUNC_LABEL],
        )?;
        let count_succeed = IntCounterVec::new(
            Opts::new("count_succeed", "Number of function succeeded")
                .namespace(namespace)
                .subsystem(subsystem),
            &[FUNC_LABEL],
        )?;
        let count_failed = IntCounterVec::new(
            Opts::new("count_failed", "Number of function failed")
                .namespace(namespace)
                .subsystem(subsystem),
            &[FUNC_LABEL],
        )?;

        registry.register(Box::new(count_start.clone()))?;
        registry.register(Box::new(count_end.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(count_succeed.clone()))?;
        registry.register(Box::new(count_failed.clone()))?;

        Ok(TracerMetrics {
            count_start,
            count_end,
            duration,
            count_succeed,
            count_failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family_names(registry: &Registry) -> Vec<String> {
        let mut names: Vec<String> = registry
            .gather()
            .iter()
            .map(|mf| mf.get_name().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_register_creates_five_families() {
        let registry = Registry::new();
        let metrics =
            TracerMetrics::register("app", "orders", &[500.0, 1000.0], &registry).unwrap();

        // Families only show up in gather() once they have at least one child.
        metrics.count_start.with_label_values(&["f"]).inc();
        metrics.count_end.with_label_values(&["f"]).inc();
        metrics.duration.with_label_values(&["f"]).observe(1.0);
        metrics.count_succeed.with_label_values(&["f"]).inc();
        metrics.count_failed.with_label_values(&["f"]).inc();

        assert_eq!(
            family_names(&registry),
            vec![
                "app_orders_count_end",
                "app_orders_count_failed",
                "app_orders_count_start",
                "app_orders_count_succeed",
                "app_orders_duration",
            ]
        );
    }

    #[test]
    fn test_duplicate_subsystem_fails() {
        let registry = Registry::new();
        TracerMetrics::register("app", "orders", &[500.0], &registry).unwrap();
        let second = TracerMetrics::register("app", "orders", &[500.0], &registry);
        assert!(matches!(second, Err(TracerError::Registration(_))));
    }

    #[test]
    fn test_same_module_distinct_namespaces_coexist() {
        let registry = Registry::new();
        TracerMetrics::register("app1", "orders", &[500.0], &registry).unwrap();
        TracerMetrics::register("app2", "orders", &[500.0], &registry).unwrap();
    }
}
