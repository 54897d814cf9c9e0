//! Tracer configuration types

use serde::{Deserialize, Serialize};

/// Default duration histogram buckets, in milliseconds.
pub const DEFAULT_DURATION_BUCKETS: [f64; 7] =
    [500.0, 1000.0, 1500.0, 2000.0, 4000.0, 6000.0, 10000.0];

/// Tracer bootstrap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracerConfig {
    /// Metric namespace. When `None`, a process-wide namespace is derived
    /// once from the embedding executable's name and shared by every tracer
    /// created afterwards. Sanitized either way: only `[A-Za-z0-9 ]`
    /// survives.
    pub namespace: Option<String>,

    /// Duration histogram bucket boundaries, in milliseconds. Must match the
    /// unit observed by the duration operations (milliseconds).
    ///
    /// Caller contract: strictly increasing. Not enforced; a violation
    /// silently degrades bucket accuracy.
    pub duration_buckets: Vec<f64>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        TracerConfig {
            namespace: None,
            duration_buckets: DEFAULT_DURATION_BUCKETS.to_vec(),
        }
    }
}

impl TracerConfig {
    /// Set an explicit namespace instead of the derived process-wide one.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Replace the default duration buckets entirely.
    pub fn with_duration_buckets(mut self, buckets: Vec<f64>) -> Self {
        self.duration_buckets = buckets;
        self
    }
}
