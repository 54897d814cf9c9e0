// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization helper
//!
//! Optional convenience for binaries embedding the tracer: installs a
//! console `tracing-subscriber` with an `EnvFilter`. Libraries should not
//! call this; the tracer itself only emits through the `tracing` facade and
//! works under whatever subscriber the application installs.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Install a console subscriber.
///
/// `filter` is an `EnvFilter` directive string such as `"info"` or
/// `"orders=debug,info"`; when `None`, `RUST_LOG` is honored and falls back
/// to `info`.
///
/// Fails if the directive string is invalid or a global subscriber is
/// already installed.
pub fn init_logging(filter: Option<&str>) -> Result<()> {
    let env_filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter '{}'", directives))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(())
}
