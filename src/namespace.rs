// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Process-wide metric namespace derivation
//!
//! The namespace scopes every metric family this crate creates so that two
//! applications embedding the same instrumented modules do not collide. It is
//! either supplied explicitly through [`TracerConfig`](crate::TracerConfig)
//! or derived once per process from the executable name and cached.

use std::sync::OnceLock;

use crate::TracerError;

// Write-once, read-many. Only the first derivation is stored; explicit
// config namespaces bypass this cache entirely.
static DERIVED: OnceLock<String> = OnceLock::new();

/// Strip every character outside `[A-Za-z0-9 ]`.
pub(crate) fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Resolve the namespace for a new tracer.
///
/// An explicit value wins and is only sanitized. Otherwise the process-wide
/// derived namespace is returned, computing it on first use: the current
/// executable's file stem with everything outside `[A-Za-z0-9 ]` removed.
pub(crate) fn resolve(explicit: Option<&str>) -> Result<String, TracerError> {
    if let Some(raw) = explicit {
        let cleaned = sanitize(raw);
        if cleaned.is_empty() {
            return Err(TracerError::Namespace(format!(
                "explicit namespace '{}' is empty after sanitization",
                raw
            )));
        }
        return Ok(cleaned);
    }

    if let Some(cached) = DERIVED.get() {
        return Ok(cached.clone());
    }

    let derived = derive_from_executable()?;
    Ok(DERIVED.get_or_init(|| derived).clone())
}

fn derive_from_executable() -> Result<String, TracerError> {
    let exe = std::env::current_exe()
        .map_err(|e| TracerError::Namespace(format!("cannot determine executable path: {}", e)))?;
    let stem = exe
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            TracerError::Namespace(format!("executable path '{}' has no usable stem", exe.display()))
        })?;

    let cleaned = sanitize(stem);
    if cleaned.is_empty() {
        return Err(TracerError::Namespace(format!(
            "executable name '{}' is empty after sanitization",
            stem
        )));
    }
    Ok(cleaned)
}
