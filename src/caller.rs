// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Function-name labeling
//!
//! Metric samples are labeled with the bare name of the logical function
//! being traced. Call sites supply the name explicitly, normally through the
//! [`current_function!`](crate::current_function) macro, which expands to the
//! enclosing function's name at compile time. [`bare_name`] strips any module
//! path or closure qualification and degrades empty input to a sentinel so
//! that label resolution can never fail at run time.

/// Sentinel label used when a function name cannot be resolved.
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// Reduce a possibly qualified function path to the bare function name.
///
/// `feagi_api::routes::get_genome` becomes `get_genome`; closure suffixes
/// (`{{closure}}`) are dropped so a closure inside `get_genome` labels as
/// `get_genome` too. Empty input resolves to [`UNKNOWN_FUNCTION`] rather
/// than producing an empty label value.
pub fn bare_name(qualified: &str) -> &str {
    let trimmed = qualified.trim_end_matches("::{{closure}}");
    let bare = trimmed.rsplit("::").next().unwrap_or(trimmed);
    if bare.is_empty() || bare == "{{closure}}" {
        UNKNOWN_FUNCTION
    } else {
        bare
    }
}

/// Expands to the bare name of the enclosing function as a `&'static str`.
///
/// Compile-time replacement for runtime stack inspection: the label is bound
/// at the call site, so it cannot miss or misidentify a frame.
///
/// ```rust
/// use feagi_functrace::current_function;
///
/// fn handle_order() {
///     assert_eq!(current_function!(), "handle_order");
/// }
/// handle_order();
/// ```
#[macro_export]
macro_rules! current_function {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let full = type_name_of(f);
        $crate::caller::bare_name(full.strip_suffix("::f").unwrap_or(full))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name_strips_module_path() {
        assert_eq!(bare_name("feagi_api::routes::get_genome"), "get_genome");
        assert_eq!(bare_name("handle"), "handle");
    }

    #[test]
    fn test_bare_name_strips_closure_suffix() {
        assert_eq!(bare_name("feagi_io::poll::{{closure}}"), "poll");
        assert_eq!(bare_name("run::{{closure}}::{{closure}}"), "run");
    }

    #[test]
    fn test_bare_name_empty_degrades_to_sentinel() {
        assert_eq!(bare_name(""), UNKNOWN_FUNCTION);
        assert_eq!(bare_name("{{closure}}"), UNKNOWN_FUNCTION);
    }

    #[test]
    fn test_current_function_yields_enclosing_name() {
        assert_eq!(current_function!(), "test_current_function_yields_enclosing_name");
    }

    #[test]
    fn test_current_function_inside_closure() {
        let name = (|| current_function!())();
        assert_eq!(name, "test_current_function_inside_closure");
    }
}
