//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner, e.g. `flapper 0.1.0 (2026-10-18, abc1234)`.
pub fn version_line() -> String {
    format!("flapper {} ({}, {})", PKG_VERSION, BUILD_DATE, BUILD_COMMIT)
}
