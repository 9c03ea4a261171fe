//! Report renderers for expression check results.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects
//!   `--verbose` / `--quiet`. The JSON report is plain `serde_json` over the
//!   [`CheckedExpression`](crate::models::CheckedExpression) rows and lives
//!   in `main`.

pub mod terminal;
