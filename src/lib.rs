//! `spdx-checkr` — an SPDX license expression engine.
//!
//! Parses strings of the SPDX license-expression grammar (e.g.
//! `GPL-2.0-or-later WITH Classpath-exception-2.0 AND MIT`) into a typed
//! tree, validates identifiers against the bundled SPDX catalog under a
//! configurable [`Strictness`], renders canonical text, splits compound
//! expressions into atomic licenses, rewrites deprecated identifiers to
//! their current equivalents, and converts to disjunctive normal form.
//!
//! ```
//! use spdx_checkr::{Expr, Strictness};
//!
//! let expr = Expr::parse("gpl-2.0+ AND MIT", Strictness::AllowDeprecated)?;
//! assert_eq!(expr.normalize().to_string(), "GPL-2.0-or-later AND MIT");
//! assert_eq!(expr.licenses(), vec!["MIT", "gpl-2.0+"]);
//! # Ok::<(), spdx_checkr::ParseError>(())
//! ```
//!
//! The engine is pure: every operation is a total function from values to
//! values (or an error from [`Expr::parse`]), the catalog is built once and
//! read-only, and expression trees are immutable, so everything here is safe
//! to share across threads.

pub mod catalog;
pub mod expr;

pub use catalog::{Catalog, CombinedEntry, ExceptionEntry, LicenseEntry};
pub use expr::error::{ParseError, RejectReason, SyntaxError, ValidationError};
pub use expr::{Expr, LicenseId, Op, Strictness};
