//! Catalog validation of parsed expressions.

use crate::catalog::Catalog;
use crate::expr::error::{RejectReason, ValidationError};
use crate::expr::{Expr, LicenseId};

/// How strictly identifiers are checked against the catalog.
///
/// License references (`LicenseRef-…`) are accepted at every level without a
/// catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Accept any identifier, known or not.
    AllowAny,
    /// Accept identifiers the catalog knows, including deprecated ones.
    AllowDeprecated,
    /// Accept only current (non-deprecated) catalog identifiers.
    AllowCurrent,
}

/// Walk `expr` and check every license and exception identifier against
/// `catalog` under `strictness`. The first offending identifier fails the
/// walk.
pub(crate) fn validate(
    expr: &Expr,
    strictness: Strictness,
    catalog: &Catalog,
) -> Result<(), ValidationError> {
    if strictness == Strictness::AllowAny {
        return Ok(());
    }

    match expr {
        Expr::License(license) => validate_license(license, strictness, catalog),
        Expr::Ref(_) => Ok(()),
        Expr::With { license, exception } => {
            validate_license(license, strictness, catalog)?;
            validate_exception(exception, strictness, catalog)
        }
        Expr::Compound { left, right, .. } => {
            validate(left, strictness, catalog)?;
            validate(right, strictness, catalog)
        }
    }
}

fn validate_license(
    license: &LicenseId,
    strictness: Strictness,
    catalog: &Catalog,
) -> Result<(), ValidationError> {
    // The or-later marker is part of the looked-up identifier: `GPL-2.0+`
    // is its own (deprecated) catalog entry, and an unlisted `X+` is unknown
    // even when `X` itself is current.
    let id = license.catalog_id();
    match catalog.license(&id) {
        None => Err(ValidationError {
            id,
            reason: RejectReason::UnknownLicense,
            strictness,
        }),
        Some(entry) if entry.deprecated && strictness == Strictness::AllowCurrent => {
            Err(ValidationError {
                id,
                reason: RejectReason::DeprecatedLicense,
                strictness,
            })
        }
        Some(_) => Ok(()),
    }
}

fn validate_exception(
    exception: &str,
    strictness: Strictness,
    catalog: &Catalog,
) -> Result<(), ValidationError> {
    match catalog.exception(exception) {
        None => Err(ValidationError {
            id: exception.to_string(),
            reason: RejectReason::UnknownException,
            strictness,
        }),
        Some(entry) if entry.deprecated && strictness == Strictness::AllowCurrent => {
            Err(ValidationError {
                id: exception.to_string(),
                reason: RejectReason::DeprecatedException,
                strictness,
            })
        }
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CombinedEntry, ExceptionEntry, LicenseEntry};
    use crate::expr::error::ParseError;

    fn assert_rejected(text: &str, strictness: Strictness, reason: RejectReason) {
        match Expr::parse(text, strictness) {
            Err(ParseError::Validation(err)) => {
                assert_eq!(err.reason, reason, "wrong reason for `{text}`");
                assert_eq!(err.strictness, strictness);
            }
            other => panic!("expected validation error for `{text}`, got {other:?}"),
        }
    }

    #[test]
    fn test_strictness_gates_on_or_later() {
        assert!(Expr::parse("GPL-1.0+", Strictness::AllowAny).is_ok());
        assert!(Expr::parse("GPL-1.0+", Strictness::AllowDeprecated).is_ok());
        assert_rejected(
            "GPL-1.0+",
            Strictness::AllowCurrent,
            RejectReason::DeprecatedLicense,
        );
        assert!(Expr::parse("GPL-1.0-only", Strictness::AllowCurrent).is_ok());
    }

    #[test]
    fn test_unknown_identifier() {
        assert!(Expr::parse("TotallyMadeUp-1.0", Strictness::AllowAny).is_ok());
        assert_rejected(
            "TotallyMadeUp-1.0",
            Strictness::AllowDeprecated,
            RejectReason::UnknownLicense,
        );
        assert_rejected(
            "TotallyMadeUp-1.0",
            Strictness::AllowCurrent,
            RejectReason::UnknownLicense,
        );
    }

    #[test]
    fn test_or_later_on_current_id_is_unknown() {
        // `Apache-2.0+` is not in the license list, unlike `GPL-2.0+`.
        assert!(Expr::parse("Apache-2.0+", Strictness::AllowAny).is_ok());
        assert_rejected(
            "Apache-2.0+",
            Strictness::AllowDeprecated,
            RejectReason::UnknownLicense,
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_preserves_input() {
        let expr = Expr::parse("mit", Strictness::AllowCurrent).unwrap();
        // Validation accepts the id but leaves the casing alone.
        assert_eq!(expr.to_string(), "mit");
    }

    #[test]
    fn test_license_ref_always_accepted() {
        for strictness in [
            Strictness::AllowAny,
            Strictness::AllowDeprecated,
            Strictness::AllowCurrent,
        ] {
            assert!(Expr::parse("LicenseRef-internal", strictness).is_ok());
            assert!(Expr::parse("DocumentRef-doc:LicenseRef-x AND MIT", strictness).is_ok());
        }
    }

    #[test]
    fn test_exception_identifiers_are_checked() {
        assert!(Expr::parse(
            "GPL-2.0-or-later WITH Classpath-exception-2.0",
            Strictness::AllowCurrent
        )
        .is_ok());
        assert_rejected(
            "GPL-2.0-or-later WITH Made-up-exception",
            Strictness::AllowDeprecated,
            RejectReason::UnknownException,
        );
        assert_rejected(
            "LGPL-2.1-or-later WITH Nokia-Qt-exception-1.1",
            Strictness::AllowCurrent,
            RejectReason::DeprecatedException,
        );
        assert!(Expr::parse(
            "LGPL-2.1-or-later WITH Nokia-Qt-exception-1.1",
            Strictness::AllowDeprecated
        )
        .is_ok());
    }

    #[test]
    fn test_with_on_deprecated_or_later_license() {
        // Syntactically fine, semantically stale: rejected only when current
        // identifiers are required.
        let text = "GPL-2.0+ WITH Classpath-exception-2.0";
        assert!(Expr::parse(text, Strictness::AllowDeprecated).is_ok());
        assert_rejected(text, Strictness::AllowCurrent, RejectReason::DeprecatedLicense);
    }

    #[test]
    fn test_first_offender_wins() {
        match Expr::parse("MIT AND Bogus-1 AND Bogus-2", Strictness::AllowCurrent) {
            Err(ParseError::Validation(err)) => assert_eq!(err.id, "Bogus-1"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_strictness_monotonicity() {
        for text in [
            "MIT",
            "GPL-1.0+",
            "GPL-2.0-with-classpath-exception",
            "Bogus",
            "MIT OR Bogus",
            "GPL-2.0-or-later WITH Classpath-exception-2.0 AND eCos-2.0",
        ] {
            let current = Expr::parse(text, Strictness::AllowCurrent).is_ok();
            let deprecated = Expr::parse(text, Strictness::AllowDeprecated).is_ok();
            let any = Expr::parse(text, Strictness::AllowAny).is_ok();
            assert!(!current || deprecated, "`{text}` breaks monotonicity");
            assert!(!deprecated || any, "`{text}` breaks monotonicity");
        }
    }

    #[test]
    fn test_synthetic_catalog() {
        let catalog = Catalog::new(
            vec![
                LicenseEntry {
                    id: "Example-1.0".to_string(),
                    deprecated: false,
                    successor: None,
                },
                LicenseEntry {
                    id: "Example-0.9".to_string(),
                    deprecated: true,
                    successor: Some("Example-1.0".to_string()),
                },
            ],
            vec![ExceptionEntry {
                id: "Example-exception".to_string(),
                deprecated: false,
                successor: None,
            }],
            Vec::<CombinedEntry>::new(),
        );

        assert!(
            Expr::parse_with("Example-1.0", Strictness::AllowCurrent, &catalog).is_ok()
        );
        assert!(
            Expr::parse_with("Example-0.9", Strictness::AllowCurrent, &catalog).is_err()
        );
        assert!(
            Expr::parse_with("Example-0.9", Strictness::AllowDeprecated, &catalog).is_ok()
        );
        // The builtin catalog plays no part here.
        assert!(Expr::parse_with("MIT", Strictness::AllowCurrent, &catalog).is_err());
        assert!(Expr::parse_with(
            "Example-1.0 WITH Example-exception",
            Strictness::AllowCurrent,
            &catalog
        )
        .is_ok());
    }
}
