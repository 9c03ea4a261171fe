//! Deprecation and casing normalization.
//!
//! Produces a semantically equivalent tree in which every identifier the
//! catalog knows carries its canonical casing, deprecated identifiers are
//! replaced by their successors, and deprecated combined identifiers
//! (`GPL-2.0-with-classpath-exception`) become explicit `WITH` expressions.
//! Identifiers the catalog does not know pass through unchanged; this pass
//! never fails.

use crate::catalog::Catalog;
use crate::expr::{Expr, LicenseId};

pub(crate) fn normalize(expr: &Expr, catalog: &Catalog) -> Expr {
    match expr {
        Expr::License(license) => normalize_license(license, catalog),
        Expr::Ref(id) => Expr::Ref(id.clone()),
        Expr::With { license, exception } => Expr::With {
            license: normalize_license_id(license, catalog),
            exception: normalize_exception(exception, catalog),
        },
        Expr::Compound { op, left, right } => Expr::Compound {
            op: *op,
            left: Box::new(normalize(left, catalog)),
            right: Box::new(normalize(right, catalog)),
        },
    }
}

/// Normalize a standalone license node. Deprecated combined identifiers
/// expand into a `WITH` expression here; inside an existing `WITH` group the
/// license operand goes through [`normalize_license_id`] only, since the
/// grammar has no room for a nested exception.
fn normalize_license(license: &LicenseId, catalog: &Catalog) -> Expr {
    if !license.or_later {
        if let Some(combined) = catalog.combined(&license.id) {
            return LicenseId::new(combined.license.clone())
                .with_exception(combined.exception.clone());
        }
    }
    Expr::License(normalize_license_id(license, catalog))
}

fn normalize_license_id(license: &LicenseId, catalog: &Catalog) -> LicenseId {
    if license.or_later {
        // Deprecated `X+` identifiers are catalog entries of their own, with
        // the `-or-later` successor carrying the marker's semantics.
        if let Some(entry) = catalog.license(&license.catalog_id()) {
            return match &entry.successor {
                Some(successor) => LicenseId::new(successor.clone()),
                None => LicenseId::or_later(entry.id.trim_end_matches('+')),
            };
        }
        // `X+` where only `X` is listed: follow X's successor and fold the
        // marker into its `-or-later` sibling when the catalog has one.
        if let Some(entry) = catalog.license(&license.id) {
            if let Some(successor) = &entry.successor {
                if let Some(base) = successor.strip_suffix("-only") {
                    if let Some(or_later) = catalog.license(&format!("{base}-or-later")) {
                        return LicenseId::new(or_later.id.clone());
                    }
                }
                return LicenseId::or_later(successor.clone());
            }
            return LicenseId::or_later(entry.id.clone());
        }
        return license.clone();
    }

    match catalog.license(&license.id) {
        Some(entry) => match &entry.successor {
            Some(successor) => LicenseId::new(successor.clone()),
            None => LicenseId::new(entry.id.clone()),
        },
        None => license.clone(),
    }
}

fn normalize_exception(exception: &str, catalog: &Catalog) -> String {
    match catalog.exception(exception) {
        Some(entry) => entry.successor.clone().unwrap_or_else(|| entry.id.clone()),
        None => exception.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Strictness;

    fn normalized(text: &str) -> String {
        Expr::parse(text, Strictness::AllowAny)
            .unwrap()
            .normalize()
            .to_string()
    }

    #[test]
    fn test_or_later_marker_becomes_suffix() {
        assert_eq!(normalized("GPL-2.0+"), "GPL-2.0-or-later");
        assert_eq!(normalized("LGPL-2.1+"), "LGPL-2.1-or-later");
    }

    #[test]
    fn test_bare_deprecated_id_becomes_only() {
        assert_eq!(normalized("AGPL-1.0"), "AGPL-1.0-only");
        assert_eq!(normalized("GPL-3.0"), "GPL-3.0-only");
    }

    #[test]
    fn test_combined_id_becomes_with_expression() {
        assert_eq!(
            normalized("GPL-2.0-with-classpath-exception"),
            "GPL-2.0-only WITH Classpath-exception-2.0"
        );
        assert_eq!(
            normalized("GPL-3.0-with-GCC-exception"),
            "GPL-3.0-only WITH GCC-exception-3.1"
        );
    }

    #[test]
    fn test_retired_id_without_successor_kept() {
        assert_eq!(normalized("eCos-2.0"), "eCos-2.0");
        assert_eq!(normalized("ECOS-2.0"), "eCos-2.0");
        assert_eq!(normalized("wxwindows"), "wxWindows");
    }

    #[test]
    fn test_case_correction() {
        assert_eq!(normalized("mit"), "MIT");
        assert_eq!(normalized("apache-2.0"), "Apache-2.0");
        assert_eq!(normalized("BSD-3-CLAUSE"), "BSD-3-Clause");
    }

    #[test]
    fn test_case_correction_over_entire_catalog() {
        for entry in Catalog::builtin().licenses().filter(|e| !e.deprecated) {
            assert_eq!(
                normalized(&entry.id.to_lowercase()),
                entry.id,
                "lowercased `{}` does not normalize back to canonical casing",
                entry.id
            );
        }
    }

    #[test]
    fn test_unknown_identifiers_pass_through() {
        assert_eq!(normalized("TotallyMadeUp-1.0"), "TotallyMadeUp-1.0");
        assert_eq!(normalized("TotallyMadeUp-1.0+"), "TotallyMadeUp-1.0+");
        assert_eq!(normalized("LicenseRef-my-license"), "LicenseRef-my-license");
    }

    #[test]
    fn test_or_later_without_plus_entry() {
        // `AGPL-3.0+` has no catalog entry; `AGPL-3.0` does, and its
        // successor family carries the marker.
        assert_eq!(normalized("AGPL-3.0+"), "AGPL-3.0-or-later");
        // A current id with `+` has nothing to fold into; only casing is
        // corrected.
        assert_eq!(normalized("apache-2.0+"), "Apache-2.0+");
    }

    #[test]
    fn test_with_operands_normalize_together() {
        assert_eq!(
            normalized("GPL-2.0 WITH Classpath-exception-2.0"),
            "GPL-2.0-only WITH Classpath-exception-2.0"
        );
        assert_eq!(
            normalized("GPL-2.0+ WITH classpath-exception-2.0"),
            "GPL-2.0-or-later WITH Classpath-exception-2.0"
        );
        assert_eq!(
            normalized("LGPL-2.1+ WITH Nokia-Qt-exception-1.1"),
            "LGPL-2.1-or-later WITH Qt-LGPL-exception-1.1"
        );
    }

    #[test]
    fn test_compound_normalizes_recursively() {
        assert_eq!(
            normalized("gpl-2.0+ AND (mit OR GPL-2.0-with-classpath-exception)"),
            "GPL-2.0-or-later AND (MIT OR GPL-2.0-only WITH Classpath-exception-2.0)"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for text in [
            "GPL-2.0+",
            "AGPL-1.0",
            "GPL-2.0-with-classpath-exception",
            "eCos-2.0",
            "mit AND Bogus-1.0 OR LicenseRef-x",
            "GPL-2.0 WITH Classpath-exception-2.0",
        ] {
            let once = Expr::parse(text, Strictness::AllowAny).unwrap().normalize();
            assert_eq!(once.normalize(), once, "normalize(`{text}`) is not a fixpoint");
        }
    }

    #[test]
    fn test_normalized_expressions_validate_as_current() {
        for text in ["GPL-2.0+", "AGPL-1.0", "GPL-2.0-with-classpath-exception"] {
            let expr = Expr::parse(text, Strictness::AllowAny).unwrap();
            assert!(expr.validate(Strictness::AllowCurrent).is_err());
            assert!(
                expr.normalize().validate(Strictness::AllowCurrent).is_ok(),
                "normalized `{text}` should be current"
            );
        }
    }

    #[test]
    fn test_decompose_commutes_with_normalize() {
        let expr = Expr::parse(
            "gpl-2.0+ AND MIT AND mit OR GPL-2.0-with-classpath-exception",
            Strictness::AllowAny,
        )
        .unwrap();

        let mut direct: Vec<String> = expr
            .normalize()
            .decompose()
            .iter()
            .map(Expr::to_string)
            .collect();
        let mut via_atoms: Vec<String> = expr
            .decompose()
            .iter()
            .map(|atom| atom.normalize().to_string())
            .collect();
        direct.sort();
        via_atoms.sort();
        via_atoms.dedup();
        assert_eq!(direct, via_atoms);
    }
}
