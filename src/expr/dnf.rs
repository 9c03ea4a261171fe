//! Disjunctive normal form rewriting.
//!
//! Distributes `AND` over `OR` until the tree is an `OR` of `AND` clauses of
//! atoms (licenses, references, `WITH` groups). Distribution is the only
//! rewrite: no deduplication, absorption, or simplification, so `A AND A`
//! stays `A AND A`, and a tree already in DNF comes back structurally
//! unchanged. Output size is worst-case exponential in the number of `OR`
//! nodes under `AND`.

use crate::expr::{Expr, Op};

pub(crate) fn dnf(expr: &Expr) -> Expr {
    match expr {
        Expr::Compound {
            op: Op::Or,
            left,
            right,
        } => dnf(left).or(dnf(right)),
        Expr::Compound {
            op: Op::And,
            left,
            right,
        } => distribute(&dnf(left), &dnf(right)),
        atom => atom.clone(),
    }
}

/// Cross every disjunct of `left` with every disjunct of `right`. Each left
/// disjunct produces one `OR` row of clauses, and the rows are joined with
/// `OR`, so `(a OR b) AND (c OR d)` becomes
/// `((a AND c) OR (a AND d)) OR ((b AND c) OR (b AND d))`.
fn distribute(left: &Expr, right: &Expr) -> Expr {
    let right_disjuncts = disjuncts(right);
    or_join(disjuncts(left).into_iter().map(|l| {
        or_join(
            right_disjuncts
                .iter()
                .map(|r| l.clone().and((*r).clone())),
        )
    }))
}

/// The top-level `OR` operands of `expr`, flattened left to right.
fn disjuncts(expr: &Expr) -> Vec<&Expr> {
    match expr {
        Expr::Compound {
            op: Op::Or,
            left,
            right,
        } => {
            let mut out = disjuncts(left);
            out.extend(disjuncts(right));
            out
        }
        other => vec![other],
    }
}

/// Left-associative `OR` chain over a non-empty sequence.
fn or_join(items: impl IntoIterator<Item = Expr>) -> Expr {
    let mut items = items.into_iter();
    let first = match items.next() {
        Some(first) => first,
        None => unreachable!("disjunct lists are never empty"),
    };
    items.fold(first, Expr::or)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Strictness;

    fn parse(text: &str) -> Expr {
        Expr::parse(text, Strictness::AllowAny).unwrap()
    }

    #[test]
    fn test_atoms_are_fixed_points() {
        for text in ["MIT", "GPL-2.0+", "LicenseRef-x", "MIT WITH exception"] {
            let expr = parse(text);
            assert_eq!(expr.dnf(), expr);
        }
    }

    #[test]
    fn test_distributes_or_on_the_left() {
        assert_eq!(parse("(a OR b) AND c").dnf(), parse("(a AND c) OR (b AND c)"));
    }

    #[test]
    fn test_distributes_or_on_the_right() {
        assert_eq!(parse("a AND (b OR c)").dnf(), parse("(a AND b) OR (a AND c)"));
    }

    #[test]
    fn test_distributes_both_sides() {
        assert_eq!(
            parse("(a OR b) AND (c OR d)").dnf(),
            parse("((a AND c) OR (a AND d)) OR ((b AND c) OR (b AND d))")
        );
    }

    #[test]
    fn test_with_groups_are_atoms() {
        assert_eq!(
            parse("(a WITH e OR b) AND c").dnf(),
            parse("(a WITH e AND c) OR (b AND c)")
        );
    }

    #[test]
    fn test_nested_distribution() {
        assert_eq!(
            parse("a AND (b OR c) AND d").dnf(),
            parse("(a AND b AND d) OR (a AND c AND d)")
        );
    }

    #[test]
    fn test_dnf_input_is_returned_structurally_equal() {
        for text in [
            "a OR b",
            "a AND b AND c",
            "(a AND b) OR (c AND d)",
            "((a AND c) OR (a AND d)) OR ((b AND c) OR (b AND d))",
            "a WITH e OR b AND c",
        ] {
            let expr = parse(text);
            assert_eq!(expr.dnf(), expr, "`{text}` is already in DNF");
        }
    }

    #[test]
    fn test_dnf_is_idempotent() {
        for text in [
            "(a OR b) AND (c OR d)",
            "a AND (b OR (c AND (d OR e)))",
            "((a OR b) AND c) OR (d AND (e OR f))",
        ] {
            let once = parse(text).dnf();
            assert_eq!(once.dnf(), once, "dnf(`{text}`) is not a fixpoint");
        }
    }

    #[test]
    fn test_no_simplification() {
        assert_eq!(parse("a AND a").dnf(), parse("a AND a"));
        assert_eq!(parse("a OR a").dnf(), parse("a OR a"));
        // Absorption is deliberately not applied either.
        assert_eq!(parse("a OR (a AND b)").dnf(), parse("a OR (a AND b)"));
    }

    #[test]
    fn test_clause_count_multiplies() {
        // (a OR b) AND (c OR d) AND (e OR f) -> 2 * 2 * 2 clauses.
        let expr = parse("(a OR b) AND (c OR d) AND (e OR f)").dnf();
        let clauses = count_disjuncts(&expr);
        assert_eq!(clauses, 8);
    }

    fn count_disjuncts(expr: &Expr) -> usize {
        match expr {
            Expr::Compound {
                op: Op::Or,
                left,
                right,
            } => count_disjuncts(left) + count_disjuncts(right),
            _ => 1,
        }
    }
}
