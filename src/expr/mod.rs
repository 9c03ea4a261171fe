//! SPDX license expression engine.
//!
//! Text becomes an [`Expr`] through the lexer and recursive-descent parser
//! (with position-carrying errors), [`validate`] checks identifiers against
//! the catalog under a [`Strictness`] policy, [`normalize`] rewrites
//! deprecated identifiers to current ones, and [`dnf`] produces disjunctive
//! normal form.
//!
//! [`Expr`] values are immutable; every transformation returns a new tree.
//! The canonical text form is the [`Display`](std::fmt::Display) impl, and
//! `Expr::parse` / `to_string` form the persistence codec: the rendered form
//! is stable under re-parse.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;

pub mod error;
mod lexer;
mod parser;

pub mod dnf;
pub mod normalize;
pub mod validate;

use error::{ParseError, ValidationError};
pub use validate::Strictness;

/// A bare SPDX license identifier, optionally with the or-later marker (`+`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LicenseId {
    /// The identifier as written; casing is preserved until normalization.
    pub id: String,
    pub or_later: bool,
}

impl LicenseId {
    pub fn new(id: impl Into<String>) -> Self {
        LicenseId {
            id: id.into(),
            or_later: false,
        }
    }

    pub fn or_later(id: impl Into<String>) -> Self {
        LicenseId {
            id: id.into(),
            or_later: true,
        }
    }

    /// Pair this license with an exception identifier.
    pub fn with_exception(self, exception: impl Into<String>) -> Expr {
        Expr::With {
            license: self,
            exception: exception.into(),
        }
    }

    /// The identifier used for catalog lookup: the or-later marker is part
    /// of the (deprecated) identifier itself, e.g. `GPL-2.0+`.
    pub(crate) fn catalog_id(&self) -> String {
        if self.or_later {
            format!("{}+", self.id)
        } else {
            self.id.clone()
        }
    }
}

impl fmt::Display for LicenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        if self.or_later {
            f.write_str("+")?;
        }
        Ok(())
    }
}

/// Binary boolean operator of a [`Expr::Compound`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    And,
    Or,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::And => f.write_str("AND"),
            Op::Or => f.write_str("OR"),
        }
    }
}

/// A parsed SPDX license expression.
///
/// Grammar invariants upheld by the parser: the license operand of `With` is
/// always a plain [`LicenseId`] (never compound, never a reference), and the
/// or-later marker never occurs on a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    License(LicenseId),
    /// `LicenseRef-…` or `DocumentRef-…:LicenseRef-…`; never validated
    /// against the catalog.
    Ref(String),
    With {
        license: LicenseId,
        exception: String,
    },
    Compound {
        op: Op,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Parse `text` and validate every identifier under `strictness`
    /// against the builtin catalog.
    pub fn parse(text: &str, strictness: Strictness) -> Result<Expr, ParseError> {
        Expr::parse_with(text, strictness, Catalog::builtin())
    }

    /// [`Expr::parse`] against a caller-supplied catalog.
    pub fn parse_with(
        text: &str,
        strictness: Strictness,
        catalog: &Catalog,
    ) -> Result<Expr, ParseError> {
        let expr = parser::parse_expression(text)?;
        expr.validate_with(strictness, catalog)?;
        Ok(expr)
    }

    /// Check every identifier against the builtin catalog under `strictness`.
    pub fn validate(&self, strictness: Strictness) -> Result<(), ValidationError> {
        self.validate_with(strictness, Catalog::builtin())
    }

    /// [`Expr::validate`] against a caller-supplied catalog.
    pub fn validate_with(
        &self,
        strictness: Strictness,
        catalog: &Catalog,
    ) -> Result<(), ValidationError> {
        validate::validate(self, strictness, catalog)
    }

    pub fn is_valid(&self, strictness: Strictness) -> bool {
        self.validate(strictness).is_ok()
    }

    /// Rewrite deprecated identifiers to their current equivalents and
    /// correct identifier casing, using the builtin catalog. Never fails;
    /// unknown identifiers pass through unchanged.
    pub fn normalize(&self) -> Expr {
        self.normalize_with(Catalog::builtin())
    }

    /// [`Expr::normalize`] against a caller-supplied catalog.
    pub fn normalize_with(&self, catalog: &Catalog) -> Expr {
        normalize::normalize(self, catalog)
    }

    /// Rewrite into disjunctive normal form: an `OR` of `AND` clauses of
    /// atomic expressions. Output size is worst-case exponential in the
    /// number of `OR` nodes under `AND`; no cap is imposed here.
    pub fn dnf(&self) -> Expr {
        dnf::dnf(self)
    }

    /// The atomic license expressions of this tree: split on `AND` and `OR`
    /// but never on `WITH`. Deduplicated, in first-occurrence order.
    pub fn decompose(&self) -> Vec<Expr> {
        let mut atoms = Vec::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms(&self, atoms: &mut Vec<Expr>) {
        match self {
            Expr::Compound { left, right, .. } => {
                left.collect_atoms(atoms);
                right.collect_atoms(atoms);
            }
            atom => {
                if !atoms.contains(atom) {
                    atoms.push(atom.clone());
                }
            }
        }
    }

    /// Rendered atomic license expressions, sorted and deduplicated.
    pub fn licenses(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.decompose().iter().map(Expr::to_string).collect();
        ids.sort();
        ids
    }

    /// Combine with `other` under `AND`.
    pub fn and(self, other: Expr) -> Expr {
        Expr::Compound {
            op: Op::And,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Combine with `other` under `OR`.
    pub fn or(self, other: Expr) -> Expr {
        Expr::Compound {
            op: Op::Or,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Binding strength of this node's top-level construct: `OR` < `AND` <
    /// everything else (`WITH` and the leaves are atoms to the printer).
    fn precedence(&self) -> u8 {
        match self {
            Expr::Compound { op: Op::Or, .. } => 1,
            Expr::Compound { op: Op::And, .. } => 2,
            _ => 3,
        }
    }
}

/// Canonical rendering: uppercase operators, single spaces, and parentheses
/// only around a child that binds more weakly than its parent. Children of
/// equal precedence always share the parent's operator and are emitted flat,
/// so same-operator chains carry no inner parentheses.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn child(f: &mut fmt::Formatter<'_>, expr: &Expr, parent: u8) -> fmt::Result {
            if expr.precedence() < parent {
                write!(f, "({expr})")
            } else {
                write!(f, "{expr}")
            }
        }

        match self {
            Expr::License(license) => write!(f, "{license}"),
            Expr::Ref(id) => f.write_str(id),
            Expr::With { license, exception } => write!(f, "{license} WITH {exception}"),
            Expr::Compound { op, left, right } => {
                child(f, left, self.precedence())?;
                write!(f, " {op} ")?;
                child(f, right, self.precedence())
            }
        }
    }
}

/// The codec entry point for deserializers: parses without catalog
/// restrictions. Use [`Expr::parse`] to pick a strictness.
impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expr::parse(s, Strictness::AllowAny)
    }
}
