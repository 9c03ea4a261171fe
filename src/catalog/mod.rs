//! SPDX license and exception catalog.
//!
//! The catalog enumerates known SPDX license identifiers, exception
//! identifiers, their deprecation status, and the deprecated→current
//! successor mappings. It is built once from the compiled-in tables in
//! [`data`] and is read-only afterwards, so a single process-wide instance
//! ([`Catalog::builtin`]) can be shared across threads without
//! synchronization. Tests and embedders can construct synthetic catalogs via
//! [`Catalog::new`].

use std::collections::HashMap;
use std::sync::LazyLock;

mod data;

/// A known SPDX license identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseEntry {
    /// Canonical casing of the identifier.
    pub id: String,
    pub deprecated: bool,
    /// Current identifier this one was deprecated in favor of, if any.
    pub successor: Option<String>,
}

/// A known SPDX license exception identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionEntry {
    /// Canonical casing of the identifier.
    pub id: String,
    pub deprecated: bool,
    /// Current identifier this one was deprecated in favor of, if any.
    pub successor: Option<String>,
}

/// A deprecated combined identifier (`<license>-with-<exception>`) and the
/// `WITH` expression it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedEntry {
    /// Canonical casing of the deprecated combined identifier.
    pub id: String,
    /// Current license identifier of the left `WITH` operand.
    pub license: String,
    /// Current exception identifier of the right `WITH` operand.
    pub exception: String,
}

/// Read-only lookup tables for SPDX identifiers.
///
/// All lookups are case-insensitive; entries preserve canonical casing.
#[derive(Debug)]
pub struct Catalog {
    licenses: HashMap<String, LicenseEntry>,
    exceptions: HashMap<String, ExceptionEntry>,
    combined: HashMap<String, CombinedEntry>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    let licenses = data::CURRENT_LICENSES
        .iter()
        .map(|id| LicenseEntry {
            id: (*id).to_string(),
            deprecated: false,
            successor: None,
        })
        .chain(
            data::DEPRECATED_LICENSES
                .iter()
                .map(|(id, successor)| LicenseEntry {
                    id: (*id).to_string(),
                    deprecated: true,
                    successor: successor.map(str::to_string),
                }),
        )
        // Combined identifiers are deprecated licenses in their own right;
        // their successor is an expression, carried by the combined table.
        .chain(data::COMBINED_LICENSES.iter().map(|(id, _, _)| LicenseEntry {
            id: (*id).to_string(),
            deprecated: true,
            successor: None,
        }))
        .collect();

    let exceptions = data::CURRENT_EXCEPTIONS
        .iter()
        .map(|id| ExceptionEntry {
            id: (*id).to_string(),
            deprecated: false,
            successor: None,
        })
        .chain(
            data::DEPRECATED_EXCEPTIONS
                .iter()
                .map(|(id, successor)| ExceptionEntry {
                    id: (*id).to_string(),
                    deprecated: true,
                    successor: successor.map(str::to_string),
                }),
        )
        .collect();

    let combined = data::COMBINED_LICENSES
        .iter()
        .map(|(id, license, exception)| CombinedEntry {
            id: (*id).to_string(),
            license: (*license).to_string(),
            exception: (*exception).to_string(),
        })
        .collect();

    Catalog::new(licenses, exceptions, combined)
});

impl Catalog {
    /// Build a catalog from explicit entry lists.
    pub fn new(
        licenses: Vec<LicenseEntry>,
        exceptions: Vec<ExceptionEntry>,
        combined: Vec<CombinedEntry>,
    ) -> Self {
        Catalog {
            licenses: licenses
                .into_iter()
                .map(|e| (e.id.to_ascii_lowercase(), e))
                .collect(),
            exceptions: exceptions
                .into_iter()
                .map(|e| (e.id.to_ascii_lowercase(), e))
                .collect(),
            combined: combined
                .into_iter()
                .map(|e| (e.id.to_ascii_lowercase(), e))
                .collect(),
        }
    }

    /// The process-wide catalog built from the compiled-in SPDX tables.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Look up a license identifier, case-insensitively.
    pub fn license(&self, id: &str) -> Option<&LicenseEntry> {
        self.licenses.get(&id.to_ascii_lowercase())
    }

    /// Look up an exception identifier, case-insensitively.
    pub fn exception(&self, id: &str) -> Option<&ExceptionEntry> {
        self.exceptions.get(&id.to_ascii_lowercase())
    }

    /// Look up a deprecated combined identifier, case-insensitively.
    pub fn combined(&self, id: &str) -> Option<&CombinedEntry> {
        self.combined.get(&id.to_ascii_lowercase())
    }

    /// All license entries, in no particular order.
    pub fn licenses(&self) -> impl Iterator<Item = &LicenseEntry> {
        self.licenses.values()
    }

    /// All exception entries, in no particular order.
    pub fn exceptions(&self) -> impl Iterator<Item = &ExceptionEntry> {
        self.exceptions.values()
    }
}
