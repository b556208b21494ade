//! Per-locale translation catalogs and the locale-keyed catalog set.
//!
//! # Invariants
//!
//! 1. **Keys are unique** within a catalog; inserting an existing key
//!    replaces its variants.
//!
//! 2. **Keys are platform-independent**: `\r\n` is rewritten to `\n` both
//!    at insertion and at lookup, so catalogs authored on different
//!    platforms compare equal.
//!
//! 3. **Entry order is stable**: enumeration yields entries in insertion
//!    order, which for parsed catalogs is source-file order.
//!
//! 4. **Immutable after load**: both types are plain data with no interior
//!    mutability, so a shared set is safe for unsynchronized concurrent
//!    reads (`Send + Sync`).

use std::borrow::Cow;
use std::collections::HashMap;

/// Locale identifier (e.g. `"en-US"`, `"sv"`).
pub type Locale = String;

/// Rewrite platform line endings in a lookup key to the canonical `\n`.
pub(crate) fn normalize_key(key: &str) -> Cow<'_, str> {
    if key.contains("\r\n") {
        Cow::Owned(key.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(key)
    }
}

/// A single catalog entry: a key and its ordered translation variants.
///
/// The first variant is the singular/primary form; further variants are
/// the plural forms in `msgstr[n]` index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    key: String,
    variants: Vec<String>,
}

impl CatalogEntry {
    /// The normalized lookup key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// All translation variants, primary form first.
    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// The primary (singular) translation.
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.variants[0]
    }
}

/// Translated strings for a single locale.
///
/// Constructed once at load time, immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: Locale,
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog for `locale`.
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The locale this catalog translates into.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Insert an entry. The key is normalized before use.
    ///
    /// Returns `true` if the key was new; an existing key has its variants
    /// replaced in place and keeps its original position. Empty variant
    /// lists are rejected (no entry is stored).
    pub fn insert(&mut self, key: impl Into<String>, variants: Vec<String>) -> bool {
        if variants.is_empty() {
            return false;
        }
        let key = key.into();
        let key = if key.contains("\r\n") {
            key.replace("\r\n", "\n")
        } else {
            key
        };
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].variants = variants;
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(CatalogEntry { key, variants });
        true
    }

    /// Look up the full entry for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        let key = normalize_key(key);
        self.index.get(key.as_ref()).map(|&slot| &self.entries[slot])
    }

    /// Look up the primary translation for a key.
    #[must_use]
    pub fn translation(&self, key: &str) -> Option<&str> {
        self.get(key).map(CatalogEntry::primary)
    }

    /// Iterate entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full set of loaded catalogs, keyed by locale identifier.
///
/// Built once by a translations provider; shared read-only for the life
/// of the process.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: HashMap<Locale, Catalog>,
}

impl CatalogSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a catalog under its own locale, returning any displaced
    /// catalog previously stored for that locale (last-wins).
    pub fn insert(&mut self, catalog: Catalog) -> Option<Catalog> {
        self.catalogs.insert(catalog.locale.clone(), catalog)
    }

    /// Exact-match lookup of a locale's catalog.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&Catalog> {
        self.catalogs.get(locale)
    }

    /// Whether a catalog exists for exactly this locale identifier.
    #[must_use]
    pub fn contains(&self, locale: &str) -> bool {
        self.catalogs.contains_key(locale)
    }

    /// All loaded locale identifiers, sorted for deterministic output.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Number of loaded catalogs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    /// Whether no catalogs are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
