//! Translation providers: the one-time catalog load and its accessor.
//!
//! # Invariants
//!
//! 1. **Fail-fast load**: any error-severity parse diagnostic aborts the
//!    entire load; no partial catalog set is ever observable.
//!
//! 2. **Deterministic collisions**: resource names are sorted before
//!    loading, so when two resources claim the same locale the
//!    lexicographically later one wins, on every platform.
//!
//! 3. **Load once**: [`TranslationsProvider::catalogs`] is a pure
//!    accessor over the set built at construction; nothing re-parses.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::catalog::CatalogSet;
use crate::error::LocalizeError;
use crate::po;
use crate::resource::ResourceSet;

/// File suffix identifying catalog resources.
pub const CATALOG_SUFFIX: &str = ".po";

/// Read-only access to the loaded catalog set.
///
/// The injected seam between the load mechanism and the lookup engine: a
/// [`crate::Localizer`] only ever sees this trait, so tests can hand it a
/// pre-built [`CatalogSet`] directly.
pub trait TranslationsProvider: Send + Sync {
    /// The catalogs of translations, keyed by locale identifier.
    fn catalogs(&self) -> &CatalogSet;
}

/// A pre-built catalog set is its own provider. Handy for tests.
impl TranslationsProvider for CatalogSet {
    fn catalogs(&self) -> &CatalogSet {
        self
    }
}

/// Loads `.po` catalogs from a [`ResourceSet`] and caches the result.
///
/// Resources follow the naming convention
/// `<container>.<language_REGION>.<name>.po`: the locale identifier is
/// the third-from-last dot-separated component, with `_` mapped to `-`.
#[derive(Debug, Clone)]
pub struct PoTranslationsProvider {
    catalogs: CatalogSet,
}

impl PoTranslationsProvider {
    /// Discover, parse, and assemble all catalogs in `resources`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizeError::Load`] naming the offending resource and
    /// every error-severity diagnostic if any catalog fails to parse or
    /// is not valid UTF-8. Startup-class failure; not retried.
    pub fn from_resources(resources: &dyn ResourceSet) -> Result<Self, LocalizeError> {
        let mut names: Vec<String> = resources
            .names()
            .into_iter()
            .filter(|name| name.ends_with(CATALOG_SUFFIX))
            .collect();
        names.sort_unstable();

        let mut set = CatalogSet::new();
        let mut sources: HashMap<String, String> = HashMap::new();

        for name in names {
            let Some(locale) = locale_from_resource_name(&name) else {
                warn!(resource = %name, "catalog resource name does not encode a locale; skipped");
                continue;
            };

            let bytes = resources.read(&name).ok_or_else(|| LocalizeError::Load {
                resource: name.clone(),
                details: "resource vanished between enumeration and read".into(),
            })?;
            let text = std::str::from_utf8(&bytes).map_err(|e| LocalizeError::Load {
                resource: name.clone(),
                details: format!("resource is not valid UTF-8: {e}"),
            })?;

            let result = po::parse(&locale, text);
            let errors: Vec<String> = result.errors().map(ToString::to_string).collect();
            if !errors.is_empty() {
                return Err(LocalizeError::Load {
                    resource: name,
                    details: errors.join("\n"),
                });
            }

            let Some(catalog) = result.catalog else {
                continue;
            };
            debug!(
                locale = %locale,
                entries = catalog.len(),
                resource = %name,
                "loaded catalog"
            );
            if let Some(previous) = sources.insert(locale.clone(), name.clone()) {
                warn!(
                    locale = %locale,
                    kept = %name,
                    displaced = %previous,
                    "duplicate locale resources; later name wins"
                );
            }
            set.insert(catalog);
        }

        Ok(Self { catalogs: set })
    }
}

impl TranslationsProvider for PoTranslationsProvider {
    fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }
}

/// Extract the locale identifier from a flattened resource name.
///
/// `Translations.sv_SE.Messages.po` → `sv-SE`. Returns `None` when the
/// name has too few dot components to encode a locale.
fn locale_from_resource_name(name: &str) -> Option<String> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() < 3 {
        return None;
    }
    let segment = parts[parts.len() - 3];
    if segment.is_empty() {
        return None;
    }
    Some(segment.replace('_', "-"))
}
