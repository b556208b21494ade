//! Per-locale string lookup, formatting, and enumeration.
//!
//! # Invariants
//!
//! 1. **Lookups never fail**: a missing translation echoes the key back
//!    with `found = false`. Missing translations are steady state for
//!    incomplete locales, not errors, and nothing is logged for them.
//!
//! 2. **Two-stage fallback**: locale-chain resolution picks a catalog;
//!    a key missing from that catalog gets exactly one extra probe of
//!    the default-locale catalog before falling back to the key itself.
//!
//! 3. **Lookups are pure**: the same key and locale always yield the
//!    same result; catalogs are never mutated after load.
//!
//! 4. **Presentation newlines**: the literal two-character `\n` escape in
//!    a returned value is rewritten to the platform newline, after
//!    lookup, before formatting.

use std::fmt;
use std::sync::Arc;

use crate::catalog::normalize_key;
use crate::error::LocalizeError;
use crate::format::format_positional;
use crate::locale::{self, DEFAULT_LOCALE};
use crate::provider::TranslationsProvider;

#[cfg(windows)]
const PLATFORM_NEWLINE: &str = "\r\n";
#[cfg(not(windows))]
const PLATFORM_NEWLINE: &str = "\n";

/// A resolved translation with lookup metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedString {
    /// The key that was looked up (the original source string).
    pub name: String,
    /// The translated value, or the key itself when nothing was found.
    pub value: String,
    /// Whether a real translation was found (`false` means `value` is a
    /// pass-through of the key).
    pub found: bool,
    /// The diagnostic location label of the localizer that produced this.
    pub searched_location: String,
}

/// Translates strings for one bound locale.
///
/// Cheap to create and discard; holds only a shared provider handle, a
/// diagnostic location label, and the bound locale. Create one per view,
/// component, or request via [`LocalizerFactory`].
#[derive(Clone)]
pub struct Localizer {
    provider: Arc<dyn TranslationsProvider>,
    location: String,
    locale: String,
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localizer")
            .field("location", &self.location)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Localizer {
    /// Create a localizer bound to the environment's current UI locale.
    ///
    /// `location` is an opaque diagnostic label echoed back on every
    /// lookup result; it takes no part in lookup logic.
    #[must_use]
    pub fn new(provider: Arc<dyn TranslationsProvider>, location: impl Into<String>) -> Self {
        let locale = locale::system_locale();
        Self::with_locale(provider, location, locale)
    }

    /// Create a localizer bound to an explicit locale.
    #[must_use]
    pub fn with_locale(
        provider: Arc<dyn TranslationsProvider>,
        location: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            location: location.into(),
            locale: locale.into(),
        }
    }

    /// The bound locale identifier.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The diagnostic location label.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Translate `key`, falling back to the key itself when no
    /// translation exists anywhere.
    #[must_use]
    pub fn get(&self, key: &str) -> LocalizedString {
        let (found, searched_location, value) = self.try_get_translation(key);
        LocalizedString {
            name: key.to_string(),
            value,
            found,
            searched_location,
        }
    }

    /// Translate `key`, then apply positional `{0}`-style formatting.
    ///
    /// Formatting applies to the translated (and newline-normalized)
    /// value; the lookup itself cannot fail.
    ///
    /// # Errors
    ///
    /// [`LocalizeError::Format`] when `args` do not satisfy the
    /// placeholders present in the resolved value.
    pub fn get_with(
        &self,
        key: &str,
        args: &[&dyn fmt::Display],
    ) -> Result<LocalizedString, LocalizeError> {
        let (found, searched_location, value) = self.try_get_translation(key);
        let value = format_positional(&value, args)?;
        Ok(LocalizedString {
            name: key.to_string(),
            value,
            found,
            searched_location,
        })
    }

    /// Low-level lookup: `(found, searched_location, value)`.
    ///
    /// The returned value has the literal `\n` escape rewritten to the
    /// platform newline; `found` reflects the pre-rewrite comparison
    /// against the key.
    #[must_use]
    pub fn try_get_translation(&self, key: &str) -> (bool, String, String) {
        let (found, value) = self.lookup(key);
        let value = value.replace(r"\n", PLATFORM_NEWLINE);
        (found, self.location.clone(), value)
    }

    /// Catalog resolution plus key lookup with default-locale fallback.
    fn lookup(&self, key: &str) -> (bool, String) {
        let set = self.provider.catalogs();
        let key = normalize_key(key);

        let Some(catalog) = locale::resolve(set, &self.locale, DEFAULT_LOCALE) else {
            return (false, key.into_owned());
        };

        // A locale whose catalog lacks the key always gets one more shot
        // at the default-locale catalog, even when chain resolution
        // already landed elsewhere.
        let translation = catalog.translation(&key).or_else(|| {
            set.get(DEFAULT_LOCALE)
                .and_then(|default| default.translation(&key))
        });

        match translation {
            Some(value) => (value != key.as_ref(), value.to_string()),
            None => (false, key.into_owned()),
        }
    }

    /// Enumerate all known translations for the bound locale.
    ///
    /// Yields the bound locale's catalog first, then — when
    /// `include_parent_locales` is set — each linguistic parent's catalog
    /// in ascent order. The default locale is *not* appended unless it is
    /// a true parent. Entries come out in catalog insertion order, with
    /// the primary variant as the value. The sequence is lazy and each
    /// call produces a fresh iterator.
    pub fn all_strings(
        &self,
        include_parent_locales: bool,
    ) -> impl Iterator<Item = LocalizedString> + '_ {
        let set = self.provider.catalogs();
        let chain: Vec<String> = if include_parent_locales {
            locale::parent_chain(&self.locale)
        } else {
            vec![self.locale.clone()]
        };

        chain
            .into_iter()
            .filter_map(move |tag| set.get(&tag))
            .flat_map(move |catalog| {
                catalog.entries().map(move |entry| LocalizedString {
                    name: entry.key().to_string(),
                    value: entry.primary().to_string(),
                    found: true,
                    searched_location: self.location.clone(),
                })
            })
    }
}

/// Creates [`Localizer`] instances over a shared translations provider.
#[derive(Clone)]
pub struct LocalizerFactory {
    provider: Arc<dyn TranslationsProvider>,
}

impl fmt::Debug for LocalizerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizerFactory").finish_non_exhaustive()
    }
}

impl LocalizerFactory {
    /// Wrap a shared provider.
    #[must_use]
    pub fn new(provider: Arc<dyn TranslationsProvider>) -> Self {
        Self { provider }
    }

    /// Create a localizer for the environment's current UI locale.
    ///
    /// `name` is accepted for interface compatibility with resource-name
    /// keyed localization factories and is otherwise unused.
    #[must_use]
    pub fn create(&self, _name: &str, location: &str) -> Localizer {
        Localizer::new(Arc::clone(&self.provider), location)
    }

    /// Create a localizer bound to an explicit locale.
    #[must_use]
    pub fn create_with_locale(&self, _name: &str, location: &str, locale: &str) -> Localizer {
        Localizer::with_locale(Arc::clone(&self.provider), location, locale)
    }

    /// Type-keyed construction. Present for interface compatibility only.
    ///
    /// # Errors
    ///
    /// Always fails with [`LocalizeError::TypeKeyedLocalizer`].
    pub fn create_for_type(&self, _type_name: &str) -> Result<Localizer, LocalizeError> {
        Err(LocalizeError::TypeKeyedLocalizer)
    }
}
