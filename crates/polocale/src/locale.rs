//! Locale parent chains and catalog resolution.
//!
//! Resolution is "strip the most specific subtag until only the language
//! remains, testing set membership at each step, then one non-ascending
//! probe of the default locale". The chain is finite by construction, so
//! resolution never loops, even for root-like tags.

use unic_langid::LanguageIdentifier;

use crate::catalog::{Catalog, CatalogSet};

/// The designated terminal fallback locale.
pub const DEFAULT_LOCALE: &str = "en-US";

/// The fallback chain for a locale tag, most specific first.
///
/// `"sv-SE"` → `["sv-SE", "sv"]`. Tags are canonicalized (`sv_se` →
/// `sv-SE`); a tag that does not parse as a language identifier yields a
/// single-element chain of itself, so lookups still get their exact-match
/// probe. The root locale is never part of the chain.
#[must_use]
pub fn parent_chain(tag: &str) -> Vec<String> {
    let Ok(mut id) = tag.parse::<LanguageIdentifier>() else {
        return vec![tag.to_string()];
    };

    let mut chain = vec![id.to_string()];
    if id.variants().count() > 0 {
        id.clear_variants();
        chain.push(id.to_string());
    }
    if id.region.is_some() {
        id.region = None;
        chain.push(id.to_string());
    }
    if id.script.is_some() {
        id.script = None;
        chain.push(id.to_string());
    }
    chain
}

/// Resolve the nearest catalog for `requested`.
///
/// Walks the parent chain with exact-match probes, then makes exactly one
/// probe of `default_locale`. Returns `None` only when neither the chain
/// nor the default locale has a catalog.
#[must_use]
pub fn resolve<'a>(
    set: &'a CatalogSet,
    requested: &str,
    default_locale: &str,
) -> Option<&'a Catalog> {
    for tag in parent_chain(requested) {
        if let Some(catalog) = set.get(&tag) {
            return Some(catalog);
        }
    }
    set.get(default_locale)
}

/// The environment's current UI locale, or [`DEFAULT_LOCALE`] when it
/// cannot be determined.
#[must_use]
pub fn system_locale() -> String {
    sys_locale::get_locale().unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn set_of(locales: &[&str]) -> CatalogSet {
        let mut set = CatalogSet::new();
        for locale in locales {
            set.insert(Catalog::new(*locale));
        }
        set
    }

    #[test]
    fn chain_strips_region() {
        assert_eq!(parent_chain("sv-SE"), vec!["sv-SE", "sv"]);
    }

    #[test]
    fn chain_for_bare_language() {
        assert_eq!(parent_chain("sv"), vec!["sv"]);
    }

    #[test]
    fn chain_strips_script_last() {
        assert_eq!(
            parent_chain("zh-Hant-TW"),
            vec!["zh-Hant-TW", "zh-Hant", "zh"]
        );
    }

    #[test]
    fn chain_canonicalizes_separators_and_case() {
        assert_eq!(parent_chain("sv_se"), vec!["sv-SE", "sv"]);
    }

    #[test]
    fn unparseable_tag_probes_itself() {
        assert_eq!(parent_chain("not a tag"), vec!["not a tag"]);
    }

    #[test]
    fn resolve_exact_match_wins() {
        let set = set_of(&["sv-SE", "sv", "en-US"]);
        assert_eq!(
            resolve(&set, "sv-SE", DEFAULT_LOCALE).unwrap().locale(),
            "sv-SE"
        );
    }

    #[test]
    fn resolve_ascends_one_step() {
        let set = set_of(&["sv", "en-US"]);
        assert_eq!(
            resolve(&set, "sv-SE", DEFAULT_LOCALE).unwrap().locale(),
            "sv"
        );
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let set = set_of(&["en-US"]);
        assert_eq!(
            resolve(&set, "fr-FR", DEFAULT_LOCALE).unwrap().locale(),
            "en-US"
        );
    }

    #[test]
    fn resolve_absent_everywhere() {
        let set = set_of(&["de"]);
        assert!(resolve(&set, "fr-FR", DEFAULT_LOCALE).is_none());
    }

    #[test]
    fn resolve_empty_set() {
        assert!(resolve(&CatalogSet::new(), "sv", DEFAULT_LOCALE).is_none());
    }
}
