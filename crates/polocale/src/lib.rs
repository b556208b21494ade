#![forbid(unsafe_code)]

//! Runtime string localization from bundled gettext `.po` catalogs.
//!
//! Translates source strings (typically the English originals) into a
//! target locale with two-stage fallback: locale parent-chain resolution
//! (`sv-SE` → `sv`) picks a catalog, a missed key gets one extra probe of
//! the default locale (`en-US`), and the final fallback is the key
//! itself. Catalogs load once at startup and are shared immutably between
//! any number of cheap per-component [`Localizer`] instances.
//!
//! ```
//! use polocale::{Localizer, MemoryResources, PoTranslationsProvider};
//! use std::sync::Arc;
//!
//! let resources = MemoryResources::new()
//!     .with("app.sv.ui.po", "msgid \"Save\"\nmsgstr \"Spara\"\n")
//!     .with("app.en_US.ui.po", "msgid \"Save\"\nmsgstr \"Save file\"\n");
//! let provider = Arc::new(PoTranslationsProvider::from_resources(&resources)?);
//!
//! let localizer = Localizer::with_locale(provider, "MainView", "sv-SE");
//! assert_eq!(localizer.get("Save").value, "Spara");
//! # Ok::<(), polocale::LocalizeError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod format;
pub mod locale;
pub mod localizer;
pub mod po;
pub mod provider;
pub mod resource;

pub use catalog::{Catalog, CatalogEntry, CatalogSet, Locale};
pub use error::{FormatError, LocalizeError};
pub use locale::{DEFAULT_LOCALE, parent_chain, resolve, system_locale};
pub use localizer::{LocalizedString, Localizer, LocalizerFactory};
pub use po::{PoDiagnostic, PoParseResult, PoSeverity};
pub use provider::{CATALOG_SUFFIX, PoTranslationsProvider, TranslationsProvider};
#[cfg(feature = "rust-embed")]
pub use resource::EmbeddedResources;
pub use resource::{MemoryResources, ResourceSet};
