//! Resource sets: where serialized catalogs come from.
//!
//! The loader never touches the filesystem or any embedding mechanism
//! directly; it talks to a [`ResourceSet`], so tests and embedders can
//! supply catalogs from wherever they live. The stock implementations are
//! an adapter over a `rust-embed` derive and an in-memory map.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// An enumerable set of named, readable resources.
pub trait ResourceSet {
    /// Names of every resource in the set.
    fn names(&self) -> Vec<String>;

    /// Contents of a resource, or `None` if the name is unknown.
    fn read(&self, name: &str) -> Option<Cow<'static, [u8]>>;
}

/// Adapter exposing a [`rust_embed::RustEmbed`] derive as a resource set.
///
/// ```ignore
/// #[derive(rust_embed::RustEmbed)]
/// #[folder = "i18n/"]
/// struct Translations;
///
/// let resources = EmbeddedResources::<Translations>::new();
/// ```
#[cfg(feature = "rust-embed")]
pub struct EmbeddedResources<T> {
    _marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "rust-embed")]
impl<T: rust_embed::RustEmbed> EmbeddedResources<T> {
    /// Create the adapter. Carries no data; the embed is compile-time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "rust-embed")]
impl<T: rust_embed::RustEmbed> Default for EmbeddedResources<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "rust-embed")]
impl<T> std::fmt::Debug for EmbeddedResources<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedResources").finish_non_exhaustive()
    }
}

#[cfg(feature = "rust-embed")]
impl<T: rust_embed::RustEmbed> ResourceSet for EmbeddedResources<T> {
    fn names(&self) -> Vec<String> {
        T::iter().map(Cow::into_owned).collect()
    }

    fn read(&self, name: &str) -> Option<Cow<'static, [u8]>> {
        T::get(name).map(|file| file.data)
    }
}

/// In-memory resource set for tests and programmatic catalogs.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryResources {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), content.into());
    }
}

impl ResourceSet for MemoryResources {
    fn names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    fn read(&self, name: &str) -> Option<Cow<'static, [u8]>> {
        self.files.get(name).map(|bytes| Cow::Owned(bytes.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_resources_roundtrip() {
        let resources = MemoryResources::new()
            .with("a.po", "alpha")
            .with("b.po", "beta");
        assert_eq!(resources.names(), vec!["a.po", "b.po"]);
        assert_eq!(resources.read("a.po").unwrap().as_ref(), b"alpha");
        assert!(resources.read("missing.po").is_none());
    }
}
