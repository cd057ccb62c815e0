//! Pixel format registry.
//!
//! The registry maps stable format ids (`"YCbCrAU8"`, `"GRAYAF32"`, ...)
//! to shared [`ColorSpace`] instances.
//!
//! # Architecture
//!
//! There is no global instance. A host creates a registry once, usually
//! with [`PixelFormatRegistry::with_builtin()`], and passes it by reference
//! to whatever needs to resolve format ids. Dropping it tears it down.
//!
//! # Example
//!
//! ```
//! use pxl_core::PixelFormatRegistry;
//!
//! let registry = PixelFormatRegistry::with_builtin();
//!
//! let cs = registry.get("YCbCrAU16").unwrap();
//! assert_eq!(cs.pixel_size(), 8);
//!
//! for (id, name) in registry.entries() {
//!     println!("{id}: {name}");
//! }
//! ```

use crate::colorspace::ColorSpace;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Catalog of pixel formats keyed by id.
///
/// # Thread Safety
///
/// Lookups take `&self` and hand out `Arc` clones, so a populated registry
/// can be shared across threads. Registration needs `&mut self`.
#[derive(Debug, Default, Clone)]
pub struct PixelFormatRegistry {
    formats: HashMap<String, Arc<ColorSpace>>,
}

impl PixelFormatRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in format.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for cs in ColorSpace::builtin() {
            // Built-in ids are unique.
            let _ = registry.register(Arc::new(cs));
        }
        registry
    }

    /// Registers a format under its id.
    ///
    /// Fails with [`Error::DuplicateFormat`] if the id is taken.
    pub fn register(&mut self, cs: Arc<ColorSpace>) -> Result<()> {
        if self.formats.contains_key(cs.id()) {
            return Err(Error::DuplicateFormat(cs.id().to_string()));
        }
        debug!(id = cs.id(), name = cs.name(), "registered pixel format");
        self.formats.insert(cs.id().to_string(), cs);
        Ok(())
    }

    /// Removes a format, returning it.
    pub fn unregister(&mut self, id: &str) -> Option<Arc<ColorSpace>> {
        self.formats.remove(id)
    }

    /// Looks up a format by id.
    pub fn get(&self, id: &str) -> Option<Arc<ColorSpace>> {
        self.formats.get(id).cloned()
    }

    /// Looks up a format by id, failing with [`Error::UnknownFormat`].
    pub fn require(&self, id: &str) -> Result<Arc<ColorSpace>> {
        self.get(id).ok_or_else(|| Error::UnknownFormat(id.to_string()))
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.formats.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// `(id, human-readable name)` pairs, sorted by id.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .formats
            .values()
            .map(|cs| (cs.id(), cs.name()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Number of registered formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
