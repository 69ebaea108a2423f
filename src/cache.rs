//! Process-wide descriptor cache.
//!
//! Maps a class to its template [`InterceptorData`]. Templates are built
//! completely before insertion and published behind an [`Arc`], so a reader
//! either sees no template or a whole one. Entries are never evicted.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::class::{Class, ClassId};
use crate::descriptor::InterceptorData;

static GLOBAL: Lazy<DescriptorCache> = Lazy::new(DescriptorCache::new);

/// Clonable handle to a class -> template map.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct DescriptorCache {
    templates: Arc<RwLock<HashMap<ClassId, Arc<InterceptorData>>>>,
}

impl DescriptorCache {
    /// Creates an empty cache independent of the global one.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    pub fn get(&self, class: &Class) -> Option<Arc<InterceptorData>> {
        self.templates.read().get(&class.id()).cloned()
    }

    /// Publishes `template` for its class, returning the template it replaced.
    pub fn insert(&self, template: InterceptorData) -> Option<Arc<InterceptorData>> {
        let id = template.interceptor_class().id();
        self.templates.write().insert(id, Arc::new(template))
    }

    pub fn contains(&self, class: &Class) -> bool {
        self.templates.read().contains_key(&class.id())
    }

    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }

    /// True when both handles share the same map.
    pub fn same_cache(&self, other: &DescriptorCache) -> bool {
        Arc::ptr_eq(&self.templates, &other.templates)
    }
}

impl std::fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("templates", &self.len())
            .finish()
    }
}
