//! Interceptor scanner.
//!
//! [`InterceptorScanner::scan`] returns a fresh [`InterceptorData`] for a
//! class. When a template for the class has been primed with
//! [`InterceptorScanner::cache_scan`], its method sets are copied; otherwise a
//! full discovery pass runs. Scanning never writes the cache on its own.

use crate::cache::DescriptorCache;
use crate::category::Category;
use crate::class::{Class, Interceptor};
use crate::config::ScanConfig;
use crate::descriptor::InterceptorData;
use crate::discovery::{
    AccessRelaxer, AnnotationFinder, HierarchyFinder, MethodDiscovery, SetAccessible,
};
use crate::error::InterceptorError;

/// Entry point for building interceptor descriptors.
#[derive(Debug, Clone)]
pub struct InterceptorScanner<F = HierarchyFinder, R = SetAccessible> {
    cache: DescriptorCache,
    discovery: MethodDiscovery<F, R>,
    config: ScanConfig,
}

impl InterceptorScanner {
    /// Scanner with default settings and its own empty cache.
    pub fn new() -> Self {
        Self::from_config(ScanConfig::default())
    }

    /// Scanner backed by the process-wide cache.
    pub fn shared() -> Self {
        Self::new().with_cache(DescriptorCache::global())
    }

    /// Scanner with its own empty cache, configured from `config`.
    pub fn from_config(config: ScanConfig) -> Self {
        Self {
            cache: DescriptorCache::new(),
            discovery: MethodDiscovery::new(),
            config,
        }
    }

    /// Scanner configured from the layered configuration files and env.
    pub fn load() -> Result<Self, InterceptorError> {
        Ok(Self::from_config(ScanConfig::load()?))
    }
}

impl Default for InterceptorScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: AnnotationFinder, R: AccessRelaxer> InterceptorScanner<F, R> {
    /// Replaces the cache handle, e.g. with [`DescriptorCache::global`].
    pub fn with_cache(mut self, cache: DescriptorCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the discovery adapter.
    pub fn with_discovery<F2, R2>(
        self,
        discovery: MethodDiscovery<F2, R2>,
    ) -> InterceptorScanner<F2, R2>
    where
        F2: AnnotationFinder,
        R2: AccessRelaxer,
    {
        InterceptorScanner {
            cache: self.cache,
            discovery,
            config: self.config,
        }
    }

    pub fn cache(&self) -> &DescriptorCache {
        &self.cache
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Returns a fresh descriptor for `class`.
    ///
    /// A primed template is copied without its context bag. Without a
    /// template, methods are discovered and the cache is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`InterceptorError::Discovery`] from the finder or relaxer.
    pub fn scan(&self, class: &Class) -> Result<InterceptorData, InterceptorError> {
        if let Some(template) = self.cache.get(class) {
            self.report_scan(class, "template");
            return Ok(InterceptorData::from_template(class.clone(), &template));
        }

        self.report_scan(class, "discovery");
        self.discover(class)
    }

    /// Discovers `class` and stores the result as its template, replacing any
    /// previous one. Nothing is stored if discovery fails.
    pub fn cache_scan(&self, class: &Class) -> Result<(), InterceptorError> {
        let template = self.discover(class)?;
        let count: usize = Category::ALL
            .into_iter()
            .map(|category| template.methods(category).len())
            .sum();

        match self.cache.insert(template) {
            Some(_) => tracing::info!(class = %class, methods = count, "Replaced interceptor template"),
            None => tracing::info!(class = %class, methods = count, "Primed interceptor template"),
        }
        Ok(())
    }

    /// [`scan`](Self::scan) for a type declared with `#[interceptor]`.
    pub fn scan_type<T: Interceptor>(&self) -> Result<InterceptorData, InterceptorError> {
        self.scan(&T::class())
    }

    /// [`cache_scan`](Self::cache_scan) for a type declared with `#[interceptor]`.
    pub fn cache_scan_type<T: Interceptor>(&self) -> Result<(), InterceptorError> {
        self.cache_scan(&T::class())
    }

    fn report_scan(&self, class: &Class, source: &str) {
        if self.config.log.scans {
            tracing::info!(class = %class, source, "Scanning interceptor");
        } else {
            tracing::debug!(class = %class, source, "Scanning interceptor");
        }
    }

    /// Full discovery pass over every category.
    fn discover(&self, class: &Class) -> Result<InterceptorData, InterceptorError> {
        let mut data = InterceptorData::new(class.clone());

        for category in Category::ALL {
            let methods = self
                .discovery
                .find_annotated(class, category)
                .inspect_err(|e| {
                    tracing::warn!(class = %class, category = %category, "Discovery failed: {}", e)
                })?;

            if !methods.is_empty() {
                tracing::debug!(
                    class = %class,
                    category = %category,
                    count = methods.len(),
                    "Discovered interceptor methods"
                );
            }
            data.extend(category, methods);
        }

        Ok(data)
    }
}
