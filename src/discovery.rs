//! Method discovery adapter.
//!
//! The scanner does not walk classes itself. It asks a [`MethodDiscovery`],
//! which wraps two seams:
//!
//! - [`AnnotationFinder`] - Finds methods bearing a marker on a class and its ancestors
//! - [`AccessRelaxer`] - Relaxes accessibility so found methods can be invoked
//!
//! [`HierarchyFinder`] and [`SetAccessible`] are the default implementations.

use thiserror::Error;

use crate::category::Category;
use crate::class::Class;
use crate::method::Method;

/// Failures raised while discovering interceptor methods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("Failed to load class {class}: {message}")]
    ClassLoading { class: String, message: String },

    #[error("Cannot make {method} accessible: {message}")]
    Inaccessible { method: String, message: String },
}

/// Finds methods bearing a marker attribute.
pub trait AnnotationFinder: Send + Sync {
    /// Returns the methods of `class` bearing the marker of `category`,
    /// including methods declared on ancestors, in the finder's natural order.
    fn find_annotated_methods(
        &self,
        class: &Class,
        category: Category,
    ) -> Result<Vec<Method>, DiscoveryError>;
}

/// Grants reflective invocation regardless of declared visibility.
pub trait AccessRelaxer: Send + Sync {
    /// Relaxes accessibility of `method`. Must be idempotent.
    fn relax(&self, method: &Method) -> Result<(), DiscoveryError>;
}

/// Walks the class hierarchy from the root class down to the scanned class.
///
/// Ancestor methods come before subclass methods; within a class, methods
/// keep their declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyFinder;

impl HierarchyFinder {
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationFinder for HierarchyFinder {
    fn find_annotated_methods(
        &self,
        class: &Class,
        category: Category,
    ) -> Result<Vec<Method>, DiscoveryError> {
        let mut hierarchy: Vec<&Class> = class.ancestry().collect();
        hierarchy.reverse();

        Ok(hierarchy
            .into_iter()
            .flat_map(|c| c.declared_methods())
            .filter(|m| m.has_marker(category))
            .cloned()
            .collect())
    }
}

/// Flips the accessibility flag on the method handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetAccessible;

impl AccessRelaxer for SetAccessible {
    fn relax(&self, method: &Method) -> Result<(), DiscoveryError> {
        method.set_accessible();
        Ok(())
    }
}

/// Single seam between the scanner and the finder/relaxer pair.
#[derive(Debug, Clone)]
pub struct MethodDiscovery<F = HierarchyFinder, R = SetAccessible> {
    finder: F,
    relaxer: R,
}

impl MethodDiscovery {
    pub fn new() -> Self {
        Self::with(HierarchyFinder::new(), SetAccessible)
    }
}

impl Default for MethodDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: AnnotationFinder, R: AccessRelaxer> MethodDiscovery<F, R> {
    pub fn with(finder: F, relaxer: R) -> Self {
        Self { finder, relaxer }
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    /// Finds the methods of `class` bearing the marker of `category` and
    /// relaxes their accessibility.
    ///
    /// Returns the finder's order unchanged. On failure no methods are
    /// returned.
    pub fn find_annotated(
        &self,
        class: &Class,
        category: Category,
    ) -> Result<Vec<Method>, DiscoveryError> {
        let methods = self.finder.find_annotated_methods(class, category)?;

        for method in &methods {
            self.relaxer.relax(method)?;
        }

        Ok(methods)
    }
}
