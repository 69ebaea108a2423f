//! Runtime class metadata.
//!
//! A [`Class`] is the unit the scanner works on: a named type with an
//! optional superclass and a list of declared methods. Classes are normally
//! produced by the `#[interceptor]` attribute, but can be assembled by hand
//! with [`Class::builder`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ulid::Ulid;

use crate::category::Category;
use crate::method::Method;

/// Opaque runtime identity of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(Ulid);

impl ClassId {
    fn mint() -> Self {
        Self(Ulid::new())
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Declared visibility of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    Public,
    /// Visible inside the declaring crate or module tree only.
    Crate,
    #[default]
    Private,
}

/// Declaration of a single method, before it is bound to a class.
#[derive(Debug, Clone, Default)]
pub struct MethodDecl {
    pub(crate) name: String,
    pub(crate) params: Vec<String>,
    pub(crate) visibility: Visibility,
    pub(crate) markers: Vec<Category>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a parameter type to the signature.
    pub fn param(mut self, ty: impl Into<String>) -> Self {
        self.params.push(ty.into());
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn public(self) -> Self {
        self.visibility(Visibility::Public)
    }

    /// Marks the method with the marker attribute of `category`.
    pub fn marker(mut self, category: Category) -> Self {
        if !self.markers.contains(&category) {
            self.markers.push(category);
        }
        self
    }
}

struct ClassInner {
    id: ClassId,
    name: String,
    parent: Option<Class>,
    methods: Vec<Method>,
}

/// Shared handle to immutable class metadata.
///
/// Equality and hashing use the class identity only. Two classes built from
/// identical declarations are still different classes.
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

impl Class {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            parent: None,
            methods: Vec::new(),
        }
    }

    pub fn id(&self) -> ClassId {
        self.0.id
    }

    /// Fully qualified name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Last path segment of the name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.0.name)
    }

    pub fn superclass(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// Methods declared directly on this class, in declaration order.
    pub fn declared_methods(&self) -> &[Method] {
        &self.0.methods
    }

    /// This class followed by its superclasses, nearest first.
    pub fn ancestry(&self) -> impl Iterator<Item = &Class> {
        std::iter::successors(Some(self), |class| class.superclass())
    }

    /// True if `other` is a strict ancestor of this class.
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        self.ancestry().skip(1).any(|class| class == other)
    }

    /// True if `method` is declared on this class or one of its ancestors.
    pub fn declares_or_inherits(&self, method: &Method) -> bool {
        self.ancestry()
            .any(|class| class.id() == method.declaring_class())
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.0.name)
            .field("id", &self.0.id)
            .finish()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// A Rust type that describes itself as an interceptor class.
///
/// Implemented by the `#[interceptor]` attribute. `class()` must return the
/// same class (same identity) on every call.
pub trait Interceptor {
    fn class() -> Class;
}

/// Builder for [`Class`].
pub struct ClassBuilder {
    name: String,
    parent: Option<Class>,
    methods: Vec<MethodDecl>,
}

impl ClassBuilder {
    pub fn extends(mut self, parent: &Class) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    pub fn method(mut self, decl: MethodDecl) -> Self {
        self.methods.push(decl);
        self
    }

    /// Builds the class, minting a new identity.
    pub fn build(self) -> Class {
        let id = ClassId::mint();
        let owner = simple_name(&self.name).to_string();
        let methods = self
            .methods
            .into_iter()
            .map(|decl| Method::bind(id, &owner, decl))
            .collect();

        Class(Arc::new(ClassInner {
            id,
            name: self.name,
            parent: self.parent,
            methods,
        }))
    }
}

fn simple_name(name: &str) -> &str {
    name.rsplit(['.', ':']).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("app::audit::AuditInterceptor"), "AuditInterceptor");
        assert_eq!(simple_name("org.example.Audit"), "Audit");
        assert_eq!(simple_name("Plain"), "Plain");
    }

    #[test]
    fn test_identity_is_not_structural() {
        let a = Class::builder("Same").build();
        let b = Class::builder("Same").build();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_ancestry_nearest_first() {
        let root = Class::builder("Root").build();
        let mid = Class::builder("Mid").extends(&root).build();
        let leaf = Class::builder("Leaf").extends(&mid).build();

        let names: Vec<_> = leaf.ancestry().map(|c| c.simple_name()).collect();
        assert_eq!(names, vec!["Leaf", "Mid", "Root"]);
        assert!(leaf.is_subclass_of(&root));
        assert!(!root.is_subclass_of(&leaf));
        assert!(!leaf.is_subclass_of(&leaf));
    }

    #[test]
    fn test_declared_methods_bound_to_class() {
        let class = Class::builder("Bound")
            .method(MethodDecl::new("a").marker(Category::AroundInvoke))
            .method(MethodDecl::new("b").param("u32").public())
            .build();

        let methods = class.declared_methods();
        assert_eq!(methods.len(), 2);
        assert!(methods.iter().all(|m| m.declaring_class() == class.id()));
        assert_eq!(methods[1].params(), ["u32".to_string()]);
        assert!(class.declares_or_inherits(&methods[0]));
    }

    struct Declared;

    #[crate::interceptor]
    impl Declared {
        #[pre_destroy]
        fn release(&self) {}
    }

    #[test]
    fn test_attribute_declared_class() {
        let class = Declared::class();
        assert_eq!(class, Declared::class());
        assert_eq!(class.simple_name(), "Declared");

        let release = &class.declared_methods()[0];
        assert_eq!(release.name(), "release");
        assert_eq!(release.visibility(), Visibility::Private);
        assert!(release.has_marker(Category::PreDestroy));
    }

    #[test]
    fn test_marker_deduplicated() {
        let decl = MethodDecl::new("twice")
            .marker(Category::PreDestroy)
            .marker(Category::PreDestroy);
        assert_eq!(decl.markers, vec![Category::PreDestroy]);
    }
}
