//! Method handles and ordered method sets.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::IndexSet;

use crate::category::Category;
use crate::class::{ClassId, MethodDecl, Visibility};

/// Insertion-ordered set of method handles without duplicates.
pub type MethodSet = IndexSet<Method>;

struct MethodInner {
    declaring_class: ClassId,
    owner: String,
    name: String,
    params: Vec<String>,
    visibility: Visibility,
    markers: Vec<Category>,
    accessible: AtomicBool,
}

/// Handle to a method declared on a class.
///
/// Clones share the same accessibility flag. Equality and hashing use the
/// declaring class, the name and the parameter signature.
#[derive(Clone)]
pub struct Method(Arc<MethodInner>);

impl Method {
    pub(crate) fn bind(declaring_class: ClassId, owner: &str, decl: MethodDecl) -> Self {
        let accessible = decl.visibility == Visibility::Public;
        Self(Arc::new(MethodInner {
            declaring_class,
            owner: owner.to_string(),
            name: decl.name,
            params: decl.params,
            visibility: decl.visibility,
            markers: decl.markers,
            accessible: AtomicBool::new(accessible),
        }))
    }

    pub fn declaring_class(&self) -> ClassId {
        self.0.declaring_class
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Parameter types, receiver excluded.
    pub fn params(&self) -> &[String] {
        &self.0.params
    }

    pub fn visibility(&self) -> Visibility {
        self.0.visibility
    }

    pub fn markers(&self) -> &[Category] {
        &self.0.markers
    }

    pub fn has_marker(&self, category: Category) -> bool {
        self.0.markers.contains(&category)
    }

    /// True when the method can be invoked from outside its declaring class.
    pub fn is_accessible(&self) -> bool {
        self.0.accessible.load(Ordering::Acquire)
    }

    /// Relaxes accessibility. Idempotent.
    pub fn set_accessible(&self) {
        self.0.accessible.store(true, Ordering::Release);
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.declaring_class == other.0.declaring_class
                && self.0.name == other.0.name
                && self.0.params == other.0.params)
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.declaring_class.hash(state);
        self.0.name.hash(state);
        self.0.params.hash(state);
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}({})", self.0.owner, self.0.name, self.0.params.join(", "))
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("method", &format_args!("{}", self))
            .field("visibility", &self.0.visibility)
            .field("accessible", &self.is_accessible())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Class;

    #[test]
    fn test_equality_by_class_name_and_signature() {
        let class = Class::builder("Owner")
            .method(MethodDecl::new("handle").param("i32"))
            .method(MethodDecl::new("handle").param("String"))
            .build();
        let other = Class::builder("Owner")
            .method(MethodDecl::new("handle").param("i32"))
            .build();

        let methods = class.declared_methods();
        assert_ne!(methods[0], methods[1]);
        assert_ne!(methods[0], other.declared_methods()[0]);
        assert_eq!(methods[0], methods[0].clone());
    }

    #[test]
    fn test_set_accessible_shared_by_clones() {
        let class = Class::builder("Hidden")
            .method(MethodDecl::new("secret"))
            .build();
        let method = class.declared_methods()[0].clone();
        assert!(!method.is_accessible());

        method.set_accessible();
        method.set_accessible();
        assert!(class.declared_methods()[0].is_accessible());
    }

    #[test]
    fn test_public_methods_start_accessible() {
        let class = Class::builder("Open")
            .method(MethodDecl::new("open").public())
            .build();
        assert!(class.declared_methods()[0].is_accessible());
    }

    #[test]
    fn test_method_set_keeps_insertion_order() {
        let class = Class::builder("Ordered")
            .method(MethodDecl::new("c"))
            .method(MethodDecl::new("a"))
            .method(MethodDecl::new("b"))
            .build();

        let mut set = MethodSet::new();
        for method in class.declared_methods() {
            set.insert(method.clone());
        }
        assert!(!set.insert(class.declared_methods()[0].clone()));

        let names: Vec<_> = set.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_display() {
        let class = Class::builder("app::Audit")
            .method(MethodDecl::new("around").param("&mut Invocation").param("u8"))
            .build();
        assert_eq!(
            class.declared_methods()[0].to_string(),
            "Audit::around(&mut Invocation, u8)"
        );
    }
}
