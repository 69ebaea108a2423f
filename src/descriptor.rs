//! Interceptor descriptor.
//!
//! An [`InterceptorData`] records, for one interceptor class, the ordered
//! methods of every [`Category`] plus a [`ContextBag`] the container may use
//! at will.
//!
//! Method sets are filled while the scanner builds the descriptor and are
//! exposed read-only afterwards. Equality and hashing depend on the class
//! only.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::category::Category;
use crate::class::Class;
use crate::context::{ContextBag, TypeKey};
use crate::error::InterceptorError;
use crate::method::{Method, MethodSet};
use crate::phase::Phase;

/// Per-class interceptor metadata.
pub struct InterceptorData {
    class: Class,
    methods: [MethodSet; Category::COUNT],
    context: ContextBag,
}

impl InterceptorData {
    /// Creates an empty descriptor for `class`.
    pub fn new(class: Class) -> Self {
        Self {
            class,
            methods: Default::default(),
            context: ContextBag::new(),
        }
    }

    /// Creates a descriptor bound to `class` carrying a copy of the
    /// template's method sets. The template's context bag is not copied.
    pub(crate) fn from_template(class: Class, template: &InterceptorData) -> Self {
        let mut data = Self::new(class);
        for category in Category::ALL {
            data.extend(category, template.methods(category).iter().cloned());
        }
        data
    }

    pub(crate) fn extend(&mut self, category: Category, methods: impl IntoIterator<Item = Method>) {
        self.methods[category.index()].extend(methods);
    }

    pub fn interceptor_class(&self) -> &Class {
        &self.class
    }

    /// Methods of `category`, in discovery order.
    pub fn methods(&self, category: Category) -> &MethodSet {
        &self.methods[category.index()]
    }

    /// Methods that run in `phase`. Empty when the class has none.
    pub fn methods_for(&self, phase: Phase) -> &MethodSet {
        self.methods(phase.category())
    }

    /// Methods that run in the phase named by `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`InterceptorError::InvalidPhase`] for unknown tags.
    pub fn methods_for_tag(&self, tag: &str) -> Result<&MethodSet, InterceptorError> {
        Ok(self.methods_for(Phase::from_tag(tag)?))
    }

    pub fn around_invoke(&self) -> &MethodSet {
        self.methods(Category::AroundInvoke)
    }

    pub fn post_construct(&self) -> &MethodSet {
        self.methods(Category::PostConstruct)
    }

    pub fn pre_destroy(&self) -> &MethodSet {
        self.methods(Category::PreDestroy)
    }

    pub fn post_activate(&self) -> &MethodSet {
        self.methods(Category::PostActivate)
    }

    pub fn pre_passivate(&self) -> &MethodSet {
        self.methods(Category::PrePassivate)
    }

    pub fn after_begin(&self) -> &MethodSet {
        self.methods(Category::AfterBegin)
    }

    pub fn before_completion(&self) -> &MethodSet {
        self.methods(Category::BeforeCompletion)
    }

    pub fn after_completion(&self) -> &MethodSet {
        self.methods(Category::AfterCompletion)
    }

    pub fn around_timeout(&self) -> &MethodSet {
        self.methods(Category::AroundTimeout)
    }

    /// True when no category holds any method.
    pub fn is_empty(&self) -> bool {
        self.methods.iter().all(MethodSet::is_empty)
    }

    // Context bag

    /// Stores `value` keyed by its type, returning the value it replaced.
    pub fn put<T: Any + Send + Sync>(&mut self, value: T) -> Option<T> {
        self.context.put(value)
    }

    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.context.get()
    }

    pub fn get_mut<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        self.context.get_mut()
    }

    pub fn remove<T: Any + Send + Sync>(&mut self) -> Option<T> {
        self.context.remove()
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.context.contains::<T>()
    }

    /// See [`ContextBag::put_any`].
    pub fn put_any(
        &mut self,
        key: TypeKey,
        value: Box<dyn Any + Send + Sync>,
    ) -> Result<(), InterceptorError> {
        self.context.put_any(key, value)
    }

    pub fn get_any(&self, key: TypeKey) -> Option<&(dyn Any + Send + Sync)> {
        self.context.get_any(key)
    }

    pub fn context(&self) -> &ContextBag {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ContextBag {
        &mut self.context
    }
}

impl PartialEq for InterceptorData {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
    }
}

impl Eq for InterceptorData {}

impl Hash for InterceptorData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
    }
}

impl fmt::Display for InterceptorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InterceptorData{{class={}}}", self.class.simple_name())
    }
}

impl fmt::Debug for InterceptorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("InterceptorData");
        debug.field("class", &self.class);
        for category in Category::ALL {
            let methods = self.methods(category);
            if !methods.is_empty() {
                debug.field(category.marker(), methods);
            }
        }
        debug.field("context", &self.context).finish()
    }
}
