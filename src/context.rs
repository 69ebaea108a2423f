//! Type-keyed context bag attached to each descriptor.
//!
//! The container stashes per-descriptor auxiliary state here (for example a
//! preconfigured invocation context). Keys are types; each key holds at most
//! one value of exactly that type.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::error::InterceptorError;

/// Runtime token naming a key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

struct Entry {
    key: TypeKey,
    value: Box<dyn Any + Send + Sync>,
}

/// Heterogeneous map from a type to a value of that type.
#[derive(Default)]
pub struct ContextBag {
    values: HashMap<TypeId, Entry>,
}

impl ContextBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under its own type, returning the value it replaced.
    pub fn put<T: Any + Send + Sync>(&mut self, value: T) -> Option<T> {
        let key = TypeKey::of::<T>();
        let previous = self.values.insert(
            key.id,
            Entry {
                key,
                value: Box::new(value),
            },
        )?;
        previous.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values.get(&TypeId::of::<T>())?.value.downcast_ref()
    }

    pub fn get_mut<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        self.values.get_mut(&TypeId::of::<T>())?.value.downcast_mut()
    }

    pub fn remove<T: Any + Send + Sync>(&mut self) -> Option<T> {
        let entry = self.values.remove(&TypeId::of::<T>())?;
        entry.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    /// Stores a type-erased value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`InterceptorError::TypeMismatch`] if the value is not of the
    /// key's type. Nothing is stored in that case.
    pub fn put_any(
        &mut self,
        key: TypeKey,
        value: Box<dyn Any + Send + Sync>,
    ) -> Result<(), InterceptorError> {
        // A boxed `dyn Any` carries no type name, only its `TypeId`.
        if (*value).type_id() != key.id {
            return Err(InterceptorError::TypeMismatch {
                expected: key.name,
                found: "a value of another type".to_string(),
            });
        }
        self.values.insert(key.id, Entry { key, value });
        Ok(())
    }

    pub fn get_any(&self, key: TypeKey) -> Option<&(dyn Any + Send + Sync)> {
        self.values.get(&key.id).map(|entry| entry.value.as_ref())
    }

    /// Retrieves the value under `key` as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`InterceptorError::TypeMismatch`] if `T` is not the key's type,
    /// whether or not a value is present.
    pub fn get_as<T: Any + Send + Sync>(&self, key: TypeKey) -> Result<Option<&T>, InterceptorError> {
        if key.id != TypeId::of::<T>() {
            return Err(InterceptorError::TypeMismatch {
                expected: key.name,
                found: type_name::<T>().to_string(),
            });
        }
        Ok(self.get::<T>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl fmt::Debug for ContextBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.values.values().map(|entry| entry.key.name))
            .finish()
    }
}
