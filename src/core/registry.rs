// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type registry for polymorphic payloads.
//!
//! Every value that crosses the wire is preceded by a type descriptor, a
//! stable name chosen at registration time. The registry maps descriptors to
//! Rust types (for decoding) and Rust types back to descriptors (for
//! encoding), and keeps the type-erased encode/decode functions for each.
//!
//! Both sides of a conversation must register the same descriptors; the
//! descriptor, not a caller hint, decides which type a payload decodes to.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::RegistryError;
use crate::encoding::output::BoundedOutput;
use crate::encoding::{decode_options, encode_options};

type EncodeFn = fn(&dyn Any, &mut BoundedOutput) -> bincode::Result<()>;
type DecodeFn = fn(&[u8], u64) -> bincode::Result<Box<dyn Any + Send>>;

/// A registered type: its descriptor plus erased codec functions.
pub struct Registration {
    descriptor: String,
    type_id: TypeId,
    type_name: &'static str,
    encode: EncodeFn,
    decode: DecodeFn,
}

impl Registration {
    fn of<T>(descriptor: String) -> Self
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        Self {
            descriptor,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            encode: encode_erased::<T>,
            decode: decode_erased::<T>,
        }
    }

    /// Descriptor written in front of values of this type.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Rust type name, for diagnostics only.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `TypeId` of the registered type.
    pub fn rust_type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn encode(&self, value: &dyn Any, output: &mut BoundedOutput) -> bincode::Result<()> {
        (self.encode)(value, output)
    }

    pub(crate) fn decode(&self, bytes: &[u8], limit: u64) -> bincode::Result<Box<dyn Any + Send>> {
        (self.decode)(bytes, limit)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("descriptor", &self.descriptor)
            .field("type_name", &self.type_name)
            .finish()
    }
}

fn encode_erased<T>(value: &dyn Any, output: &mut BoundedOutput) -> bincode::Result<()>
where
    T: Serialize + 'static,
{
    let value = value.downcast_ref::<T>().ok_or_else(|| {
        Box::new(bincode::ErrorKind::Custom(format!(
            "value is not a '{}'",
            std::any::type_name::<T>()
        )))
    })?;
    encode_options().serialize_into(output, value)
}

fn decode_erased<T>(bytes: &[u8], limit: u64) -> bincode::Result<Box<dyn Any + Send>>
where
    T: DeserializeOwned + Send + 'static,
{
    let value: T = decode_options(limit).deserialize(bytes)?;
    Ok(Box::new(value))
}

#[derive(Default)]
struct RegistryInner {
    by_descriptor: HashMap<String, Arc<Registration>>,
    by_type: HashMap<TypeId, Arc<Registration>>,
}

impl RegistryInner {
    fn insert(&mut self, registration: Registration) -> Result<(), RegistryError> {
        if registration.descriptor.is_empty() {
            return Err(RegistryError::EmptyDescriptor);
        }

        if let Some(existing) = self.by_descriptor.get(&registration.descriptor) {
            if existing.type_id == registration.type_id {
                return Ok(());
            }
            return Err(RegistryError::DuplicateDescriptor {
                descriptor: registration.descriptor,
                existing: existing.type_name,
            });
        }

        if let Some(existing) = self.by_type.get(&registration.type_id) {
            return Err(RegistryError::DuplicateType {
                type_name: registration.type_name,
                existing: existing.descriptor.clone(),
            });
        }

        self.put(registration);
        Ok(())
    }

    fn put(&mut self, registration: Registration) {
        let registration = Arc::new(registration);
        self.by_type
            .insert(registration.type_id, Arc::clone(&registration));
        self.by_descriptor
            .insert(registration.descriptor.clone(), registration);
    }
}

/// Thread-safe registry of transportable types.
///
/// Uses RwLock for concurrent read access with exclusive write access, so a
/// single registry can be shared by every serializer instance.
#[derive(Default)]
pub struct TypeRegistry {
    inner: RwLock<RegistryInner>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in primitive types registered.
    ///
    /// | Descriptor | Rust type |
    /// |---|---|
    /// | `bool` | `bool` |
    /// | `i8`, `i16`, `i32`, `i64` | signed integers |
    /// | `u8`, `u16`, `u32`, `u64` | unsigned integers |
    /// | `f32`, `f64` | floats |
    /// | `char` | `char` |
    /// | `string` | `String` |
    /// | `bytes` | `Vec<u8>` |
    /// | `unit` | `()` |
    pub fn with_defaults() -> Self {
        let mut inner = RegistryInner::default();
        let builtins = [
            Registration::of::<bool>("bool".into()),
            Registration::of::<i8>("i8".into()),
            Registration::of::<i16>("i16".into()),
            Registration::of::<i32>("i32".into()),
            Registration::of::<i64>("i64".into()),
            Registration::of::<u8>("u8".into()),
            Registration::of::<u16>("u16".into()),
            Registration::of::<u32>("u32".into()),
            Registration::of::<u64>("u64".into()),
            Registration::of::<f32>("f32".into()),
            Registration::of::<f64>("f64".into()),
            Registration::of::<char>("char".into()),
            Registration::of::<String>("string".into()),
            Registration::of::<Vec<u8>>("bytes".into()),
            Registration::of::<()>("unit".into()),
        ];
        for registration in builtins {
            inner.put(registration);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Register `T` under `descriptor`.
    ///
    /// Registering the same type under the same descriptor twice is a no-op.
    ///
    /// # Errors
    ///
    /// Fails if the descriptor is empty, already bound to another type, or if
    /// `T` already has a different descriptor.
    pub fn register<T>(&self, descriptor: impl Into<String>) -> Result<(), RegistryError>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        let registration = Registration::of::<T>(descriptor.into());
        let mut inner = self
            .inner
            .write()
            .map_err(|e| RegistryError::Poisoned(e.to_string()))?;
        inner.insert(registration)
    }

    /// Look up the registration for a Rust type.
    pub fn by_type(&self, type_id: TypeId) -> Result<Option<Arc<Registration>>, RegistryError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| RegistryError::Poisoned(e.to_string()))?;
        Ok(inner.by_type.get(&type_id).cloned())
    }

    /// Look up the registration for a descriptor.
    pub fn by_descriptor(
        &self,
        descriptor: &str,
    ) -> Result<Option<Arc<Registration>>, RegistryError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| RegistryError::Poisoned(e.to_string()))?;
        Ok(inner.by_descriptor.get(descriptor).cloned())
    }

    /// Descriptor registered for `T`, if any.
    pub fn descriptor_of<T: 'static>(&self) -> Result<Option<String>, RegistryError> {
        Ok(self
            .by_type(TypeId::of::<T>())?
            .map(|r| r.descriptor.clone()))
    }

    /// Check if a descriptor is registered.
    pub fn contains(&self, descriptor: &str) -> Result<bool, RegistryError> {
        Ok(self.by_descriptor(descriptor)?.is_some())
    }

    /// All registered descriptors, sorted.
    pub fn descriptors(&self) -> Result<Vec<String>, RegistryError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| RegistryError::Poisoned(e.to_string()))?;
        let mut names: Vec<String> = inner.by_descriptor.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Number of registered types.
    pub fn len(&self) -> Result<usize, RegistryError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| RegistryError::Poisoned(e.to_string()))?;
        Ok(inner.by_descriptor.len())
    }

    /// Check if no types are registered.
    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.descriptors() {
            Ok(names) => f.debug_struct("TypeRegistry").field("types", &names).finish(),
            Err(_) => f.write_str("TypeRegistry { <poisoned> }"),
        }
    }
}
