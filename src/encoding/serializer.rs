// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Serializer instance writing and reading typed values.
//!
//! A [`GraphSerializer`] is the stateful half of the codec: it resolves
//! values against the shared [`TypeRegistry`] and tracks what it has
//! processed. Instances are cheap to create and must not be shared between
//! concurrent calls; obtain one per call from a
//! [`SerializerFactory`](super::SerializerFactory) or a
//! [`SerializerPool`](super::SerializerPool).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bincode::Options;

use super::output::BoundedOutput;
use super::{decode_options, encode_options};
use crate::core::{SerializerError, Transportable, TypeRegistry};

/// A decoded value together with the descriptor it was written under.
pub struct DecodedValue {
    descriptor: String,
    value: Box<dyn Any + Send>,
}

impl DecodedValue {
    /// Descriptor read from the payload.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Borrow the value.
    pub fn value(&self) -> &(dyn Any + Send) {
        self.value.as_ref()
    }

    /// Take the boxed value.
    pub fn into_value(self) -> Box<dyn Any + Send> {
        self.value
    }

    /// Take the value as `T`.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` when the payload holds another type.
    pub fn downcast<T: 'static>(self) -> Result<T, SerializerError> {
        match self.value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(SerializerError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                found: self.descriptor,
            }),
        }
    }
}

impl fmt::Debug for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedValue")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Serializer for "type descriptor + value" payloads.
pub struct GraphSerializer {
    registry: Arc<TypeRegistry>,
    last_descriptor: Option<String>,
    values_written: u64,
    values_read: u64,
}

impl GraphSerializer {
    /// Create a serializer over a shared registry.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            last_descriptor: None,
            values_written: 0,
            values_read: 0,
        }
    }

    /// Registry used to resolve types.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Descriptor of the last value written or read since the last reset.
    pub fn last_descriptor(&self) -> Option<&str> {
        self.last_descriptor.as_deref()
    }

    /// Values written over this instance's lifetime.
    pub fn values_written(&self) -> u64 {
        self.values_written
    }

    /// Values read over this instance's lifetime.
    pub fn values_read(&self) -> u64 {
        self.values_read
    }

    /// Clear per-call state before the instance is reused.
    pub fn reset(&mut self) {
        self.last_descriptor = None;
    }

    /// Write the value's type descriptor followed by the value.
    ///
    /// # Errors
    ///
    /// Fails with `Unregistered` for unknown types, `BufferOverflow` when the
    /// output cap is hit, or `Bincode` when serialization itself fails.
    pub fn write_type_and_value(
        &mut self,
        output: &mut BoundedOutput,
        value: &dyn Transportable,
    ) -> Result<(), SerializerError> {
        let any = value.as_any();
        let registration =
            self.registry
                .by_type(any.type_id())?
                .ok_or_else(|| SerializerError::Unregistered {
                    type_name: value.type_name().to_string(),
                })?;

        encode_options()
            .serialize_into(&mut *output, registration.descriptor())
            .map_err(|e| write_error(e, output))?;
        registration
            .encode(any, output)
            .map_err(|e| write_error(e, output))?;

        self.values_written += 1;
        self.last_descriptor = Some(registration.descriptor().to_string());
        Ok(())
    }

    /// Read a type descriptor and reconstruct the value it names.
    ///
    /// Reads are bounded by the payload itself, so a corrupt length prefix
    /// cannot claim more bytes than the input holds.
    ///
    /// # Errors
    ///
    /// Fails on truncated or malformed input, trailing bytes, or a
    /// descriptor the registry does not know.
    pub fn read_type_and_value(&mut self, bytes: &[u8]) -> Result<DecodedValue, SerializerError> {
        let mut cursor = bytes;
        let descriptor = read_descriptor(&mut cursor)?;
        let registration = self
            .registry
            .by_descriptor(&descriptor)?
            .ok_or_else(|| SerializerError::UnknownDescriptor {
                descriptor: descriptor.clone(),
            })?;
        let value = registration.decode(cursor, cursor.len() as u64)?;

        self.values_read += 1;
        self.last_descriptor = Some(descriptor.clone());
        Ok(DecodedValue { descriptor, value })
    }

    /// Read only the type descriptor at the front of a payload.
    pub fn peek_descriptor(&self, bytes: &[u8]) -> Result<String, SerializerError> {
        let mut cursor = bytes;
        read_descriptor(&mut cursor)
    }
}

impl fmt::Debug for GraphSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphSerializer")
            .field("last_descriptor", &self.last_descriptor)
            .field("values_written", &self.values_written)
            .field("values_read", &self.values_read)
            .finish()
    }
}

fn read_descriptor(cursor: &mut &[u8]) -> Result<String, SerializerError> {
    let descriptor: String = decode_options(cursor.len() as u64)
        .allow_trailing_bytes()
        .deserialize_from(cursor)?;
    Ok(descriptor)
}

fn write_error(err: bincode::Error, output: &BoundedOutput) -> SerializerError {
    match output.overflow() {
        Some(required) => SerializerError::BufferOverflow {
            required,
            max: output.max_capacity(),
        },
        None => SerializerError::Bincode(err),
    }
}
