// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout msgcodec.
//!
//! This module provides the foundational types for the library:
//! - [`ConversionError`] - Error taxonomy surfaced by converters
//! - [`Message`] / [`MessageProperties`] - The transportable payload
//! - [`TypeRegistry`] - Descriptor registry for polymorphic values

pub mod error;
pub mod message;
pub mod registry;

use std::any::Any;

pub use error::{ConfigError, ConversionError, RegistryError, Result, SerializerError};
pub use message::{Message, MessageProperties};
pub use registry::{Registration, TypeRegistry};

/// A value that can be handed to a converter.
///
/// Implemented for every `'static` type; whether a value can actually be
/// encoded is decided by the [`TypeRegistry`] at conversion time.
pub trait Transportable: Any {
    /// Upcast for registry dispatch.
    fn as_any(&self) -> &dyn Any;

    /// Rust type name, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T: Any> Transportable for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
