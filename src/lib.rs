// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # msgcodec
//!
//! Bincode message converter for message-oriented middleware clients.
//!
//! The converter turns registered Rust values into message bodies tagged
//! with the `application/x-bincode` content type, and turns such bodies back
//! into values:
//! - **Core types** in [`core`](crate::core): messages, properties, errors and the type registry
//! - **Encoding** in [`encoding`](crate::encoding): bounded output, serializer instances, factories and pooling
//! - **Converters** in [`converter`](crate::converter): the [`MessageConverter`] capability and its bincode implementation
//!
//! ## Architecture
//!
//! Each payload carries a type descriptor followed by the value. The
//! descriptor is resolved through a [`TypeRegistry`] shared by all
//! serializer instances, so the receiving side decides the concrete type
//! from the payload itself. Serializer instances are never shared between
//! concurrent calls; a [`SerializerPool`] hands out one per conversion.
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use serde::{Deserialize, Serialize};
//! use msgcodec::{BincodeMessageConverter, MessageConverter, MessageProperties, TypeRegistry};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Order {
//!     id: u64,
//!     sku: String,
//! }
//!
//! let registry = TypeRegistry::with_defaults();
//! registry.register::<Order>("shop.Order")?;
//! let converter = BincodeMessageConverter::new(registry);
//!
//! let order = Order { id: 7, sku: "A-1".into() };
//! let message = converter.to_message(&order, &mut MessageProperties::new())?;
//!
//! let back: Option<Order> = converter.from_message_as(&message)?;
//! assert_eq!(back, Some(order));
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{
    ConfigError, ConversionError, Message, MessageProperties, RegistryError, Result,
    SerializerError, Transportable, TypeRegistry,
};

// Serializer instances, factories and pooling
pub mod encoding;

pub use encoding::{BoundedOutput, GraphSerializer, SerializerFactory, SerializerPool};

// Converters
pub mod converter;

pub use converter::{
    BincodeMessageConverter, ConverterConfig, MessageConverter, CONTENT_TYPE, CONTENT_TYPE_TOKEN,
    DEFAULT_CHARSET,
};
