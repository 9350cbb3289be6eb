// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message converters.
//!
//! A [`MessageConverter`] turns values into [`Message`]s for the broker
//! client and back. [`BincodeMessageConverter`] is the bincode-backed
//! implementation: it tags messages with [`CONTENT_TYPE`] and only accepts
//! messages whose content type contains [`CONTENT_TYPE_TOKEN`].
//!
//! ## Example
//!
//! ```
//! use msgcodec::converter::{BincodeMessageConverter, MessageConverter, CONTENT_TYPE};
//! use msgcodec::core::{MessageProperties, TypeRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = BincodeMessageConverter::new(TypeRegistry::with_defaults());
//!
//! let message = converter.to_message(&"hello".to_string(), &mut MessageProperties::new())?;
//! assert_eq!(message.content_type(), Some(CONTENT_TYPE));
//!
//! let text: Option<String> = converter.from_message_as(&message)?;
//! assert_eq!(text.as_deref(), Some("hello"));
//! # Ok(())
//! # }
//! ```

pub mod config;

use std::any::Any;
use std::sync::Arc;

pub use config::{ConverterConfig, DEFAULT_CHARSET};

use crate::core::{
    ConversionError, Message, MessageProperties, Result, Transportable, TypeRegistry,
};
use crate::encoding::{BoundedOutput, DecodedValue, RegistryFactory, SerializerFactory, SerializerPool};

/// Content type written on every encoded message.
pub const CONTENT_TYPE: &str = "application/x-bincode";

/// Token a content type must contain for this converter to decode it.
pub const CONTENT_TYPE_TOKEN: &str = "x-bincode";

/// Conversion between values and messages.
pub trait MessageConverter: Send + Sync {
    /// Encode a value into a message.
    ///
    /// On success `properties` are updated in place and the message carries
    /// a copy of them. On failure they are left untouched.
    fn to_message(
        &self,
        value: &dyn Transportable,
        properties: &mut MessageProperties,
    ) -> Result<Message>;

    /// Decode a message.
    ///
    /// Returns `Ok(None)` when the message has no properties at all, meaning
    /// there is nothing to convert.
    fn from_message(&self, message: &Message) -> Result<Option<Box<dyn Any + Send>>>;
}

/// Message converter backed by bincode with embedded type descriptors.
///
/// The converter is immutable and can be shared across threads; every
/// conversion leases its own serializer from the configured pool.
#[derive(Debug, Clone)]
pub struct BincodeMessageConverter {
    config: ConverterConfig,
    serializers: SerializerPool,
}

impl BincodeMessageConverter {
    /// Create a converter with the default configuration.
    pub fn new(registry: TypeRegistry) -> Self {
        Self::with_config(Arc::new(registry), ConverterConfig::default())
    }

    /// Create a converter over a shared registry.
    ///
    /// A fresh serializer is built per call unless `config.pool_size` is
    /// non-zero.
    pub fn with_config(registry: Arc<TypeRegistry>, config: ConverterConfig) -> Self {
        Self::with_factory(RegistryFactory::new(registry), config)
    }

    /// Create a converter with a custom serializer factory.
    pub fn with_factory(factory: impl SerializerFactory + 'static, config: ConverterConfig) -> Self {
        let serializers = SerializerPool::new(factory, config.pool_size);
        Self::with_pool(serializers, config)
    }

    /// Create a converter drawing serializers from an existing pool.
    pub fn with_pool(serializers: SerializerPool, config: ConverterConfig) -> Self {
        Self {
            config,
            serializers,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Serializer source in use.
    pub fn serializers(&self) -> &SerializerPool {
        &self.serializers
    }

    /// Whether a content type belongs to this converter.
    ///
    /// Matching is by substring, so parameters appended to the type
    /// (`application/x-bincode; v=2`) are accepted.
    pub fn is_applicable(content_type: &str) -> bool {
        content_type.contains(CONTENT_TYPE_TOKEN)
    }

    /// Decode a message and keep the descriptor it was written under.
    pub fn decode(&self, message: &Message) -> Result<Option<DecodedValue>> {
        let Some(properties) = message.properties() else {
            return Ok(None);
        };

        let content_type = properties.content_type();
        match content_type {
            Some(ct) if Self::is_applicable(ct) => {}
            _ => return Err(ConversionError::not_applicable(content_type)),
        }

        let mut serializer = self.serializers.acquire();
        let decoded = serializer
            .read_type_and_value(message.body())
            .map_err(|e| ConversionError::decoding(content_type, e))?;

        tracing::trace!(
            descriptor = decoded.descriptor(),
            bytes = message.len(),
            "decoded message"
        );
        Ok(Some(decoded))
    }

    /// Decode a message into a concrete type.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`MessageConverter::from_message`], fails with a
    /// decoding error when the payload holds a different type than `T`.
    pub fn from_message_as<T: 'static>(&self, message: &Message) -> Result<Option<T>> {
        let Some(decoded) = self.decode(message)? else {
            return Ok(None);
        };
        decoded
            .downcast::<T>()
            .map(Some)
            .map_err(|e| ConversionError::decoding(message.content_type(), e))
    }

    fn apply_properties(&self, properties: &mut MessageProperties) {
        properties.content_type = Some(CONTENT_TYPE.to_string());
        if properties.content_encoding.is_none() {
            properties.content_encoding = Some(self.config.default_charset.clone());
        }
        if self.config.create_message_ids && properties.message_id.is_none() {
            properties.message_id = Some(uuid::Uuid::new_v4().to_string());
        }
    }
}

impl MessageConverter for BincodeMessageConverter {
    fn to_message(
        &self,
        value: &dyn Transportable,
        properties: &mut MessageProperties,
    ) -> Result<Message> {
        let mut output =
            BoundedOutput::new(self.config.initial_buffer_size, self.config.max_buffer_size);
        {
            let mut serializer = self.serializers.acquire();
            serializer
                .write_type_and_value(&mut output, value)
                .map_err(|e| ConversionError::encoding(value.type_name(), e))?;
        }

        self.apply_properties(properties);
        tracing::trace!(
            type_name = value.type_name(),
            bytes = output.len(),
            "encoded message"
        );
        Ok(Message::new(output.into_bytes(), properties.clone()))
    }

    fn from_message(&self, message: &Message) -> Result<Option<Box<dyn Any + Send>>> {
        Ok(self.decode(message)?.map(DecodedValue::into_value))
    }
}
