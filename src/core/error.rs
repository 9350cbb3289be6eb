// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for msgcodec.
//!
//! Provides the error taxonomy for message conversion:
//! - [`ConversionError`] - what the caller of a converter sees
//! - [`SerializerError`] - the underlying cause attached to encode/decode failures
//! - [`RegistryError`] - type registration conflicts
//! - [`ConfigError`] - configuration loading and validation

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a message converter.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The value could not be written into a payload.
    #[error("failed to encode value of type '{type_name}': {source}")]
    Encoding {
        /// Rust type name of the value being encoded
        type_name: String,
        /// Underlying cause
        #[source]
        source: SerializerError,
    },

    /// The payload bytes could not be turned back into a value.
    #[error("failed to decode payload: {source}")]
    Decoding {
        /// Content type of the rejected payload
        content_type: Option<String>,
        /// Underlying cause
        #[source]
        source: SerializerError,
    },

    /// The payload was produced by a different codec.
    #[error("converter not applicable to content type {}", display_content_type(.content_type))]
    NotApplicable {
        /// Content type found on the message, if any
        content_type: Option<String>,
    },
}

fn display_content_type(content_type: &Option<String>) -> String {
    match content_type {
        Some(ct) => format!("'{ct}'"),
        None => "<unset>".to_string(),
    }
}

impl ConversionError {
    /// Create an encoding error.
    pub fn encoding(type_name: impl Into<String>, source: impl Into<SerializerError>) -> Self {
        ConversionError::Encoding {
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// Create a decoding error.
    pub fn decoding(content_type: Option<&str>, source: impl Into<SerializerError>) -> Self {
        ConversionError::Decoding {
            content_type: content_type.map(str::to_string),
            source: source.into(),
        }
    }

    /// Create a "not applicable" error.
    pub fn not_applicable(content_type: Option<&str>) -> Self {
        ConversionError::NotApplicable {
            content_type: content_type.map(str::to_string),
        }
    }

    /// Whether the caller should try another converter.
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, ConversionError::NotApplicable { .. })
    }

    /// The underlying serializer cause, when there is one.
    pub fn cause(&self) -> Option<&SerializerError> {
        match self {
            ConversionError::Encoding { source, .. } | ConversionError::Decoding { source, .. } => {
                Some(source)
            }
            ConversionError::NotApplicable { .. } => None,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ConversionError::Encoding { type_name, source } => vec![
                ("direction", "encode".to_string()),
                ("type", type_name.clone()),
                ("cause", source.to_string()),
            ],
            ConversionError::Decoding {
                content_type,
                source,
            } => vec![
                ("direction", "decode".to_string()),
                ("content_type", content_type.clone().unwrap_or_default()),
                ("cause", source.to_string()),
            ],
            ConversionError::NotApplicable { content_type } => vec![
                ("direction", "decode".to_string()),
                ("content_type", content_type.clone().unwrap_or_default()),
            ],
        }
    }
}

/// Underlying cause of an encode or decode failure.
#[derive(Debug, Error)]
pub enum SerializerError {
    /// The value's type was never registered.
    #[error("type '{type_name}' is not registered")]
    Unregistered {
        /// Rust type name of the value
        type_name: String,
    },

    /// The payload names a type descriptor the registry does not know.
    #[error("unknown type descriptor '{descriptor}'")]
    UnknownDescriptor {
        /// Descriptor read from the payload
        descriptor: String,
    },

    /// The serialized form does not fit the output buffer.
    #[error("serialized form needs {required} bytes, buffer maximum is {max}")]
    BufferOverflow {
        /// Bytes needed at the point of failure
        required: usize,
        /// Configured buffer maximum
        max: usize,
    },

    /// The payload decoded to a different type than requested.
    #[error("expected '{expected}', payload holds '{found}'")]
    TypeMismatch {
        /// Requested Rust type
        expected: &'static str,
        /// Descriptor found in the payload
        found: String,
    },

    /// Bincode reported an error.
    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),

    /// The type registry could not be used.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised while registering or looking up types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Descriptor already bound to a different Rust type.
    #[error("descriptor '{descriptor}' already registered for '{existing}'")]
    DuplicateDescriptor {
        /// Descriptor being registered
        descriptor: String,
        /// Rust type already holding it
        existing: &'static str,
    },

    /// Rust type already registered under another descriptor.
    #[error("type '{type_name}' already registered as '{existing}'")]
    DuplicateType {
        /// Rust type being registered
        type_name: &'static str,
        /// Descriptor it already has
        existing: String,
    },

    /// Descriptors must be non-empty.
    #[error("type descriptor must not be empty")]
    EmptyDescriptor,

    /// The registry lock was poisoned by a panicking writer.
    #[error("registry lock poisoned: {0}")]
    Poisoned(String),
}

/// Errors raised while loading or validating a converter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// The TOML document could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the converter cannot use.
    #[error("invalid config field '{field}': {reason}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// Why the value is rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create an invalid field error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for msgcodec conversions.
pub type Result<T> = std::result::Result<T, ConversionError>;
