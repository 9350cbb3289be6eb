// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Converter configuration.
//!
//! The configuration is fixed at construction time. It can be built in code
//! or loaded from a TOML document:
//!
//! ```toml
//! default_charset = "UTF-8"
//! initial_buffer_size = 4096
//! max_buffer_size = 1048576
//! create_message_ids = true
//! pool_size = 8
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Charset label written to `content_encoding` when the caller left it unset.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Initial output buffer capacity (4KB).
pub const DEFAULT_INITIAL_BUFFER_SIZE: usize = 4096;

/// Maximum serialized size of a single message (1MB).
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 1024 * 1024;

/// Options for a message converter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Charset written to `content_encoding` when it is unset
    pub default_charset: String,

    /// Initial capacity of the per-call output buffer
    pub initial_buffer_size: usize,

    /// Largest payload the converter will produce or accept
    pub max_buffer_size: usize,

    /// Whether to assign a random message id when none is set
    pub create_message_ids: bool,

    /// Idle serializer instances kept for reuse; 0 creates one per call
    pub pool_size: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_charset: DEFAULT_CHARSET.to_string(),
            initial_buffer_size: DEFAULT_INITIAL_BUFFER_SIZE,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            create_message_ids: false,
            pool_size: 0,
        }
    }
}

impl ConverterConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_charset.trim().is_empty() {
            return Err(ConfigError::invalid(
                "default_charset",
                "must not be empty",
            ));
        }
        if self.max_buffer_size == 0 {
            return Err(ConfigError::invalid(
                "max_buffer_size",
                "must be greater than zero",
            ));
        }
        if self.initial_buffer_size > self.max_buffer_size {
            return Err(ConfigError::invalid(
                "initial_buffer_size",
                format!(
                    "{} exceeds max_buffer_size {}",
                    self.initial_buffer_size, self.max_buffer_size
                ),
            ));
        }
        Ok(())
    }

    /// Set the default charset.
    pub fn with_default_charset(mut self, charset: impl Into<String>) -> Self {
        self.default_charset = charset.into();
        self
    }

    /// Set the initial and maximum buffer sizes.
    pub fn with_buffer_sizes(mut self, initial: usize, max: usize) -> Self {
        self.initial_buffer_size = initial;
        self.max_buffer_size = max;
        self
    }

    /// Enable or disable message id generation.
    pub fn with_message_ids(mut self, enabled: bool) -> Self {
        self.create_message_ids = enabled;
        self
    }

    /// Set the number of idle serializers kept for reuse.
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
