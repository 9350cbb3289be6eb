// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Transportable message representation.
//!
//! A [`Message`] is the unit handed to and received from the broker client:
//! an opaque body plus optional [`MessageProperties`]. A message without
//! properties carries nothing a converter can interpret.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata attached to a message body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageProperties {
    /// MIME-style content type (e.g. `application/x-bincode`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Content encoding label (e.g. `UTF-8`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,

    /// Application message id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Free-form headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl MessageProperties {
    /// Create empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the content encoding.
    pub fn with_content_encoding(mut self, content_encoding: impl Into<String>) -> Self {
        self.content_encoding = Some(content_encoding.into());
        self
    }

    /// Set the message id.
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Content type, if set.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Content encoding, if set.
    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    /// Message id, if set.
    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    /// Look up a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Insert or replace a header, returning the previous value.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.headers.insert(key.into(), value.into())
    }
}

/// A message body together with its properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    body: Vec<u8>,
    properties: Option<MessageProperties>,
}

impl Message {
    /// Create a message with properties.
    pub fn new(body: Vec<u8>, properties: MessageProperties) -> Self {
        Self {
            body,
            properties: Some(properties),
        }
    }

    /// Create a message that carries no properties at all.
    pub fn without_properties(body: Vec<u8>) -> Self {
        Self {
            body,
            properties: None,
        }
    }

    /// Message body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Message properties, if any.
    pub fn properties(&self) -> Option<&MessageProperties> {
        self.properties.as_ref()
    }

    /// Mutable access to the properties, if any.
    pub fn properties_mut(&mut self) -> Option<&mut MessageProperties> {
        self.properties.as_mut()
    }

    /// Shortcut for the content type.
    pub fn content_type(&self) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.content_type())
    }

    /// Body length in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Split into body and properties.
    pub fn into_parts(self) -> (Vec<u8>, Option<MessageProperties>) {
        (self.body, self.properties)
    }
}
