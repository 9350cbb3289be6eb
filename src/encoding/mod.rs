// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary object-graph encoding.
//!
//! This module provides the pieces a converter assembles per call:
//! - [`output`] - Bounded output buffer
//! - [`serializer`] - Per-call serializer writing "type descriptor + value"
//! - [`factory`] - Serializer factory capability and pool
//!
//! ## Wire layout
//!
//! A payload is two bincode values back to back: the type descriptor as a
//! string, then the value itself. Integers use fixed-width little-endian
//! encoding so payload sizes are predictable.

pub mod factory;
pub mod output;
pub mod serializer;

use bincode::Options;

pub use factory::{PooledSerializer, RegistryFactory, SerializerFactory, SerializerPool};
pub use output::BoundedOutput;
pub use serializer::{DecodedValue, GraphSerializer};

/// Options used when writing values.
pub(crate) fn encode_options() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

/// Options used when reading values; `limit` caps the bytes one read may consume.
pub(crate) fn decode_options(limit: u64) -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(limit)
}
