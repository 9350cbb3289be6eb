// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use msgcodec::{BincodeMessageConverter, ConverterConfig, TypeRegistry};

// ============================================================================
// Sample Payload Types
// ============================================================================

/// A line item inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
    pub unit_price_cents: u64,
}

/// Nested struct with collections and optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer: String,
    pub items: Vec<LineItem>,
    pub note: Option<String>,
    pub tags: BTreeMap<String, String>,
}

/// Enum with unit, tuple and struct variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Heartbeat,
    Shipped(u64, String),
    Cancelled { order_id: u64, reason: Option<String> },
}

/// Small payload used by the concurrency tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub worker: usize,
    pub seq: usize,
    pub label: String,
}

pub const ORDER_DESCRIPTOR: &str = "shop.Order";
pub const EVENT_DESCRIPTOR: &str = "shop.Event";
pub const TICK_DESCRIPTOR: &str = "test.Tick";

// ============================================================================
// Fixtures
// ============================================================================

/// Registry with the built-ins plus the sample types.
pub fn sample_registry() -> TypeRegistry {
    let registry = TypeRegistry::with_defaults();
    registry
        .register::<Order>(ORDER_DESCRIPTOR)
        .expect("register Order");
    registry
        .register::<Event>(EVENT_DESCRIPTOR)
        .expect("register Event");
    registry
        .register::<Tick>(TICK_DESCRIPTOR)
        .expect("register Tick");
    registry
}

/// Converter over [`sample_registry`] with the given configuration.
pub fn sample_converter(config: ConverterConfig) -> BincodeMessageConverter {
    BincodeMessageConverter::with_config(Arc::new(sample_registry()), config)
}

pub fn sample_order() -> Order {
    let mut tags = BTreeMap::new();
    tags.insert("channel".to_string(), "web".to_string());
    tags.insert("region".to_string(), "eu-west".to_string());

    Order {
        id: 1001,
        customer: "Ada".to_string(),
        items: vec![
            LineItem {
                sku: "KB-01".to_string(),
                quantity: 2,
                unit_price_cents: 4999,
            },
            LineItem {
                sku: "MS-07".to_string(),
                quantity: 1,
                unit_price_cents: 2599,
            },
        ],
        note: Some("leave at the door".to_string()),
        tags,
    }
}
