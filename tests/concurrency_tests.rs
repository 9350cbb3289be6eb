// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Concurrency tests for a converter shared across threads.
//!
//! Every conversion must use its own serializer instance, whether the
//! instances come from the factory directly or from a bounded pool.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use common::*;
use msgcodec::{
    BincodeMessageConverter, ConverterConfig, GraphSerializer, MessageConverter,
    MessageProperties, SerializerPool,
};

const THREADS: usize = 8;
const ITERATIONS: usize = 200;

/// Encode and decode a distinct value per iteration on every thread.
fn hammer(converter: Arc<BincodeMessageConverter>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let converter = Arc::clone(&converter);
            thread::spawn(move || {
                for seq in 0..ITERATIONS {
                    let tick = Tick {
                        worker,
                        seq,
                        label: format!("w{worker}-s{seq}"),
                    };
                    let message = converter
                        .to_message(&tick, &mut MessageProperties::new())
                        .expect("encode tick");
                    let decoded: Option<Tick> =
                        converter.from_message_as(&message).expect("decode tick");
                    assert_eq!(decoded, Some(tick));

                    let text = format!("text {worker}/{seq}");
                    let message = converter
                        .to_message(&text, &mut MessageProperties::new())
                        .expect("encode text");
                    let decoded: Option<String> =
                        converter.from_message_as(&message).expect("decode text");
                    assert_eq!(decoded, Some(text));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}

/// Factory that counts how many serializers it has built.
fn counting_factory(
    counter: Arc<AtomicUsize>,
) -> impl Fn() -> GraphSerializer + Send + Sync + 'static {
    let registry = Arc::new(sample_registry());
    move || {
        counter.fetch_add(1, Ordering::SeqCst);
        GraphSerializer::new(Arc::clone(&registry))
    }
}

#[test]
fn test_shared_converter_unpooled() {
    let converter = Arc::new(sample_converter(ConverterConfig::default().with_pool_size(0)));
    assert!(!converter.serializers().is_pooled());
    hammer(converter);
}

#[test]
fn test_shared_converter_pooled() {
    let converter = Arc::new(sample_converter(ConverterConfig::default().with_pool_size(4)));
    assert!(converter.serializers().is_pooled());

    hammer(Arc::clone(&converter));

    let pool = converter.serializers();
    assert!(pool.idle_count() <= 4);
    assert!(pool.total_created() >= 1);
}

#[test]
fn test_unpooled_factory_runs_per_call() {
    let counter = Arc::new(AtomicUsize::new(0));
    let converter = BincodeMessageConverter::with_factory(
        counting_factory(Arc::clone(&counter)),
        ConverterConfig::default().with_pool_size(0),
    );

    for i in 0..10u32 {
        let message = converter.to_message(&i, &mut MessageProperties::new()).unwrap();
        let decoded: Option<u32> = converter.from_message_as(&message).unwrap();
        assert_eq!(decoded, Some(i));
    }

    // One serializer for each encode and each decode.
    assert_eq!(counter.load(Ordering::SeqCst), 20);
}

#[test]
fn test_pooled_factory_reuses_instances() {
    let counter = Arc::new(AtomicUsize::new(0));
    let converter = BincodeMessageConverter::with_factory(
        counting_factory(Arc::clone(&counter)),
        ConverterConfig::default().with_pool_size(2),
    );

    for i in 0..10u32 {
        let message = converter.to_message(&i, &mut MessageProperties::new()).unwrap();
        converter.from_message(&message).unwrap();
    }

    // Sequential use only ever needs a single instance.
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(converter.serializers().idle_count(), 1);
}

#[test]
fn test_pooled_factory_under_contention() {
    let counter = Arc::new(AtomicUsize::new(0));
    let pool = SerializerPool::new(counting_factory(Arc::clone(&counter)), 2);
    let converter = Arc::new(BincodeMessageConverter::with_pool(
        pool,
        ConverterConfig::default(),
    ));

    hammer(Arc::clone(&converter));

    let created = counter.load(Ordering::SeqCst);
    assert!(created >= 1);
    assert_eq!(created, converter.serializers().total_created());
    assert!(converter.serializers().idle_count() <= 2);
}

#[test]
fn test_warmup_fills_pool() {
    let counter = Arc::new(AtomicUsize::new(0));
    let pool = SerializerPool::new(counting_factory(Arc::clone(&counter)), 3);

    pool.warmup(5);
    assert_eq!(pool.idle_count(), 3);
    assert_eq!(counter.load(Ordering::SeqCst), 3);

    {
        let _a = pool.acquire();
        let _b = pool.acquire();
        assert_eq!(pool.idle_count(), 1);
    }
    assert_eq!(pool.idle_count(), 3);
}
