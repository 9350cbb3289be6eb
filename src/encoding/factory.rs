// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Serializer factories and the serializer pool.
//!
//! Converters never hold a serializer themselves. Each call obtains an
//! exclusive instance from a [`SerializerPool`], which either creates a fresh
//! one from its [`SerializerFactory`] or hands out an idle one from a
//! lock-free queue. The [`PooledSerializer`] guard returns the instance when
//! dropped, on success and error paths alike.

use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_queue::ArrayQueue;

use super::serializer::GraphSerializer;
use crate::core::TypeRegistry;

/// Capability that produces new serializer instances.
///
/// Any `Fn() -> GraphSerializer` closure is a factory, so custom set-up can
/// be injected without defining a type.
pub trait SerializerFactory: Send + Sync {
    /// Create a new serializer instance.
    fn create(&self) -> GraphSerializer;
}

impl<F> SerializerFactory for F
where
    F: Fn() -> GraphSerializer + Send + Sync,
{
    fn create(&self) -> GraphSerializer {
        self()
    }
}

/// Default factory: plain serializers over a shared registry.
#[derive(Clone, Debug)]
pub struct RegistryFactory {
    registry: Arc<TypeRegistry>,
}

impl RegistryFactory {
    /// Create a factory for the given registry.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    /// Registry handed to every serializer.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }
}

impl SerializerFactory for RegistryFactory {
    fn create(&self) -> GraphSerializer {
        GraphSerializer::new(Arc::clone(&self.registry))
    }
}

/// Inner pool state (shared via Arc).
struct PoolInner {
    factory: Arc<dyn SerializerFactory>,
    /// Idle instances; `None` when every call gets a fresh serializer
    idle: Option<ArrayQueue<GraphSerializer>>,
    /// Serializers created by the factory (for metrics)
    total_created: AtomicUsize,
}

impl PoolInner {
    fn take(&self) -> GraphSerializer {
        if let Some(serializer) = self.idle.as_ref().and_then(ArrayQueue::pop) {
            return serializer;
        }
        let created = self.total_created.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(created, "creating serializer instance");
        self.factory.create()
    }

    fn give_back(&self, mut serializer: GraphSerializer) {
        serializer.reset();
        if let Some(idle) = &self.idle {
            // Pool full: the instance is simply dropped.
            let _ = idle.push(serializer);
        }
    }
}

/// A serializer leased from a pool, returned when dropped.
pub struct PooledSerializer {
    serializer: ManuallyDrop<GraphSerializer>,
    pool: Arc<PoolInner>,
}

impl Deref for PooledSerializer {
    type Target = GraphSerializer;

    #[inline]
    fn deref(&self) -> &GraphSerializer {
        &self.serializer
    }
}

impl DerefMut for PooledSerializer {
    #[inline]
    fn deref_mut(&mut self) -> &mut GraphSerializer {
        &mut self.serializer
    }
}

impl Drop for PooledSerializer {
    fn drop(&mut self) {
        // SAFETY: `serializer` is not accessed again after being taken here.
        let serializer = unsafe { ManuallyDrop::take(&mut self.serializer) };
        self.pool.give_back(serializer);
    }
}

impl fmt::Debug for PooledSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledSerializer")
            .field(&*self.serializer)
            .finish()
    }
}

/// Source of exclusive serializer instances.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use msgcodec::core::TypeRegistry;
/// use msgcodec::encoding::{RegistryFactory, SerializerPool};
///
/// let factory = RegistryFactory::new(Arc::new(TypeRegistry::with_defaults()));
/// let pool = SerializerPool::new(factory, 4);
///
/// {
///     let serializer = pool.acquire();
///     assert_eq!(serializer.values_written(), 0);
/// } // returned to the pool here
///
/// assert_eq!(pool.idle_count(), 1);
/// ```
#[derive(Clone)]
pub struct SerializerPool {
    inner: Arc<PoolInner>,
}

impl SerializerPool {
    /// Create a pool keeping up to `max_idle` instances for reuse.
    ///
    /// `max_idle == 0` behaves like [`SerializerPool::unpooled`].
    pub fn new(factory: impl SerializerFactory + 'static, max_idle: usize) -> Self {
        Self::from_shared(Arc::new(factory), max_idle)
    }

    /// Create a pool sized for the machine (two idle instances per CPU).
    pub fn with_default_size(factory: impl SerializerFactory + 'static) -> Self {
        Self::new(factory, num_cpus::get() * 2)
    }

    /// Create a source that builds a fresh serializer for every call.
    pub fn unpooled(factory: impl SerializerFactory + 'static) -> Self {
        Self::new(factory, 0)
    }

    /// Create a pool from an already shared factory.
    pub fn from_shared(factory: Arc<dyn SerializerFactory>, max_idle: usize) -> Self {
        let idle = (max_idle > 0).then(|| ArrayQueue::new(max_idle));
        Self {
            inner: Arc::new(PoolInner {
                factory,
                idle,
                total_created: AtomicUsize::new(0),
            }),
        }
    }

    /// Lease a serializer for exclusive use.
    #[inline]
    pub fn acquire(&self) -> PooledSerializer {
        PooledSerializer {
            serializer: ManuallyDrop::new(self.inner.take()),
            pool: Arc::clone(&self.inner),
        }
    }

    /// Whether instances are kept for reuse.
    pub fn is_pooled(&self) -> bool {
        self.inner.idle.is_some()
    }

    /// Maximum number of idle instances kept.
    pub fn max_idle(&self) -> usize {
        self.inner.idle.as_ref().map_or(0, ArrayQueue::capacity)
    }

    /// Number of idle instances currently in the pool.
    pub fn idle_count(&self) -> usize {
        self.inner.idle.as_ref().map_or(0, ArrayQueue::len)
    }

    /// Number of instances the factory has created.
    pub fn total_created(&self) -> usize {
        self.inner.total_created.load(Ordering::Acquire)
    }

    /// Pre-fill the pool with up to `count` instances.
    pub fn warmup(&self, count: usize) {
        let Some(idle) = &self.inner.idle else {
            return;
        };
        for _ in 0..count.min(idle.capacity()) {
            self.inner.total_created.fetch_add(1, Ordering::AcqRel);
            if idle.push(self.inner.factory.create()).is_err() {
                break;
            }
        }
    }
}

impl fmt::Debug for SerializerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerPool")
            .field("max_idle", &self.max_idle())
            .field("idle", &self.idle_count())
            .field("total_created", &self.total_created())
            .finish()
    }
}
