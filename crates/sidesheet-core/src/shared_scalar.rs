//! Lock-free animated scalars shared between the gesture/animation context
//! and the rendering context.
//!
//! A [`SharedScalar`] stores an `f32` as raw bits in an atomic, so reads and
//! writes never block. Every effective write bumps a revision counter,
//! notifies observers synchronously on the writing thread and asks the host
//! scheduler for a frame. Observer lists are copy-on-write behind an
//! [`ArcSwap`], so notification does not take a lock either.
//!
//! [`DerivedScalar`] never stores a value: it recomputes from its sources on
//! every read, which keeps derived cells consistent with their inputs by
//! construction.

use crate::platform::RuntimeScheduler;
use arc_swap::ArcSwap;
use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type ObserverFn = Arc<dyn Fn(f32) + Send + Sync + 'static>;

#[derive(Clone)]
struct ObserverEntry {
    id: u64,
    callback: ObserverFn,
}

type ObserverList = SmallVec<[ObserverEntry; 4]>;

struct ScalarInner {
    bits: AtomicU32,
    revision: AtomicU64,
    observers: ArcSwap<ObserverList>,
    next_observer_id: AtomicU64,
    scheduler: Option<Arc<dyn RuntimeScheduler>>,
}

/// Shared mutable `f32` cell. Cloning yields another handle to the same cell.
#[derive(Clone)]
pub struct SharedScalar {
    inner: Arc<ScalarInner>,
}

impl SharedScalar {
    /// Creates a cell that does not request frames on write.
    pub fn new(initial: f32) -> Self {
        Self::build(initial, None)
    }

    /// Creates a cell that calls `scheduler.schedule_frame()` on every
    /// effective write.
    pub fn with_scheduler(initial: f32, scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self::build(initial, Some(scheduler))
    }

    fn build(initial: f32, scheduler: Option<Arc<dyn RuntimeScheduler>>) -> Self {
        Self {
            inner: Arc::new(ScalarInner {
                bits: AtomicU32::new(initial.to_bits()),
                revision: AtomicU64::new(0),
                observers: ArcSwap::from_pointee(ObserverList::new()),
                next_observer_id: AtomicU64::new(1),
                scheduler,
            }),
        }
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.inner.bits.load(Ordering::Acquire))
    }

    /// Writes `value`. Writing the bit-identical value is a no-op.
    pub fn set(&self, value: f32) {
        let bits = value.to_bits();
        let previous = self.inner.bits.swap(bits, Ordering::AcqRel);
        if previous == bits {
            return;
        }
        self.inner.revision.fetch_add(1, Ordering::AcqRel);
        let observers = self.inner.observers.load();
        for entry in observers.iter() {
            (entry.callback)(value);
        }
        if let Some(scheduler) = &self.inner.scheduler {
            scheduler.schedule_frame();
        }
    }

    /// Applies `f` to the current value and writes the result.
    pub fn update(&self, f: impl FnOnce(f32) -> f32) {
        self.set(f(self.get()));
    }

    /// Number of effective writes since creation.
    pub fn revision(&self) -> u64 {
        self.inner.revision.load(Ordering::Acquire)
    }

    /// Registers `callback` to run synchronously after every effective write.
    ///
    /// The observer stays registered until the returned handle is dropped.
    pub fn observe(&self, callback: impl Fn(f32) + Send + Sync + 'static) -> ObserverHandle {
        let id = self.inner.next_observer_id.fetch_add(1, Ordering::Relaxed);
        let entry = ObserverEntry {
            id,
            callback: Arc::new(callback),
        };
        self.inner.observers.rcu(|current| {
            let mut next = ObserverList::clone(current);
            next.push(entry.clone());
            next
        });
        ObserverHandle {
            cell: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.load().len()
    }

    /// Returns true when both handles point at the same cell.
    pub fn ptr_eq(&self, other: &SharedScalar) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SharedScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedScalar")
            .field("value", &self.get())
            .field("revision", &self.revision())
            .finish()
    }
}

/// Keeps an observer registered on a [`SharedScalar`]; unregisters on drop.
#[must_use = "dropping the handle unregisters the observer"]
pub struct ObserverHandle {
    cell: Weak<ScalarInner>,
    id: u64,
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        let Some(cell) = self.cell.upgrade() else {
            return;
        };
        let id = self.id;
        cell.observers.rcu(|current| {
            current
                .iter()
                .filter(|entry| entry.id != id)
                .cloned()
                .collect::<ObserverList>()
        });
    }
}

/// Read-only scalar recomputed from its sources on every read.
#[derive(Clone)]
pub struct DerivedScalar {
    sources: SmallVec<[SharedScalar; 2]>,
    compute: Arc<dyn Fn(&[f32]) -> f32 + Send + Sync + 'static>,
}

impl DerivedScalar {
    pub fn new(
        sources: &[SharedScalar],
        compute: impl Fn(&[f32]) -> f32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            sources: sources.iter().cloned().collect(),
            compute: Arc::new(compute),
        }
    }

    pub fn get(&self) -> f32 {
        let values: SmallVec<[f32; 2]> = self.sources.iter().map(SharedScalar::get).collect();
        (self.compute)(&values)
    }

    /// Sum of source revisions; changes whenever any source changes.
    pub fn revision(&self) -> u64 {
        self.sources.iter().map(SharedScalar::revision).sum()
    }
}

impl fmt::Debug for DerivedScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedScalar")
            .field("value", &self.get())
            .field("sources", &self.sources.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/shared_scalar_tests.rs"]
mod tests;
