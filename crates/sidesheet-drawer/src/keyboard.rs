//! Soft-keyboard signal adapter.
//!
//! The host reports keyboard transitions through a [`KeyboardSignal`]; the
//! drawer subscribes per screen and mirrors every frame into the store.
//! [`KeyboardBroadcaster`] is a ready-made signal hosts can emit into from any
//! thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;
use sidesheet_core::collections::HashMap;

use crate::store::DrawerStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardPhase {
    /// Animation frame of a keyboard show/hide transition.
    Move,
    /// Frame of a finger-driven (interactive) dismissal.
    Interactive,
    /// Transition settled.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardEvent {
    pub phase: KeyboardPhase,
    /// 0 hidden, 1 fully shown.
    pub progress: f32,
    /// Target keyboard height in px.
    pub height: f32,
}

impl KeyboardEvent {
    pub fn new(phase: KeyboardPhase, progress: f32, height: f32) -> Self {
        Self {
            phase,
            progress,
            height,
        }
    }

    /// Progress clamped to `[0, 1]`, height to `>= 0`, NaN mapped to 0.
    pub fn sanitized(self) -> Self {
        let progress = if self.progress.is_nan() {
            0.0
        } else {
            self.progress.clamp(0.0, 1.0)
        };
        let height = if self.height.is_finite() {
            self.height.max(0.0)
        } else {
            0.0
        };
        Self {
            phase: self.phase,
            progress,
            height,
        }
    }
}

pub type KeyboardListener = Box<dyn Fn(KeyboardEvent) + Send + Sync + 'static>;

/// Source of keyboard transition events.
pub trait KeyboardSignal {
    /// Delivers every subsequent event to `listener` until the subscription
    /// is dropped.
    fn subscribe(&self, listener: KeyboardListener) -> KeyboardSubscription;
}

/// Dismisses the soft keyboard. Called fire-and-forget when a drag starts.
pub trait KeyboardDismisser {
    fn dismiss(&self);
}

/// Active keyboard subscription; unsubscribes on drop.
#[must_use = "dropping the subscription unsubscribes"]
pub struct KeyboardSubscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl KeyboardSubscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for KeyboardSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardSubscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

type ListenerMap = HashMap<u64, Arc<dyn Fn(KeyboardEvent) + Send + Sync + 'static>>;

struct BroadcasterInner {
    listeners: ArcSwap<ListenerMap>,
    next_id: AtomicU64,
}

/// Fan-out [`KeyboardSignal`] fed by [`emit`](Self::emit).
#[derive(Clone)]
pub struct KeyboardBroadcaster {
    inner: Arc<BroadcasterInner>,
}

impl KeyboardBroadcaster {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BroadcasterInner {
                listeners: ArcSwap::from_pointee(ListenerMap::default()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Delivers `event` to every listener on the calling thread.
    pub fn emit(&self, event: KeyboardEvent) {
        let listeners = self.inner.listeners.load();
        for listener in listeners.values() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.load().len()
    }
}

impl Default for KeyboardBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardSignal for KeyboardBroadcaster {
    fn subscribe(&self, listener: KeyboardListener) -> KeyboardSubscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let listener: Arc<dyn Fn(KeyboardEvent) + Send + Sync> = Arc::from(listener);
        self.inner.listeners.rcu(|current| {
            let mut next = ListenerMap::clone(current);
            next.insert(id, listener.clone());
            next
        });
        let weak: Weak<BroadcasterInner> = Arc::downgrade(&self.inner);
        KeyboardSubscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.rcu(|current| {
                    let mut next = ListenerMap::clone(current);
                    next.remove(&id);
                    next
                });
            }
        })
    }
}

/// Mirrors `signal` into the keyboard cells of `store`.
pub fn bind_keyboard(signal: &dyn KeyboardSignal, store: &DrawerStore) -> KeyboardSubscription {
    let store = store.clone();
    signal.subscribe(Box::new(move |event| store.apply_keyboard(event)))
}
