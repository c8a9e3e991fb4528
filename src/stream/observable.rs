// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Core observable primitive: last-value state, emission, observation.
//!
//! `Observable<T>` is a cheaply cloneable handle to shared per-instance
//! state. `emit` and `observe` are the only primitive operations; every
//! operator in this crate is a pure composition of the two, wired at
//! construction time. Propagation is fully synchronous: one `emit` call
//! walks the whole downstream graph depth-first before returning.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::errors::EmitError;
use crate::observability::messages::stream::{ObserverRegistered, ReentrantEmitRejected};
use crate::observability::messages::StructuredLog;

/// Identifier for a registered observer, unique within its observable.
///
/// Only meaningful to the disposal extension; `observe` registrations are
/// permanent and never hand one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

/// One entry in an observable's notification chain.
pub(super) struct ObserverSlot<T> {
    pub(super) id: ObserverId,
    pub(super) callback: Rc<RefCell<dyn FnMut(&T)>>,
}

impl<T> Clone for ObserverSlot<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Rc::clone(&self.callback),
        }
    }
}

/// Per-instance state behind every `Observable<T>` handle.
pub(super) struct Shared<T> {
    /// Most recently emitted payload. Last-write-wins, no history.
    pub(super) last: RefCell<Option<T>>,
    /// Notification chain, in registration order. Append-only except for
    /// the disposal extension.
    pub(super) observers: RefCell<Vec<ObserverSlot<T>>>,
    /// Set while an emission pass on this instance is running.
    emitting: Cell<bool>,
    next_id: Cell<u64>,
}

/// A push-based value source.
///
/// Every `Observable` records the last value it emitted and replays it,
/// synchronously and exactly once, to each observer registered afterwards.
/// Cloning an `Observable` clones the handle, not the state: all clones
/// share one last value and one observer chain.
///
/// # Example
///
/// ```
/// use eddy::Observable;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let source = Observable::new();
/// let doubled = source.map(|x: &i32| x * 2);
///
/// let seen = Rc::new(Cell::new(0));
/// let sink = Rc::clone(&seen);
/// doubled.observe(move |x| sink.set(*x));
///
/// source.emit(4);
/// assert_eq!(seen.get(), 8);
/// ```
///
/// # Cycles
///
/// Observation relationships built by operators are acyclic. Manually
/// wiring an observer that emits back into an observable further up its
/// own chain would recurse forever; instead each instance rejects an
/// `emit` that arrives while its own emission pass is still running.
/// See [`Observable::try_emit`].
pub struct Observable<T> {
    pub(super) shared: Rc<Shared<T>>,
}

impl<T> Observable<T> {
    /// Create a fresh observable with no value and no observers.
    pub fn new() -> Self {
        Self {
            shared: Rc::new(Shared {
                last: RefCell::new(None),
                observers: RefCell::new(Vec::new()),
                emitting: Cell::new(false),
                next_id: Cell::new(0),
            }),
        }
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Observable<T> {
    /// Clone the handle. State is shared, not copied.
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("has_value", &self.shared.last.borrow().is_some())
            .field("observers", &self.shared.observers.borrow().len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Emit a value: record it as the last value, then invoke every
    /// currently registered observer with it, in registration order.
    ///
    /// Returns the observable itself so emissions can be chained.
    ///
    /// Observers registered during the pass do not run in that pass; they
    /// are replayed the current value at registration instead. An observer
    /// panic propagates to the caller of `emit` and the remaining
    /// observers in the pass do not run.
    ///
    /// # Panics
    ///
    /// Panics on re-entrant emission into this same instance (cyclic
    /// wiring). Use [`Observable::try_emit`] for the non-panicking form.
    pub fn emit(&self, value: T) -> &Self {
        match self.try_emit(value) {
            Ok(chain) => chain,
            Err(err) => panic!("{err}"),
        }
    }

    /// Non-panicking [`Observable::emit`]: returns
    /// [`EmitError::ReentrantEmit`] if this instance's emission pass is
    /// already running, leaving the last value untouched.
    pub fn try_emit(&self, value: T) -> Result<&Self, EmitError> {
        if self.shared.emitting.get() {
            ReentrantEmitRejected.log();
            return Err(EmitError::ReentrantEmit);
        }

        *self.shared.last.borrow_mut() = Some(value.clone());

        // Snapshot so registrations and disposals during the pass apply to
        // subsequent emissions only.
        let snapshot: Vec<ObserverSlot<T>> = self.shared.observers.borrow().clone();
        tracing::trace!(observers = snapshot.len(), "emitting value");

        let _pass = EmitPass::begin(&self.shared.emitting);
        for slot in &snapshot {
            (slot.callback.borrow_mut())(&value);
        }
        Ok(self)
    }

    /// Register an observer permanently.
    ///
    /// If a value was already emitted, the observer is invoked exactly once
    /// with it, synchronously, before this call returns. Every later
    /// emission then reaches it in registration order. Returns the
    /// observable itself so further observations can be chained.
    ///
    /// There is no way to remove an `observe` registration; see
    /// [`Observable::subscribe`] for the cancellable extension.
    pub fn observe<F>(&self, observer: F) -> &Self
    where
        F: FnMut(&T) + 'static,
    {
        self.register(observer);
        self
    }

    /// Register an observer like [`Observable::observe`] (replay included),
    /// but return a [`Subscription`](super::Subscription) handle that can
    /// cancel the registration.
    ///
    /// This is an extension to the core contract; operators never use it
    /// internally, so operator wiring remains permanent.
    pub fn subscribe<F>(&self, observer: F) -> super::Subscription<T>
    where
        F: FnMut(&T) + 'static,
    {
        let id = self.register(observer);
        super::Subscription::new(Rc::downgrade(&self.shared), id)
    }

    /// Replay the last value (if any), then append the observer to the
    /// chain under a fresh id.
    fn register<F>(&self, mut observer: F) -> ObserverId
    where
        F: FnMut(&T) + 'static,
    {
        // Clone the value out first so the observer may itself register
        // further observers on this instance during replay.
        let current = self.shared.last.borrow().clone();
        let replayed = match current {
            Some(value) => {
                observer(&value);
                true
            }
            None => false,
        };

        let id = ObserverId(self.shared.next_id.get());
        self.shared.next_id.set(id.0 + 1);
        self.shared.observers.borrow_mut().push(ObserverSlot {
            id,
            callback: Rc::new(RefCell::new(observer)),
        });

        ObserverRegistered {
            observer_count: self.shared.observers.borrow().len(),
            replayed,
        }
        .log();
        id
    }
}

/// Drop guard for the per-instance emission flag. Resets on unwind as
/// well, so an observable stays usable after a caught observer panic.
struct EmitPass<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> EmitPass<'a> {
    fn begin(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for EmitPass<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
