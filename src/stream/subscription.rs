// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cancellable observer registrations.
//!
//! This is an explicit extension to the core observable contract: plain
//! `observe` registrations are permanent, and operators only ever use
//! those. `subscribe` hands back a [`Subscription`] that can remove the
//! observer again. Subscriptions hold only a weak reference to the
//! observable, so they never keep a graph alive.

use std::fmt;
use std::rc::Weak;

use crate::observability::messages::stream::SubscriptionDisposed;
use crate::observability::messages::StructuredLog;

use super::observable::{ObserverId, Shared};

/// Handle for cancelling a `subscribe` registration.
pub struct Subscription<T> {
    source: Weak<Shared<T>>,
    id: ObserverId,
}

impl<T> Subscription<T> {
    pub(super) fn new(source: Weak<Shared<T>>, id: ObserverId) -> Self {
        Self { source, id }
    }

    /// Remove the observer from its observable's notification chain.
    ///
    /// Returns `true` if the observer was still registered, `false` if the
    /// observable has already been dropped. Disposing during an emission
    /// pass takes effect for subsequent emissions; the in-flight pass runs
    /// against its snapshot.
    pub fn dispose(self) -> bool {
        let Some(shared) = self.source.upgrade() else {
            return false;
        };
        let mut observers = shared.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|slot| slot.id != self.id);
        let removed = observers.len() != before;
        if removed {
            SubscriptionDisposed {
                remaining: observers.len(),
            }
            .log();
        }
        removed
    }

    /// Whether the observer is still registered on a live observable.
    pub fn is_active(&self) -> bool {
        self.source.upgrade().is_some_and(|shared| {
            shared
                .observers
                .borrow()
                .iter()
                .any(|slot| slot.id == self.id)
        })
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
