// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for observable registration and emission guard events.
//!
//! Per-emission logging is deliberately not a message type: emission is the
//! hot path and uses a bare `tracing::trace!` at the call site.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// An observer was appended to an observable's notification chain.
///
/// # Log Level
/// `debug!` - routine wiring event
pub struct ObserverRegistered {
    /// Chain length after the registration.
    pub observer_count: usize,
    /// Whether the stored last value was replayed to the new observer.
    pub replayed: bool,
}

impl Display for ObserverRegistered {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Observer registered: {} observer(s) on chain, replayed last value: {}",
            self.observer_count, self.replayed
        )
    }
}

impl StructuredLog for ObserverRegistered {
    fn log(&self) {
        tracing::debug!(
            observer_count = self.observer_count,
            replayed = self.replayed,
            "{}",
            self
        );
    }
}

/// A subscription was disposed and its observer removed from the chain.
///
/// # Log Level
/// `debug!` - routine wiring event
pub struct SubscriptionDisposed {
    /// Chain length after the removal.
    pub remaining: usize,
}

impl Display for SubscriptionDisposed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Subscription disposed: {} observer(s) remain on chain",
            self.remaining
        )
    }
}

impl StructuredLog for SubscriptionDisposed {
    fn log(&self) {
        tracing::debug!(remaining = self.remaining, "{}", self);
    }
}

/// An emission arrived while the same observable's pass was running.
///
/// # Log Level
/// `warn!` - indicates manually wired cyclic observation
pub struct ReentrantEmitRejected;

impl Display for ReentrantEmitRejected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Re-entrant emit rejected: observable is already mid-emission (cyclic wiring)"
        )
    }
}

impl StructuredLog for ReentrantEmitRejected {
    fn log(&self) {
        tracing::warn!("{}", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_registered_display() {
        let msg = ObserverRegistered {
            observer_count: 2,
            replayed: true,
        };
        assert_eq!(
            msg.to_string(),
            "Observer registered: 2 observer(s) on chain, replayed last value: true"
        );
    }

    #[test]
    fn subscription_disposed_display() {
        let msg = SubscriptionDisposed { remaining: 0 };
        assert_eq!(
            msg.to_string(),
            "Subscription disposed: 0 observer(s) remain on chain"
        );
    }
}
