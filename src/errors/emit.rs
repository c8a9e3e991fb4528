// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by the emission path.
//!
//! Emission never fails on its own; the only defined error is the guard
//! against user-built cycles. Observer panics are deliberately not
//! represented here: they propagate uncaught to the `emit` call site
//! (fail-fast, no isolation between observers).

use thiserror::Error;

/// Errors that can occur when emitting a value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitError {
    /// An observer emitted back into an observable whose own emission pass
    /// is still running. This only happens with manually wired cycles;
    /// operator-built graphs are acyclic by construction.
    #[error(
        "re-entrant emit: an observer emitted back into an observable that is mid-emission (cyclic wiring between observables)"
    )]
    ReentrantEmit,
}
