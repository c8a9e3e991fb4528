// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements the `Display` trait for human-readable
//! output and [`StructuredLog`] to pick the level and structured fields it
//! is recorded with.
//!
//! # Usage Pattern
//!
//! ```
//! use eddy::observability::messages::stream::ObserverRegistered;
//! use eddy::observability::messages::StructuredLog;
//!
//! let msg = ObserverRegistered {
//!     observer_count: 3,
//!     replayed: true,
//! };
//!
//! msg.log();
//! ```

pub mod stream;

/// Emit a message through `tracing` at the level appropriate to it.
pub trait StructuredLog: std::fmt::Display {
    fn log(&self);
}
