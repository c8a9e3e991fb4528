// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! This module provides centralized message types for diagnostic logging
//! throughout the crate. Message types follow a struct-based pattern with a
//! `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Enable future internationalization without code changes
//! * Provide consistent, structured logging output
//!
//! The library only ever records events through `tracing`; it never
//! installs a subscriber. Applications embedding the crate choose their own
//! subscriber (tests use `tracing-subscriber`).
//!
//! # Organization
//!
//! * `messages::stream` - observable registration, disposal, and emission
//!   guard events

pub mod messages;
