// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod errors;        // error handling
pub mod observability; // structured logging
pub mod stream;        // observable primitive + operators

pub use errors::EmitError;
pub use stream::{Keyed, Observable, ObserverId, Subscription};
