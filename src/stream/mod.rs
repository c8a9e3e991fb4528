// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod keyed;
mod observable;
mod operators;
mod subscription;


pub use keyed::Keyed;
pub use observable::{Observable, ObserverId};
pub use subscription::Subscription;
