//! Rx-style reactive programming for Rust
//!
//! This module provides the four Rx pipeline shapes on top of `futures` streams
//! and futures, with `subscribe` callbacks driven on the Tokio runtime.

pub mod completable;
pub mod emitter;
pub mod maybe;
pub mod observable;
pub mod observer;
pub mod operators;
pub mod single;
pub mod subscription;

pub use completable::Completable;
pub use emitter::Emitter;
pub use maybe::Maybe;
pub use observable::Observable;
pub use observer::{Observer, Recorded, Terminal};
pub use single::Single;
pub use subscription::Subscription;
