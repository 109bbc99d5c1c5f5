//! # rxstudy
//!
//! Rx-style reactive types for Rust, built on `futures` streams and the Tokio runtime.
//!
//! ## Types
//!
//! - **Single**: exactly one value, or an error
//! - **Maybe**: zero or one value, or an error
//! - **Completable**: no value, just completion or an error
//! - **Observable**: zero or more values, then completion or an error
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rxstudy::rx::Observable;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subscription = Observable::range(3, 10)?
//!         .map(|i| format!("item = {}", i))
//!         .subscribe(
//!             |item| println!("{}", item),
//!             |err| eprintln!("onError {}", err),
//!             || println!("onComplete"),
//!         );
//!
//!     subscription.terminated().await;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod rx;
pub mod value;

pub use error::{Result, RxError};
pub use value::{FromValue, Value, ValueKind};
