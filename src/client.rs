//! Paystack client: the public entry point.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod operations;

pub use builder::PaystackClientBuilder;
pub use core::{BatchCall, PaystackClient, DEFAULT_BATCH_CONCURRENCY};
pub use operations::BUILTIN_OPERATIONS;
