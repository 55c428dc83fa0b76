//! # paystack-lib-rust
//!
//! Declarative client binding for the Paystack REST API.
//!
//! ## Overview
//!
//! Every API operation is a row in a descriptor table: HTTP verb, path
//! template, body encoding and typed parameters. The client interprets those
//! rows at call time. It checks the caller's arguments against the declared
//! types, applies defaults, builds the query string or body, substitutes path
//! placeholders and sends the request through a shared, pre-configured
//! transport. Adding an endpoint means adding a table row, not code.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paystack::{CallArgs, PaystackClient};
//!
//! #[tokio::main]
//! async fn main() -> paystack::Result<()> {
//!     let client = PaystackClient::new("sk_test_xxx", "development")?;
//!
//!     let resp = client
//!         .initialize_transaction(
//!             CallArgs::new()
//!                 .with("email", "customer@example.com")
//!                 .with("amount", 500000i64),
//!         )
//!         .await?;
//!     println!("{:?}", resp.data());
//!
//!     // Any operation is also callable by name.
//!     let resp = client
//!         .call("getTransaction", CallArgs::new().with("id", "1504248187"))
//!         .await?;
//!     println!("{}", resp.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`endpoint`] | Descriptor structures and built-in tables |
//! | [`binding`] | Argument checking, serialization and request preparation |
//! | [`transport`] | Transport trait, reqwest implementation, hooks and configuration |
//! | [`client`] | `PaystackClient` and its builder |
//!
//! ## Logging
//!
//! The crate emits `tracing` events and installs no subscriber.

pub mod binding;
pub mod client;
pub mod endpoint;
pub mod transport;

// Re-export main types for convenience
pub use binding::{CallArgs, ParamValue, PreparedRequest, RequestBody};
pub use client::{BatchCall, PaystackClient, PaystackClientBuilder};
pub use endpoint::{
    DescriptorError, EndpointDescriptor, EndpointTable, HttpVerb, ParamKind, ParamSpec,
    TransportMode,
};
pub use transport::{
    ApiResponse, Environment, HookChain, ResponseHook, Transport, TransportConfig,
    TransportError, TransportOptions,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
