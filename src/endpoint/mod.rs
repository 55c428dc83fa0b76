//! Endpoint descriptor layer: declarations of every API operation.
//!
//! Descriptors are data. Each one names an HTTP verb, a path template, the
//! body encoding and the typed parameters the operation accepts; nothing in
//! the interpreter knows what a given operation means.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`descriptor`] | `EndpointDescriptor`, parameter kinds and structural validation |
//! | [`table`] | Built-in and custom descriptor tables |
//! | [`error`] | Table loading and validation errors |
//!
//! ## Table format
//!
//! ```yaml
//! listTransaction:
//!   method: GET
//!   path: /transaction
//!   params:
//!     - { name: perPage, type: number }
//!     - { name: from, type: date }
//!   param_defaults:
//!     perPage: 50
//!
//! getTransaction:
//!   method: GET
//!   path: /transaction/{:id}
//!   route_params:
//!     id: string
//! ```

pub mod descriptor;
pub mod error;
pub mod table;

pub use descriptor::{EndpointDescriptor, HttpVerb, ParamKind, ParamSpec, TransportMode};
pub use error::DescriptorError;
pub use table::EndpointTable;
