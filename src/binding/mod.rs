//! Argument binding: turns caller arguments into a wire-ready request.
//!
//! The pieces run in a fixed order for every call:
//!
//! 1. [`conforms`] checks a value against its declared [`ParamKind`](crate::endpoint::ParamKind).
//! 2. [`bind`] merges defaults, enforces required parameters and builds the
//!    query string or body.
//! 3. [`resolve`] substitutes `{:name}` placeholders in the path.
//! 4. [`prepare`] drives the above for one operation and attaches headers.
//!
//! Nothing in this module performs I/O.

pub mod binder;
pub mod conformance;
pub mod path;
pub mod request;
pub mod serialize;
pub mod value;

pub use binder::{bind, BoundInput};
pub use conformance::conforms;
pub use path::resolve;
pub use request::{prepare, prepare_json, PreparedRequest, RequestBody};
pub use serialize::{escape_component, serialize, Placement};
pub use value::{CallArgs, ParamValue};
