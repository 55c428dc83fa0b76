//! Integration tests with mock HTTP server

pub mod calls;
pub mod errors;
pub mod mock_server;
pub mod reconfigure;
