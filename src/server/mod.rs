//! Stitching server - JSON-RPC bridge between a host editor and the engine
//!
//! Requests arrive one per line on stdin; responses leave one per line on
//! stdout. Logs go to stderr.
//!
//! # Module Structure
//! - `protocol` - JSON-RPC request/response types
//! - `state` - Loaded board, groups and settings
//! - `handlers` - Request handlers and dispatch

pub mod handlers;
pub mod protocol;
pub mod state;

pub use handlers::handle_request;
pub use protocol::{Request, Response, ErrorResponse, error_codes};
pub use state::ServerState;
