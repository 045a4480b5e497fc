//! Handler module declarations, re-exports and request dispatch

pub mod board;
pub mod clear;
pub mod fill;
pub mod settings;

pub use board::*;
pub use clear::*;
pub use fill::*;
pub use settings::*;

use crate::server::protocol::{Request, Response, error_codes};
use crate::server::state::ServerState;

/// Route one request to its handler
pub fn handle_request(state: &mut ServerState, request: Request) -> Response {
    log::debug!("[Server] {}", request.method);
    match request.method.as_str() {
        "LoadBoard" => handle_load_board(state, request.id, request.params),
        "SaveBoard" => handle_save_board(state, request.id, request.params),
        "SelectArea" => handle_select_area(state, request.id, request.params),
        "GetSettings" => handle_get_settings(state, request.id),
        "SaveSettings" => handle_save_settings(state, request.id, request.params),
        "Fill" => handle_fill(state, request.id, request.params),
        "Clear" => handle_clear(state, request.id, request.params),
        "GetGroup" => handle_get_group(state, request.id),
        "Close" => handle_close(state, request.id),
        other => Response::error(
            request.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", other),
        ),
    }
}
