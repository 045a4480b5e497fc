//! Board handlers: LoadBoard, SaveBoard, SelectArea, GetGroup, Close

use crate::board::Board;
use crate::server::protocol::{Response, error_codes};
use crate::server::state::ServerState;
use crate::settings::Units;
use crate::stitch::STITCH_GROUP_NAME;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Instant;

/// Handle LoadBoard request - loads a board snapshot from a file or inline JSON
pub fn handle_load_board(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct LoadParams {
        #[serde(default)]
        file_path: Option<String>,
        #[serde(default)]
        board: Option<Board>,
        #[serde(default)]
        units: Option<Units>,
    }

    let params: LoadParams = match params.and_then(|p| serde_json::from_value(p).ok()) {
        Some(p) => p,
        None => {
            return Response::error(id, error_codes::INVALID_PARAMS,
                "Invalid params: expected {file_path: string} or {board: object}".to_string());
        }
    };

    let start = Instant::now();
    let (board, path) = match (params.board, params.file_path) {
        (Some(board), path) => (board, path.map(PathBuf::from)),
        (None, Some(path)) => match Board::from_file(&path) {
            Ok(board) => (board, Some(PathBuf::from(path))),
            Err(e) => {
                return Response::error(id, error_codes::LOAD_FAILED,
                    format!("Failed to load board: {}", e));
            }
        },
        (None, None) => {
            return Response::error(id, error_codes::INVALID_PARAMS,
                "Invalid params: expected {file_path: string} or {board: object}".to_string());
        }
    };

    if let Some(units) = params.units {
        state.units = units;
    }

    let zone_count = board.zones.len();
    let via_count = board.vias.len();
    state.set_board(board, path);

    log::info!("[Server] Board loaded in {:?}: {} zones, {} vias",
        start.elapsed(), zone_count, via_count);

    Response::success(id, serde_json::json!({
        "status": "ok",
        "zones": zone_count,
        "vias": via_count,
        "units": state.units.to_string()
    }))
}

/// Handle SaveBoard request - writes the board, including groups, back to disk
pub fn handle_save_board(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize, Default)]
    struct SaveParams {
        #[serde(default)]
        file_path: Option<String>,
    }

    let params: SaveParams = params
        .and_then(|p| serde_json::from_value(p).ok())
        .unwrap_or_default();

    let board = match state.board.as_mut() {
        Some(board) => board,
        None => {
            return Response::error(id, error_codes::NO_BOARD_LOADED,
                "No board loaded. Call LoadBoard first.".to_string());
        }
    };

    let path = match params.file_path.map(PathBuf::from).or_else(|| state.board_path.clone()) {
        Some(path) => path,
        None => {
            return Response::error(id, error_codes::INVALID_PARAMS,
                "Invalid params: no file_path and board was not loaded from a file".to_string());
        }
    };

    board.store_groups(&state.groups);
    if let Err(e) = board.save(&path) {
        return Response::error(id, error_codes::SAVE_FAILED, format!("{}", e));
    }

    log::info!("[Server] Board saved to {}", path.display());
    Response::success(id, serde_json::json!({
        "status": "ok",
        "file_path": path.display().to_string()
    }))
}

/// Handle SelectArea request - marks one zone as the fill area
pub fn handle_select_area(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct SelectParams {
        name: String,
    }

    let params: SelectParams = match params.and_then(|p| serde_json::from_value(p).ok()) {
        Some(p) => p,
        None => {
            return Response::error(id, error_codes::INVALID_PARAMS,
                "Invalid params: expected {name: string}".to_string());
        }
    };

    let board = match state.board.as_mut() {
        Some(board) => board,
        None => {
            return Response::error(id, error_codes::NO_BOARD_LOADED,
                "No board loaded. Call LoadBoard first.".to_string());
        }
    };

    if let Err(e) = board.select_area(&params.name) {
        return Response::rejected(id, &e);
    }

    // Report the same validation a fill would hit
    match board.select_fill_region(None) {
        Ok(region) => Response::success(id, serde_json::json!({
            "status": "ok",
            "area": region.name,
            "layer": region.layer,
            "net": region.net
        })),
        Err(e) => Response::rejected(id, &e),
    }
}

/// Handle GetGroup request - lists the ids tagged by previous fills
pub fn handle_get_group(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    let members: Vec<u64> = state
        .groups
        .find(STITCH_GROUP_NAME)
        .map(|g| g.members.iter().copied().collect())
        .unwrap_or_default();

    Response::success(id, serde_json::json!({
        "name": STITCH_GROUP_NAME,
        "exists": state.groups.find(STITCH_GROUP_NAME).is_some(),
        "members": members
    }))
}

/// Handle Close request - drops the loaded board
pub fn handle_close(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    state.close();
    log::info!("[Server] Board closed");
    Response::success(id, serde_json::json!({ "status": "ok" }))
}
