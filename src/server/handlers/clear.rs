//! Clear handler: removes tagged or matching stitching vias

use crate::server::protocol::{Response, error_codes};
use crate::server::state::ServerState;
use crate::stitch::{clear_vias, ClearMode, ConfigError};
use crate::board::{Board, FillRegion};
use crate::settings::Units;
use serde::Deserialize;

/// Clear request. `undo` removes every tagged via; otherwise vias matching
/// size, drill and net inside the area are removed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClearRequest {
    pub undo: bool,
    pub area: Option<String>,
    pub via_size: Option<f64>,
    pub drill_size: Option<f64>,
    pub net: Option<String>,
}

/// Resolve the region and removal mode; match values default like a fill
pub fn resolve_clear_mode(
    board: &Board,
    units: Units,
    request: &ClearRequest,
) -> Result<(FillRegion, ClearMode), ConfigError> {
    let region = board.select_fill_region(request.area.as_deref())?;
    if request.undo {
        return Ok((region, ClearMode::Tagged));
    }

    let (via_size, drill_size) = match (request.via_size, request.drill_size) {
        (Some(size), Some(drill)) => (units.to_board(size), units.to_board(drill)),
        (size, drill) => {
            let dims = board.default_via_dimensions()?;
            (
                size.map_or(dims.diameter, |s| units.to_board(s)),
                drill.map_or(dims.drill, |d| units.to_board(d)),
            )
        }
    };
    let net = request.net.clone().unwrap_or_else(|| region.net.clone());

    Ok((region, ClearMode::Matching { via_size, drill_size, net }))
}

/// Handle Clear request
pub fn handle_clear(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let request: ClearRequest = match params {
        Some(p) => match serde_json::from_value(p) {
            Ok(r) => r,
            Err(e) => {
                return Response::error(id, error_codes::INVALID_PARAMS,
                    format!("Invalid params: {}", e));
            }
        },
        None => ClearRequest::default(),
    };

    let board = match state.board.as_mut() {
        Some(board) => board,
        None => {
            return Response::error(id, error_codes::NO_BOARD_LOADED,
                "No board loaded. Call LoadBoard first.".to_string());
        }
    };

    let (region, mode) = match resolve_clear_mode(board, state.units, &request) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::warn!("[Clear] Rejected: {}", e);
            return Response::rejected(id, &e);
        }
    };

    let result = clear_vias(&board.vias, &mode, &region, &state.groups);
    let removed = board.commit_removal(&result, &mut state.groups);
    board.store_groups(&state.groups);

    Response::success(id, serde_json::json!({
        "status": "ok",
        "mode": mode,
        "area": region.name,
        "removed": removed,
        "via_ids": result.removed
    }))
}
