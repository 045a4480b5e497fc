//! Settings handlers: GetSettings, SaveSettings

use crate::server::protocol::{Response, error_codes};
use crate::server::state::ServerState;
use crate::settings::{StitchSettings, Units};
use serde::Deserialize;

/// Handle GetSettings request - returns the dialog defaults and active units,
/// plus the loaded board's default via in those units
pub fn handle_get_settings(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    let via = state
        .board
        .as_ref()
        .and_then(|board| board.default_via_dimensions().ok())
        .map(|dims| serde_json::json!({
            "via_size": state.units.from_board(dims.diameter),
            "drill_size": state.units.from_board(dims.drill)
        }));

    Response::success(id, serde_json::json!({
        "settings": state.settings,
        "units": state.units,
        "via": via,
        "file_path": state.settings_path.display().to_string()
    }))
}

/// Handle SaveSettings request - replaces and persists the dialog defaults
pub fn handle_save_settings(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct SaveSettingsParams {
        settings: StitchSettings,
        #[serde(default)]
        units: Option<Units>,
    }

    let params: SaveSettingsParams = match params.and_then(|p| serde_json::from_value(p).ok()) {
        Some(p) => p,
        None => {
            return Response::error(id, error_codes::INVALID_PARAMS,
                "Invalid params: expected {settings: object, units?: string}".to_string());
        }
    };

    if let Some(units) = params.units {
        state.units = units;
    }
    state.settings = params.settings;

    if let Err(e) = state.settings.save(&state.settings_path) {
        return Response::error(id, error_codes::SAVE_FAILED,
            format!("Failed to save settings: {}", e));
    }

    log::info!("[Settings] Saved to {}", state.settings_path.display());
    Response::success(id, serde_json::json!({
        "status": "ok",
        "settings": state.settings
    }))
}
