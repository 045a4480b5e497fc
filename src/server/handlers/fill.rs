//! Fill handler: resolves dialog values into a run, fills and commits

use crate::board::{Board, FillRegion};
use crate::server::protocol::{Response, error_codes};
use crate::server::state::ServerState;
use crate::settings::{StitchSettings, Units};
use crate::stitch::{
    fill_area, ConfigError, FillInput, FillParams, ObstacleSet, SeededJitter, ZoneNetPolicy,
};
use serde::Deserialize;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Fill request; lengths are in the session's user units.
/// Anything left out falls back to the saved settings or the board defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FillRequest {
    pub area: Option<String>,
    pub h_spacing: Option<f64>,
    pub v_spacing: Option<f64>,
    pub clearance: Option<f64>,
    pub randomize: Option<bool>,
    pub via_size: Option<f64>,
    pub drill_size: Option<f64>,
    pub net: Option<String>,
    pub seed: Option<u64>,
    pub zone_policy: Option<ZoneNetPolicy>,
    /// Switches the session's units before the lengths are read
    pub units: Option<Units>,
}

impl FillRequest {
    /// Request values layered over `settings`
    pub fn merged_settings(&self, settings: &StitchSettings) -> StitchSettings {
        StitchSettings {
            h_spacing: self.h_spacing.unwrap_or(settings.h_spacing),
            v_spacing: self.v_spacing.unwrap_or(settings.v_spacing),
            clearance: self.clearance.unwrap_or(settings.clearance),
            randomize: self.randomize.unwrap_or(settings.randomize),
        }
    }
}

/// Resolve the fill region and board-unit run parameters.
///
/// Via size and drill default to the board's default via dimensions, the net
/// defaults to the region's own net.
pub fn resolve_fill_params(
    board: &Board,
    settings: &StitchSettings,
    units: Units,
    request: &FillRequest,
) -> Result<(FillRegion, FillParams), ConfigError> {
    let region = board.select_fill_region(request.area.as_deref())?;

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
    let net_code = board.net_code(&net)?;

    let params = FillParams {
        step_x: units.to_board(settings.h_spacing),
        step_y: units.to_board(settings.v_spacing),
        via_size,
        drill_size,
        clearance: units.to_board(settings.clearance),
        randomize: settings.randomize,
        net_code,
        net,
        zone_policy: request.zone_policy.unwrap_or_default(),
    };
    params.validate()?;

    Ok((region, params))
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Handle Fill request - places stitching vias in the selected area
pub fn handle_fill(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let request: FillRequest = match params {
        Some(p) => match serde_json::from_value(p) {
            Ok(r) => r,
            Err(e) => {
                return Response::error(id, error_codes::INVALID_PARAMS,
                    format!("Invalid params: {}", e));
            }
        },
        None => FillRequest::default(),
    };

    let board = match state.board.as_mut() {
        Some(board) => board,
        None => {
            return Response::error(id, error_codes::NO_BOARD_LOADED,
                "No board loaded. Call LoadBoard first.".to_string());
        }
    };

    if let Some(units) = request.units {
        state.units = units;
    }
    let settings = request.merged_settings(&state.settings);
    let (region, fill_params) = match resolve_fill_params(board, &settings, state.units, &request) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::warn!("[Fill] Rejected: {}", e);
            return Response::rejected(id, &e);
        }
    };

    // Dialog values are remembered for the next session
    state.settings = settings;
    if let Err(e) = state.settings.save(&state.settings_path) {
        log::warn!("[Fill] Could not persist settings: {}", e);
    }

    let start = Instant::now();
    let obstacles = ObstacleSet::new(board.collect_obstacles(&region, &fill_params));
    let input = FillInput {
        region: &region,
        obstacles: &obstacles,
        board_edges: &board.outline,
    };

    let seed = request.seed.unwrap_or_else(time_seed);
    let mut jitter = SeededJitter::new(seed);
    let result = match fill_area(&input, &fill_params, &mut jitter) {
        Ok(result) => result,
        Err(e) => return Response::rejected(id, &e),
    };

    let via_ids = board.commit_placement(&result, &mut state.groups);
    board.store_groups(&state.groups);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let message = if via_ids.is_empty() {
        "No vias implanted!".to_string()
    } else {
        format!("Implanted: {} vias!", via_ids.len())
    };

    let vias: Vec<serde_json::Value> = via_ids
        .iter()
        .zip(&result.vias)
        .map(|(id, via)| serde_json::json!({
            "id": id,
            "x": via.position.x,
            "y": via.position.y,
            "width": via.width,
            "drill": via.drill,
            "net": via.net,
            "layer": via.layer
        }))
        .collect();

    Response::success(id, serde_json::json!({
        "status": "ok",
        "message": message,
        "area": region.name,
        "implanted": via_ids.len(),
        "via_ids": via_ids,
        "vias": vias,
        "stats": result.stats,
        "seed": seed,
        "elapsed_ms": elapsed_ms
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Net, Point, Polygon, ViaDimensions, Zone};

    fn board() -> Board {
        Board {
            nets: vec![Net { code: 1, name: "GND".to_string() }],
            zones: vec![Zone {
                id: 1,
                name: "GND_FILL".to_string(),
                net: "GND".to_string(),
                layer: "F.Cu".to_string(),
                outline: Polygon::new(vec![
                    Point::new(0, 0),
                    Point::new(10_000_000, 0),
                    Point::new(10_000_000, 10_000_000),
                    Point::new(0, 10_000_000),
                ]),
                filled: vec![],
                no_copper_pour: false,
                selected: true,
            }],
            via_dimensions: vec![ViaDimensions { diameter: 600_000, drill: 300_000 }],
            ..Board::default()
        }
    }

    #[test]
    fn test_resolve_uses_board_defaults() {
        let board = board();
        let settings = StitchSettings::default();
        let (region, params) =
            resolve_fill_params(&board, &settings, Units::Millimetres, &FillRequest::default())
                .unwrap();
        assert_eq!(region.name, "GND_FILL");
        assert_eq!(params.step_x, 3_000_000);
        assert_eq!(params.step_y, 3_000_000);
        assert_eq!(params.via_size, 600_000);
        assert_eq!(params.drill_size, 300_000);
        assert_eq!(params.clearance, 0);
        assert_eq!(params.net, "GND");
        assert_eq!(params.net_code, 1);
    }

    #[test]
    fn test_resolve_request_overrides() {
        let mut board = board();
        board.via_dimensions.clear();
        let request = FillRequest {
            via_size: Some(0.5),
            drill_size: Some(0.25),
            ..FillRequest::default()
        };
        let (_, params) =
            resolve_fill_params(&board, &StitchSettings::default(), Units::Millimetres, &request)
                .unwrap();
        assert_eq!(params.via_size, 500_000);
        assert_eq!(params.drill_size, 250_000);

        // One size given, the other must come from the board
        let request = FillRequest { via_size: Some(0.5), ..FillRequest::default() };
        assert_eq!(
            resolve_fill_params(&board, &StitchSettings::default(), Units::Millimetres, &request),
            Err(ConfigError::MissingViaDimensions)
        );
    }

    #[test]
    fn test_resolve_rejections() {
        let board = board();
        let settings = StitchSettings { h_spacing: 0.0, ..StitchSettings::default() };
        let err = resolve_fill_params(&board, &settings, Units::Millimetres, &FillRequest::default())
            .unwrap_err();
        assert_eq!(err.code(), "invalid_pitch");

        let request = FillRequest { net: Some("NOPE".to_string()), ..FillRequest::default() };
        let err = resolve_fill_params(&board, &StitchSettings::default(), Units::Millimetres, &request)
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownNet("NOPE".to_string()));
    }

    #[test]
    fn test_merged_settings() {
        let request = FillRequest { clearance: Some(0.2), ..FillRequest::default() };
        let merged = request.merged_settings(&StitchSettings::default());
        assert_eq!(merged.clearance, 0.2);
        assert_eq!(merged.h_spacing, 3.0);
    }
}
