//! Area fill: grid sweep over the fill region
//!
//! Grid points are generated column by column (x outer, y inner) and
//! perturbed in that order, then evaluated in parallel batches against the
//! immutable obstacle snapshot. Accepted vias come back in sweep order.
//! Vias accepted in the same run are not obstacles for one another.

use rayon::prelude::*;
use std::time::Instant;

use super::clearance::is_clear;
use super::error::ConfigError;
use super::jitter::{jitter_offset, Jitter};
use super::overlap::ObstacleSet;
use super::types::{FillParams, PlacementResult, ViaCandidate};
use crate::board::{BBox, Coord, FillRegion, OutlineEdge, Point};

/// Grid points generated and evaluated together
const SWEEP_BATCH: usize = 4096;

/// Read-only inputs of one fill run
#[derive(Clone, Copy, Debug)]
pub struct FillInput<'a> {
    pub region: &'a FillRegion,
    pub obstacles: &'a ObstacleSet,
    pub board_edges: &'a [OutlineEdge],
}

/// Outcome for a single grid point
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    Accepted(ViaCandidate),
    Outside,
    Overlapping,
    TooClose,
}

/// Lazy column-major sweep over a box.
///
/// Positions are computed from the column and row index, so a pitch larger
/// than the box yields a single column or row instead of stepping past it.
/// With `randomize` each point moves by up to a fifth of the pitch per axis,
/// drawn in sweep order.
pub struct GridSweep<'j> {
    origin: Point,
    step_x: Coord,
    step_y: Coord,
    columns: Coord,
    rows: Coord,
    column: Coord,
    row: Coord,
    randomize: bool,
    jitter: &'j mut dyn Jitter,
}

impl<'j> GridSweep<'j> {
    pub fn new(
        bbox: &BBox,
        step_x: Coord,
        step_y: Coord,
        randomize: bool,
        jitter: &'j mut dyn Jitter,
    ) -> Self {
        let usable = step_x > 0 && step_y > 0 && bbox.width() >= 0 && bbox.height() >= 0;
        let (columns, rows) = if usable {
            (bbox.width() / step_x + 1, bbox.height() / step_y + 1)
        } else {
            (0, 0)
        };
        Self {
            origin: Point::new(bbox.min_x, bbox.min_y),
            step_x,
            step_y,
            columns,
            rows,
            column: 0,
            row: 0,
            randomize,
            jitter,
        }
    }
}

impl Iterator for GridSweep<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.column >= self.columns {
            return None;
        }

        // column * step_x never exceeds the box width
        let x = self.origin.x + self.column * self.step_x;
        let y = self.origin.y + self.row * self.step_y;

        self.row += 1;
        if self.row >= self.rows {
            self.row = 0;
            self.column += 1;
        }

        if self.randomize {
            let dx = jitter_offset(&mut *self.jitter, self.step_x);
            let dy = jitter_offset(&mut *self.jitter, self.step_y);
            Some(Point::new(x.saturating_add(dx), y.saturating_add(dy)))
        } else {
            Some(Point::new(x, y))
        }
    }
}

/// Sweep `bbox` left to right, top to bottom within each column
pub fn grid_points(
    bbox: &BBox,
    step_x: Coord,
    step_y: Coord,
    randomize: bool,
    jitter: &mut dyn Jitter,
) -> Vec<Point> {
    GridSweep::new(bbox, step_x, step_y, randomize, jitter).collect()
}

/// Decide whether a via may be placed at `p`
pub fn evaluate_point(input: &FillInput<'_>, params: &FillParams, p: Point) -> Verdict {
    if !input.region.contains(p) {
        return Verdict::Outside;
    }

    let nominal = params.candidate(p, &input.region.layer);
    // Grown by the clearance on every side for a conservative box test
    let inflated = nominal.inflated(params.clearance);

    if input.obstacles.overlaps(&inflated, params.clearance) {
        return Verdict::Overlapping;
    }

    if params.clearance > 0
        && !is_clear(
            &inflated,
            &input.region.outline,
            input.board_edges,
            params.clearance,
        )
    {
        return Verdict::TooClose;
    }

    Verdict::Accepted(nominal)
}

/// Fill the region with vias at the configured pitch.
///
/// Returns the accepted vias at nominal size; an empty result is a valid
/// outcome. Only invalid parameters produce an error.
pub fn fill_area(
    input: &FillInput<'_>,
    params: &FillParams,
    jitter: &mut dyn Jitter,
) -> Result<PlacementResult, ConfigError> {
    params.validate()?;
    let start = Instant::now();

    let mut sweep = GridSweep::new(
        &input.region.bbox,
        params.step_x,
        params.step_y,
        params.randomize,
        jitter,
    );

    let mut result = PlacementResult::default();
    let mut batch = Vec::with_capacity(SWEEP_BATCH);
    loop {
        batch.clear();
        batch.extend(sweep.by_ref().take(SWEEP_BATCH));
        if batch.is_empty() {
            break;
        }

        let verdicts: Vec<Verdict> = batch
            .par_iter()
            .map(|&p| evaluate_point(input, params, p))
            .collect();

        result.stats.evaluated += verdicts.len();
        for verdict in verdicts {
            match verdict {
                Verdict::Accepted(via) => result.vias.push(via),
                Verdict::Outside => result.stats.outside += 1,
                Verdict::Overlapping => result.stats.overlapping += 1,
                Verdict::TooClose => result.stats.too_close += 1,
            }
        }
    }

    log::info!(
        "[Fill] Area '{}': {} points, {} accepted ({} outside, {} overlapping, {} too close) in {:?}",
        input.region.name,
        result.stats.evaluated,
        result.count(),
        result.stats.outside,
        result.stats.overlapping,
        result.stats.too_close,
        start.elapsed()
    );

    Ok(result)
}
