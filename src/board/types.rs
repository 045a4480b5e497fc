//! Core board data types
//!
//! Geometric primitives (points, boxes, polygons, outline edges) and the
//! board items a stitching run reads: pads, vias, tracks and zones.
//! All coordinates are integer board units (nanometres).

use serde::{Deserialize, Serialize};

use crate::stitch::ConfigError;

/// Integer board coordinate
pub type Coord = i64;

/// Identifier of a board item
pub type ItemId = u64;

/// Layer kinds that carry copper
pub const COPPER_LAYER_KINDS: &[&str] = &["signal", "power", "mixed", "jumper"];

/// A 2D point in board units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn as_f64(&self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }
}

/// Axis-aligned bounding box, edges inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: Coord,
    pub min_y: Coord,
    pub max_x: Coord,
    pub max_y: Coord,
}

impl BBox {
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Square box of half-size `half` centred on `center`, clamped to the coordinate range
    pub fn around(center: Point, half: Coord) -> Self {
        Self {
            min_x: center.x.saturating_sub(half),
            min_y: center.y.saturating_sub(half),
            max_x: center.x.saturating_add(half),
            max_y: center.y.saturating_add(half),
        }
    }

    /// Smallest box holding every point, `None` for an empty iterator
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = BBox::new(first, first);
        for p in iter {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    pub fn inflate(&self, amount: Coord) -> Self {
        Self {
            min_x: self.min_x.saturating_sub(amount),
            min_y: self.min_y.saturating_sub(amount),
            max_x: self.max_x.saturating_add(amount),
            max_y: self.max_y.saturating_add(amount),
        }
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn width(&self) -> Coord {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> Coord {
        self.max_y - self.min_y
    }
}

/// Closed polygon; the last corner connects back to the first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub corners: Vec<Point>,
}

impl Polygon {
    pub fn new(corners: Vec<Point>) -> Self {
        Self { corners }
    }

    /// Edges as (start, end) pairs with wraparound.
    /// A single-corner polygon yields one degenerate edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.corners.len();
        (0..n).map(move |i| (self.corners[i], self.corners[(i + 1) % n]))
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(self.corners.iter().copied())
    }

    /// True when `p` lies exactly on one of the edges
    pub fn on_boundary(&self, p: Point) -> bool {
        self.edges().any(|(a, b)| point_on_segment(p, a, b))
    }

    /// Point-in-polygon test; points on the boundary count as inside.
    /// Fewer than 3 corners never contain anything.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.corners.len();
        if n < 3 {
            return false;
        }
        if self.on_boundary(p) {
            return true;
        }

        // Even-odd ray cast towards +x, exact in i128
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.corners[i];
            let b = self.corners[j];
            if (a.y > p.y) != (b.y > p.y) {
                let dy = (b.y - a.y) as i128;
                let lhs = (p.x - a.x) as i128 * dy;
                let rhs = (b.x - a.x) as i128 * (p.y - a.y) as i128;
                if (dy > 0 && lhs < rhs) || (dy < 0 && lhs > rhs) {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    let cross = (b.x - a.x) as i128 * (p.y - a.y) as i128
        - (b.y - a.y) as i128 * (p.x - a.x) as i128;
    cross == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// One filled island of a zone, with optional holes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledArea {
    pub outline: Polygon,
    #[serde(default)]
    pub holes: Vec<Polygon>,
}

impl FilledArea {
    /// Hole boundaries still count as copper
    pub fn contains(&self, p: Point) -> bool {
        self.outline.contains(p)
            && !self
                .holes
                .iter()
                .any(|hole| hole.contains(p) && !hole.on_boundary(p))
    }
}

/// Board outline (Edge.Cuts) drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum OutlineEdge {
    Line { start: Point, end: Point },
    /// Counter-clockwise sweep from `start` to `end` around `center`
    Arc { center: Point, start: Point, end: Point },
    Circle { center: Point, radius: Coord },
    Rect { start: Point, end: Point },
}

/// Layer table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub name: String,
    #[serde(default)]
    pub kind: String,
}

/// Check if a layer carries copper.
/// Undeclared layers fall back to the `*.Cu` naming convention.
pub fn is_copper_layer(name: &str, layers: &[LayerInfo]) -> bool {
    match layers.iter().find(|l| l.name == name) {
        Some(layer) => COPPER_LAYER_KINDS
            .iter()
            .any(|&k| k.eq_ignore_ascii_case(&layer.kind)),
        None => name.ends_with(".Cu"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    pub code: i32,
    pub name: String,
}

/// Board-level via size preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaDimensions {
    pub diameter: Coord,
    pub drill: Coord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub id: ItemId,
    pub bbox: BBox,
    #[serde(default)]
    pub net: String,
}

/// A via already present on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardVia {
    pub id: ItemId,
    pub position: Point,
    pub width: Coord,
    pub drill: Coord,
    #[serde(default)]
    pub net: String,
    #[serde(default)]
    pub layer: String,
}

impl BoardVia {
    pub fn bbox(&self) -> BBox {
        BBox::around(self.position, self.width / 2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: ItemId,
    pub start: Point,
    pub end: Point,
    pub width: Coord,
    #[serde(default)]
    pub layer: String,
    #[serde(default)]
    pub net: String,
}

impl Track {
    /// Centerline extents grown by half the width
    pub fn bbox(&self) -> BBox {
        BBox::new(self.start, self.end).inflate(self.width / 2)
    }
}

/// Copper zone (pour area)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub net: String,
    pub layer: String,
    pub outline: Polygon,
    /// Filled copper; empty means filled to the outline
    #[serde(default)]
    pub filled: Vec<FilledArea>,
    #[serde(default)]
    pub no_copper_pour: bool,
    #[serde(default)]
    pub selected: bool,
}

impl Zone {
    pub fn bbox(&self) -> Option<BBox> {
        self.outline.bbox()
    }

    /// Filled-copper hit test on `layer`
    pub fn hit_test_filled_area(&self, layer: &str, p: Point) -> bool {
        if self.layer != layer {
            return false;
        }
        if self.filled.is_empty() {
            self.outline.contains(p)
        } else {
            self.filled.iter().any(|area| area.contains(p))
        }
    }
}

/// Component footprint owning pads and zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub id: ItemId,
    #[serde(default)]
    pub reference: String,
    pub bbox: BBox,
    #[serde(default)]
    pub pads: Vec<Pad>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// Read-only obstacle snapshot entry
#[derive(Debug, Clone, PartialEq)]
pub enum BoardItem {
    Pad(Pad),
    Via(BoardVia),
    Track(Track),
    Zone(Zone),
}

impl BoardItem {
    pub fn id(&self) -> ItemId {
        match self {
            BoardItem::Pad(pad) => pad.id,
            BoardItem::Via(via) => via.id,
            BoardItem::Track(track) => track.id,
            BoardItem::Zone(zone) => zone.id,
        }
    }

    /// Bounding box; a zone without corners collapses to an empty box at the origin
    pub fn bbox(&self) -> BBox {
        match self {
            BoardItem::Pad(pad) => pad.bbox,
            BoardItem::Via(via) => via.bbox(),
            BoardItem::Track(track) => track.bbox(),
            BoardItem::Zone(zone) => zone
                .bbox()
                .unwrap_or_else(|| BBox::new(Point::default(), Point::default())),
        }
    }
}

/// The single area a stitching run populates
#[derive(Debug, Clone, PartialEq)]
pub struct FillRegion {
    pub zone_id: ItemId,
    pub name: String,
    pub layer: String,
    pub net: String,
    pub outline: Polygon,
    pub filled: Vec<FilledArea>,
    pub bbox: BBox,
}

impl FillRegion {
    pub fn from_zone(zone: &Zone) -> Result<Self, ConfigError> {
        let corners = zone.outline.corners.len();
        let bbox = match zone.bbox() {
            Some(bbox) if corners >= 3 => bbox,
            _ => {
                return Err(ConfigError::DegenerateOutline {
                    zone: zone.name.clone(),
                    corners,
                })
            }
        };

        Ok(Self {
            zone_id: zone.id,
            name: zone.name.clone(),
            layer: zone.layer.clone(),
            net: zone.net.clone(),
            outline: zone.outline.clone(),
            filled: zone.filled.clone(),
            bbox,
        })
    }

    /// Region filled to a plain outline
    pub fn from_outline(
        name: &str,
        layer: &str,
        net: &str,
        corners: Vec<Point>,
    ) -> Result<Self, ConfigError> {
        let zone = Zone {
            id: 0,
            name: name.to_string(),
            net: net.to_string(),
            layer: layer.to_string(),
            outline: Polygon::new(corners),
            filled: Vec::new(),
            no_copper_pour: false,
            selected: true,
        };
        Self::from_zone(&zone)
    }

    /// Containment against the region's filled copper on its own layer
    pub fn contains(&self, p: Point) -> bool {
        if self.filled.is_empty() {
            self.outline.contains(p)
        } else {
            self.filled.iter().any(|area| area.contains(p))
        }
    }
}
