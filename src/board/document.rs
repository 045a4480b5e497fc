//! Board snapshot document
//!
//! The host-side view of a board: everything a stitching run reads, plus the
//! batch commit steps that apply a run's decisions. Stored as JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::types::{
    is_copper_layer, BoardItem, BoardVia, FillRegion, Footprint, ItemId, LayerInfo, Net,
    OutlineEdge, Track, ViaDimensions, Zone,
};
use crate::stitch::{
    ClearResult, ConfigError, FillParams, GroupRegistry, PlacementGroup, PlacementResult,
    ZoneNetPolicy, STITCH_GROUP_NAME,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub layers: Vec<LayerInfo>,
    #[serde(default)]
    pub nets: Vec<Net>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub vias: Vec<BoardVia>,
    #[serde(default)]
    pub footprints: Vec<Footprint>,
    /// Edge.Cuts drawings
    #[serde(default)]
    pub outline: Vec<OutlineEdge>,
    /// Via size presets; the last entry is the default
    #[serde(default)]
    pub via_dimensions: Vec<ViaDimensions>,
    #[serde(default)]
    pub groups: Vec<PlacementGroup>,
}

impl Board {
    /// Load a board snapshot from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Board> {
        let text = std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to open board '{}': {}", path.as_ref().display(), e)
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> anyhow::Result<Board> {
        let board: Board = serde_json::from_str(text)?;
        log::debug!(
            "[Board] Loaded {} zones, {} tracks, {} vias, {} footprints, {} outline edges",
            board.zones.len(),
            board.tracks.len(),
            board.vias.len(),
            board.footprints.len(),
            board.outline.len()
        );
        Ok(board)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, text).map_err(|e| {
            anyhow::anyhow!("Failed to write board '{}': {}", path.as_ref().display(), e)
        })?;
        Ok(())
    }

    pub fn group_registry(&self) -> GroupRegistry {
        GroupRegistry::from_groups(self.groups.clone())
    }

    /// Persist the registry's groups into the document
    pub fn store_groups(&mut self, registry: &GroupRegistry) {
        self.groups = registry.to_groups();
    }

    /// Mark `name` as the only selected zone
    pub fn select_area(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.zones.iter().any(|z| z.name == name) {
            return Err(ConfigError::NoAreaSelected);
        }
        for zone in &mut self.zones {
            zone.selected = zone.name == name;
        }
        Ok(())
    }

    /// Resolve the zone to fill: `name` if given, otherwise the first selected
    /// zone. It must sit on a copper layer, allow copper pour and have a
    /// usable outline.
    pub fn select_fill_region(&self, name: Option<&str>) -> Result<FillRegion, ConfigError> {
        let zone = match name {
            Some(name) => self.zones.iter().find(|z| z.name == name),
            None => self.zones.iter().find(|z| z.selected),
        }
        .ok_or(ConfigError::NoAreaSelected)?;

        if !is_copper_layer(&zone.layer, &self.layers) {
            return Err(ConfigError::NotOnCopperLayer {
                zone: zone.name.clone(),
                layer: zone.layer.clone(),
            });
        }
        if zone.no_copper_pour {
            return Err(ConfigError::CopperPourNotAllowed {
                zone: zone.name.clone(),
            });
        }

        FillRegion::from_zone(zone)
    }

    pub fn default_via_dimensions(&self) -> Result<ViaDimensions, ConfigError> {
        self.via_dimensions
            .last()
            .copied()
            .ok_or(ConfigError::MissingViaDimensions)
    }

    /// Net code for `name`; the empty name is the unconnected net 0
    pub fn net_code(&self, name: &str) -> Result<i32, ConfigError> {
        if name.is_empty() {
            return Ok(0);
        }
        self.nets
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.code)
            .ok_or_else(|| ConfigError::UnknownNet(name.to_string()))
    }

    /// Snapshot the items a fill run must avoid.
    ///
    /// Everything is pruned against the region box grown by the reach of an
    /// inflated candidate. The region's own zone is never an obstacle;
    /// zones on the target net are skipped unless the policy says otherwise.
    pub fn collect_obstacles(&self, region: &FillRegion, params: &FillParams) -> Vec<BoardItem> {
        let margin = (params.via_size / 2).saturating_add(params.clearance.saturating_mul(2));
        let prune = region.bbox.inflate(margin);

        let zone_is_obstacle = |zone: &Zone| {
            if zone.id == region.zone_id {
                return false;
            }
            if params.zone_policy == ZoneNetPolicy::IgnoreSameNet && zone.net == params.net {
                return false;
            }
            zone.bbox().is_some_and(|b| b.intersects(&prune))
        };

        let mut items = Vec::new();

        for zone in self.zones.iter().filter(|&z| zone_is_obstacle(z)) {
            items.push(BoardItem::Zone(zone.clone()));
        }

        for via in self.vias.iter().filter(|v| v.bbox().intersects(&prune)) {
            items.push(BoardItem::Via(via.clone()));
        }

        for track in self.tracks.iter().filter(|t| t.bbox().intersects(&prune)) {
            items.push(BoardItem::Track(track.clone()));
        }

        for footprint in self.footprints.iter().filter(|f| f.bbox.intersects(&prune)) {
            for pad in &footprint.pads {
                items.push(BoardItem::Pad(pad.clone()));
            }
            for zone in footprint.zones.iter().filter(|&z| zone_is_obstacle(z)) {
                items.push(BoardItem::Zone(zone.clone()));
            }
        }

        log::debug!(
            "[Board] Collected {} obstacles around area '{}'",
            items.len(),
            region.name
        );

        items
    }

    /// Highest id in use across all items
    fn max_item_id(&self) -> ItemId {
        let footprint_ids = self.footprints.iter().flat_map(|f| {
            std::iter::once(f.id)
                .chain(f.pads.iter().map(|p| p.id))
                .chain(f.zones.iter().map(|z| z.id))
        });
        self.zones
            .iter()
            .map(|z| z.id)
            .chain(self.tracks.iter().map(|t| t.id))
            .chain(self.vias.iter().map(|v| v.id))
            .chain(footprint_ids)
            .max()
            .unwrap_or(0)
    }

    /// Add accepted vias to the board and tag them with the stitching group,
    /// creating the group if needed. Returns the new via ids.
    pub fn commit_placement(
        &mut self,
        result: &PlacementResult,
        registry: &mut GroupRegistry,
    ) -> Vec<ItemId> {
        let group = registry.get_or_create(STITCH_GROUP_NAME);
        let mut next_id = self.max_item_id() + 1;
        let mut ids = Vec::with_capacity(result.vias.len());

        for candidate in &result.vias {
            let id = next_id;
            next_id += 1;
            self.vias.push(BoardVia {
                id,
                position: candidate.position,
                width: candidate.width,
                drill: candidate.drill,
                net: candidate.net.clone(),
                layer: candidate.layer.clone(),
            });
            group.add(id);
            ids.push(id);
        }

        log::info!("[Board] Implanted {} vias", ids.len());
        ids
    }

    /// Remove the selected vias; group membership is only touched for members.
    /// Returns how many vias left the document.
    pub fn commit_removal(&mut self, result: &ClearResult, registry: &mut GroupRegistry) -> usize {
        let targets: HashSet<ItemId> = result.removed.iter().copied().collect();
        let before = self.vias.len();
        self.vias.retain(|v| !targets.contains(&v.id));
        let removed = before - self.vias.len();

        let ungrouped = registry.remove_members(STITCH_GROUP_NAME, &result.removed);
        log::info!(
            "[Board] Removed {} vias ({} were stitching group members)",
            removed,
            ungrouped
        );
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BBox, Pad, Point, Polygon};
    use crate::stitch::ViaCandidate;

    fn square_zone(id: ItemId, name: &str, net: &str, origin: i64, size: i64) -> Zone {
        Zone {
            id,
            name: name.to_string(),
            net: net.to_string(),
            layer: "F.Cu".to_string(),
            outline: Polygon::new(vec![
                Point::new(origin, origin),
                Point::new(origin + size, origin),
                Point::new(origin + size, origin + size),
                Point::new(origin, origin + size),
            ]),
            filled: vec![],
            no_copper_pour: false,
            selected: false,
        }
    }

    fn board() -> Board {
        let mut fill = square_zone(1, "GND_FILL", "GND", 0, 1000);
        fill.selected = true;
        Board {
            nets: vec![
                Net { code: 1, name: "GND".to_string() },
                Net { code: 2, name: "VCC".to_string() },
            ],
            zones: vec![
                fill,
                square_zone(2, "GND_OTHER", "GND", 500, 1000),
                square_zone(3, "VCC_POUR", "VCC", 500, 1000),
                square_zone(4, "FAR", "VCC", 50_000, 100),
            ],
            footprints: vec![Footprint {
                id: 20,
                reference: "U1".to_string(),
                bbox: BBox::new(Point::new(100, 100), Point::new(200, 200)),
                pads: vec![Pad {
                    id: 21,
                    bbox: BBox::new(Point::new(100, 100), Point::new(120, 120)),
                    net: "SIG".to_string(),
                }],
                zones: vec![],
            }],
            via_dimensions: vec![
                ViaDimensions { diameter: 800, drill: 400 },
                ViaDimensions { diameter: 600, drill: 300 },
            ],
            ..Board::default()
        }
    }

    fn params(policy: ZoneNetPolicy) -> FillParams {
        FillParams {
            step_x: 100,
            step_y: 100,
            via_size: 60,
            drill_size: 30,
            clearance: 0,
            randomize: false,
            net_code: 1,
            net: "GND".to_string(),
            zone_policy: policy,
        }
    }

    #[test]
    fn test_select_fill_region() {
        let board = board();
        let region = board.select_fill_region(None).unwrap();
        assert_eq!(region.name, "GND_FILL");
        assert_eq!(region.zone_id, 1);

        let region = board.select_fill_region(Some("VCC_POUR")).unwrap();
        assert_eq!(region.net, "VCC");
    }

    #[test]
    fn test_select_fill_region_rejections() {
        let mut board = board();
        assert_eq!(
            board.select_fill_region(Some("nope")),
            Err(ConfigError::NoAreaSelected)
        );

        board.zones[0].layer = "F.SilkS".to_string();
        assert_eq!(
            board.select_fill_region(None).unwrap_err().code(),
            "not_on_copper_layer"
        );

        board.zones[0].layer = "F.Cu".to_string();
        board.zones[0].no_copper_pour = true;
        assert_eq!(
            board.select_fill_region(None).unwrap_err().code(),
            "copper_pour_not_allowed"
        );

        board.zones[0].selected = false;
        assert_eq!(board.select_fill_region(None), Err(ConfigError::NoAreaSelected));
    }

    #[test]
    fn test_select_area_is_exclusive() {
        let mut board = board();
        board.select_area("VCC_POUR").unwrap();
        let selected: Vec<&str> = board
            .zones
            .iter()
            .filter(|z| z.selected)
            .map(|z| z.name.as_str())
            .collect();
        assert_eq!(selected, vec!["VCC_POUR"]);
        assert!(board.select_area("missing").is_err());
    }

    #[test]
    fn test_default_via_dimensions_is_last_entry() {
        let mut board = board();
        assert_eq!(
            board.default_via_dimensions().unwrap(),
            ViaDimensions { diameter: 600, drill: 300 }
        );
        board.via_dimensions.clear();
        assert_eq!(board.default_via_dimensions(), Err(ConfigError::MissingViaDimensions));
    }

    #[test]
    fn test_net_code_lookup() {
        let board = board();
        assert_eq!(board.net_code("VCC"), Ok(2));
        assert_eq!(board.net_code(""), Ok(0));
        assert_eq!(board.net_code("X"), Err(ConfigError::UnknownNet("X".to_string())));
    }

    #[test]
    fn test_collect_obstacles_zone_policy() {
        let board = board();
        let region = board.select_fill_region(None).unwrap();

        let ids = |items: Vec<BoardItem>| {
            let mut ids: Vec<ItemId> = items.iter().map(|i| i.id()).collect();
            ids.sort();
            ids
        };

        // Same-net zone skipped, far zone pruned, region itself never included
        let items = board.collect_obstacles(&region, &params(ZoneNetPolicy::IgnoreSameNet));
        assert_eq!(ids(items), vec![3, 21]);

        let items = board.collect_obstacles(&region, &params(ZoneNetPolicy::Obstruct));
        assert_eq!(ids(items), vec![2, 3, 21]);
    }

    #[test]
    fn test_commit_then_remove() {
        let mut board = board();
        let mut registry = GroupRegistry::new();
        let via = |x| ViaCandidate {
            position: Point::new(x, 10),
            width: 60,
            drill: 30,
            net_code: 1,
            net: "GND".to_string(),
            layer: "F.Cu".to_string(),
        };
        let placement = PlacementResult {
            vias: vec![via(10), via(110)],
            ..PlacementResult::default()
        };

        let ids = board.commit_placement(&placement, &mut registry);
        assert_eq!(ids, vec![22, 23]);
        assert_eq!(board.vias.len(), 2);
        assert_eq!(registry.find(STITCH_GROUP_NAME).unwrap().len(), 2);

        // 999 is not on the board and not a member
        let removal = ClearResult { removed: vec![22, 999] };
        assert_eq!(board.commit_removal(&removal, &mut registry), 1);
        assert_eq!(board.vias.len(), 1);
        assert!(registry.is_member(STITCH_GROUP_NAME, 23));
        assert!(!registry.is_member(STITCH_GROUP_NAME, 22));
    }

    #[test]
    fn test_empty_commit_still_creates_group() {
        let mut board = board();
        let mut registry = GroupRegistry::new();
        let ids = board.commit_placement(&PlacementResult::default(), &mut registry);
        assert!(ids.is_empty());
        assert!(registry.find(STITCH_GROUP_NAME).is_some());
    }

    #[test]
    fn test_json_round_trip_keeps_groups() {
        let mut board = board();
        let mut registry = board.group_registry();
        registry.get_or_create(STITCH_GROUP_NAME).add(5);
        board.store_groups(&registry);

        let text = serde_json::to_string(&board).unwrap();
        let loaded = Board::from_json(&text).unwrap();
        assert_eq!(loaded, board);
        assert!(loaded.group_registry().is_member(STITCH_GROUP_NAME, 5));
    }
}
