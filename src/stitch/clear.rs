//! Clear: select previously placed vias for removal
//!
//! Produces the removal list only; the caller commits it to the document
//! and the group registry.

use super::group::GroupRegistry;
use super::types::{ClearMode, ClearResult, STITCH_GROUP_NAME};
use crate::board::{BoardVia, FillRegion};

/// Pick the vias `mode` targets.
///
/// `Tagged` takes every member of the stitching group wherever it sits.
/// `Matching` takes vias with exactly the given size, drill and net whose
/// position hits the region's filled area, tagged or not.
pub fn clear_vias(
    vias: &[BoardVia],
    mode: &ClearMode,
    region: &FillRegion,
    registry: &GroupRegistry,
) -> ClearResult {
    let removed = match mode {
        ClearMode::Tagged => match registry.find(STITCH_GROUP_NAME) {
            Some(group) => vias
                .iter()
                .filter(|via| group.contains(via.id))
                .map(|via| via.id)
                .collect(),
            None => Vec::new(),
        },
        ClearMode::Matching {
            via_size,
            drill_size,
            net,
        } => vias
            .iter()
            .filter(|via| {
                via.drill == *drill_size
                    && via.width == *via_size
                    && via.net == *net
                    && region.contains(via.position)
            })
            .map(|via| via.id)
            .collect(),
    };

    let result = ClearResult { removed };
    log::info!(
        "[Clear] {:?} on area '{}': {} of {} vias selected",
        mode,
        region.name,
        result.count(),
        vias.len()
    );
    result
}
