#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::interaction::InteractionState;
use crate::layout::{LayoutConfig, LayoutResult, toggle_control_rect};
use crate::mapper::{CoordinateMapper, Point};
use crate::payload::{EntityId, FrameRecord};

/// What a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// The expand/collapse control of a visible entity's panel.
    ToggleExpand(EntityId),
    /// An entity's detection box.
    ToggleVisibility(EntityId),
    None,
}

/// Resolve a display-space click against the current frame.
///
/// Precedence, first match wins:
/// 1. toggle controls of visible entities with supplemental data, using the
///    placements in `layout` (the same ones the renderer drew);
/// 2. detection boxes of every entity in the frame, visible or not, in
///    source space; the smallest containing box wins, ties go to the earlier
///    entity;
/// 3. nothing.
///
/// Entities with no placement in `layout` are skipped in step 1.
#[must_use]
pub fn resolve(
    click: Point,
    frame: &FrameRecord,
    layout: &LayoutResult,
    state: &InteractionState,
    mapper: &CoordinateMapper,
    config: &LayoutConfig,
) -> Hit {
    for entity in &frame.entities {
        if !entity.has_supplemental_data || !state.is_visible(&entity.id) {
            continue;
        }
        let Some(placement) = layout.get(&entity.id) else {
            continue;
        };
        if toggle_control_rect(placement, config).contains(click) {
            return Hit::ToggleExpand(entity.id.clone());
        }
    }

    let source = mapper.to_source(click);
    let mut best: Option<(&EntityId, f64)> = None;
    for entity in &frame.entities {
        let region = entity.primary_region;
        if !region.contains(source) {
            continue;
        }
        let area = region.area();
        if best.is_none_or(|(_, best_area)| area < best_area) {
            best = Some((&entity.id, area));
        }
    }

    match best {
        Some((id, _)) => Hit::ToggleVisibility(id.clone()),
        None => Hit::None,
    }
}
