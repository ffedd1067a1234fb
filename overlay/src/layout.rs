//! Information panel layout.
//!
//! Panels are packed greedily, left to right in frame order. Each panel
//! starts at its entity's nominal anchor and is pushed rightward past any
//! already-placed panel whose horizontal span it would come within `spacing`
//! of. Earlier panels are never moved, so many entities anchored at the same
//! x produce a rightward cascade. Vertical position comes from the anchor and
//! is not packed.
//!
//! The result is a pure function of (frame, interaction state, geometry,
//! config). The renderer and the hit tester both call [`layout`] and
//! [`toggle_control_rect`], so what is drawn and what is clickable agree.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    PANEL_ANCHOR_GAP, PANEL_BASE_HEIGHT, PANEL_EXPANDED_INCREMENT, PANEL_LINE_HEIGHT, PANEL_PADDING,
    PANEL_PLACEHOLDER_HEIGHT, PANEL_SPACING, PANEL_WIDTH, TOGGLE_SIZE,
};
use crate::interaction::InteractionState;
use crate::mapper::{CoordinateMapper, Point};
use crate::payload::{EntityAnnotation, EntityId, FrameRecord, Rect};

/// Panel sizing and packing parameters, in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub panel_width: f64,
    pub base_height: f64,
    pub expanded_increment: f64,
    pub placeholder_height: f64,
    pub spacing: f64,
    pub anchor_gap: f64,
    pub padding: f64,
    pub line_height: f64,
    pub toggle_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            panel_width: PANEL_WIDTH,
            base_height: PANEL_BASE_HEIGHT,
            expanded_increment: PANEL_EXPANDED_INCREMENT,
            placeholder_height: PANEL_PLACEHOLDER_HEIGHT,
            spacing: PANEL_SPACING,
            anchor_gap: PANEL_ANCHOR_GAP,
            padding: PANEL_PADDING,
            line_height: PANEL_LINE_HEIGHT,
            toggle_size: TOGGLE_SIZE,
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not a JSON object, a
    /// field is not a number, or a key is not a known field.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        serde_json::from_value(serde_json::Value::Object(fields))
    }

    /// Panel height for an entity given its current expansion.
    #[must_use]
    pub fn panel_height(&self, entity: &EntityAnnotation, expanded: bool) -> f64 {
        if !entity.has_supplemental_data {
            return self.placeholder_height;
        }
        if expanded {
            self.base_height + self.expanded_increment
        } else {
            self.base_height
        }
    }
}

/// Final screen rectangle of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PanelPlacement {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin(self.x, self.y, self.width, self.height)
    }
}

/// Placements for the visible entities of one frame, in placement order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    placements: Vec<(EntityId, PanelPlacement)>,
}

impl LayoutResult {
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&PanelPlacement> {
        self.placements.iter().find(|(pid, _)| pid == id).map(|(_, p)| p)
    }

    /// Placements in the order they were packed.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &PanelPlacement)> {
        self.placements.iter().map(|(id, p)| (id, p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Un-adjusted top-left corner for an entity's panel, in display space.
///
/// With a panel anchor: the anchor's top-left corner. Without: horizontally
/// centred on the detection box and sitting `anchor_gap` above it, clamped
/// to the top edge.
#[must_use]
pub fn nominal_anchor(entity: &EntityAnnotation, height: f64, mapper: &CoordinateMapper, config: &LayoutConfig) -> Point {
    if let Some(anchor) = entity.panel_anchor {
        return mapper.to_display(Point::new(anchor.x1, anchor.y1));
    }
    let region = mapper.rect_to_display(entity.primary_region);
    let x = region.center().x - config.panel_width * 0.5;
    let y = (region.y1 - config.anchor_gap - height).max(0.0);
    Point::new(x, y)
}

/// Lay out the panels of every visible entity in `frame`.
///
/// An id repeated within the frame gets one panel, owned by its first entity.
#[must_use]
pub fn layout(
    frame: &FrameRecord,
    state: &InteractionState,
    mapper: &CoordinateMapper,
    config: &LayoutConfig,
) -> LayoutResult {
    let mut placements: Vec<(EntityId, PanelPlacement)> = Vec::new();

    for entity in frame.entities.iter().filter(|e| state.is_visible(&e.id)) {
        if placements.iter().any(|(id, _)| id == &entity.id) {
            log::debug!("entity {} repeated in frame; keeping its first panel", entity.id);
            continue;
        }
        let height = config.panel_height(entity, state.is_expanded(&entity.id));
        let anchor = nominal_anchor(entity, height, mapper, config);
        let x = pack_x(anchor.x, config.panel_width, config.spacing, &placements);
        placements.push((entity.id.clone(), PanelPlacement { x, y: anchor.y, width: config.panel_width, height }));
    }

    LayoutResult { placements }
}

/// Push `x` rightward until `[x, x + width]` keeps `spacing` from every placed span.
///
/// Every push moves strictly right past one placed panel, so the sweep ends
/// after at most one push per placed panel.
fn pack_x(mut x: f64, width: f64, spacing: f64, placed: &[(EntityId, PanelPlacement)]) -> f64 {
    loop {
        let mut pushed = false;
        for (_, p) in placed {
            if x < p.right() + spacing && x + width + spacing > p.x {
                x = p.right() + spacing;
                pushed = true;
            }
        }
        if !pushed {
            return x;
        }
    }
}

/// The expand/collapse control of a panel: a square in its top-right corner.
#[must_use]
pub fn toggle_control_rect(placement: &PanelPlacement, config: &LayoutConfig) -> Rect {
    Rect::from_origin(
        placement.right() - config.padding - config.toggle_size,
        placement.y + config.padding,
        config.toggle_size,
        config.toggle_size,
    )
}
