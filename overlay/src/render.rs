//! Rendering: turns the current frame into draw commands and paints them.
//!
//! [`compose`] is a pure projection of (frame, layout, interaction state,
//! geometry) into a list of [`DrawCommand`]s. It never mutates state and
//! never makes layout decisions; panel rectangles come from the
//! [`LayoutResult`] it is given. [`paint`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`].
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashSet;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{
    LOGO_GAP, LOGO_SIZE, MARKER_THICKNESS, PANEL_FONT, PANEL_STROKE, PLACEHOLDER_FONT, PLACEHOLDER_TEXT, TOGGLE_FONT,
};
use crate::interaction::InteractionState;
use crate::layout::{LayoutConfig, LayoutResult, PanelPlacement, toggle_control_rect};
use crate::mapper::{CoordinateMapper, Point};
use crate::payload::{EntityAnnotation, EntityId, FrameRecord, Rect, Rgb, SupplementalData};

/// Baseline offset of the first text line below the panel top.
const FIRST_BASELINE: f64 = 18.0;

/// Vertical nudge that visually centres the placeholder text.
const PLACEHOLDER_BASELINE_NUDGE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
        }
    }
}

/// One primitive drawing step, in display coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    /// Corner-bracket detection marker.
    CornerBox { entity: EntityId, rect: Rect, color: Rgb },
    /// Decorative logo blit.
    Logo { entity: EntityId, rect: Rect },
    PanelOutline { entity: EntityId, rect: Rect, color: Rgb },
    /// Polyline from the detection box to the panel's top-centre.
    Connector { points: [Point; 3], color: Rgb },
    Text { text: String, at: Point, color: Rgb, font: &'static str, align: TextAlign },
    ToggleControl { entity: EntityId, rect: Rect, color: Rgb, expanded: bool },
}

/// The four L-shaped corners of a detection marker as line segments.
///
/// Each arm is a quarter of the shorter side.
#[must_use]
pub fn corner_segments(r: Rect) -> [(Point, Point); 8] {
    let len = (r.width() / 4.0).min(r.height() / 4.0);
    let p = Point::new;
    [
        (p(r.x1, r.y1), p(r.x1, r.y1 + len)),
        (p(r.x1, r.y1), p(r.x1 + len, r.y1)),
        (p(r.x2, r.y1), p(r.x2, r.y1 + len)),
        (p(r.x2, r.y1), p(r.x2 - len, r.y1)),
        (p(r.x1, r.y2), p(r.x1, r.y2 - len)),
        (p(r.x1, r.y2), p(r.x1 + len, r.y2)),
        (p(r.x2, r.y2), p(r.x2, r.y2 - len)),
        (p(r.x2, r.y2), p(r.x2 - len, r.y2)),
    ]
}

/// Build the draw list for one frame.
///
/// Every entity gets its detection marker (and the logo, when loaded, if it
/// carries supplemental data). Visible entities additionally get their panel.
/// A visible entity with no placement in `layout` is drawn without a panel,
/// and an id repeated within the frame gets a single panel.
#[must_use]
pub fn compose(
    frame: &FrameRecord,
    layout: &LayoutResult,
    state: &InteractionState,
    mapper: &CoordinateMapper,
    config: &LayoutConfig,
    logo_loaded: bool,
) -> Vec<DrawCommand> {
    let display = mapper.display_size();
    let mut out = vec![DrawCommand::Clear { width: display.width, height: display.height }];
    let mut paneled: HashSet<&EntityId> = HashSet::new();

    for entity in &frame.entities {
        let region = mapper.rect_to_display(entity.primary_region);
        out.push(DrawCommand::CornerBox { entity: entity.id.clone(), rect: region, color: entity.display_color });

        if logo_loaded && entity.has_supplemental_data {
            let rect = Rect::from_origin(region.x1, region.y1 - LOGO_GAP - LOGO_SIZE, LOGO_SIZE, LOGO_SIZE);
            out.push(DrawCommand::Logo { entity: entity.id.clone(), rect });
        }

        if !state.is_visible(&entity.id) || !paneled.insert(&entity.id) {
            continue;
        }
        let Some(placement) = layout.get(&entity.id) else {
            log::debug!("no panel placement for visible entity {}", entity.id);
            continue;
        };
        push_panel(&mut out, entity, region, placement, state.is_expanded(&entity.id), config);
    }

    out
}

fn push_panel(
    out: &mut Vec<DrawCommand>,
    entity: &EntityAnnotation,
    region: Rect,
    placement: &PanelPlacement,
    expanded: bool,
    config: &LayoutConfig,
) {
    let color = entity.display_color;
    let panel = placement.rect();
    out.push(DrawCommand::PanelOutline { entity: entity.id.clone(), rect: panel, color });

    // Leave the box from whichever horizontal edge faces the panel.
    let box_x = region.center().x;
    let box_y = if panel.y1 >= region.y2 { region.y2 } else { region.y1 };
    out.push(DrawCommand::Connector {
        points: [Point::new(box_x, box_y), Point::new(box_x, panel.y1), Point::new(panel.center().x, panel.y1)],
        color,
    });

    if !entity.has_supplemental_data {
        let c = panel.center();
        out.push(DrawCommand::Text {
            text: PLACEHOLDER_TEXT.to_string(),
            at: Point::new(c.x, c.y + PLACEHOLDER_BASELINE_NUDGE),
            color,
            font: PLACEHOLDER_FONT,
            align: TextAlign::Center,
        });
        return;
    }

    let empty = SupplementalData::default();
    let data = entity.supplemental_data.as_ref().unwrap_or(&empty);
    let text_x = panel.x1 + config.padding;
    let mut baseline = panel.y1 + FIRST_BASELINE;
    let mut line = |out: &mut Vec<DrawCommand>, text: String| {
        out.push(DrawCommand::Text { text, at: Point::new(text_x, baseline), color, font: PANEL_FONT, align: TextAlign::Left });
        baseline += config.line_height;
    };

    line(out, format!("ID: {}", data.identifier.as_deref().unwrap_or("-")));
    if expanded {
        for text in detail_lines(data) {
            line(out, text);
        }
    }

    out.push(DrawCommand::ToggleControl {
        entity: entity.id.clone(),
        rect: toggle_control_rect(placement, config),
        color,
        expanded,
    });
}

/// Telemetry lines shown only while a panel is expanded.
#[must_use]
pub fn detail_lines(data: &SupplementalData) -> [String; 4] {
    [
        format!("SOG: {}", field(data.speed)),
        format!("COG: {}", field(data.course)),
        format!("LAT: {}", field(data.latitude)),
        format!("LON: {}", field(data.longitude)),
    ]
}

fn field(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

// =============================================================
// Canvas2D painter
// =============================================================

/// Paint a draw list onto a 2D context. `logo` is skipped when absent.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn paint(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand], logo: Option<&HtmlImageElement>) -> Result<(), JsValue> {
    for cmd in commands {
        match cmd {
            DrawCommand::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawCommand::CornerBox { rect, color, .. } => draw_corner_box(ctx, *rect, *color),
            DrawCommand::Logo { rect, .. } => {
                if let Some(img) = logo {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, rect.x1, rect.y1, rect.width(), rect.height())?;
                }
            }
            DrawCommand::PanelOutline { rect, color, .. } => {
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(PANEL_STROKE);
                ctx.stroke_rect(rect.x1, rect.y1, rect.width(), rect.height());
            }
            DrawCommand::Connector { points, color } => {
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(PANEL_STROKE);
                ctx.begin_path();
                ctx.move_to(points[0].x, points[0].y);
                for p in &points[1..] {
                    ctx.line_to(p.x, p.y);
                }
                ctx.stroke();
            }
            DrawCommand::Text { text, at, color, font, align } => {
                ctx.set_fill_style_str(&color.css());
                ctx.set_font(font);
                ctx.set_text_align(align.css());
                ctx.fill_text(text, at.x, at.y)?;
                ctx.set_text_align(TextAlign::Left.css());
            }
            DrawCommand::ToggleControl { rect, color, expanded, .. } => draw_toggle(ctx, *rect, *color, *expanded)?,
        }
    }
    Ok(())
}

fn draw_corner_box(ctx: &CanvasRenderingContext2d, rect: Rect, color: Rgb) {
    ctx.set_stroke_style_str(&color.css());
    ctx.set_line_width(MARKER_THICKNESS);
    ctx.begin_path();
    for (from, to) in corner_segments(rect) {
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
    }
    ctx.stroke();
}

fn draw_toggle(ctx: &CanvasRenderingContext2d, rect: Rect, color: Rgb, expanded: bool) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(&color.css());
    ctx.set_line_width(PANEL_STROKE);
    ctx.stroke_rect(rect.x1, rect.y1, rect.width(), rect.height());

    let c = rect.center();
    ctx.set_fill_style_str(&color.css());
    ctx.set_font(TOGGLE_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(if expanded { "-" } else { "+" }, c.x, c.y)?;
    ctx.set_text_align("left");
    ctx.set_text_baseline("alphabetic");
    Ok(())
}
