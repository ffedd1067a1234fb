use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::clock::format_clock;
use crate::error::OverlayError;
use crate::frame_index::FrameIndex;
use crate::hit::{self, Hit};
use crate::interaction::InteractionState;
use crate::layout::{self, LayoutConfig, LayoutResult};
use crate::mapper::{CoordinateMapper, Point, Size};
use crate::payload::{AnnotationPayload, EntityId, FrameRecord};
use crate::render::{self, DrawCommand};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The scene changed; draw again.
    RenderNeeded,
    /// Playback crossed into a new annotation frame.
    FrameChanged { index: usize, clock: String },
    /// Whether the canvas should receive pointer input.
    SetInteractive(bool),
    VisibilityToggled { id: EntityId, visible: bool },
    ExpandedToggled { id: EntityId, expanded: bool },
}

/// Engine state and logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Holds no layout cache: every draw and every click recomputes the layout
/// from the current frame, interaction state and geometry, so a click is
/// always resolved against exactly what the last draw showed.
pub struct EngineCore {
    payload: AnnotationPayload,
    pub frames: FrameIndex,
    pub state: InteractionState,
    pub mapper: CoordinateMapper,
    pub config: LayoutConfig,
    playing: bool,
    logo_loaded: bool,
}

impl EngineCore {
    /// Build an engine for a loaded payload. Starts paused on frame 0.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::InvalidGeometry`] if the payload's source
    /// resolution is not strictly positive.
    pub fn new(payload: AnnotationPayload, config: LayoutConfig) -> Result<Self, OverlayError> {
        let mapper = CoordinateMapper::new(payload.source_resolution, payload.initial_display_size())?;
        let frames = FrameIndex::new(payload.frame_rate, payload.frame_count());
        Ok(Self {
            payload,
            frames,
            state: InteractionState::new(),
            mapper,
            config,
            playing: false,
            logo_loaded: false,
        })
    }

    // --- Event inputs ---

    /// Playback time advanced (or seeked) to `t` seconds.
    pub fn on_time_update(&mut self, t: f64) -> Vec<Action> {
        match self.frames.advance(t) {
            Some(index) => vec![Action::FrameChanged { index, clock: format_clock(t) }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// The drawing surface now has this CSS size.
    pub fn on_resize(&mut self, display: Size) -> Vec<Action> {
        if self.mapper.recompute(display) {
            log::debug!("display resized to {}x{}", display.width, display.height);
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn on_play(&mut self) -> Vec<Action> {
        self.playing = true;
        vec![Action::SetInteractive(true)]
    }

    pub fn on_pause(&mut self) -> Vec<Action> {
        self.playing = false;
        vec![Action::SetInteractive(false)]
    }

    /// A click at a display-space point. Ignored while paused.
    pub fn on_click(&mut self, click: Point) -> Vec<Action> {
        if !self.playing {
            return Vec::new();
        }
        match self.hit_at(click) {
            Hit::ToggleExpand(id) => {
                let expanded = self.state.toggle_expanded(&id);
                log::info!("entity {id} expanded={expanded}");
                vec![Action::ExpandedToggled { id, expanded }, Action::RenderNeeded]
            }
            Hit::ToggleVisibility(id) => {
                let visible = self.state.toggle_visibility(&id);
                log::info!("entity {id} visible={visible}");
                vec![Action::VisibilityToggled { id, visible }, Action::RenderNeeded]
            }
            Hit::None => {
                let source = self.mapper.to_source(click);
                log::debug!(
                    "click at ({:.1}, {:.1}) hit nothing in frame {}",
                    source.x,
                    source.y,
                    self.frames.current_frame()
                );
                Vec::new()
            }
        }
    }

    /// Show the panels of every entity in the current frame.
    pub fn show_all(&mut self) -> Vec<Action> {
        let Some(ids) = self.current_record().map(FrameRecord::ids) else {
            return Vec::new();
        };
        self.state.show_all(&ids);
        vec![Action::RenderNeeded]
    }

    /// Hide the panels of every entity in the current frame.
    pub fn hide_all(&mut self) -> Vec<Action> {
        let Some(ids) = self.current_record().map(FrameRecord::ids) else {
            return Vec::new();
        };
        self.state.hide_all(&ids);
        vec![Action::RenderNeeded]
    }

    pub fn set_logo_loaded(&mut self, loaded: bool) -> Vec<Action> {
        self.logo_loaded = loaded;
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// Annotation record of the current frame, if the payload has one.
    #[must_use]
    pub fn current_record(&self) -> Option<&FrameRecord> {
        self.payload.frame(self.frames.current_frame())
    }

    /// Panel layout for the current frame and state.
    #[must_use]
    pub fn layout(&self) -> LayoutResult {
        match self.current_record() {
            Some(frame) => layout::layout(frame, &self.state, &self.mapper, &self.config),
            None => LayoutResult::default(),
        }
    }

    /// What a click at `click` would hit, without applying it.
    #[must_use]
    pub fn hit_at(&self, click: Point) -> Hit {
        let Some(frame) = self.current_record() else {
            return Hit::None;
        };
        let layout = layout::layout(frame, &self.state, &self.mapper, &self.config);
        hit::resolve(click, frame, &layout, &self.state, &self.mapper, &self.config)
    }

    /// Draw list for the current frame; empty when there is no frame record.
    #[must_use]
    pub fn scene(&self) -> Vec<DrawCommand> {
        let Some(frame) = self.current_record() else {
            return Vec::new();
        };
        let layout = layout::layout(frame, &self.state, &self.mapper, &self.config);
        render::compose(frame, &layout, &self.state, &self.mapper, &self.config, self.logo_loaded)
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.playing
    }

    /// `MM:SS` of the last playback time seen.
    #[must_use]
    pub fn clock(&self) -> String {
        format_clock(self.frames.last_time())
    }
}

/// The full overlay engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    logo: Option<HtmlImageElement>,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`, sized to the payload's display hint.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas has no 2D context or the payload
    /// geometry is invalid.
    pub fn new(canvas: HtmlCanvasElement, payload: AnnotationPayload, config: LayoutConfig) -> Result<Self, OverlayError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| OverlayError::MissingElement("2d canvas context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| OverlayError::MissingElement("2d canvas context".into()))?;
        let core = EngineCore::new(payload, config)?;
        let mut engine = Self { canvas, ctx, logo: None, dpr: 1.0, core };
        let initial = engine.core.mapper.display_size();
        engine.set_viewport(initial.width, initial.height, 1.0);
        Ok(engine)
    }

    // --- Viewport ---

    /// Size the canvas to `width_css` x `height_css` CSS pixels at the given
    /// device pixel ratio and re-derive the coordinate mapping.
    ///
    /// Resizing the backing store clears it, so this always asks for a redraw.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let size = Size::new(width_css, height_css);
        if !size.is_valid() {
            return Vec::new();
        }
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.canvas.set_width((width_css * self.dpr).round().max(1.0) as u32);
        self.canvas.set_height((height_css * self.dpr).round().max(1.0) as u32);
        let style = self.canvas.style();
        for (prop, value) in [("width", width_css), ("height", height_css)] {
            if let Err(e) = style.set_property(prop, &format!("{value}px")) {
                log::warn!("failed to set canvas {prop}: {e:?}");
            }
        }

        let mut actions = self.core.on_resize(size);
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Attach the decorative logo once it has loaded.
    pub fn set_logo(&mut self, logo: HtmlImageElement) -> Vec<Action> {
        self.logo = Some(logo);
        self.core.set_logo_loaded(true)
    }

    // --- Delegated inputs ---

    pub fn on_time_update(&mut self, t: f64) -> Vec<Action> {
        self.core.on_time_update(t)
    }

    pub fn on_play(&mut self) -> Vec<Action> {
        self.core.on_play()
    }

    pub fn on_pause(&mut self) -> Vec<Action> {
        self.core.on_pause()
    }

    pub fn on_click(&mut self, click: Point) -> Vec<Action> {
        self.core.on_click(click)
    }

    pub fn show_all(&mut self) -> Vec<Action> {
        self.core.show_all()
    }

    pub fn hide_all(&mut self) -> Vec<Action> {
        self.core.hide_all()
    }

    // --- Render ---

    /// Draw the current frame to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        render::paint(&self.ctx, &self.core.scene(), self.logo.as_ref())
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}
