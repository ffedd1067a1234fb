//! Browser entry point: loads the annotation payload and wires the video,
//! canvas and control buttons to an [`Engine`].
//!
//! Event handlers borrow the engine mutably only long enough to collect the
//! [`Action`]s an input produced; the actions are then applied to the DOM
//! with the borrow released.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, HtmlImageElement, HtmlVideoElement, MouseEvent, Window};

use crate::engine::{Action, Engine};
use crate::error::OverlayError;
use crate::layout::LayoutConfig;
use crate::mapper::Point;
use crate::payload::AnnotationPayload;

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

const STATUS_ID: &str = "status";
const FRAME_INFO_ID: &str = "frame-info";
const TIME_INFO_ID: &str = "time-info";
const SHOW_ALL_ID: &str = "show-all";
const HIDE_ALL_ID: &str = "hide-all";

const READY_STATUS: &str = "Ready - Click on vessels to toggle info";

/// Load the payload at `payload_url` and attach the overlay to the page.
///
/// On failure the status element reports the error and nothing is attached.
///
/// # Errors
///
/// Returns the initialization error as a JS string.
#[wasm_bindgen]
pub async fn start(
    canvas_id: String,
    video_id: String,
    payload_url: String,
    logo_url: Option<String>,
    config_json: Option<String>,
) -> Result<(), JsValue> {
    init_logging();
    match mount(&canvas_id, &video_id, &payload_url, logo_url.as_deref(), config_json.as_deref()).await {
        Ok(()) => {
            set_status(READY_STATUS);
            Ok(())
        }
        Err(e) => {
            log::error!("overlay initialization failed: {e}");
            set_status(&format!("Error loading data: {e}"));
            Err(e.into())
        }
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::debug!("console logger already installed: {e}");
    }
}

async fn mount(
    canvas_id: &str,
    video_id: &str,
    payload_url: &str,
    logo_url: Option<&str>,
    config_json: Option<&str>,
) -> Result<(), OverlayError> {
    let window = web_sys::window().ok_or_else(|| OverlayError::MissingElement("window".into()))?;
    let document = window.document().ok_or_else(|| OverlayError::MissingElement("document".into()))?;
    let canvas: HtmlCanvasElement = element_by_id(&document, canvas_id)?;
    let video: HtmlVideoElement = element_by_id(&document, video_id)?;
    let config = match config_json {
        Some(text) => LayoutConfig::from_json(text)?,
        None => LayoutConfig::default(),
    };

    set_text(&document, STATUS_ID, "Loading annotations...");
    let payload = fetch_payload(payload_url).await?;
    let engine = Engine::new(canvas.clone(), payload, config)?;

    let host = Host { engine: Rc::new(RefCell::new(engine)), document, window };
    let initial = if video.paused() { host.engine.borrow_mut().on_pause() } else { host.engine.borrow_mut().on_play() };
    host.dispatch(initial);
    host.sync_viewport(&video);
    let at_load = host.engine.borrow_mut().on_time_update(video.current_time());
    host.dispatch(at_load);
    host.show_frame_info();
    host.dispatch(vec![Action::RenderNeeded]);

    if let Some(url) = logo_url {
        host.load_logo(url).await?;
    }
    host.attach(&video, &canvas)?;
    Ok(())
}

/// Append a `v=<now>` query parameter so the payload is never served from cache.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cache_busted(url: &str, now_ms: f64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}v={}", now_ms.max(0.0) as u64)
}

async fn fetch_payload(url: &str) -> Result<AnnotationPayload, OverlayError> {
    let network = |e: gloo_net::Error| OverlayError::Network { resource: url.to_string(), message: e.to_string() };
    let resp = gloo_net::http::Request::get(&cache_busted(url, js_sys::Date::now()))
        .send()
        .await
        .map_err(network)?;
    let status = resp.status();
    if !(200..300).contains(&status) {
        return Err(OverlayError::LoadFailure { resource: url.to_string(), status });
    }
    let text = resp.text().await.map_err(network)?;
    let payload = AnnotationPayload::from_json(&text)?;
    log::info!("loaded {} annotation frames at {} fps", payload.frame_count(), payload.frame_rate);
    Ok(payload)
}

// =============================================================
// Host
// =============================================================

#[derive(Clone)]
struct Host {
    engine: Rc<RefCell<Engine>>,
    document: Document,
    window: Window,
}

impl Host {
    /// Apply engine actions to the page.
    fn dispatch(&self, actions: Vec<Action>) {
        let mut render = false;
        for action in actions {
            match action {
                Action::RenderNeeded => render = true,
                Action::FrameChanged { index, clock } => {
                    set_text(&self.document, FRAME_INFO_ID, &index.to_string());
                    set_text(&self.document, TIME_INFO_ID, &clock);
                }
                Action::SetInteractive(interactive) => {
                    let engine = self.engine.borrow();
                    let value = if interactive { "auto" } else { "none" };
                    if let Err(e) = engine.canvas().style().set_property("pointer-events", value) {
                        log::warn!("failed to set pointer-events: {e:?}");
                    }
                    log::info!("canvas interaction {}", if interactive { "enabled" } else { "disabled" });
                }
                Action::VisibilityToggled { .. } | Action::ExpandedToggled { .. } => {}
            }
        }
        if render {
            if let Err(e) = self.engine.borrow().render() {
                log::warn!("render failed: {e:?}");
            }
        }
    }

    fn show_frame_info(&self) {
        let engine = self.engine.borrow();
        set_text(&self.document, FRAME_INFO_ID, &engine.core.frames.current_frame().to_string());
        set_text(&self.document, TIME_INFO_ID, &engine.core.clock());
    }

    /// Match the canvas to the video's rendered size. Skipped until the video has a layout box.
    fn sync_viewport(&self, video: &HtmlVideoElement) {
        let width = f64::from(video.client_width());
        let height = f64::from(video.client_height());
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let dpr = self.window.device_pixel_ratio();
        let actions = self.engine.borrow_mut().set_viewport(width, height, dpr);
        self.dispatch(actions);
    }

    /// Load the decorative logo and wait until it has loaded or failed.
    /// A failed load is logged and the overlay draws without it.
    async fn load_logo(&self, url: &str) -> Result<(), OverlayError> {
        let img = HtmlImageElement::new()?;
        let target = img.clone();
        let settled = js_sys::Promise::new(&mut |resolve: js_sys::Function, _reject: js_sys::Function| {
            let on_load = resolve.clone();
            let onload = Closure::<dyn FnMut()>::new(move || {
                if let Err(e) = on_load.call1(&JsValue::NULL, &JsValue::TRUE) {
                    log::warn!("failed to settle logo load: {e:?}");
                }
            });
            target.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let onerror = Closure::<dyn FnMut()>::new(move || {
                if let Err(e) = resolve.call1(&JsValue::NULL, &JsValue::FALSE) {
                    log::warn!("failed to settle logo load: {e:?}");
                }
            });
            target.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        });
        img.set_src(url);

        if JsFuture::from(settled).await?.as_bool() == Some(true) {
            let actions = self.engine.borrow_mut().set_logo(img);
            self.dispatch(actions);
        } else {
            log::warn!("logo failed to load from {url}; drawing without it");
        }
        Ok(())
    }

    fn attach(&self, video: &HtmlVideoElement, canvas: &HtmlCanvasElement) -> Result<(), OverlayError> {
        let host = self.clone();
        let media = video.clone();
        listen(video, "timeupdate", move |_| {
            let actions = host.engine.borrow_mut().on_time_update(media.current_time());
            host.dispatch(actions);
        })?;

        let host = self.clone();
        listen(video, "play", move |_| {
            let actions = host.engine.borrow_mut().on_play();
            host.dispatch(actions);
        })?;

        let host = self.clone();
        listen(video, "pause", move |_| {
            let actions = host.engine.borrow_mut().on_pause();
            host.dispatch(actions);
        })?;

        let window_target: &EventTarget = &self.window;
        let video_target: &EventTarget = video;
        for (target, event) in [(window_target, "resize"), (video_target, "loadedmetadata")] {
            let host = self.clone();
            let media = video.clone();
            listen(target, event, move |_| host.sync_viewport(&media))?;
        }

        let host = self.clone();
        let surface = canvas.clone();
        listen(canvas, "click", move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let bounds = surface.get_bounding_client_rect();
            let click = Point::new(f64::from(mouse.client_x()) - bounds.left(), f64::from(mouse.client_y()) - bounds.top());
            let actions = host.engine.borrow_mut().on_click(click);
            host.dispatch(actions);
        })?;

        self.attach_button(SHOW_ALL_ID, Engine::show_all)?;
        self.attach_button(HIDE_ALL_ID, Engine::hide_all)?;
        Ok(())
    }

    fn attach_button(&self, id: &str, command: fn(&mut Engine) -> Vec<Action>) -> Result<(), OverlayError> {
        let Some(button) = self.document.get_element_by_id(id) else {
            log::debug!("no #{id} button on page");
            return Ok(());
        };
        let host = self.clone();
        listen(&button, "click", move |_| {
            let actions = command(&mut *host.engine.borrow_mut());
            host.dispatch(actions);
        })
    }
}

// =============================================================
// DOM helpers
// =============================================================

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), OverlayError> {
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, OverlayError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| OverlayError::MissingElement(format!("#{id}")))?
        .dyn_into::<T>()
        .map_err(|_| OverlayError::MissingElement(format!("#{id} has the wrong element type")))
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn set_status(text: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        set_text(&document, STATUS_ID, text);
    }
}
