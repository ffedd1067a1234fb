//! Frame-synchronized annotation overlay for vessel-tracking video.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It loads a
//! per-frame annotation payload, follows the video's playback clock, draws
//! detection markers and info panels over the video on a 2D canvas, and turns
//! clicks into visibility and expansion toggles. The host page only supplies
//! element ids and the payload URL to [`web::start`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`payload`] | Annotation payload types and parsing |
//! | [`mapper`] | Source/display coordinate mapping |
//! | [`frame_index`] | Playback time to frame index |
//! | [`interaction`] | Per-entity visibility and expansion state |
//! | [`layout`] | Info panel placement and toggle control geometry |
//! | [`hit`] | Click resolution against controls and detection boxes |
//! | [`render`] | Draw list composition and Canvas2D painting |
//! | [`clock`] | `MM:SS` playback readout |
//! | [`web`] | Browser entry point and DOM wiring |
//! | [`error`] | Initialization error type |
//! | [`consts`] | Panel metrics, marker sizes and fonts |

pub mod clock;
pub mod consts;
pub mod engine;
pub mod error;
pub mod frame_index;
pub mod hit;
pub mod interaction;
pub mod layout;
pub mod mapper;
pub mod payload;
pub mod render;
pub mod web;
