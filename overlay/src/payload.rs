//! Annotation payload: the per-frame detection data the overlay draws.
//!
//! The payload is produced offline by the detection/fusion exporter and
//! fetched once per session. It is never mutated after parsing. Field names
//! follow the camelCase wire format; the snake_case names written by the
//! original exporter (`original_size`, `fps`, `boxes`, `has_ais`, ...) are
//! accepted as aliases so either document loads.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OverlayError;
use crate::mapper::{Point, Size};

/// Stable identifier of a tracked entity.
///
/// Accepts JSON strings and numbers; numbers are kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "TextOrNumber")]
pub struct EntityId(String);

impl EntityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<TextOrNumber> for EntityId {
    fn from(raw: TextOrNumber) -> Self {
        Self(raw.into())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl From<TextOrNumber> for String {
    fn from(raw: TextOrNumber) -> Self {
        match raw {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Int(n) => n.to_string(),
            TextOrNumber::Uint(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(String::from))
}

/// Axis-aligned rectangle given by two corners. Serializes as `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle from a top-left corner and a size.
    #[must_use]
    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x1: x, y1: y, x2: x + width, y2: y + height }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Area, zero for degenerate or inverted rectangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.x1 <= p.x && p.x <= self.x2 && self.y1 <= p.y && p.y <= self.y2
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }
}

impl From<[f64; 4]> for Rect {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<Rect> for [f64; 4] {
    fn from(r: Rect) -> Self {
        [r.x1, r.y1, r.x2, r.y2]
    }
}

/// Display color. Serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Color of detections matched to AIS data in the original exporter.
    pub const MATCHED: Self = Self(204, 204, 51);
    /// Color of detections without AIS data.
    pub const UNMATCHED: Self = Self(0, 0, 255);

    /// CSS color string, e.g. `rgb(204, 204, 51)`.
    #[must_use]
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::UNMATCHED
    }
}

/// Identity and telemetry attached to a detection (AIS fields).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplementalData {
    #[serde(
        rename = "mmsi",
        alias = "identifier",
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub identifier: Option<String>,
    /// Speed over ground.
    #[serde(rename = "sog", alias = "speed", default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Course over ground.
    #[serde(rename = "cog", alias = "course", default, skip_serializing_if = "Option::is_none")]
    pub course: Option<f64>,
    #[serde(rename = "lat", alias = "latitude", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "lon", alias = "longitude", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// One detected entity in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAnnotation {
    pub id: EntityId,
    /// Detection box in source coordinates.
    #[serde(rename = "box")]
    pub primary_region: Rect,
    #[serde(default, alias = "has_ais")]
    pub has_supplemental_data: bool,
    #[serde(default, alias = "ais_data", skip_serializing_if = "Option::is_none")]
    pub supplemental_data: Option<SupplementalData>,
    /// Suggested panel placement in source coordinates.
    #[serde(default, alias = "inf_box", skip_serializing_if = "Option::is_none")]
    pub panel_anchor: Option<Rect>,
    #[serde(rename = "color", default)]
    pub display_color: Rgb,
}

/// All entity annotations for one video frame, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    #[serde(default, alias = "boxes")]
    pub entities: Vec<EntityAnnotation>,
    #[serde(default, alias = "frame_num", skip_serializing_if = "Option::is_none")]
    pub frame_number: Option<u64>,
    /// Capture time in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Human-readable capture time.
    #[serde(default, alias = "time_name", skip_serializing_if = "Option::is_none")]
    pub time_name: Option<String>,
}

impl FrameRecord {
    /// Entity ids in frame order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id.clone()).collect()
    }
}

/// The full annotation document for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationPayload {
    #[serde(alias = "original_size")]
    pub source_resolution: Size,
    /// Initial display size hint; the live size comes from resize events.
    #[serde(default, alias = "display_size", skip_serializing_if = "Option::is_none")]
    pub display_size: Option<Size>,
    #[serde(alias = "fps")]
    pub frame_rate: f64,
    #[serde(default)]
    pub frames: Vec<FrameRecord>,
}

impl AnnotationPayload {
    /// Parse a payload document.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Parse`] if the text is not a valid payload.
    pub fn from_json(text: &str) -> Result<Self, OverlayError> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&FrameRecord> {
        self.frames.get(index)
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Display size to start with: the payload hint, else the source resolution.
    #[must_use]
    pub fn initial_display_size(&self) -> Size {
        self.display_size
            .filter(|s| s.is_valid())
            .unwrap_or(self.source_resolution)
    }
}
