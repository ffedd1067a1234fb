//! Source ⇄ display coordinate mapping.
//!
//! Annotation boxes are authored in the resolution of the original video
//! (source space). The overlay canvas is whatever size its container lays it
//! out at (display space). The mapper holds both sizes and derives a scale
//! factor per axis; there is no aspect-ratio correction.

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;
use crate::payload::Rect;

/// A point in either source or display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair. Serializes as `[width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl From<[f64; 2]> for Size {
    fn from([width, height]: [f64; 2]) -> Self {
        Self { width, height }
    }
}

impl From<Size> for [f64; 2] {
    fn from(size: Size) -> Self {
        [size.width, size.height]
    }
}

/// Scale factors derived from a (source, display) size pair.
///
/// Kept as one value so a resize replaces all four factors in a single
/// assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scale {
    to_display_x: f64,
    to_display_y: f64,
    to_source_x: f64,
    to_source_y: f64,
}

impl Scale {
    fn derive(source: Size, display: Size) -> Self {
        Self {
            to_display_x: display.width / source.width,
            to_display_y: display.height / source.height,
            to_source_x: source.width / display.width,
            to_source_y: source.height / display.height,
        }
    }
}

/// Converts between source resolution and the current display size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    source: Size,
    display: Size,
    scale: Scale,
}

impl CoordinateMapper {
    /// Build a mapper for the given source resolution and initial display size.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::InvalidGeometry`] if either size is not
    /// strictly positive and finite.
    pub fn new(source: Size, display: Size) -> Result<Self, OverlayError> {
        for size in [source, display] {
            if !size.is_valid() {
                return Err(OverlayError::InvalidGeometry { width: size.width, height: size.height });
            }
        }
        Ok(Self { source, display, scale: Scale::derive(source, display) })
    }

    /// Re-derive the scale factors for a new display size.
    ///
    /// Always recomputes from the two absolute sizes, so repeated calls never
    /// drift. Invalid sizes are ignored. Returns `true` if the geometry changed.
    pub fn recompute(&mut self, display: Size) -> bool {
        if !display.is_valid() || display == self.display {
            return false;
        }
        self.display = display;
        self.scale = Scale::derive(self.source, display);
        true
    }

    /// Source-space point to display space.
    #[must_use]
    pub fn to_display(&self, source: Point) -> Point {
        Point { x: source.x * self.scale.to_display_x, y: source.y * self.scale.to_display_y }
    }

    /// Display-space point to source space.
    #[must_use]
    pub fn to_source(&self, display: Point) -> Point {
        Point { x: display.x * self.scale.to_source_x, y: display.y * self.scale.to_source_y }
    }

    /// Map a source-space rectangle to display space.
    #[must_use]
    pub fn rect_to_display(&self, rect: Rect) -> Rect {
        let tl = self.to_display(Point::new(rect.x1, rect.y1));
        let br = self.to_display(Point::new(rect.x2, rect.y2));
        Rect::new(tl.x, tl.y, br.x, br.y)
    }

    /// Forward `(scale_x, scale_y)`.
    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        (self.scale.to_display_x, self.scale.to_display_y)
    }

    #[must_use]
    pub fn source_size(&self) -> Size {
        self.source
    }

    #[must_use]
    pub fn display_size(&self) -> Size {
        self.display
    }
}
