//! Normalized and screen-space geometry.
//!
//! Two coordinate spaces meet here:
//! - **Normalized** ([`Point`], [`NormalizedRect`]): percentages (0-100) of
//!   the unscaled content box. Everything that is stored lives here, so it
//!   survives any render size, zoom or pan.
//! - **Screen** ([`ScreenPoint`], [`ScreenRect`]): pixels as delivered by
//!   pointer events and layout measurement. Nothing in screen space is ever
//!   persisted.

use serde::{Deserialize, Serialize};

/// Upper bound of the normalized range.
pub const NORMALIZED_MAX: f64 = 100.0;

/// A position in normalized percentage units relative to the content box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same point moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Component-wise `self - other`.
    pub fn delta_from(&self, other: &Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Clamp both components into `[0, 100]`.
    pub fn clamped(&self) -> Self {
        Self::new(
            self.x.clamp(0.0, NORMALIZED_MAX),
            self.y.clamp(0.0, NORMALIZED_MAX),
        )
    }

    /// True when the point lies inside the content box (edges included).
    pub fn is_inside(&self) -> bool {
        (0.0..=NORMALIZED_MAX).contains(&self.x) && (0.0..=NORMALIZED_MAX).contains(&self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in normalized units, `x,y` is the min corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle spanned by two arbitrary corners.
    ///
    /// The drag direction does not matter: the result always has its min
    /// corner at `x,y` and a non-negative extent.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (b.x - a.x).abs(),
            h: (b.y - a.y).abs(),
        }
    }

    /// Intersection with the content box. Empty results collapse to a
    /// zero-sized rect on the nearest edge.
    pub fn clipped(&self) -> Self {
        let min = Point::new(self.x, self.y).clamped();
        let max = Point::new(self.x + self.w, self.y + self.h).clamped();
        Self::from_corners(min, max)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

/// A pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A measured on-screen rectangle (the transformed content box).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect with no area cannot map anything.
    pub fn is_usable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Screen pixel to normalized content coordinates, unclamped.
    ///
    /// `normalized.x = 100 * (screen.x - left) / width`. Returns `None`
    /// for an unusable rect or a non-finite pointer.
    pub fn to_normalized(&self, p: ScreenPoint) -> Option<Point> {
        if !self.is_usable() || !p.is_finite() {
            return None;
        }
        Some(Point::new(
            NORMALIZED_MAX * (p.x - self.left) / self.width,
            NORMALIZED_MAX * (p.y - self.top) / self.height,
        ))
    }

    /// Normalized content coordinates back to screen pixels.
    pub fn to_screen(&self, p: Point) -> ScreenPoint {
        ScreenPoint::new(
            self.left + p.x / NORMALIZED_MAX * self.width,
            self.top + p.y / NORMALIZED_MAX * self.height,
        )
    }
}

/// A pixel size (content natural size, container size).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
