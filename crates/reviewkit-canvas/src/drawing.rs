//! Drawing primitives attached to comments.
//!
//! A drawing is either a freehand pen stroke (raw captured points, no
//! smoothing) or an axis-aligned box. Both live in normalized space and are
//! translated as a whole when their comment's pin is dragged.

use reviewkit_core::ModelError;
use serde::{Deserialize, Serialize};

use crate::geometry::{NormalizedRect, Point};

/// Which primitive a drawing holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingKind {
    Pen,
    Box,
}

/// A pen stroke or a box, always with a colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Drawing {
    /// Polyline in capture order.
    Pen { points: Vec<Point>, color: String },
    /// Rectangle with min corner at `rect.x, rect.y`.
    Box { rect: NormalizedRect, color: String },
}

impl Drawing {
    pub fn pen(points: Vec<Point>, color: impl Into<String>) -> Self {
        Drawing::Pen {
            points,
            color: color.into(),
        }
    }

    pub fn rect(rect: NormalizedRect, color: impl Into<String>) -> Self {
        Drawing::Box {
            rect,
            color: color.into(),
        }
    }

    pub fn kind(&self) -> DrawingKind {
        match self {
            Drawing::Pen { .. } => DrawingKind::Pen,
            Drawing::Box { .. } => DrawingKind::Box,
        }
    }

    pub fn color(&self) -> &str {
        match self {
            Drawing::Pen { color, .. } | Drawing::Box { color, .. } => color,
        }
    }

    /// Move the whole drawing by `(dx, dy)` normalized units.
    ///
    /// Pen: every point moves. Box: only the min corner moves, the extent
    /// is unchanged. Used both for the live drag preview and the commit.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Drawing::Pen { points, .. } => {
                for p in points.iter_mut() {
                    *p = p.translated(dx, dy);
                }
            }
            Drawing::Box { rect, .. } => {
                rect.x += dx;
                rect.y += dy;
            }
        }
    }

    /// Copy of this drawing moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut moved = self.clone();
        moved.translate(dx, dy);
        moved
    }

    /// Bounding box of the primitive in normalized units.
    pub fn bounds(&self) -> NormalizedRect {
        match self {
            Drawing::Box { rect, .. } => *rect,
            Drawing::Pen { points, .. } => {
                let mut iter = points.iter();
                let Some(first) = iter.next() else {
                    return NormalizedRect::default();
                };
                let (mut min_x, mut min_y, mut max_x, mut max_y) =
                    (first.x, first.y, first.x, first.y);
                for p in iter {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                }
                NormalizedRect::new(min_x, min_y, max_x - min_x, max_y - min_y)
            }
        }
    }

    /// Structural checks for drawings arriving from outside the engine.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !reviewkit_settings::is_hex_color(self.color()) {
            return Err(ModelError::InvalidColor {
                color: self.color().to_string(),
            });
        }
        match self {
            Drawing::Pen { points, .. } => {
                if points.is_empty() {
                    return Err(ModelError::InvalidDrawing {
                        reason: "pen stroke has no points".to_string(),
                    });
                }
                if !points.iter().all(Point::is_finite) {
                    return Err(ModelError::InvalidDrawing {
                        reason: "pen stroke has non-finite points".to_string(),
                    });
                }
            }
            Drawing::Box { rect, .. } => {
                if !rect.is_finite() || rect.w < 0.0 || rect.h < 0.0 {
                    return Err(ModelError::InvalidDrawing {
                        reason: "box must be finite with non-negative extent".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
