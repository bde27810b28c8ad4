//! Gesture-local state.
//!
//! A [`Gesture`] is the tagged "what is the pointer doing right now" value.
//! Everything a gesture caches (the measured content rect, the document
//! capture, the last pointer position) lives inside its variant, so dropping
//! the gesture tears all of it down.

use reviewkit_core::CommentId;

use crate::capture::CaptureGuard;
use crate::drawing::Drawing;
use crate::geometry::{Point, ScreenPoint, ScreenRect};
use crate::measure::ContentMeasure;

/// Content rect measured at gesture start plus an optional pointer capture.
#[derive(Debug)]
pub struct GestureSession {
    rect: ScreenRect,
    capture: Option<CaptureGuard>,
}

impl GestureSession {
    /// Measure once. The rect is reused for every move of this gesture.
    pub fn begin(measure: &dyn ContentMeasure, capture: Option<CaptureGuard>) -> Self {
        Self {
            rect: measure.measure(),
            capture,
        }
    }

    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    pub fn to_normalized(&self, p: ScreenPoint) -> Option<Point> {
        self.rect.to_normalized(p)
    }
}

/// The active gesture of one interaction engine.
#[derive(Debug, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Pointer pressed with the pointer tool on empty content.
    Placing {
        session: GestureSession,
        last: Point,
    },
    /// Freehand stroke, raw points in capture order.
    Pen {
        session: GestureSession,
        points: Vec<Point>,
    },
    /// Box from the press corner to the current pointer.
    Box {
        session: GestureSession,
        start: Point,
        current: Point,
    },
    /// Relocating an existing pin and its drawing.
    Dragging {
        session: GestureSession,
        id: CommentId,
        origin: Point,
        current: Point,
        drawing: Option<Drawing>,
    },
    /// Moving the viewport with raw screen deltas.
    Panning { last: ScreenPoint },
}

/// Variant tag of a [`Gesture`], for hosts that only need to know the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Idle,
    Placing,
    Pen,
    Box,
    Dragging,
    Panning,
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::Idle => GestureKind::Idle,
            Gesture::Placing { .. } => GestureKind::Placing,
            Gesture::Pen { .. } => GestureKind::Pen,
            Gesture::Box { .. } => GestureKind::Box,
            Gesture::Dragging { .. } => GestureKind::Dragging,
            Gesture::Panning { .. } => GestureKind::Panning,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub(crate) fn session(&self) -> Option<&GestureSession> {
        match self {
            Gesture::Placing { session, .. }
            | Gesture::Pen { session, .. }
            | Gesture::Box { session, .. }
            | Gesture::Dragging { session, .. } => Some(session),
            Gesture::Idle | Gesture::Panning { .. } => None,
        }
    }
}
