//! Version comparison modes and the wipe divider.

use serde::{Deserialize, Serialize};

use crate::capture::PointerCapture;
use crate::geometry::{ScreenPoint, NORMALIZED_MAX};
use crate::gesture::GestureSession;
use crate::measure::ContentMeasure;

/// How the active version is shown against another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareMode {
    #[default]
    Off,
    SideBySide,
    Wipe,
}

impl CompareMode {
    pub fn is_active(self) -> bool {
        self != CompareMode::Off
    }

    /// Wheel and keyboard zoom only apply to the single-version view.
    pub fn allows_zoom(self) -> bool {
        !self.is_active()
    }

    /// Annotations are placed, drawn and dragged only on the single-version view.
    pub fn allows_annotation(self) -> bool {
        !self.is_active()
    }
}

/// Vertical clipping boundary between two versions, in normalized x.
#[derive(Debug)]
pub struct WipeDivider {
    position: f64,
    drag: Option<GestureSession>,
}

impl Default for WipeDivider {
    fn default() -> Self {
        Self {
            position: NORMALIZED_MAX / 2.0,
            drag: None,
        }
    }
}

impl WipeDivider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start dragging the handle. Measures once and captures the pointer.
    pub fn begin_drag(
        &mut self,
        at: ScreenPoint,
        measure: &dyn ContentMeasure,
        capture: &PointerCapture,
    ) -> bool {
        self.end_drag();
        let session = GestureSession::begin(measure, Some(capture.acquire("wipe-divider")));
        if !session.rect().is_usable() {
            return false;
        }
        self.drag = Some(session);
        self.drag_to(at)
    }

    /// Move the divider to follow the pointer, clamped to the content box.
    pub fn drag_to(&mut self, at: ScreenPoint) -> bool {
        let Some(session) = &self.drag else {
            return false;
        };
        match session.to_normalized(at) {
            Some(p) => {
                self.position = p.x.clamp(0.0, NORMALIZED_MAX);
                true
            }
            None => false,
        }
    }

    /// Finish the drag and release the capture.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn reset(&mut self) {
        self.end_drag();
        self.position = NORMALIZED_MAX / 2.0;
    }
}
