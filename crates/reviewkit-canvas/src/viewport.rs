//! Viewport zoom and pan for the review surface.
//!
//! The content box is drawn as `translate(pan) scale(zoom)` with the
//! transform origin pinned at the content box's own top-left corner. Pan is
//! kept in screen pixels, zoom is a unitless factor. Neither is ever baked
//! into stored annotation coordinates.
//!
//! Pointer positions handed to this module are relative to the viewport's
//! top-left corner, which is also where the untransformed content box sits.

use std::fmt;

use reviewkit_settings::ViewportSettings;

use crate::compare::CompareMode;
use crate::geometry::{ScreenPoint, Size};

fn usable(s: &ViewportSettings) -> bool {
    s.min_zoom.is_finite()
        && s.min_zoom > 0.0
        && s.max_zoom.is_finite()
        && s.max_zoom > s.min_zoom
        && s.zoom_sensitivity.is_finite()
        && s.zoom_sensitivity > 0.0
        && s.keyboard_zoom_step.is_finite()
        && s.keyboard_zoom_step > 1.0
}

/// Zoom and pan state for one review surface.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    frame_width: f64,
    frame_height: f64,
    min_zoom: f64,
    max_zoom: f64,
    zoom_sensitivity: f64,
    keyboard_zoom_step: f64,
}

impl Viewport {
    /// Creates a viewport for a frame of the given pixel size with default
    /// tunables.
    pub fn new(frame_width: f64, frame_height: f64) -> Self {
        Self::from_settings(&ViewportSettings::default(), Size::new(frame_width, frame_height))
    }

    /// Creates a viewport using configured zoom limits and sensitivity.
    ///
    /// Unusable tunables (non-finite, empty zoom range) fall back to the
    /// defaults as a whole.
    pub fn from_settings(settings: &ViewportSettings, frame: Size) -> Self {
        let defaults;
        let settings = if usable(settings) {
            settings
        } else {
            tracing::warn!("Ignoring unusable viewport settings: {:?}", settings);
            defaults = ViewportSettings::default();
            &defaults
        };
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            frame_width: frame.width,
            frame_height: frame.height,
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            zoom_sensitivity: settings.zoom_sensitivity,
            keyboard_zoom_step: settings.keyboard_zoom_step,
        }
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Gets the pan offset in screen pixels.
    pub fn pan(&self) -> ScreenPoint {
        ScreenPoint::new(self.pan_x, self.pan_y)
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Gets the frame (visible container) size.
    pub fn frame_size(&self) -> Size {
        Size::new(self.frame_width, self.frame_height)
    }

    /// Sets the frame dimensions (typically called when the container resizes).
    pub fn set_frame_size(&mut self, frame: Size) {
        if frame.is_usable() {
            self.frame_width = frame.width;
            self.frame_height = frame.height;
        }
    }

    /// True when zoom is 1 and pan is zero.
    pub fn is_identity(&self) -> bool {
        self.zoom == 1.0 && self.pan_x == 0.0 && self.pan_y == 0.0
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Zooms to `new_zoom` keeping the content under `anchor` fixed.
    ///
    /// The new pan is solved in one step from the pre-zoom pan:
    /// ```text
    /// pan' = anchor - (anchor - pan) * (zoom' / zoom)
    /// ```
    /// Returns false when nothing changed or the input was not finite.
    pub fn zoom_to_point(&mut self, anchor: ScreenPoint, new_zoom: f64) -> bool {
        if !anchor.is_finite() || !new_zoom.is_finite() {
            return false;
        }
        let new_zoom = self.clamp_zoom(new_zoom);
        if new_zoom == self.zoom {
            return false;
        }

        let ratio = new_zoom / self.zoom;
        let pan_x = anchor.x - (anchor.x - self.pan_x) * ratio;
        let pan_y = anchor.y - (anchor.y - self.pan_y) * ratio;
        if !pan_x.is_finite() || !pan_y.is_finite() {
            return false;
        }

        self.zoom = new_zoom;
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        true
    }

    /// Wheel zoom toward the pointer.
    ///
    /// `zoom' = clamp(zoom * (1 - delta * k))`. Disabled while a comparison
    /// view is showing.
    pub fn zoom_toward_pointer(
        &mut self,
        wheel_delta: f64,
        anchor: ScreenPoint,
        compare: CompareMode,
    ) -> bool {
        if !compare.allows_zoom() || !wheel_delta.is_finite() {
            return false;
        }
        let target = self.zoom * (1.0 - wheel_delta * self.zoom_sensitivity);
        self.zoom_to_point(anchor, target)
    }

    fn frame_center(&self) -> ScreenPoint {
        ScreenPoint::new(self.frame_width / 2.0, self.frame_height / 2.0)
    }

    /// Zooms in by the keyboard step around the frame centre.
    pub fn zoom_in(&mut self, compare: CompareMode) -> bool {
        if !compare.allows_zoom() {
            return false;
        }
        self.zoom_to_point(self.frame_center(), self.zoom * self.keyboard_zoom_step)
    }

    /// Zooms out by the keyboard step around the frame centre.
    pub fn zoom_out(&mut self, compare: CompareMode) -> bool {
        if !compare.allows_zoom() {
            return false;
        }
        self.zoom_to_point(self.frame_center(), self.zoom / self.keyboard_zoom_step)
    }

    /// Pans by a screen-space delta. Non-finite deltas are ignored.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        let pan_x = self.pan_x + dx;
        let pan_y = self.pan_y + dy;
        if !pan_x.is_finite() || !pan_y.is_finite() {
            return false;
        }
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        true
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.pan_x = x;
            self.pan_y = y;
        }
    }

    /// Resets to 1:1 zoom with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Pan: ({:.1}, {:.1})",
            self.zoom * 100.0,
            self.pan_x,
            self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
