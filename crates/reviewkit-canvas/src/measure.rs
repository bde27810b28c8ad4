//! Measuring the on-screen content rectangle.
//!
//! Measuring is expensive for a host (it forces a layout pass), so the
//! interaction engine asks for it once when a gesture starts and keeps the
//! result until the gesture ends.

use crate::geometry::{Point, ScreenPoint, ScreenRect, Size};
use crate::viewport::Viewport;

/// Source of the transformed content box as currently rendered.
pub trait ContentMeasure {
    fn measure(&self) -> ScreenRect;
}

impl ContentMeasure for ScreenRect {
    fn measure(&self) -> ScreenRect {
        *self
    }
}

/// Computes the content rect from layout instead of asking the host.
///
/// `origin` is the untransformed content box's top-left in screen pixels,
/// `base` its untransformed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentLayout {
    pub origin: ScreenPoint,
    pub base: Size,
}

impl ContentLayout {
    pub fn new(origin: ScreenPoint, base: Size) -> Self {
        Self { origin, base }
    }

    /// Content rect after `translate(pan) scale(zoom)` about the top-left.
    pub fn rect(&self, viewport: &Viewport) -> ScreenRect {
        ScreenRect::new(
            self.origin.x + viewport.pan_x(),
            self.origin.y + viewport.pan_y(),
            self.base.width * viewport.zoom(),
            self.base.height * viewport.zoom(),
        )
    }

    /// Normalized content point under a screen position.
    pub fn point_at(&self, viewport: &Viewport, screen: ScreenPoint) -> Option<Point> {
        self.rect(viewport).to_normalized(screen)
    }

    /// Pairs the layout with a viewport so it can stand in for a host measure.
    pub fn measure_with<'a>(&'a self, viewport: &'a Viewport) -> LayoutMeasure<'a> {
        LayoutMeasure {
            layout: self,
            viewport,
        }
    }
}

/// [`ContentMeasure`] backed by a [`ContentLayout`].
#[derive(Debug, Clone, Copy)]
pub struct LayoutMeasure<'a> {
    layout: &'a ContentLayout,
    viewport: &'a Viewport,
}

impl ContentMeasure for LayoutMeasure<'_> {
    fn measure(&self) -> ScreenRect {
        self.layout.rect(self.viewport)
    }
}
