//! Output aspect-ratio framing and platform safe zones.
//!
//! Purely advisory: a frame shape and a list of regions that platform UI
//! tends to cover. Nothing here touches stored coordinates or the viewport.

use serde::{Deserialize, Serialize};

use crate::geometry::{NormalizedRect, Size};

/// Preview frame the reviewer can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// The media's own shape.
    #[default]
    Original,
    /// 1:1 feed post.
    Square,
    /// 4:5 portrait feed post.
    Portrait,
    /// 9:16 story / short-form video.
    Story,
    /// 16:9 landscape video.
    Landscape,
}

/// A region that platform chrome is likely to cover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafeZone {
    pub label: &'static str,
    pub rect: NormalizedRect,
}

impl SafeZone {
    fn new(label: &'static str, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            label,
            rect: NormalizedRect::new(x, y, w, h),
        }
    }
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Original,
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Story,
        AspectRatio::Landscape,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Original => "Original",
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "4:5",
            AspectRatio::Story => "9:16",
            AspectRatio::Landscape => "16:9",
        }
    }

    /// Width over height, `None` for the media's own shape.
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectRatio::Original => None,
            AspectRatio::Square => Some(1.0),
            AspectRatio::Portrait => Some(4.0 / 5.0),
            AspectRatio::Story => Some(9.0 / 16.0),
            AspectRatio::Landscape => Some(16.0 / 9.0),
        }
    }

    /// Largest frame of this ratio inside `container`. `Original` fills it.
    pub fn frame_size(self, container: Size) -> Size {
        let Some(ratio) = self.ratio() else {
            return container;
        };
        if !container.is_usable() {
            return Size::default();
        }
        if container.width / container.height > ratio {
            Size::new(container.height * ratio, container.height)
        } else {
            Size::new(container.width, container.width / ratio)
        }
    }

    /// Regions covered by typical platform UI for this frame.
    pub fn safe_zones(self) -> Vec<SafeZone> {
        match self {
            AspectRatio::Original | AspectRatio::Square => Vec::new(),
            AspectRatio::Portrait => vec![SafeZone::new("caption", 0.0, 90.0, 100.0, 10.0)],
            AspectRatio::Story => vec![
                SafeZone::new("profile header", 0.0, 0.0, 100.0, 14.0),
                SafeZone::new("caption and call to action", 0.0, 80.0, 100.0, 20.0),
                SafeZone::new("action buttons", 85.0, 40.0, 15.0, 40.0),
            ],
            AspectRatio::Landscape => vec![SafeZone::new("player controls", 0.0, 88.0, 100.0, 12.0)],
        }
    }
}
