//! Media kind and aspect lock for the content box.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// What kind of media an asset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl MediaKind {
    pub fn is_video(self) -> bool {
        self == MediaKind::Video
    }

    /// On video the space key belongs to the player.
    pub fn space_toggles_playback(self) -> bool {
        self.is_video()
    }
}

/// Locks the content box to the media's natural aspect ratio so pins do not
/// drift when the container reflows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectLock {
    ratio: f64,
}

impl AspectLock {
    /// No lock until the media has reported usable dimensions.
    pub fn from_natural_size(natural: Option<Size>) -> Option<Self> {
        let size = natural.filter(Size::is_usable)?;
        Some(Self {
            ratio: size.width / size.height,
        })
    }

    /// Width over height.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Largest size with this ratio that fits inside `container`.
    pub fn fit(&self, container: Size) -> Size {
        if !container.is_usable() {
            return Size::default();
        }
        if container.width / container.height > self.ratio {
            Size::new(container.height * self.ratio, container.height)
        } else {
            Size::new(container.width, container.width / self.ratio)
        }
    }
}
