//! Active tool and the temporary hand override.

use serde::{Deserialize, Serialize};

use crate::media::MediaKind;

/// Review surface tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, place pins and drag them.
    #[default]
    Pointer,
    Pen,
    Box,
    /// Pan the viewport.
    Hand,
}

impl Tool {
    pub fn is_drawing(self) -> bool {
        matches!(self, Tool::Pen | Tool::Box)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pointer => "pointer",
            Tool::Pen => "pen",
            Tool::Box => "box",
            Tool::Hand => "hand",
        }
    }
}

/// The selected tool plus a single-slot register for the held-space override.
///
/// Only one level of override exists: while it is held, a second request is
/// ignored rather than stacked.
#[derive(Debug, Clone, Default)]
pub struct ToolState {
    active: Tool,
    previous: Option<Tool>,
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tool {
        self.active
    }

    pub fn is_temporary_hand(&self) -> bool {
        self.previous.is_some()
    }

    /// Explicit tool choice. Drops any pending override.
    pub fn select(&mut self, tool: Tool) -> bool {
        self.previous = None;
        if self.active == tool {
            return false;
        }
        self.active = tool;
        true
    }

    /// Space pressed. Not available on video or while a drawing tool is active.
    pub fn begin_temporary_hand(&mut self, media: MediaKind) -> bool {
        if media.space_toggles_playback() || self.active.is_drawing() || self.previous.is_some() {
            return false;
        }
        self.previous = Some(self.active);
        self.active = Tool::Hand;
        true
    }

    /// Space released. Restores whatever was active before the override.
    pub fn end_temporary_hand(&mut self) -> bool {
        match self.previous.take() {
            Some(tool) => {
                self.active = tool;
                true
            }
            None => false,
        }
    }

    /// Drawing tools are single-shot: back to the pointer after a commit.
    pub fn after_commit(&mut self) {
        if self.active != Tool::Pointer && self.previous.is_none() {
            self.active = Tool::Pointer;
        }
    }
}
