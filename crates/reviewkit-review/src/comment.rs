//! Comments and their reply threads.
//!
//! A comment is pinned at a normalized anchor on one version and may carry a
//! drawing. The anchor is the drag handle for the whole annotation, so a
//! drawing without an anchor is rejected. Replies are one level deep and
//! have no position of their own.

use chrono::Utc;
use reviewkit_canvas::{Drawing, Point};
use reviewkit_core::{CommentId, ModelError, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A reply in a comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: CommentId,
    pub user_id: UserId,
    pub text: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub is_internal: bool,
}

impl Reply {
    pub fn new(author: UserId, text: impl Into<String>, is_internal: bool) -> Self {
        Self {
            id: CommentId::new(),
            user_id: author,
            text: text.into(),
            timestamp: Utc::now(),
            is_internal,
        }
    }
}

/// A positioned comment on one asset version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    /// Empty right after placement, until the author types something.
    #[serde(default)]
    pub text: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Seconds into a video asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_timestamp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing: Option<Drawing>,
    #[serde(default)]
    pub replies: Vec<Reply>,
    #[serde(default)]
    pub is_internal: bool,
}

impl Comment {
    /// A fresh, unresolved, empty comment pinned at `anchor`.
    pub fn pinned(author: UserId, anchor: Point, drawing: Option<Drawing>) -> Self {
        Self {
            id: CommentId::new(),
            user_id: author,
            text: String::new(),
            timestamp: Utc::now(),
            resolved: false,
            x: Some(anchor.x),
            y: Some(anchor.y),
            video_timestamp: None,
            drawing,
            replies: Vec::new(),
            is_internal: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_video_timestamp(mut self, seconds: f64) -> Self {
        self.video_timestamp = Some(seconds);
        self
    }

    pub fn internal(mut self) -> Self {
        self.is_internal = true;
        self
    }

    pub fn anchor(&self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        }
    }

    /// Copy with pin and drawing moved by the same delta.
    pub fn relocated(&self, dx: f64, dy: f64) -> Result<Self, ModelError> {
        let anchor = self.anchor().ok_or_else(|| ModelError::DrawingWithoutAnchor {
            id: self.id.to_string(),
        })?;
        let moved = anchor.translated(dx, dy);
        let mut comment = self.clone();
        comment.x = Some(moved.x);
        comment.y = Some(moved.y);
        if let Some(drawing) = comment.drawing.as_mut() {
            drawing.translate(dx, dy);
        }
        Ok(comment)
    }

    pub fn reply(&self, id: CommentId) -> Option<&Reply> {
        self.replies.iter().find(|r| r.id == id)
    }

    /// Structural checks for comments that came from outside.
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(drawing) = &self.drawing {
            if self.anchor().is_none() {
                return Err(ModelError::DrawingWithoutAnchor {
                    id: self.id.to_string(),
                });
            }
            drawing.validate()?;
        }
        if let Some(anchor) = self.anchor() {
            if !anchor.is_finite() {
                return Err(ModelError::InvalidDrawing {
                    reason: format!("comment {} has a non-finite anchor", self.id),
                });
            }
        }
        Ok(())
    }
}
