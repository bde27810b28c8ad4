//! Timeline markers for video assets.

use reviewkit_core::CommentId;
use serde::Serialize;

use crate::comment::Comment;
use crate::roles::Role;
use crate::visibility::visible_comments;

/// A comment's position on the video timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMarker {
    pub comment: CommentId,
    /// Seconds.
    pub time: f64,
    pub resolved: bool,
}

/// Visible comments carrying a video timestamp, earliest first.
pub fn video_markers(comments: &[Comment], role: Role) -> Vec<VideoMarker> {
    let mut markers: Vec<VideoMarker> = visible_comments(comments, role)
        .filter_map(|c| {
            let time = c.video_timestamp.filter(|t| t.is_finite() && *t >= 0.0)?;
            Some(VideoMarker {
                comment: c.id,
                time,
                resolved: c.resolved,
            })
        })
        .collect();
    markers.sort_by(|a, b| a.time.total_cmp(&b.time));
    markers
}
