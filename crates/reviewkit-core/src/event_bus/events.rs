//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so a host can log or replay them.

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, UserId, VersionId};

/// Root event enum for all review events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReviewEvent {
    /// Comment and drawing changes
    Annotation(AnnotationEvent),
    /// Version stack changes
    Version(VersionEvent),
    /// Approval status changes
    Status(StatusEvent),
    /// View-only transform changes
    Viewport(ViewportEvent),
    /// AI assist results
    Assist(AssistEvent),
}

impl ReviewEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            ReviewEvent::Annotation(_) => EventCategory::Annotation,
            ReviewEvent::Version(_) => EventCategory::Version,
            ReviewEvent::Status(_) => EventCategory::Status,
            ReviewEvent::Viewport(_) => EventCategory::Viewport,
            ReviewEvent::Assist(_) => EventCategory::Assist,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            ReviewEvent::Annotation(e) => e.description(),
            ReviewEvent::Version(e) => e.description(),
            ReviewEvent::Status(e) => e.description(),
            ReviewEvent::Viewport(e) => e.description(),
            ReviewEvent::Assist(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Comment and drawing events.
    Annotation,
    /// Version stack events.
    Version,
    /// Approval status events.
    Status,
    /// Zoom/pan events.
    Viewport,
    /// Assist collaborator events.
    Assist,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Annotation => write!(f, "Annotation"),
            EventCategory::Version => write!(f, "Version"),
            EventCategory::Status => write!(f, "Status"),
            EventCategory::Viewport => write!(f, "Viewport"),
            EventCategory::Assist => write!(f, "Assist"),
        }
    }
}

/// Comment-level events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationEvent {
    /// A pin, pen stroke or box was committed as a new comment.
    Added {
        /// Version the comment belongs to.
        version: VersionId,
        /// The new comment.
        comment: CommentId,
        /// Author.
        author: UserId,
        /// Whether a drawing is attached.
        has_drawing: bool,
    },
    /// Comment text or flags changed.
    Updated {
        /// Version the comment belongs to.
        version: VersionId,
        /// The changed comment.
        comment: CommentId,
    },
    /// Pin (and drawing) dragged to a new place.
    Relocated {
        /// Version the comment belongs to.
        version: VersionId,
        /// The moved comment.
        comment: CommentId,
        /// Normalized delta applied on x.
        dx: f64,
        /// Normalized delta applied on y.
        dy: f64,
    },
    /// Resolution flag flipped.
    ResolvedChanged {
        /// The comment.
        comment: CommentId,
        /// New value.
        resolved: bool,
    },
    /// Comment removed.
    Deleted {
        /// Version the comment belonged to.
        version: VersionId,
        /// The removed comment.
        comment: CommentId,
    },
    /// Reply appended to a thread.
    ReplyAdded {
        /// Parent comment.
        comment: CommentId,
        /// The reply.
        reply: CommentId,
    },
    /// Active comment changed (None = cleared).
    SelectionChanged {
        /// The selected comment.
        comment: Option<CommentId>,
    },
}

impl AnnotationEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AnnotationEvent::Added {
                comment,
                has_drawing,
                ..
            } => {
                if *has_drawing {
                    format!("Drawing comment {} added", comment)
                } else {
                    format!("Pin comment {} added", comment)
                }
            }
            AnnotationEvent::Updated { comment, .. } => format!("Comment {} updated", comment),
            AnnotationEvent::Relocated {
                comment, dx, dy, ..
            } => format!("Comment {} moved by ({:.2}, {:.2})", comment, dx, dy),
            AnnotationEvent::ResolvedChanged { comment, resolved } => {
                if *resolved {
                    format!("Comment {} resolved", comment)
                } else {
                    format!("Comment {} reopened", comment)
                }
            }
            AnnotationEvent::Deleted { comment, .. } => format!("Comment {} deleted", comment),
            AnnotationEvent::ReplyAdded { comment, reply } => {
                format!("Reply {} added to {}", reply, comment)
            }
            AnnotationEvent::SelectionChanged { comment } => match comment {
                Some(id) => format!("Comment {} selected", id),
                None => "Selection cleared".to_string(),
            },
        }
    }
}

/// Version stack events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VersionEvent {
    /// New version prepended.
    Uploaded {
        /// The new version.
        version: VersionId,
        /// Its number.
        number: u32,
    },
    /// Active version changed.
    Switched {
        /// Previously active version.
        from: VersionId,
        /// Newly active version.
        to: VersionId,
    },
}

impl VersionEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            VersionEvent::Uploaded { number, .. } => format!("Version v{} uploaded", number),
            VersionEvent::Switched { to, .. } => format!("Switched to version {}", to),
        }
    }
}

/// Approval status events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatusEvent {
    /// Status transitioned.
    Changed {
        /// Previous status label.
        from: String,
        /// New status label.
        to: String,
    },
}

impl StatusEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            StatusEvent::Changed { from, to } => format!("Status {} -> {}", from, to),
        }
    }
}

/// Viewport events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewportEvent {
    /// Zoom and pan went back to identity.
    Reset,
}

impl ViewportEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            ViewportEvent::Reset => "Viewport reset".to_string(),
        }
    }
}

/// Assist collaborator events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssistEvent {
    /// A request finished (successfully or with the fallback text).
    Ready {
        /// Request key.
        key: String,
        /// Whether the fallback string was used.
        fallback: bool,
    },
}

impl AssistEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AssistEvent::Ready { key, fallback } => {
                if *fallback {
                    format!("Assist {} fell back", key)
                } else {
                    format!("Assist {} ready", key)
                }
            }
        }
    }
}
