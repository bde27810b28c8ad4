//! # ReviewKit Review
//!
//! The review model on top of the canvas engine: assets and their version
//! stacks, positioned comments with reply threads, role-based visibility,
//! the approval workflow and the [`ReviewSession`] that ties a surface's
//! pointer and keyboard input to all of it.
//!
//! Text generation is behind [`ReviewAssistant`]; failures there degrade
//! to fallback strings and never block the review.

pub mod assist;
pub mod comment;
pub mod markers;
pub mod roles;
pub mod session;
pub mod status;
pub mod version;
pub mod visibility;

pub use assist::{
    AssetStatusLine, AssistKey, AssistPanel, AssistState, CommentDigest, ReviewAssistant,
};
pub use comment::{Comment, Reply};
pub use markers::{video_markers, VideoMarker};
pub use roles::{Actor, Role, Roster};
pub use session::{KeyOutcome, ReviewSession};
pub use status::ApprovalStatus;
pub use version::{Asset, AssetVersion};
pub use visibility::{is_reply_visible, is_visible, visible_comments, visible_replies};
