//! Text-generation assist boundary.
//!
//! The review engine hands read-only snapshots to a [`ReviewAssistant`] and
//! gets opaque strings back. A failed call never reaches the caller as an
//! error: it is logged and replaced with the configured fallback text.
//! There is no cancellation; a second request for the same key simply
//! overwrites whatever the first one left behind when it finishes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reviewkit_core::event_bus::AssistEvent;
use reviewkit_core::{AssistError, CommentId, EventBus, ReviewEvent, VersionId};
use reviewkit_settings::AssistSettings;
use serde::Serialize;

use crate::status::ApprovalStatus;

/// What the summarizer sees of a comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentDigest {
    pub author: String,
    pub text: String,
    pub resolved: bool,
}

/// One row of the status report input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetStatusLine {
    pub title: String,
    pub status: ApprovalStatus,
    pub version_number: u32,
    pub unresolved: usize,
}

/// External text-generation collaborator.
#[async_trait]
pub trait ReviewAssistant: Send + Sync {
    /// Summarize open feedback.
    async fn summarize(&self, comments: &[CommentDigest]) -> Result<String, AssistError>;

    /// Draft a reply to one comment.
    async fn suggest_reply(&self, comment_text: &str) -> Result<String, AssistError>;

    /// Write a short report across assets.
    async fn status_report(&self, assets: &[AssetStatusLine]) -> Result<String, AssistError>;
}

/// Which panel slot a request fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistKey {
    Summary(VersionId),
    Reply(CommentId),
    Report,
}

impl fmt::Display for AssistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistKey::Summary(id) => write!(f, "summary:{}", id),
            AssistKey::Reply(id) => write!(f, "reply:{}", id),
            AssistKey::Report => write!(f, "report"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssistState {
    #[default]
    Idle,
    /// Loading indicator.
    Pending,
    Ready { text: String, fallback: bool },
}

/// Per-key loading/result state for the assist affordances.
#[derive(Debug)]
pub struct AssistPanel {
    states: Mutex<HashMap<AssistKey, AssistState>>,
    fallbacks: AssistSettings,
    bus: Option<Arc<EventBus>>,
}

impl AssistPanel {
    pub fn new(fallbacks: AssistSettings) -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            fallbacks,
            bus: None,
        }
    }

    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn fallbacks(&self) -> &AssistSettings {
        &self.fallbacks
    }

    pub fn state(&self, key: AssistKey) -> AssistState {
        self.states.lock().get(&key).cloned().unwrap_or_default()
    }

    pub fn is_pending(&self, key: AssistKey) -> bool {
        self.state(key) == AssistState::Pending
    }

    pub fn clear(&self, key: AssistKey) {
        self.states.lock().remove(&key);
    }

    fn finish(&self, key: AssistKey, result: Result<String, AssistError>, fallback: &str) -> String {
        let (text, used_fallback) = match result {
            Ok(text) => (text, false),
            Err(e) => {
                tracing::warn!("Assist request {} failed: {}", key, e);
                (fallback.to_string(), true)
            }
        };
        self.states.lock().insert(
            key,
            AssistState::Ready {
                text: text.clone(),
                fallback: used_fallback,
            },
        );
        if let Some(bus) = &self.bus {
            bus.publish(ReviewEvent::Assist(AssistEvent::Ready {
                key: key.to_string(),
                fallback: used_fallback,
            }));
        }
        text
    }

    fn start(&self, key: AssistKey) {
        self.states.lock().insert(key, AssistState::Pending);
    }

    pub async fn summarize(
        &self,
        assistant: &dyn ReviewAssistant,
        version: VersionId,
        comments: &[CommentDigest],
    ) -> String {
        let key = AssistKey::Summary(version);
        self.start(key);
        let result = assistant.summarize(comments).await;
        self.finish(key, result, &self.fallbacks.summary_fallback)
    }

    pub async fn suggest_reply(
        &self,
        assistant: &dyn ReviewAssistant,
        comment: CommentId,
        text: &str,
    ) -> String {
        let key = AssistKey::Reply(comment);
        self.start(key);
        let result = assistant.suggest_reply(text).await;
        self.finish(key, result, &self.fallbacks.suggestion_fallback)
    }

    pub async fn status_report(
        &self,
        assistant: &dyn ReviewAssistant,
        assets: &[AssetStatusLine],
    ) -> String {
        let key = AssistKey::Report;
        self.start(key);
        let result = assistant.status_report(assets).await;
        self.finish(key, result, &self.fallbacks.report_fallback)
    }
}

impl Default for AssistPanel {
    fn default() -> Self {
        Self::new(AssistSettings::default())
    }
}
