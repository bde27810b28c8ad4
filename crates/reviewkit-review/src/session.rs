//! Review session: one actor looking at one asset.
//!
//! The session owns everything that is per-surface (viewport, gesture,
//! tool, selection, compare state) next to the asset it edits. Pointer and
//! keyboard input goes through the canvas engine; commits coming out of it
//! are applied to the active version's comment list here, with role checks
//! and event publication.

use std::collections::HashMap;
use std::sync::Arc;

use reviewkit_canvas::{
    AnnotationCommit, AspectLock, AspectRatio, CompareMode, ContentMeasure, DragPreview, Drawing,
    GestureKind, Interaction, InteractionEngine, KeyCommand, KeyEvent, KeyRouter, PinHit, Point,
    PointerButton, PointerCapture, PointerContext, SafeZone, ScreenPoint, Size, Tool, ToolState,
    Viewport, WipeDivider,
};
use reviewkit_core::event_bus::{AnnotationEvent, StatusEvent, VersionEvent, ViewportEvent};
use reviewkit_core::{
    CommentId, Error, EventBus, ModelError, PermissionError, Result, ReviewEvent, VersionId,
};
use reviewkit_settings::Config;

use crate::assist::{AssetStatusLine, AssistPanel, CommentDigest, ReviewAssistant};
use crate::comment::{Comment, Reply};
use crate::markers::{video_markers, VideoMarker};
use crate::roles::{Actor, Roster};
use crate::status::{self, ApprovalStatus};
use crate::version::{Asset, AssetVersion};
use crate::visibility::{is_visible, visible_comments, visible_replies};

const DEFAULT_FRAME: Size = Size {
    width: 1200.0,
    height: 800.0,
};

/// What the host should do after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not ours; let the event propagate.
    Ignored,
    Handled,
    /// Space on a video asset.
    TogglePlayback,
}

/// Interactive review state for one asset.
#[derive(Debug)]
pub struct ReviewSession {
    asset: Asset,
    actor: Actor,
    roster: Roster,
    active: VersionId,
    selection: Option<CommentId>,

    viewport: Viewport,
    engine: InteractionEngine,
    tools: ToolState,
    keys: KeyRouter,
    capture: PointerCapture,

    compare_mode: CompareMode,
    compare_version: Option<VersionId>,
    wipe: WipeDivider,

    playback_position: f64,
    aspect_ratio: AspectRatio,
    aspect_lock: Option<AspectLock>,

    reply_drafts: HashMap<CommentId, String>,
    assist: AssistPanel,
    bus: Arc<EventBus>,
}

impl ReviewSession {
    /// Open `asset` for `actor`. The newest version becomes active.
    pub fn new(asset: Asset, actor: Actor, config: &Config) -> Result<Self> {
        config.validate()?;
        asset.validate()?;
        let active = asset
            .latest()
            .map(|v| v.id)
            .ok_or_else(|| ModelError::NoVersions {
                id: asset.id.to_string(),
            })?;
        let keys = KeyRouter::from_settings(&config.shortcuts)?;
        let capture = PointerCapture::new();
        let bus = Arc::new(EventBus::new());

        tracing::info!(
            "Opened '{}' v{} as {} ({})",
            asset.title,
            asset.latest_number(),
            actor.id,
            actor.role
        );

        Ok(Self {
            actor,
            roster: Roster::new(),
            active,
            selection: None,
            viewport: Viewport::from_settings(&config.viewport, DEFAULT_FRAME),
            engine: InteractionEngine::new(config.gestures.clone(), capture.clone()),
            tools: ToolState::new(),
            keys,
            capture,
            compare_mode: CompareMode::Off,
            compare_version: None,
            wipe: WipeDivider::new(),
            playback_position: 0.0,
            aspect_ratio: AspectRatio::Original,
            aspect_lock: None,
            reply_drafts: HashMap::new(),
            assist: AssistPanel::new(config.assist.clone()).with_event_bus(Arc::clone(&bus)),
            bus,
            asset,
        })
    }

    /// Publish to a shared bus instead of the session's own.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        let fallbacks = self.assist.fallbacks().clone();
        self.assist = AssistPanel::new(fallbacks).with_event_bus(Arc::clone(&bus));
        self.bus = bus;
        self
    }

    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    pub fn assist_panel(&self) -> &AssistPanel {
        &self.assist
    }

    fn publish(&self, event: ReviewEvent) {
        tracing::debug!("{}", event.description());
        self.bus.publish(event);
    }

    pub fn active_version_id(&self) -> VersionId {
        self.active
    }

    pub fn active_version(&self) -> Option<&AssetVersion> {
        self.asset.version(self.active)
    }

    fn active_version_mut(&mut self) -> Result<&mut AssetVersion> {
        let id = self.active;
        self.asset
            .version_mut(id)
            .ok_or_else(|| ModelError::VersionNotFound { id: id.to_string() }.into())
    }

    /// Make another version active. Gesture, selection and view are reset.
    pub fn switch_version(&mut self, id: VersionId) -> Result<()> {
        if self.asset.version(id).is_none() {
            return Err(ModelError::VersionNotFound { id: id.to_string() }.into());
        }
        if id == self.active {
            return Ok(());
        }
        let from = self.active;
        self.active = id;
        self.engine.cancel();
        self.wipe.end_drag();
        if self.compare_version == Some(id) {
            self.stop_compare();
        }
        self.set_selection(None);
        self.viewport.reset();

        if let Some(version) = self.asset.version(id) {
            tracing::info!("Switched '{}' to v{}", self.asset.title, version.version_number);
        }
        self.publish(ReviewEvent::Version(VersionEvent::Switched { from, to: id }));
        self.publish(ReviewEvent::Viewport(ViewportEvent::Reset));
        Ok(())
    }

    /// Prepend a new version, make it active and send the asset back to
    /// `Pending`.
    pub fn upload_version(&mut self, url: impl Into<String>) -> Result<VersionId> {
        if !self.actor.role.can_upload() {
            return Err(PermissionError::UploadNotAllowed {
                role: self.actor.role.to_string(),
            }
            .into());
        }
        let (id, number) = {
            let version = self.asset.push_version(url)?;
            (version.id, version.version_number)
        };
        tracing::info!("Uploaded v{} of '{}'", number, self.asset.title);
        self.publish(ReviewEvent::Version(VersionEvent::Uploaded { version: id, number }));

        if let Some(next) = status::after_upload(self.asset.status) {
            self.set_status(next);
        }
        self.switch_version(id)?;
        Ok(id)
    }

    pub fn status(&self) -> ApprovalStatus {
        self.asset.status
    }

    fn set_status(&mut self, next: ApprovalStatus) {
        let from = self.asset.status;
        self.asset.status = next;
        tracing::info!("'{}' status {} -> {}", self.asset.title, from, next);
        self.publish(ReviewEvent::Status(StatusEvent::Changed {
            from: from.label().to_string(),
            to: next.label().to_string(),
        }));
    }

    /// Unresolved comments on the active version, internal ones included.
    pub fn unresolved_count(&self) -> usize {
        self.active_version()
            .map(AssetVersion::unresolved_count)
            .unwrap_or(0)
    }

    /// Whether approval is currently allowed, and why not.
    pub fn approval_gate(&self) -> std::result::Result<(), PermissionError> {
        status::check_approve(&self.actor, self.unresolved_count())
    }

    pub fn approve(&mut self) -> Result<ApprovalStatus> {
        if let Err(e) = self.approval_gate() {
            tracing::info!("Approval refused: {}", e);
            return Err(e.into());
        }
        if let Some(next) = status::approve(self.asset.status) {
            self.set_status(next);
        }
        Ok(self.asset.status)
    }

    pub fn request_changes(&mut self) -> Result<ApprovalStatus> {
        status::check_request_changes(&self.actor)?;
        if let Some(next) = status::request_changes(self.asset.status) {
            self.set_status(next);
        }
        Ok(self.asset.status)
    }

    pub fn begin_review(&mut self) -> Result<ApprovalStatus> {
        status::check_begin_review(&self.actor)?;
        if let Some(next) = status::begin_review(self.asset.status) {
            self.set_status(next);
        }
        Ok(self.asset.status)
    }

    fn require_annotate(&self) -> Result<()> {
        if self.actor.role.can_annotate() {
            Ok(())
        } else {
            Err(PermissionError::ReadOnly {
                role: self.actor.role.to_string(),
            }
            .into())
        }
    }

    fn require_internal(&self) -> Result<()> {
        if self.actor.role.sees_internal() {
            Ok(())
        } else {
            Err(PermissionError::InternalNotAllowed {
                role: self.actor.role.to_string(),
            }
            .into())
        }
    }

    /// Active version's comments as this actor may see them, newest first.
    pub fn visible_comments(&self) -> Vec<&Comment> {
        match self.active_version() {
            Some(version) => visible_comments(version.comments(), self.actor.role).collect(),
            None => Vec::new(),
        }
    }

    /// A comment on the active version, if this actor may see it.
    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.active_version()?
            .comment(id)
            .filter(|c| is_visible(c, self.actor.role))
    }

    fn visible_or_missing(&self, id: CommentId) -> Result<&Comment> {
        self.comment(id)
            .ok_or_else(|| ModelError::CommentNotFound { id: id.to_string() }.into())
    }

    /// Create a comment at `anchor` on the active version and select it.
    pub fn place_comment(&mut self, anchor: Point, drawing: Option<Drawing>) -> Result<CommentId> {
        self.require_annotate()?;
        let mut comment = Comment::pinned(self.actor.id.clone(), anchor.clamped(), drawing);
        if self.asset.kind.is_video() {
            comment = comment.with_video_timestamp(self.playback_position);
        }
        let id = comment.id;
        let has_drawing = comment.drawing.is_some();
        let version = self.active;
        self.active_version_mut()?.prepend_comment(comment)?;

        tracing::info!(
            "{} added {} comment {}",
            self.actor.id,
            if has_drawing { "drawing" } else { "pin" },
            id
        );
        self.publish(ReviewEvent::Annotation(AnnotationEvent::Added {
            version,
            comment: id,
            author: self.actor.id.clone(),
            has_drawing,
        }));
        self.set_selection(Some(id));
        Ok(id)
    }

    /// Move a comment's pin and drawing together.
    pub fn relocate_comment(&mut self, id: CommentId, dx: f64, dy: f64) -> Result<()> {
        self.require_annotate()?;
        self.visible_or_missing(id)?;
        let version = self.active;
        self.active_version_mut()?
            .replace_comment(id, |c| Ok(c.relocated(dx, dy)?))?;
        self.publish(ReviewEvent::Annotation(AnnotationEvent::Relocated {
            version,
            comment: id,
            dx,
            dy,
        }));
        Ok(())
    }

    pub fn edit_text(&mut self, id: CommentId, text: impl Into<String>) -> Result<()> {
        self.require_annotate()?;
        self.visible_or_missing(id)?;
        let text = text.into();
        let version = self.active;
        self.active_version_mut()?
            .replace_comment(id, |c| Ok(c.clone().with_text(text)))?;
        self.publish(ReviewEvent::Annotation(AnnotationEvent::Updated { version, comment: id }));
        Ok(())
    }

    /// Flip the resolved flag. Returns the new value.
    pub fn toggle_resolved(&mut self, id: CommentId) -> Result<bool> {
        self.require_annotate()?;
        self.visible_or_missing(id)?;
        let resolved = self
            .active_version_mut()?
            .replace_comment(id, |c| {
                let mut next = c.clone();
                next.resolved = !c.resolved;
                Ok(next)
            })?
            .resolved;
        self.publish(ReviewEvent::Annotation(AnnotationEvent::ResolvedChanged {
            comment: id,
            resolved,
        }));
        Ok(resolved)
    }

    pub fn set_internal(&mut self, id: CommentId, internal: bool) -> Result<()> {
        self.require_annotate()?;
        self.require_internal()?;
        self.visible_or_missing(id)?;
        let version = self.active;
        self.active_version_mut()?.replace_comment(id, |c| {
            let mut next = c.clone();
            next.is_internal = internal;
            Ok(next)
        })?;
        self.publish(ReviewEvent::Annotation(AnnotationEvent::Updated { version, comment: id }));
        Ok(())
    }

    pub fn delete_comment(&mut self, id: CommentId) -> Result<Comment> {
        self.require_annotate()?;
        self.visible_or_missing(id)?;
        let version = self.active;
        let removed = self.active_version_mut()?.remove_comment(id)?;
        self.reply_drafts.remove(&id);
        if self.selection == Some(id) {
            self.set_selection(None);
        }
        self.publish(ReviewEvent::Annotation(AnnotationEvent::Deleted { version, comment: id }));
        Ok(removed)
    }

    /// Append a reply to a visible comment's thread.
    pub fn add_reply(
        &mut self,
        id: CommentId,
        text: impl Into<String>,
        internal: bool,
    ) -> Result<CommentId> {
        self.require_annotate()?;
        if internal {
            self.require_internal()?;
        }
        self.visible_or_missing(id)?;
        let reply = Reply::new(self.actor.id.clone(), text, internal);
        let reply_id = reply.id;
        self.active_version_mut()?.replace_comment(id, |c| {
            let mut next = c.clone();
            next.replies.push(reply);
            Ok(next)
        })?;
        self.reply_drafts.remove(&id);
        self.publish(ReviewEvent::Annotation(AnnotationEvent::ReplyAdded {
            comment: id,
            reply: reply_id,
        }));
        Ok(reply_id)
    }

    /// Replies this actor may see, oldest first.
    pub fn replies(&self, id: CommentId) -> Result<Vec<&Reply>> {
        let comment = self.visible_or_missing(id)?;
        Ok(visible_replies(comment, self.actor.role).collect())
    }

    pub fn reply_draft(&self, id: CommentId) -> Option<&str> {
        self.reply_drafts.get(&id).map(String::as_str)
    }

    pub fn set_reply_draft(&mut self, id: CommentId, text: impl Into<String>) {
        self.reply_drafts.insert(id, text.into());
    }

    /// Author name for attribution, or the unknown-user placeholder.
    pub fn author_name(&self, comment: &Comment) -> &str {
        self.roster.display_name(&comment.user_id)
    }

    pub fn selection(&self) -> Option<CommentId> {
        self.selection
    }

    fn set_selection(&mut self, next: Option<CommentId>) {
        if self.selection != next {
            self.selection = next;
            self.publish(ReviewEvent::Annotation(AnnotationEvent::SelectionChanged {
                comment: next,
            }));
        }
    }

    pub fn select(&mut self, id: CommentId) -> Result<()> {
        self.visible_or_missing(id)?;
        self.set_selection(Some(id));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    pub fn tool(&self) -> Tool {
        self.tools.active()
    }

    pub fn is_temporary_hand(&self) -> bool {
        self.tools.is_temporary_hand()
    }

    /// Explicit tool choice. Any running gesture is abandoned.
    pub fn select_tool(&mut self, tool: Tool) -> bool {
        self.engine.cancel();
        self.tools.select(tool)
    }

    pub fn gesture_kind(&self) -> GestureKind {
        self.engine.gesture_kind()
    }

    /// `hit` is the pin under the pointer as reported by the overlay.
    pub fn pointer_down(
        &mut self,
        at: ScreenPoint,
        button: PointerButton,
        hit: Option<CommentId>,
        measure: &dyn ContentMeasure,
    ) -> Interaction {
        let hit = hit.and_then(|id| self.comment(id)).and_then(|c| {
            Some(PinHit {
                id: c.id,
                anchor: c.anchor()?,
                drawing: c.drawing.clone(),
            })
        });
        let ctx = PointerContext {
            tool: self.tools.active(),
            compare: self.compare_mode,
            can_annotate: self.actor.role.can_annotate(),
            has_selection: self.selection.is_some(),
            hit,
            measure,
        };
        let outcome = self.engine.pointer_down(at, button, &ctx);
        match &outcome {
            Interaction::Selected(id) => self.set_selection(Some(*id)),
            Interaction::SelectionCleared => self.set_selection(None),
            _ => {}
        }
        outcome
    }

    pub fn pointer_move(&mut self, at: ScreenPoint) -> bool {
        self.engine.pointer_move(at, &mut self.viewport)
    }

    /// Finish the gesture and apply whatever it committed.
    pub fn pointer_up(&mut self, at: ScreenPoint) -> Result<Interaction> {
        let outcome = self.engine.pointer_up(at, &mut self.viewport);
        if let Interaction::Committed(commit) = &outcome {
            match commit.clone() {
                AnnotationCommit::Place { anchor, drawing } => {
                    self.place_comment(anchor, drawing)?;
                    self.tools.after_commit();
                }
                AnnotationCommit::Relocate { id, dx, dy } => {
                    self.relocate_comment(id, dx, dy)?;
                }
            }
        }
        Ok(outcome)
    }

    pub fn pointer_leave(&mut self) {
        self.engine.pointer_leave();
    }

    pub fn drag_preview(&self) -> Option<DragPreview> {
        self.engine.drag_preview()
    }

    pub fn drawing_preview(&self) -> Option<Drawing> {
        self.engine.drawing_preview()
    }

    pub fn set_frame_size(&mut self, frame: Size) {
        self.viewport.set_frame_size(frame);
    }

    /// Wheel over the surface, zooming toward `anchor`.
    pub fn wheel(&mut self, delta: f64, anchor: ScreenPoint) -> bool {
        self.viewport.zoom_toward_pointer(delta, anchor, self.compare_mode)
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.publish(ReviewEvent::Viewport(ViewportEvent::Reset));
    }

    pub fn key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let Some(command) = self.keys.route(event) else {
            return KeyOutcome::Ignored;
        };
        let handled = match command {
            KeyCommand::SelectTool(tool) => {
                self.select_tool(tool);
                true
            }
            KeyCommand::BeginTemporaryHand => {
                if self.asset.kind.space_toggles_playback() {
                    return KeyOutcome::TogglePlayback;
                }
                self.tools.begin_temporary_hand(self.asset.kind)
            }
            KeyCommand::EndTemporaryHand => self.tools.end_temporary_hand(),
            KeyCommand::ZoomIn => self.viewport.zoom_in(self.compare_mode),
            KeyCommand::ZoomOut => self.viewport.zoom_out(self.compare_mode),
            KeyCommand::CancelGesture => {
                self.engine.cancel();
                self.wipe.end_drag();
                true
            }
        };
        if handled {
            KeyOutcome::Handled
        } else {
            KeyOutcome::Ignored
        }
    }

    pub fn compare_mode(&self) -> CompareMode {
        self.compare_mode
    }

    pub fn compare_version(&self) -> Option<&AssetVersion> {
        self.asset.version(self.compare_version?)
    }

    /// Show `other` next to (or under a wipe with) the active version.
    pub fn compare_with(&mut self, other: VersionId, mode: CompareMode) -> Result<()> {
        if !mode.is_active() {
            self.stop_compare();
            return Ok(());
        }
        if self.asset.version(other).is_none() {
            return Err(ModelError::VersionNotFound {
                id: other.to_string(),
            }
            .into());
        }
        if other == self.active {
            return Err(Error::other("Cannot compare a version with itself"));
        }
        self.engine.cancel();
        self.compare_mode = mode;
        self.compare_version = Some(other);
        self.wipe.reset();
        Ok(())
    }

    pub fn stop_compare(&mut self) {
        self.compare_mode = CompareMode::Off;
        self.compare_version = None;
        self.wipe.reset();
    }

    pub fn wipe_position(&self) -> f64 {
        self.wipe.position()
    }

    pub fn wipe_down(&mut self, at: ScreenPoint, measure: &dyn ContentMeasure) -> bool {
        if self.compare_mode != CompareMode::Wipe {
            return false;
        }
        self.wipe.begin_drag(at, measure, &self.capture)
    }

    pub fn wipe_move(&mut self, at: ScreenPoint) -> bool {
        self.wipe.drag_to(at)
    }

    pub fn wipe_up(&mut self) {
        self.wipe.end_drag();
    }

    pub fn playback_position(&self) -> f64 {
        self.playback_position
    }

    /// Host reports where the player is, in seconds.
    pub fn set_playback_position(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds >= 0.0 {
            self.playback_position = seconds;
        }
    }

    pub fn video_markers(&self) -> Vec<VideoMarker> {
        match self.active_version() {
            Some(version) if self.asset.kind.is_video() => {
                video_markers(version.comments(), self.actor.role)
            }
            _ => Vec::new(),
        }
    }

    /// Where the player should seek when a comment is activated.
    pub fn seek_target(&self, id: CommentId) -> Result<Option<f64>> {
        let comment = self.visible_or_missing(id)?;
        Ok(comment.video_timestamp.filter(|_| self.asset.kind.is_video()))
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.aspect_ratio = ratio;
    }

    pub fn safe_zones(&self) -> Vec<SafeZone> {
        self.aspect_ratio.safe_zones()
    }

    /// Media reported its intrinsic size (or failed to).
    pub fn set_natural_size(&mut self, natural: Option<Size>) {
        self.aspect_lock = AspectLock::from_natural_size(natural);
    }

    pub fn aspect_lock(&self) -> Option<AspectLock> {
        self.aspect_lock
    }

    /// Read-only snapshot of open feedback for the summarizer.
    pub fn unresolved_digests(&self) -> Vec<CommentDigest> {
        self.visible_comments()
            .into_iter()
            .filter(|c| !c.resolved)
            .map(|c| CommentDigest {
                author: self.author_name(c).to_string(),
                text: c.text.clone(),
                resolved: c.resolved,
            })
            .collect()
    }

    pub fn status_line(&self) -> AssetStatusLine {
        AssetStatusLine {
            title: self.asset.title.clone(),
            status: self.asset.status,
            version_number: self
                .active_version()
                .map(|v| v.version_number)
                .unwrap_or(0),
            unresolved: self.unresolved_count(),
        }
    }

    pub async fn summarize_unresolved(&self, assistant: &dyn ReviewAssistant) -> String {
        let digests = self.unresolved_digests();
        self.assist.summarize(assistant, self.active, &digests).await
    }

    /// Draft a reply and put it in the comment's reply field.
    pub async fn suggest_reply(
        &mut self,
        assistant: &dyn ReviewAssistant,
        id: CommentId,
    ) -> Result<String> {
        let text = self.visible_or_missing(id)?.text.clone();
        let draft = self.assist.suggest_reply(assistant, id, &text).await;
        self.reply_drafts.insert(id, draft.clone());
        Ok(draft)
    }

    /// Report across this asset and any others the host passes in.
    pub async fn status_report(
        &self,
        assistant: &dyn ReviewAssistant,
        others: &[AssetStatusLine],
    ) -> String {
        let mut lines = Vec::with_capacity(others.len() + 1);
        lines.push(self.status_line());
        lines.extend_from_slice(others);
        self.assist.status_report(assistant, &lines).await
    }
}
