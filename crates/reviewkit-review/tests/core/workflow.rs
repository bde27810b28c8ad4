use reviewkit_canvas::{MediaKind, Point, ScreenPoint};
use reviewkit_core::event_bus::{StatusEvent, VersionEvent, ViewportEvent};
use reviewkit_core::{PermissionError, ReviewEvent, UserId};
use reviewkit_review::{Actor, ApprovalStatus, Asset, Comment, ReviewSession, Role};
use reviewkit_settings::Config;

fn comment(author: &str, resolved: bool) -> Comment {
    let mut c = Comment::pinned(UserId::from(author), Point::new(30.0, 30.0), None);
    c.resolved = resolved;
    c
}

/// One image asset whose only version carries `comments`.
fn asset_with(comments: Vec<Comment>) -> Asset {
    let mut asset = Asset::new("Hero banner", MediaKind::Image, "v1.png");
    let version = asset.latest().unwrap().id;
    for c in comments {
        asset.version_mut(version).unwrap().prepend_comment(c).unwrap();
    }
    asset
}

fn open(asset: Asset, role: Role) -> ReviewSession {
    ReviewSession::new(asset, Actor::new("me", role), &Config::default()).unwrap()
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<ReviewEvent>) -> Vec<ReviewEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn test_approval_waits_for_resolution_then_upload_resets() {
    let open_a = comment("creator", false);
    let open_b = comment("creator", false);
    let asset = asset_with(vec![open_a.clone(), open_b.clone(), comment("creator", true)]);
    let mut approver = open(asset, Role::Approver);

    assert_eq!(
        approver.approval_gate(),
        Err(PermissionError::UnresolvedComments { count: 2 })
    );
    let err = approver.approve().unwrap_err();
    assert!(err.is_permission_denied());
    assert_eq!(approver.status(), ApprovalStatus::Pending);

    approver.toggle_resolved(open_a.id).unwrap();
    approver.toggle_resolved(open_b.id).unwrap();
    assert_eq!(approver.approve().unwrap(), ApprovalStatus::Approved);

    let mut creator = open(approver.asset().clone(), Role::Creator);
    let v1 = creator.active_version_id();
    let v2 = creator.upload_version("v2.png").unwrap();
    assert_eq!(creator.status(), ApprovalStatus::Pending);
    assert_eq!(creator.active_version_id(), v2);
    assert!(creator.visible_comments().is_empty());
    assert_eq!(creator.asset().version(v1).unwrap().comments().len(), 3);
}

#[test]
fn test_hidden_internal_comment_still_blocks_approval() {
    let hidden = comment("creator", false).internal();
    let mut approver = open(asset_with(vec![hidden.clone()]), Role::Approver);

    assert!(approver.visible_comments().is_empty());
    assert_eq!(approver.unresolved_count(), 1);
    assert!(approver.approve().is_err());
    assert!(approver.toggle_resolved(hidden.id).unwrap_err().is_model_error());
}

#[test]
fn test_super_admin_overrides_gate() {
    let mut admin = open(asset_with(vec![comment("creator", false)]), Role::SuperAdmin);
    assert_eq!(admin.approve().unwrap(), ApprovalStatus::Approved);
}

#[test]
fn test_creator_cannot_decide_and_approver_cannot_upload() {
    let mut creator = open(asset_with(Vec::new()), Role::Creator);
    assert!(matches!(
        creator.request_changes().unwrap_err(),
        reviewkit_core::Error::Permission(PermissionError::NotDecisionMaker { .. })
    ));

    let mut approver = open(asset_with(Vec::new()), Role::Approver);
    assert!(approver.upload_version("v2.png").is_err());
    assert_eq!(approver.asset().versions().len(), 1);
    assert_eq!(approver.request_changes().unwrap(), ApprovalStatus::ChangesRequested);
}

#[test]
fn test_begin_review_only_from_pending() {
    let mut creator = open(asset_with(Vec::new()), Role::Creator);
    assert_eq!(creator.begin_review().unwrap(), ApprovalStatus::InProgress);

    let mut observer = open(asset_with(Vec::new()), Role::Observer);
    assert!(observer.begin_review().is_err());
}

#[test]
fn test_internal_flags_and_replies_by_role() {
    let mut creator = open(asset_with(Vec::new()), Role::Creator);
    let id = creator.place_comment(Point::new(10.0, 10.0), None).unwrap();
    creator.add_reply(id, "team note", true).unwrap();
    creator.add_reply(id, "fixed in v2", false).unwrap();
    assert_eq!(creator.replies(id).unwrap().len(), 2);

    let mut approver = open(creator.asset().clone(), Role::Approver);
    let texts: Vec<_> = approver
        .replies(id)
        .unwrap()
        .into_iter()
        .map(|r| r.text.clone())
        .collect();
    assert_eq!(texts, vec!["fixed in v2".to_string()]);
    assert!(approver.add_reply(id, "psst", true).is_err());
    assert!(approver.set_internal(id, true).is_err());
    assert!(approver.add_reply(id, "looks good", false).is_ok());
}

#[test]
fn test_versions_keep_their_own_comments() {
    let mut creator = open(asset_with(Vec::new()), Role::Creator);
    let v1 = creator.active_version_id();
    creator.place_comment(Point::new(10.0, 10.0), None).unwrap();
    creator.upload_version("v2.png").unwrap();
    creator.place_comment(Point::new(20.0, 20.0), None).unwrap();
    creator.place_comment(Point::new(30.0, 30.0), None).unwrap();

    assert_eq!(creator.visible_comments().len(), 2);
    creator.switch_version(v1).unwrap();
    assert_eq!(creator.visible_comments().len(), 1);
}

#[test]
fn test_switching_version_resets_view_and_selection() {
    let mut creator = open(asset_with(Vec::new()), Role::Creator);
    let v1 = creator.active_version_id();
    creator.upload_version("v2.png").unwrap();
    creator.place_comment(Point::new(10.0, 10.0), None).unwrap();
    assert!(creator.wheel(-200.0, ScreenPoint::new(100.0, 100.0)));
    assert!(!creator.viewport().is_identity());

    let mut rx = creator.event_bus().receiver();
    creator.switch_version(v1).unwrap();
    assert!(creator.viewport().is_identity());
    assert_eq!(creator.selection(), None);

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        ReviewEvent::Version(VersionEvent::Switched { to, .. }) if *to == v1
    )));
    assert!(events.contains(&ReviewEvent::Viewport(ViewportEvent::Reset)));
}

#[test]
fn test_status_changes_are_published() {
    let mut admin = open(asset_with(Vec::new()), Role::SuperAdmin);
    let mut rx = admin.event_bus().receiver();
    admin.approve().unwrap();
    admin.approve().unwrap();

    let events = drain(&mut rx);
    assert_eq!(
        events,
        vec![ReviewEvent::Status(StatusEvent::Changed {
            from: "Pending".to_string(),
            to: "Approved".to_string(),
        })]
    );
}

#[test]
fn test_delete_clears_selection() {
    let mut creator = open(asset_with(Vec::new()), Role::Creator);
    let id = creator.place_comment(Point::new(10.0, 10.0), None).unwrap();
    assert_eq!(creator.selection(), Some(id));
    creator.delete_comment(id).unwrap();
    assert_eq!(creator.selection(), None);
    assert!(creator.comment(id).is_none());
}

#[test]
fn test_inverted_zoom_limits_are_rejected() {
    let mut config = Config::default();
    config.viewport.min_zoom = 6.0;
    let asset = asset_with(Vec::new());
    let err = ReviewSession::new(asset, Actor::new("me", Role::Creator), &config).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_upload_after_last_version_number_is_refused() {
    let json = asset_with(Vec::new())
        .to_json()
        .unwrap()
        .replace("\"versionNumber\": 1", "\"versionNumber\": 4294967295");
    let asset = Asset::from_json(&json).unwrap();
    let mut creator = open(asset, Role::Creator);
    let active = creator.active_version_id();

    let err = creator.upload_version("v2.png").unwrap_err();
    assert!(err.is_model_error());
    assert_eq!(creator.asset().versions().len(), 1);
    assert_eq!(creator.active_version_id(), active);
}
