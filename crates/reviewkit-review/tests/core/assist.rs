use async_trait::async_trait;
use reviewkit_canvas::{MediaKind, Point};
use reviewkit_core::AssistError;
use reviewkit_review::{
    Actor, Asset, AssetStatusLine, AssistKey, AssistState, CommentDigest, ReviewAssistant,
    ReviewSession, Role, Roster,
};
use reviewkit_settings::Config;

/// Echoes what it was given so tests can see the inputs.
struct Echo;

#[async_trait]
impl ReviewAssistant for Echo {
    async fn summarize(&self, comments: &[CommentDigest]) -> Result<String, AssistError> {
        Ok(comments
            .iter()
            .map(|c| format!("{}: {}", c.author, c.text))
            .collect::<Vec<_>>()
            .join("; "))
    }

    async fn suggest_reply(&self, comment_text: &str) -> Result<String, AssistError> {
        Ok(format!("Re: {}", comment_text))
    }

    async fn status_report(&self, assets: &[AssetStatusLine]) -> Result<String, AssistError> {
        Ok(assets
            .iter()
            .map(|a| format!("{} v{} {}", a.title, a.version_number, a.status))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

struct Down;

#[async_trait]
impl ReviewAssistant for Down {
    async fn summarize(&self, _comments: &[CommentDigest]) -> Result<String, AssistError> {
        Err(AssistError::Unreachable {
            reason: "timeout".to_string(),
        })
    }

    async fn suggest_reply(&self, _comment_text: &str) -> Result<String, AssistError> {
        Err(AssistError::Unreachable {
            reason: "timeout".to_string(),
        })
    }

    async fn status_report(&self, _assets: &[AssetStatusLine]) -> Result<String, AssistError> {
        Err(AssistError::Rejected {
            reason: "bad request".to_string(),
        })
    }
}

fn session() -> ReviewSession {
    let asset = Asset::new("Teaser", MediaKind::Video, "v1.mp4");
    let roster: Roster = [("dana", "Dana")].into_iter().collect();
    ReviewSession::new(asset, Actor::new("dana", Role::Creator), &Config::default())
        .unwrap()
        .with_roster(roster)
}

#[tokio::test]
async fn test_summary_covers_only_open_comments() {
    let mut session = session();
    let open = session.place_comment(Point::new(1.0, 1.0), None).unwrap();
    session.edit_text(open, "logo too small").unwrap();
    let done = session.place_comment(Point::new(2.0, 2.0), None).unwrap();
    session.edit_text(done, "typo").unwrap();
    session.toggle_resolved(done).unwrap();

    let summary = session.summarize_unresolved(&Echo).await;
    assert_eq!(summary, "Dana: logo too small");
}

#[tokio::test]
async fn test_suggestion_fills_reply_draft() {
    let mut session = session();
    let id = session.place_comment(Point::new(1.0, 1.0), None).unwrap();
    session.edit_text(id, "colour is off").unwrap();

    let draft = session.suggest_reply(&Echo, id).await.unwrap();
    assert_eq!(draft, "Re: colour is off");
    assert_eq!(session.reply_draft(id), Some("Re: colour is off"));

    session.add_reply(id, draft, false).unwrap();
    assert_eq!(session.reply_draft(id), None);
}

#[tokio::test]
async fn test_failures_fall_back_without_blocking() {
    let mut session = session();
    let id = session.place_comment(Point::new(1.0, 1.0), None).unwrap();
    let fallbacks = Config::default().assist;

    assert_eq!(session.summarize_unresolved(&Down).await, fallbacks.summary_fallback);
    assert_eq!(session.suggest_reply(&Down, id).await.unwrap(), fallbacks.suggestion_fallback);
    assert_eq!(session.status_report(&Down, &[]).await, fallbacks.report_fallback);
    assert_eq!(
        session.assist_panel().state(AssistKey::Report),
        AssistState::Ready {
            text: fallbacks.report_fallback.clone(),
            fallback: true
        }
    );

    // The session keeps working after every failure.
    assert!(session.toggle_resolved(id).unwrap());
}

#[tokio::test]
async fn test_report_includes_this_asset_first() {
    let session = session();
    let other = AssetStatusLine {
        title: "Poster".to_string(),
        status: reviewkit_review::ApprovalStatus::Approved,
        version_number: 3,
        unresolved: 0,
    };
    let report = session.status_report(&Echo, &[other]).await;
    assert_eq!(report, "Teaser v1 Pending\nPoster v3 Approved");
}
