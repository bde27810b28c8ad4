//! Assets and their append-only version stack.
//!
//! Versions are kept newest-first. Uploading prepends and never touches
//! older versions; comments belong to exactly one version and stay there.
//! Comment lists sit behind an `Arc` and are copied on write, so a snapshot
//! taken before a mutation never sees it.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use reviewkit_canvas::MediaKind;
use reviewkit_core::{AssetId, CommentId, ModelError, Result, Timestamp, VersionId};
use serde::{Deserialize, Serialize};

use crate::comment::Comment;
use crate::status::ApprovalStatus;

/// One uploaded revision of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetVersion {
    pub id: VersionId,
    pub version_number: u32,
    pub url: String,
    pub created_at: Timestamp,
    #[serde(default)]
    comments: Arc<Vec<Comment>>,
}

impl AssetVersion {
    pub fn new(version_number: u32, url: impl Into<String>) -> Self {
        Self {
            id: VersionId::new(),
            version_number,
            url: url.into(),
            created_at: Utc::now(),
            comments: Arc::new(Vec::new()),
        }
    }

    /// Comments, newest first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Shared handle to the current comment list.
    pub fn comments_snapshot(&self) -> Arc<Vec<Comment>> {
        Arc::clone(&self.comments)
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Open top-level comments, internal ones included.
    pub fn unresolved_count(&self) -> usize {
        self.comments.iter().filter(|c| !c.resolved).count()
    }

    fn not_found(id: CommentId) -> ModelError {
        ModelError::CommentNotFound { id: id.to_string() }
    }

    /// Put a new comment at the front.
    pub fn prepend_comment(&mut self, comment: Comment) -> Result<()> {
        comment.validate()?;
        Arc::make_mut(&mut self.comments).insert(0, comment);
        Ok(())
    }

    /// Replace a comment by identity with `f(old)`.
    pub fn replace_comment<F>(&mut self, id: CommentId, f: F) -> Result<&Comment>
    where
        F: FnOnce(&Comment) -> Result<Comment>,
    {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        let updated = f(&self.comments[index])?;
        updated.validate()?;
        let comments = Arc::make_mut(&mut self.comments);
        comments[index] = updated;
        Ok(&comments[index])
    }

    pub fn remove_comment(&mut self, id: CommentId) -> Result<Comment> {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        Ok(Arc::make_mut(&mut self.comments).remove(index))
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for comment in self.comments.iter() {
            comment.validate()?;
            if !seen.insert(comment.id) {
                return Err(reviewkit_core::Error::other(format!(
                    "Duplicate comment id {} on version {}",
                    comment.id, self.version_number
                )));
            }
        }
        Ok(())
    }
}

/// A reviewable piece of media and its versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub status: ApprovalStatus,
    versions: Vec<AssetVersion>,
}

impl Asset {
    /// New asset with its first version.
    pub fn new(title: impl Into<String>, kind: MediaKind, url: impl Into<String>) -> Self {
        Self {
            id: AssetId::new(),
            title: title.into(),
            kind,
            status: ApprovalStatus::Pending,
            versions: vec![AssetVersion::new(1, url)],
        }
    }

    /// Parse from the camelCase JSON exchange shape and check invariants.
    pub fn from_json(json: &str) -> Result<Self> {
        let asset: Self = serde_json::from_str(json).map_err(|e| {
            reviewkit_core::Error::other(format!("Invalid asset JSON: {}", e))
        })?;
        asset.validate()?;
        Ok(asset)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| reviewkit_core::Error::other(format!("Cannot serialize asset: {}", e)))
    }

    /// Non-empty, numbers strictly decreasing newest-first, comments sound.
    pub fn validate(&self) -> Result<()> {
        if self.versions.is_empty() {
            return Err(ModelError::NoVersions {
                id: self.id.to_string(),
            }
            .into());
        }
        for pair in self.versions.windows(2) {
            if pair[0].version_number <= pair[1].version_number {
                return Err(ModelError::VersionNotIncreasing {
                    number: pair[0].version_number,
                    latest: pair[1].version_number,
                }
                .into());
            }
        }
        for version in &self.versions {
            version.validate()?;
        }
        Ok(())
    }

    /// Versions, newest first.
    pub fn versions(&self) -> &[AssetVersion] {
        &self.versions
    }

    pub fn latest(&self) -> Option<&AssetVersion> {
        self.versions.first()
    }

    pub fn latest_number(&self) -> u32 {
        self.latest().map(|v| v.version_number).unwrap_or(0)
    }

    pub fn version(&self, id: VersionId) -> Option<&AssetVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    pub fn version_mut(&mut self, id: VersionId) -> Option<&mut AssetVersion> {
        self.versions.iter_mut().find(|v| v.id == id)
    }

    /// Prepend the next version. Older versions are left as they are.
    pub fn push_version(&mut self, url: impl Into<String>) -> Result<&AssetVersion> {
        let latest = self.latest_number();
        let number = latest
            .checked_add(1)
            .ok_or_else(|| ModelError::VersionNumbersExhausted {
                id: self.id.to_string(),
                latest,
            })?;
        self.versions.insert(0, AssetVersion::new(number, url));
        Ok(&self.versions[0])
    }

    /// Prepend a version with an explicit number, which must be the highest.
    pub fn push_numbered_version(&mut self, version: AssetVersion) -> Result<()> {
        let latest = self.latest_number();
        if version.version_number <= latest {
            return Err(ModelError::VersionNotIncreasing {
                number: version.version_number,
                latest,
            }
            .into());
        }
        version.validate()?;
        self.versions.insert(0, version);
        Ok(())
    }
}
