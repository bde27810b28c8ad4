//! Approval status and the rules for changing it.
//!
//! Every transition is an explicit command. There is no terminal state: a
//! new version upload always puts the asset back to `Pending`.

use std::fmt;

use reviewkit_core::PermissionError;
use serde::{Deserialize, Serialize};

use crate::roles::{Actor, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    InProgress,
    ChangesRequested,
    Approved,
}

impl ApprovalStatus {
    pub fn label(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::InProgress => "In Progress",
            ApprovalStatus::ChangesRequested => "Changes Requested",
            ApprovalStatus::Approved => "Approved",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn require_decision_maker(actor: &Actor) -> Result<(), PermissionError> {
    if actor.role.is_decision_maker() {
        Ok(())
    } else {
        Err(PermissionError::NotDecisionMaker {
            role: actor.role.to_string(),
        })
    }
}

/// Whether `actor` may approve with `unresolved` open comments on the
/// active version. Used both to enable the control and to guard the command.
pub fn check_approve(actor: &Actor, unresolved: usize) -> Result<(), PermissionError> {
    require_decision_maker(actor)?;
    if unresolved > 0 && !actor.role.has_override() {
        return Err(PermissionError::UnresolvedComments { count: unresolved });
    }
    Ok(())
}

pub fn check_request_changes(actor: &Actor) -> Result<(), PermissionError> {
    require_decision_maker(actor)
}

pub fn check_begin_review(actor: &Actor) -> Result<(), PermissionError> {
    if actor.role.can_annotate() {
        Ok(())
    } else {
        Err(PermissionError::ReadOnly {
            role: actor.role.to_string(),
        })
    }
}

/// Status after a command, or `None` when the command changes nothing.
pub fn begin_review(current: ApprovalStatus) -> Option<ApprovalStatus> {
    (current == ApprovalStatus::Pending).then_some(ApprovalStatus::InProgress)
}

pub fn approve(current: ApprovalStatus) -> Option<ApprovalStatus> {
    (current != ApprovalStatus::Approved).then_some(ApprovalStatus::Approved)
}

pub fn request_changes(current: ApprovalStatus) -> Option<ApprovalStatus> {
    (current != ApprovalStatus::ChangesRequested).then_some(ApprovalStatus::ChangesRequested)
}

pub fn after_upload(current: ApprovalStatus) -> Option<ApprovalStatus> {
    (current != ApprovalStatus::Pending).then_some(ApprovalStatus::Pending)
}

/// Roles that may approve or request changes.
pub fn decision_roles() -> [Role; 2] {
    [Role::SuperAdmin, Role::Approver]
}
