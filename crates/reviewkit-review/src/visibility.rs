//! Role-based comment visibility.
//!
//! Filtering happens where comments are shown or selected. The underlying
//! lists are never modified, and aggregate counts (the approval gate) keep
//! using the full list.

use crate::comment::{Comment, Reply};
use crate::roles::Role;

pub fn is_visible(comment: &Comment, role: Role) -> bool {
    role.sees_internal() || !comment.is_internal
}

pub fn is_reply_visible(reply: &Reply, role: Role) -> bool {
    role.sees_internal() || !reply.is_internal
}

pub fn visible_comments(comments: &[Comment], role: Role) -> impl Iterator<Item = &Comment> {
    comments.iter().filter(move |c| is_visible(c, role))
}

pub fn visible_replies(comment: &Comment, role: Role) -> impl Iterator<Item = &Reply> {
    comment.replies.iter().filter(move |r| is_reply_visible(r, role))
}
