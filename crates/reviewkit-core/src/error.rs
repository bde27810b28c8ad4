//! Error handling for ReviewKit
//!
//! Provides error types for every layer of the review surface:
//! - Permission errors (role gates, the approval gate)
//! - Model errors (missing comments/versions, malformed geometry)
//! - Assist errors (the external text-generation collaborator)
//! - Config errors (settings files and shortcut maps)
//!
//! None of these are fatal. Callers turn permission errors into disabled
//! controls, assist errors into fallback strings, and gesture problems are
//! never errors at all (they simply commit nothing).
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Guidance shown when approval is blocked by open comments.
pub const RESOLVE_ALL_GUIDANCE: &str = "resolve all comments to approve";

/// Permission error type
///
/// Raised when the acting role may not perform a command. The UI renders
/// these as a disabled affordance with the error text as tooltip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// Role is not allowed to approve or request changes
    #[error("{role} cannot approve or request changes")]
    NotDecisionMaker {
        /// The acting role.
        role: String,
    },

    /// Approval blocked by unresolved comments on the active version
    #[error("{count} unresolved comment(s): {guidance}", guidance = RESOLVE_ALL_GUIDANCE)]
    UnresolvedComments {
        /// Number of unresolved top-level comments.
        count: usize,
    },

    /// Role may only view
    #[error("{role} has read-only access")]
    ReadOnly {
        /// The acting role.
        role: String,
    },

    /// Internal visibility is not available to this role
    #[error("internal comments are not available to {role}")]
    InternalNotAllowed {
        /// The acting role.
        role: String,
    },

    /// Role may not upload versions
    #[error("{role} cannot upload new versions")]
    UploadNotAllowed {
        /// The acting role.
        role: String,
    },
}

impl PermissionError {
    /// Short guidance line for tooltips.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::UnresolvedComments { .. } => RESOLVE_ALL_GUIDANCE,
            Self::NotDecisionMaker { .. } => "only approvers can make a decision",
            Self::ReadOnly { .. } => "observers can view but not comment",
            Self::InternalNotAllowed { .. } => "internal notes are hidden from your role",
            Self::UploadNotAllowed { .. } => "ask a creator to upload a new version",
        }
    }
}

/// Model error type
///
/// Represents violations of the comment/version aggregate's invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Comment id not present on the version
    #[error("Comment {id} not found")]
    CommentNotFound {
        /// The missing comment id.
        id: String,
    },

    /// Reply id not present on the comment
    #[error("Reply {id} not found")]
    ReplyNotFound {
        /// The missing reply id.
        id: String,
    },

    /// Version id not present on the asset
    #[error("Version {id} not found")]
    VersionNotFound {
        /// The missing version id.
        id: String,
    },

    /// Drawing attached to a comment that has no pin anchor
    #[error("Comment {id} has a drawing but no pin anchor")]
    DrawingWithoutAnchor {
        /// The offending comment id.
        id: String,
    },

    /// Drawing geometry is unusable
    #[error("Invalid drawing: {reason}")]
    InvalidDrawing {
        /// Why the drawing was rejected.
        reason: String,
    },

    /// Colour is not a `#RRGGBB` / `#RRGGBBAA` string
    #[error("Invalid color '{color}'")]
    InvalidColor {
        /// The rejected colour string.
        color: String,
    },

    /// A new version must have a strictly larger number
    #[error("Version number {number} must be greater than {latest}")]
    VersionNotIncreasing {
        /// The rejected number.
        number: u32,
        /// The current highest number.
        latest: u32,
    },

    /// An asset always has at least one version
    #[error("Asset {id} has no versions")]
    NoVersions {
        /// The asset id.
        id: String,
    },

    /// The latest version number is already the largest representable
    #[error("Asset {id} cannot take a version after {latest}")]
    VersionNumbersExhausted {
        /// The asset id.
        id: String,
        /// The current highest number.
        latest: u32,
    },
}

/// Assist error type
///
/// Failures of the external text-generation collaborator. These never
/// reach the user as errors; the assist panel swaps in a fallback string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistError {
    /// Collaborator could not be reached
    #[error("Assistant unreachable: {reason}")]
    Unreachable {
        /// Transport level reason.
        reason: String,
    },

    /// Collaborator answered with a refusal or malformed payload
    #[error("Assistant rejected the request: {reason}")]
    Rejected {
        /// Reason reported by the collaborator.
        reason: String,
    },
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting holds an out-of-range value
    #[error("Invalid setting {setting}: {reason}")]
    InvalidSetting {
        /// Setting path, e.g. `viewport.max_zoom`.
        setting: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Shortcut refers to an action that does not exist
    #[error("Unknown shortcut action '{action}' for key '{key}'")]
    UnknownAction {
        /// The key name.
        key: String,
        /// The unknown action name.
        action: String,
    },

    /// Config file has an extension we cannot read
    #[error("Config file must be .json or .toml, got {path}")]
    UnsupportedFormat {
        /// The offending path.
        path: String,
    },

    /// Config file could not be parsed or serialised
    #[error("Config parse error: {reason}")]
    Parse {
        /// Parser message.
        reason: String,
    },
}

/// Main error type for ReviewKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Permission error
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// Model error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Assist error
    #[error(transparent)]
    Assist(#[from] AssistError),

    /// Config error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a permission denial
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::Permission(_))
    }

    /// Check if this is a model error
    pub fn is_model_error(&self) -> bool {
        matches!(self, Error::Model(_))
    }

    /// Check if this is a config error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Tooltip text for permission denials, `None` for everything else.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Error::Permission(e) => Some(e.guidance()),
            _ => None,
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
