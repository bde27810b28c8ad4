//! # ReviewKit Core
//!
//! Core types, error taxonomy and the event bus shared by every ReviewKit
//! crate. Nothing in here knows about pointers or pixels; it only provides
//! the vocabulary the canvas and review layers speak.

pub mod error;
pub mod event_bus;
pub mod types;

pub use error::{AssistError, ConfigError, Error, ModelError, PermissionError, Result};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, EventBus, EventBusConfig, EventCategory, EventFilter, ReviewEvent, SubscriptionId,
};

pub use types::{AssetId, CommentId, Timestamp, UserId, VersionId};
