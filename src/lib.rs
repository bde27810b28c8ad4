//! # ReviewKit
//!
//! Annotation and viewport coordinate engine for reviewing versioned media
//! assets (images, video, documents).
//!
//! ## Architecture
//!
//! ReviewKit is organized as a workspace with multiple crates:
//!
//! 1. **reviewkit-core** - Identifiers, error taxonomy, event bus
//! 2. **reviewkit-settings** - Tunables, shortcut map, config files
//! 3. **reviewkit-canvas** - Normalized geometry, drawings, viewport, gestures
//! 4. **reviewkit-review** - Comments, versions, roles, approval, review session
//! 5. **reviewkit** - This crate: logging setup and a small inspection binary
//!
//! ## Features
//!
//! - **Resolution-independent pins**: every stored coordinate is 0-100
//! - **Anchored zoom**: the content point under the pointer stays put
//! - **Gestures**: pins, pen strokes, boxes and pin drags measured once per gesture
//! - **Approval gate**: no approval while anything on the version is open
//! - **Role visibility**: internal notes never reach external approvers

pub use reviewkit_canvas as canvas;
pub use reviewkit_review as review;
pub use reviewkit_settings as settings;

pub use reviewkit_canvas::{
    CompareMode, Drawing, Interaction, InteractionEngine, MediaKind, NormalizedRect, Point,
    ScreenPoint, ScreenRect, Tool, Viewport,
};
pub use reviewkit_core::{Error, EventBus, ReviewEvent, Result};
pub use reviewkit_review::{
    Actor, ApprovalStatus, Asset, AssetVersion, Comment, Reply, ReviewAssistant, ReviewSession,
    Role,
};
pub use reviewkit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, or JSON lines when `json` is set
/// - RUST_LOG environment variable support (defaults to `info`)
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
