//! ReviewKit Settings Crate
//!
//! Handles application configuration and settings persistence.

pub mod config;
pub mod persistence;

pub use config::{
    is_hex_color, AssistSettings, Config, GestureSettings, ShortcutSettings, ViewportSettings,
    SHORTCUT_ACTIONS,
};
pub use persistence::SettingsPersistence;
