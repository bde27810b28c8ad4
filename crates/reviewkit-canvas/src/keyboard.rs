//! Keyboard shortcut routing for the review surface.
//!
//! One router owns the key map. It only answers while the surface has focus,
//! and never while a text field does, so typing a comment that contains
//! "p" or a space does not switch tools.

use std::collections::HashMap;

use reviewkit_core::{ConfigError, Result};
use reviewkit_settings::ShortcutSettings;

use crate::tools::Tool;

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SelectTool(Tool),
    TemporaryHand,
    ZoomIn,
    ZoomOut,
    CancelGesture,
}

impl ShortcutAction {
    /// Parse a configured action name.
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name {
            "temporary_hand" => ShortcutAction::TemporaryHand,
            "hand" => ShortcutAction::SelectTool(Tool::Hand),
            "pointer" => ShortcutAction::SelectTool(Tool::Pointer),
            "pen" => ShortcutAction::SelectTool(Tool::Pen),
            "box" => ShortcutAction::SelectTool(Tool::Box),
            "zoom_in" => ShortcutAction::ZoomIn,
            "zoom_out" => ShortcutAction::ZoomOut,
            "cancel_gesture" => ShortcutAction::CancelGesture,
            _ => return None,
        };
        Some(action)
    }
}

/// Key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Pressed,
    Released,
}

/// A key event plus the focus facts the router needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Lowercase key name (`"p"`, `"space"`, `"escape"`).
    pub key: String,
    pub phase: KeyPhase,
    pub surface_focused: bool,
    pub text_input_focused: bool,
}

impl KeyEvent {
    pub fn pressed(key: &str) -> Self {
        Self {
            key: key.to_lowercase(),
            phase: KeyPhase::Pressed,
            surface_focused: true,
            text_input_focused: false,
        }
    }

    pub fn released(key: &str) -> Self {
        Self {
            phase: KeyPhase::Released,
            ..Self::pressed(key)
        }
    }

    pub fn in_text_input(mut self) -> Self {
        self.text_input_focused = true;
        self
    }

    pub fn unfocused(mut self) -> Self {
        self.surface_focused = false;
        self
    }
}

/// Routed result of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    SelectTool(Tool),
    BeginTemporaryHand,
    EndTemporaryHand,
    ZoomIn,
    ZoomOut,
    CancelGesture,
}

/// Maps keys to commands.
#[derive(Debug, Clone)]
pub struct KeyRouter {
    bindings: HashMap<String, ShortcutAction>,
}

impl KeyRouter {
    /// Build from configured bindings; unknown action names are rejected.
    pub fn from_settings(settings: &ShortcutSettings) -> Result<Self> {
        let mut bindings = HashMap::with_capacity(settings.bindings.len());
        for (key, action) in &settings.bindings {
            let parsed = ShortcutAction::from_name(action).ok_or_else(|| {
                ConfigError::UnknownAction {
                    key: key.clone(),
                    action: action.clone(),
                }
            })?;
            bindings.insert(key.to_lowercase(), parsed);
        }
        Ok(Self { bindings })
    }

    pub fn binding(&self, key: &str) -> Option<ShortcutAction> {
        self.bindings.get(&key.to_lowercase()).copied()
    }

    pub fn route(&self, event: &KeyEvent) -> Option<KeyCommand> {
        let action = self.binding(&event.key)?;

        // Releasing the held hand must always get through, or the override
        // sticks when focus moves into a text field mid-hold.
        if event.phase == KeyPhase::Released {
            return (action == ShortcutAction::TemporaryHand).then_some(KeyCommand::EndTemporaryHand);
        }

        if !event.surface_focused || event.text_input_focused {
            return None;
        }

        Some(match action {
            ShortcutAction::SelectTool(tool) => KeyCommand::SelectTool(tool),
            ShortcutAction::TemporaryHand => KeyCommand::BeginTemporaryHand,
            ShortcutAction::ZoomIn => KeyCommand::ZoomIn,
            ShortcutAction::ZoomOut => KeyCommand::ZoomOut,
            ShortcutAction::CancelGesture => KeyCommand::CancelGesture,
        })
    }
}

impl Default for KeyRouter {
    fn default() -> Self {
        let bindings = ShortcutSettings::default()
            .bindings
            .iter()
            .filter_map(|(key, action)| {
                ShortcutAction::from_name(action).map(|parsed| (key.clone(), parsed))
            })
            .collect();
        Self { bindings }
    }
}
