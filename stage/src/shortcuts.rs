//! Advisory keyboard bindings and the actions they name.
//!
//! Shortcut dispatch belongs to the host; this module only records which
//! key combination is conventionally bound to which [`ToolAction`], and what
//! matching a browser key event against a binding means.

#[cfg(test)]
#[path = "shortcuts_test.rs"]
mod shortcuts_test;

use std::fmt;

use crate::consts::{MOVE_TOOL_ID, PAN_ZOOM_TOOL_ID};
use crate::input::{Key, Modifiers, normalize_key_name};
use crate::tool::ToolId;
use crate::viewport::ZoomDirection;

/// Error returned by [`Shortcut::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortcutError {
    #[error("empty shortcut")]
    Empty,
    #[error("shortcut {0:?} has no key")]
    MissingKey(String),
    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),
}

/// A key plus the exact set of modifiers that must be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    key: String,
    modifiers: Modifiers,
}

impl Shortcut {
    /// A bare key with no modifiers.
    #[must_use]
    pub fn key(name: &str) -> Self {
        Self { key: normalize_key_name(name), modifiers: Modifiers::default() }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Parse `"ctrl+plus"`, `"shift+1"`, `"H"`.
    ///
    /// # Errors
    ///
    /// [`ShortcutError`] for empty input, a trailing `+`, or an unknown modifier.
    pub fn parse(raw: &str) -> Result<Self, ShortcutError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ShortcutError::Empty);
        }
        let mut parts: Vec<&str> = raw.split('+').map(str::trim).collect();
        let key = match parts.pop() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ShortcutError::MissingKey(raw.to_owned())),
        };
        let mut modifiers = Modifiers::default();
        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                _ => return Err(ShortcutError::UnknownModifier(part.to_owned())),
            }
        }
        Ok(Self::key(key).with_modifiers(modifiers))
    }

    /// Canonical key name.
    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether a key event triggers this shortcut.
    ///
    /// Symbols that need shift to type (`+`, `_`, `!`, `@`) match regardless
    /// of the shift state, so `ctrl+plus` fires for both `ctrl+=` and `ctrl+shift++`.
    #[must_use]
    pub fn matches(&self, key: &Key, modifiers: Modifiers) -> bool {
        if key.normalized() != self.key {
            return false;
        }
        let mut wanted = self.modifiers;
        let mut held = modifiers;
        if implies_shift(&key.0) {
            wanted.shift = false;
            held.shift = false;
        }
        wanted == held
    }
}

fn implies_shift(raw: &str) -> bool {
    matches!(raw, "+" | "_" | "!" | "@")
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers { shift, ctrl, alt, meta } = self.modifiers;
        for (held, name) in [(ctrl, "ctrl"), (alt, "alt"), (shift, "shift"), (meta, "meta")] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}

/// What a toolbar button or shortcut asks the surface to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolAction {
    /// Flip a tool's selection.
    Toggle(ToolId),
    /// One zoom step.
    Zoom(ZoomDirection),
    /// Fit content to the stage.
    SizeToFit,
    /// Natural content size.
    SizeToOriginal,
    /// Fit if the content overflows the stage, natural size otherwise.
    SizeToAuto,
}

/// A shortcut, its action and a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub shortcut: Shortcut,
    pub action: ToolAction,
    pub label: &'static str,
}

/// The conventional bindings for the control tools.
#[must_use]
pub fn default_bindings() -> Vec<Binding> {
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
    let shift = Modifiers { shift: true, ..Modifiers::default() };
    vec![
        Binding { shortcut: Shortcut::key("v"), action: ToolAction::Toggle(MOVE_TOOL_ID.into()), label: "Move" },
        Binding {
            shortcut: Shortcut::key("h"),
            action: ToolAction::Toggle(PAN_ZOOM_TOOL_ID.into()),
            label: "Pan Image",
        },
        Binding {
            shortcut: Shortcut::key("plus").with_modifiers(ctrl),
            action: ToolAction::Zoom(ZoomDirection::In),
            label: "Zoom In",
        },
        Binding {
            shortcut: Shortcut::key("minus").with_modifiers(ctrl),
            action: ToolAction::Zoom(ZoomDirection::Out),
            label: "Zoom Out",
        },
        Binding { shortcut: Shortcut::key("1").with_modifiers(shift), action: ToolAction::SizeToFit, label: "Zoom to fit" },
        Binding {
            shortcut: Shortcut::key("2").with_modifiers(shift),
            action: ToolAction::SizeToOriginal,
            label: "Zoom to actual size",
        },
    ]
}

/// First binding triggered by a key event.
#[must_use]
pub fn resolve<'a>(bindings: &'a [Binding], key: &Key, modifiers: Modifiers) -> Option<&'a ToolAction> {
    bindings
        .iter()
        .find(|binding| binding.shortcut.matches(key, modifiers))
        .map(|binding| &binding.action)
}
