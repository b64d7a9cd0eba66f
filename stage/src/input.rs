//! Input model: pointer buttons, modifier keys, keys and pointer events.
//!
//! These are the host-independent shapes of the DOM events the stage reacts
//! to. The host translates `PointerEvent.button` / `movementX` / `movementY`
//! and `KeyboardEvent.key` into these types before handing them to a
//! [`crate::surface::Surface`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::Deserialize;

use crate::geom::Delta;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` index. Unknown indices (back/forward) map to `None`.
    #[must_use]
    pub fn from_dom(index: i16) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"h"`, `"+"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Canonical lowercase name with shifted/unshifted aliases folded together.
    #[must_use]
    pub fn normalized(&self) -> String {
        normalize_key_name(&self.0)
    }
}

/// Fold a key name onto the names used in shortcut strings.
pub(crate) fn normalize_key_name(raw: &str) -> String {
    match raw {
        "+" | "=" => "plus".to_owned(),
        "-" | "_" => "minus".to_owned(),
        "!" => "1".to_owned(),
        "@" => "2".to_owned(),
        other => other.to_lowercase(),
    }
}

/// A pointer event as seen by tools.
///
/// Only the relative movement matters to the pan tool; absolute positions
/// are the renderer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Button that triggered the event (for move events, the primary button).
    pub button: Button,
    /// Movement since the previous pointer event, in CSS pixels.
    pub movement: Delta,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// A pointer-down or pointer-up event for `button`.
    #[must_use]
    pub fn button(button: Button) -> Self {
        Self { button, ..Self::default() }
    }

    /// A pointer-move event carrying `movementX` / `movementY`.
    #[must_use]
    pub fn movement(dx: f64, dy: f64) -> Self {
        Self { movement: Delta::new(dx, dy), ..Self::default() }
    }
}
