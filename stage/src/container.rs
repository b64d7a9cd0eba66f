//! Host container handle.
//!
//! The only DOM side effect the tools perform outside the viewport transform
//! is writing the CSS `cursor` property of the element hosting the stage.

#[cfg(test)]
#[path = "container_test.rs"]
mod container_test;

use std::fmt;

/// Cursor styles the tools write to the host container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Platform default arrow.
    Default,
    /// Open hand: the surface can be dragged.
    Grab,
    /// Closed hand: the surface is being dragged.
    Grabbing,
}

impl Cursor {
    /// CSS value for the `cursor` property.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// The element that hosts the rendered stage.
pub trait StageContainer {
    /// Write the cursor style.
    fn set_cursor(&mut self, cursor: Cursor);

    /// The last cursor written through this handle, if any.
    fn cursor(&self) -> Option<Cursor>;
}

/// In-memory container for hosts without a DOM (tests, replay tooling).
#[derive(Debug, Clone, Default)]
pub struct HeadlessContainer {
    cursor: Option<Cursor>,
    writes: usize,
}

impl HeadlessContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cursor writes received.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StageContainer for HeadlessContainer {
    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
        self.writes += 1;
    }

    fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }
}
