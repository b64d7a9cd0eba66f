//! Passive move/select tool.
//!
//! Selecting it hands pointer input back to the annotation regions; the only
//! thing it does itself is restore the default cursor.

use std::rc::Rc;

use crate::container::Cursor;
use crate::viewport::{SharedViewport, write_cursor};

#[derive(Default)]
pub struct MoveTool {
    viewport: Option<SharedViewport>,
}

impl MoveTool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn bind_viewport(&mut self, viewport: &SharedViewport) {
        self.viewport = Some(Rc::clone(viewport));
    }

    pub fn unbind_viewport(&mut self) {
        self.viewport = None;
    }

    /// Restore the default cursor.
    pub fn activate(&mut self) {
        if let Some(viewport) = &self.viewport {
            write_cursor(&mut *viewport.borrow_mut(), Cursor::Default);
        }
    }
}
