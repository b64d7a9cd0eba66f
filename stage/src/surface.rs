//! Per-surface owner of the viewport, the tool manager and the frame scheduler.
//!
//! The host creates one [`Surface`] per rendered annotation stage, mounts a
//! viewport once the stage element exists, forwards DOM pointer and keyboard
//! events, and unmounts when the stage goes away.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::rc::Rc;

use crate::input::{Key, Modifiers, PointerEvent};
use crate::manager::{ToolError, ToolManager};
use crate::scheduler::FrameScheduler;
use crate::shortcuts::{Binding, ToolAction, default_bindings, resolve};
use crate::tool::Tool;
use crate::viewport::SharedViewport;

/// One annotation stage: its tools, its shortcut table and, while mounted, its viewport.
pub struct Surface {
    scheduler: Rc<dyn FrameScheduler>,
    manager: ToolManager,
    viewport: Option<SharedViewport>,
    bindings: Vec<Binding>,
}

impl Surface {
    /// Surface with the default control tools, move tool selected.
    ///
    /// # Errors
    ///
    /// Propagates [`ToolError`] from registration.
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Result<Self, ToolError> {
        let mut surface = Self::empty(scheduler);
        surface.manager.register(Tool::move_tool())?;
        surface.manager.register(Tool::pan_zoom(Rc::clone(&surface.scheduler)))?;
        let first = surface.manager.control_tools().next().map(|t| t.id().as_str().to_owned());
        if let Some(id) = first {
            surface.manager.select_tool(&id, true)?;
        }
        Ok(surface)
    }

    /// Surface with no tools registered.
    #[must_use]
    pub fn empty(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self { scheduler, manager: ToolManager::new(), viewport: None, bindings: default_bindings() }
    }

    // --- Mounting ---

    /// Bind `viewport` to every tool and refresh cursors. Remounting replaces the previous viewport.
    pub fn mount(&mut self, viewport: SharedViewport) {
        self.manager.bind_viewport(&viewport);
        self.viewport = Some(viewport);
        tracing::debug!(tools = self.manager.all_tools().len(), "surface mounted");
    }

    /// Cancel queued frames, flush pending pans, then detach the viewport.
    pub fn unmount(&mut self) {
        if self.viewport.is_none() {
            return;
        }
        self.manager.teardown();
        self.manager.unbind_viewport();
        self.viewport = None;
        tracing::debug!("surface unmounted");
    }

    /// Whether a viewport is currently mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    /// The mounted viewport, if any.
    #[must_use]
    pub fn viewport(&self) -> Option<&SharedViewport> {
        self.viewport.as_ref()
    }

    // --- Input ---

    /// Forward a stage pointer-down to the selected tools.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        self.manager.pointer_down(event);
    }

    /// Forward pointer movement to the selected tools.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        self.manager.pointer_move(event);
    }

    /// Forward a pointer-up to the selected tools.
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        self.manager.pointer_up(event);
    }

    /// Select or deselect a tool by id.
    ///
    /// # Errors
    ///
    /// [`ToolError::UnknownTool`] if no tool has this id.
    pub fn select_tool(&mut self, id: &str, active: bool) -> Result<(), ToolError> {
        self.manager.select_tool(id, active)
    }

    /// Execute a toolbar or shortcut action.
    ///
    /// # Errors
    ///
    /// [`ToolError::UnknownTool`] for a toggle of an unregistered tool,
    /// [`ToolError::NoPanZoomTool`] for zoom actions without a pan/zoom tool.
    pub fn perform(&mut self, action: &ToolAction) -> Result<(), ToolError> {
        match action {
            ToolAction::Toggle(id) => {
                let selected = self
                    .manager
                    .tool(id.as_str())
                    .map(Tool::is_selected)
                    .ok_or_else(|| ToolError::UnknownTool(id.to_string()))?;
                self.manager.select_tool(id.as_str(), !selected)
            }
            ToolAction::Zoom(direction) => {
                self.manager.pan_zoom_mut().ok_or(ToolError::NoPanZoomTool)?.handle_zoom(*direction);
                Ok(())
            }
            ToolAction::SizeToFit => {
                self.manager.pan_zoom_mut().ok_or(ToolError::NoPanZoomTool)?.size_to_fit();
                Ok(())
            }
            ToolAction::SizeToOriginal => {
                self.manager.pan_zoom_mut().ok_or(ToolError::NoPanZoomTool)?.size_to_original();
                Ok(())
            }
            ToolAction::SizeToAuto => {
                self.manager.pan_zoom_mut().ok_or(ToolError::NoPanZoomTool)?.size_to_auto();
                Ok(())
            }
        }
    }

    /// Resolve a key event against the bindings and perform the match.
    ///
    /// # Errors
    ///
    /// Propagates [`Surface::perform`] errors.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> Result<Option<ToolAction>, ToolError> {
        let Some(action) = resolve(&self.bindings, key, modifiers).cloned() else {
            return Ok(None);
        };
        tracing::debug!(key = %key.0, ?action, "shortcut matched");
        self.perform(&action)?;
        Ok(Some(action))
    }

    /// Keyboard shortcuts resolved by [`Surface::key_down`].
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// The tool registry.
    #[must_use]
    pub fn manager(&self) -> &ToolManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ToolManager {
        &mut self.manager
    }

    /// Frame scheduler shared with the pan/zoom tool.
    #[must_use]
    pub fn scheduler(&self) -> &Rc<dyn FrameScheduler> {
        &self.scheduler
    }
}
