//! Tool registration, group exclusivity and pointer routing.
//!
//! DESIGN
//! ======
//! The manager is the only writer of `Tool::selected`. Keeping at most one
//! selected tool per group is what stops two control tools from writing the
//! same viewport transform; there are no locks because there is no
//! parallelism.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::rc::Rc;

use crate::consts::CONTROL_GROUP;
use crate::input::PointerEvent;
use crate::notify::{Observers, Subscription};
use crate::pan_zoom::PanZoomTool;
use crate::tool::{Tool, ToolId};
use crate::viewport::SharedViewport;

/// Error returned by tool registration and selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// A tool with the same id is already registered.
    #[error("tool already registered: {0}")]
    DuplicateTool(ToolId),
    /// No registered tool has this id.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// A zoom/fit action was requested but no pan/zoom tool is registered.
    #[error("no pan/zoom tool registered")]
    NoPanZoomTool,
}

/// Change published to manager observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolEvent {
    /// A tool's selection flag changed.
    Selected { id: ToolId, selected: bool },
}

/// Ordered set of tools for one surface.
#[derive(Default)]
pub struct ToolManager {
    tools: Vec<Tool>,
    viewport: Option<SharedViewport>,
    observers: Observers<ToolEvent>,
}

impl ToolManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Tools registered after a viewport is bound are bound immediately.
    ///
    /// # Errors
    ///
    /// [`ToolError::DuplicateTool`] if the id is taken.
    pub fn register(&mut self, mut tool: Tool) -> Result<(), ToolError> {
        if self.index_of(tool.id().as_str()).is_some() {
            tracing::warn!(id = %tool.id(), "rejected duplicate tool registration");
            return Err(ToolError::DuplicateTool(tool.id().clone()));
        }
        if let Some(viewport) = &self.viewport {
            tool.bind_viewport(viewport);
        }
        tracing::debug!(id = %tool.id(), group = %tool.group(), "tool registered");
        self.tools.push(tool);
        Ok(())
    }

    /// Select or deselect a tool.
    ///
    /// Selecting deselects every other tool of the same group first. Hooks run
    /// only when a tool's flag actually flips.
    ///
    /// # Errors
    ///
    /// [`ToolError::UnknownTool`] if no tool has this id.
    pub fn select_tool(&mut self, id: &str, active: bool) -> Result<(), ToolError> {
        let index = self.index_of(id).ok_or_else(|| ToolError::UnknownTool(id.to_owned()))?;

        if active {
            let group = self.tools[index].group().clone();
            for (i, tool) in self.tools.iter_mut().enumerate() {
                if i == index || !tool.is_selected() || *tool.group() != group {
                    continue;
                }
                tool.set_selected(false);
                tool.deactivate();
                tracing::debug!(id = %tool.id(), "tool deselected");
                self.observers.notify(&ToolEvent::Selected { id: tool.id().clone(), selected: false });
            }
        }

        let tool = &mut self.tools[index];
        if tool.is_selected() == active {
            return Ok(());
        }
        tool.set_selected(active);
        if active {
            tool.activate();
        } else {
            tool.deactivate();
        }
        tracing::debug!(id = %tool.id(), selected = active, "tool selection changed");
        self.observers.notify(&ToolEvent::Selected { id: tool.id().clone(), selected: active });
        Ok(())
    }

    /// Registered tools in registration order.
    #[must_use]
    pub fn all_tools(&self) -> &[Tool] {
        &self.tools
    }

    #[must_use]
    pub fn tool(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id().as_str() == id)
    }

    pub fn tool_mut(&mut self, id: &str) -> Option<&mut Tool> {
        self.tools.iter_mut().find(|t| t.id().as_str() == id)
    }

    /// Tools of the `control` group, in registration order.
    pub fn control_tools(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter().filter(|t| t.group().as_str() == CONTROL_GROUP)
    }

    /// First tool with this [`Tool::tool_name`].
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.tool_name() == name)
    }

    /// The selected tool of `group`, if any.
    #[must_use]
    pub fn selected_in_group(&self, group: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.is_selected() && t.group().as_str() == group)
    }

    /// First registered pan/zoom tool.
    #[must_use]
    pub fn pan_zoom(&self) -> Option<&PanZoomTool> {
        self.tools.iter().find_map(Tool::as_pan_zoom)
    }

    pub fn pan_zoom_mut(&mut self) -> Option<&mut PanZoomTool> {
        self.tools.iter_mut().find_map(Tool::as_pan_zoom_mut)
    }

    // --- Viewport binding ---

    /// Bind every tool (current and future) to `viewport` and refresh selected cursors.
    pub fn bind_viewport(&mut self, viewport: &SharedViewport) {
        for tool in &mut self.tools {
            tool.bind_viewport(viewport);
        }
        self.viewport = Some(Rc::clone(viewport));
        for tool in self.tools.iter_mut().filter(|t| t.is_selected()) {
            tool.update_cursor();
        }
    }

    /// Finish in-flight drags and detach every tool.
    pub fn unbind_viewport(&mut self) {
        for tool in &mut self.tools {
            tool.unbind_viewport();
        }
        self.viewport = None;
    }

    /// Tear down every tool: queued frames are cancelled and pending deltas written.
    pub fn teardown(&mut self) {
        for tool in &mut self.tools {
            tool.teardown();
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.viewport.is_some()
    }

    // --- Pointer routing ---

    /// Route a pointer-down to the selected tools, in registration order.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        for tool in self.tools.iter_mut().filter(|t| t.is_selected()) {
            tool.pointer_down(event);
        }
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        for tool in self.tools.iter_mut().filter(|t| t.is_selected()) {
            tool.pointer_move(event);
        }
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) {
        for tool in self.tools.iter_mut().filter(|t| t.is_selected()) {
            tool.pointer_up(event);
        }
    }

    /// Listen for selection changes.
    pub fn subscribe(&self, listener: impl Fn(&ToolEvent) + 'static) -> Subscription<ToolEvent> {
        self.observers.subscribe(listener)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.tools.iter().position(|t| t.id().as_str() == id)
    }
}
