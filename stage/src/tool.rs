//! Tool identity, exclusivity groups and the tagged tool variants.
//!
//! A [`Tool`] carries what every tool shares (id, group, selection flag,
//! advisory shortcut) and a [`ToolKind`] with the variant-specific state.
//! The manager dispatches lifecycle hooks and pointer input through the
//! match in this module; there is no trait object per tool.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use std::fmt;
use std::rc::Rc;

use crate::consts::{CONTROL_GROUP, MOVE_TOOL_ID, PAN_ZOOM_TOOL_ID};
use crate::input::PointerEvent;
use crate::move_tool::MoveTool;
use crate::pan_zoom::PanZoomTool;
use crate::scheduler::FrameScheduler;
use crate::shortcuts::Shortcut;
use crate::viewport::SharedViewport;

/// Stable identifier of a registered tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolId(String);

impl ToolId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ToolId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exclusivity partition: at most one tool per group is selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolGroup(String);

impl ToolGroup {
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self(group.into())
    }

    /// The group shared by the viewport control tools.
    #[must_use]
    pub fn control() -> Self {
        Self::new(CONTROL_GROUP)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant-specific tool state.
pub enum ToolKind {
    /// Passive selection tool.
    Move(MoveTool),
    /// Drag-to-pan and zoom controls.
    PanZoom(PanZoomTool),
}

/// A registered, selectable unit of input handling.
pub struct Tool {
    id: ToolId,
    group: ToolGroup,
    selected: bool,
    shortcut: Option<Shortcut>,
    kind: ToolKind,
}

impl Tool {
    #[must_use]
    pub fn new(id: impl Into<ToolId>, group: ToolGroup, kind: ToolKind) -> Self {
        Self { id: id.into(), group, selected: false, shortcut: None, kind }
    }

    #[must_use]
    pub fn with_shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// The default move tool: control group, shortcut `V`.
    #[must_use]
    pub fn move_tool() -> Self {
        Self::new(MOVE_TOOL_ID, ToolGroup::control(), ToolKind::Move(MoveTool::new()))
            .with_shortcut(Shortcut::key("v"))
    }

    /// The default pan/zoom tool: control group, shortcut `H`.
    #[must_use]
    pub fn pan_zoom(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self::new(PAN_ZOOM_TOOL_ID, ToolGroup::control(), ToolKind::PanZoom(PanZoomTool::new(scheduler)))
            .with_shortcut(Shortcut::key("h"))
    }

    #[must_use]
    pub fn id(&self) -> &ToolId {
        &self.id
    }

    #[must_use]
    pub fn group(&self) -> &ToolGroup {
        &self.group
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub fn shortcut(&self) -> Option<&Shortcut> {
        self.shortcut.as_ref()
    }

    #[must_use]
    pub fn kind(&self) -> &ToolKind {
        &self.kind
    }

    /// Name a toolbar uses to pick this tool out of its group.
    #[must_use]
    pub fn tool_name(&self) -> &'static str {
        match self.kind {
            ToolKind::Move(_) => "MoveTool",
            ToolKind::PanZoom(_) => "ZoomPanTool",
        }
    }

    /// Whether annotation regions react to pointer input while this tool is selected.
    #[must_use]
    pub fn can_interact_with_regions(&self) -> bool {
        matches!(self.kind, ToolKind::Move(_))
    }

    #[must_use]
    pub fn as_pan_zoom(&self) -> Option<&PanZoomTool> {
        match &self.kind {
            ToolKind::PanZoom(tool) => Some(tool),
            ToolKind::Move(_) => None,
        }
    }

    pub fn as_pan_zoom_mut(&mut self) -> Option<&mut PanZoomTool> {
        match &mut self.kind {
            ToolKind::PanZoom(tool) => Some(tool),
            ToolKind::Move(_) => None,
        }
    }

    // --- Manager-only mutators and hooks ---

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn activate(&mut self) {
        match &mut self.kind {
            ToolKind::Move(tool) => tool.activate(),
            ToolKind::PanZoom(tool) => tool.update_cursor(true),
        }
    }

    pub(crate) fn deactivate(&mut self) {
        match &mut self.kind {
            ToolKind::Move(_) => {}
            ToolKind::PanZoom(tool) => tool.deactivate(),
        }
    }

    /// Re-apply the selected tool's baseline cursor (surface became available).
    pub(crate) fn update_cursor(&mut self) {
        let selected = self.selected;
        match &mut self.kind {
            ToolKind::Move(tool) => {
                if selected {
                    tool.activate();
                }
            }
            ToolKind::PanZoom(tool) => tool.update_cursor(selected),
        }
    }

    /// Cancel queued work and flush pending state before the surface goes away.
    pub(crate) fn teardown(&mut self) {
        if let ToolKind::PanZoom(tool) = &mut self.kind {
            tool.teardown();
        }
    }

    pub(crate) fn bind_viewport(&mut self, viewport: &SharedViewport) {
        match &mut self.kind {
            ToolKind::Move(tool) => tool.bind_viewport(viewport),
            ToolKind::PanZoom(tool) => tool.bind_viewport(viewport),
        }
    }

    pub(crate) fn unbind_viewport(&mut self) {
        match &mut self.kind {
            ToolKind::Move(tool) => tool.unbind_viewport(),
            ToolKind::PanZoom(tool) => tool.unbind_viewport(),
        }
    }

    pub(crate) fn pointer_down(&mut self, event: &PointerEvent) {
        if let ToolKind::PanZoom(tool) = &mut self.kind {
            tool.pointer_down(event);
        }
    }

    pub(crate) fn pointer_move(&mut self, event: &PointerEvent) {
        if let ToolKind::PanZoom(tool) = &mut self.kind {
            tool.pointer_move(event);
        }
    }

    pub(crate) fn pointer_up(&mut self, event: &PointerEvent) {
        if let ToolKind::PanZoom(tool) = &mut self.kind {
            tool.pointer_up(event);
        }
    }
}
