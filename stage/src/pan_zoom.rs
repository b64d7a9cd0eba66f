//! Pan/zoom tool: drag-to-pan with frame-coalesced viewport writes.
//!
//! STATE MACHINE
//! =============
//! `Viewing` is the rest state. Pointer-down with any button except the
//! secondary one enters `Moving`. While `Moving` and zoomed in past the
//! natural size, every pointer-move adds its movement to a pending delta and
//! makes sure exactly one animation frame is queued. When that frame fires the
//! whole pending delta is written to the viewport in a single
//! `set_zoom_position` call. Pointer-up returns to `Viewing`, cancels the
//! queued frame and writes whatever is still pending right away, so the final
//! position always reflects every recorded movement.
//!
//! Pointer-move events arrive far more often than the display refreshes;
//! coalescing keeps the viewport (and whatever re-renders on its changes) to
//! one write per frame.
//!
//! Movements that cancel out leave the queued frame in place with a zero
//! pending delta. That frame then writes nothing, so a queued frame only
//! implies a non-zero delta at the moment it was requested.
//!
//! Viewport writes go through the shared `RefCell`, and viewport observers run
//! while it is mutably borrowed. See
//! [`ImageViewport::subscribe`](crate::viewport::ImageViewport::subscribe).
//!
//! Before a viewport is bound every operation is a no-op.

#[cfg(test)]
#[path = "pan_zoom_test.rs"]
mod pan_zoom_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::consts::ORIGINAL_ZOOM_SCALE;
use crate::container::Cursor;
use crate::geom::Delta;
use crate::input::{Button, PointerEvent};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::viewport::{SharedViewport, ZoomDirection, write_cursor};

/// Drag state of the pan tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanMode {
    /// Pointer up, or down but not dragging yet.
    #[default]
    Viewing,
    /// A drag is in progress.
    Moving,
}

#[derive(Debug, Default)]
struct DragState {
    mode: PanMode,
    /// Movement recorded since the last flush.
    pending: Delta,
    /// Frame queued to flush `pending`.
    scheduled: Option<FrameHandle>,
    /// Bumped per scheduled frame; a callback only flushes for its own generation.
    generation: u64,
}

/// Hand tool: drags the content around when zoomed in and forwards the
/// toolbar zoom and sizing operations to the bound viewport.
pub struct PanZoomTool {
    scheduler: Rc<dyn FrameScheduler>,
    viewport: Option<SharedViewport>,
    drag: Rc<RefCell<DragState>>,
}

impl PanZoomTool {
    #[must_use]
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self { scheduler, viewport: None, drag: Rc::new(RefCell::new(DragState::default())) }
    }

    // --- Binding ---

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.viewport.is_some()
    }

    /// Attach the tool to a viewport. A drag in progress on a previous viewport is finished first.
    pub fn bind_viewport(&mut self, viewport: &SharedViewport) {
        if let Some(current) = &self.viewport {
            if Rc::ptr_eq(current, viewport) {
                return;
            }
            self.finish_drag();
        }
        self.viewport = Some(Rc::clone(viewport));
    }

    /// Finish any drag and detach from the viewport.
    pub fn unbind_viewport(&mut self) {
        self.finish_drag();
        self.viewport = None;
    }

    // --- State queries ---

    #[must_use]
    pub fn mode(&self) -> PanMode {
        self.drag.borrow().mode
    }

    /// Movement recorded but not yet written to the viewport.
    #[must_use]
    pub fn pending_delta(&self) -> Delta {
        self.drag.borrow().pending
    }

    #[must_use]
    pub fn scheduled_frame(&self) -> Option<FrameHandle> {
        self.drag.borrow().scheduled
    }

    // --- Pointer input ---

    /// Start a drag unless the secondary button was pressed.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        let Some(viewport) = &self.viewport else {
            return;
        };
        if event.button == Button::Secondary {
            return;
        }
        self.drag.borrow_mut().mode = PanMode::Moving;
        write_cursor(&mut *viewport.borrow_mut(), Cursor::Grabbing);
    }

    /// Record movement while dragging and queue one flush frame per burst.
    /// Ignored at or below natural size.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        let Some(viewport) = &self.viewport else {
            return;
        };
        if viewport.borrow().zoom_scale() <= ORIGINAL_ZOOM_SCALE {
            return;
        }
        {
            let mut state = self.drag.borrow_mut();
            if state.mode != PanMode::Moving {
                return;
            }
            state.pending += event.movement;
            if state.scheduled.is_none() && !state.pending.is_zero() {
                self.schedule_flush(&mut state, viewport);
            }
        }
        write_cursor(&mut *viewport.borrow_mut(), Cursor::Grabbing);
    }

    /// End the drag and write any pending movement immediately.
    pub fn pointer_up(&mut self, _event: &PointerEvent) {
        let Some(viewport) = &self.viewport else {
            return;
        };
        write_cursor(&mut *viewport.borrow_mut(), Cursor::Grab);
        self.finish_drag();
    }

    // --- Toolbar operations ---

    /// Zoom one step in `direction`, anchored at the view centre.
    pub fn handle_zoom(&mut self, direction: ZoomDirection) {
        if let Some(viewport) = &self.viewport {
            viewport.borrow_mut().handle_zoom(direction);
        }
    }

    pub fn size_to_fit(&mut self) {
        if let Some(viewport) = &self.viewport {
            viewport.borrow_mut().size_to_fit();
        }
    }

    pub fn size_to_original(&mut self) {
        if let Some(viewport) = &self.viewport {
            viewport.borrow_mut().size_to_original();
        }
    }

    /// Fit when the content overflows the stage, natural size otherwise.
    pub fn size_to_auto(&mut self) {
        if let Some(viewport) = &self.viewport {
            viewport.borrow_mut().size_to_auto();
        }
    }

    /// Show the open-hand cursor while selected.
    pub fn update_cursor(&mut self, selected: bool) {
        if !selected {
            return;
        }
        if let Some(viewport) = &self.viewport {
            write_cursor(&mut *viewport.borrow_mut(), Cursor::Grab);
        }
    }

    // --- Lifecycle ---

    /// Losing selection ends the drag the same way a pointer-up does.
    pub fn deactivate(&mut self) {
        self.finish_drag();
    }

    /// Cancel the queued frame and write the pending delta (surface unmount).
    pub fn teardown(&mut self) {
        self.finish_drag();
    }

    fn finish_drag(&self) {
        let delta = {
            let mut state = self.drag.borrow_mut();
            state.mode = PanMode::Viewing;
            if let Some(handle) = state.scheduled.take() {
                self.scheduler.cancel_frame(handle);
            }
            state.pending.take()
        };
        if let Some(viewport) = &self.viewport {
            apply_pan(viewport, delta);
        }
    }

    fn schedule_flush(&self, state: &mut DragState, viewport: &SharedViewport) {
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        let drag = Rc::downgrade(&self.drag);
        let target = Rc::downgrade(viewport);
        let handle = self.scheduler.request_frame(Box::new(move || {
            let (Some(drag), Some(viewport)) = (drag.upgrade(), target.upgrade()) else {
                return;
            };
            let delta = {
                let mut state = drag.borrow_mut();
                if state.scheduled.is_none() || state.generation != generation {
                    return;
                }
                state.scheduled = None;
                state.pending.take()
            };
            apply_pan(&viewport, delta);
        }));
        state.scheduled = Some(handle);
    }
}

impl Drop for PanZoomTool {
    fn drop(&mut self) {
        let Ok(mut state) = self.drag.try_borrow_mut() else {
            return;
        };
        if let Some(handle) = state.scheduled.take() {
            self.scheduler.cancel_frame(handle);
        }
        let delta = state.pending.take();
        drop(state);
        if delta.is_zero() {
            return;
        }
        if let Some(viewport) = &self.viewport
            && let Ok(mut viewport) = viewport.try_borrow_mut()
        {
            let target = viewport.zoom_position().offset(delta);
            viewport.set_zoom_position(target.x, target.y);
        }
    }
}

/// Write an accumulated delta to the viewport in one mutation.
fn apply_pan(viewport: &SharedViewport, delta: Delta) {
    if delta.is_zero() {
        return;
    }
    let mut viewport = viewport.borrow_mut();
    let target = viewport.zoom_position().offset(delta);
    tracing::trace!(dx = delta.dx, dy = delta.dy, x = target.x, y = target.y, "flushing pan delta");
    viewport.set_zoom_position(target.x, target.y);
}
