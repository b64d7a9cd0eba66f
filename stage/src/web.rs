//! Browser bindings: animation-frame scheduling, the DOM stage container and
//! DOM event conversion.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_render::{AnimationFrame, request_animation_frame};
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent};

use crate::container::{Cursor, StageContainer};
use crate::geom::Delta;
use crate::input::{Button, Key, Modifiers, PointerEvent};
use crate::scheduler::{FrameCallback, FrameHandle, FrameScheduler};

/// Scheduler backed by `requestAnimationFrame`.
///
/// Dropping the scheduler cancels every frame still queued.
#[derive(Default)]
pub struct RafScheduler {
    frames: Rc<RefCell<HashMap<FrameHandle, AnimationFrame>>>,
    next_id: Cell<u64>,
}

impl RafScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(handle.0.wrapping_add(1));
        let frames = Rc::downgrade(&self.frames);
        let frame = request_animation_frame(move |_timestamp| {
            if let Some(frames) = frames.upgrade() {
                let fired = frames.borrow_mut().remove(&handle);
                drop(fired);
            }
            callback();
        });
        self.frames.borrow_mut().insert(handle, frame);
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let removed = self.frames.borrow_mut().remove(&handle);
        if removed.is_some() {
            tracing::trace!(%handle, "animation frame cancelled");
        }
    }
}

/// The DOM element hosting the stage; cursor writes go to its inline style.
pub struct HtmlStageContainer {
    element: HtmlElement,
    cursor: Option<Cursor>,
}

impl HtmlStageContainer {
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self { element, cursor: None }
    }

    #[must_use]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl StageContainer for HtmlStageContainer {
    fn set_cursor(&mut self, cursor: Cursor) {
        if let Err(err) = self.element.style().set_property("cursor", cursor.as_css()) {
            tracing::warn!(?err, %cursor, "failed to set stage cursor");
            return;
        }
        self.cursor = Some(cursor);
    }

    fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }
}

fn modifiers_of_mouse(ev: &MouseEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}

/// Convert a DOM pointer/mouse event. Buttons other than primary, middle and
/// secondary yield `None`.
#[must_use]
pub fn pointer_event_from_dom(ev: &MouseEvent) -> Option<PointerEvent> {
    let button = Button::from_dom(ev.button())?;
    Some(PointerEvent {
        button,
        movement: Delta::new(f64::from(ev.movement_x()), f64::from(ev.movement_y())),
        modifiers: modifiers_of_mouse(ev),
    })
}

/// Convert a DOM keydown event into the key and modifiers shortcuts match against.
#[must_use]
pub fn key_from_dom(ev: &KeyboardEvent) -> (Key, Modifiers) {
    let modifiers = Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() };
    (Key(ev.key()), modifiers)
}
