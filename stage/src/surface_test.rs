#![allow(clippy::float_cmp)]

use std::cell::RefCell;

use super::*;
use crate::config::ZoomConfig;
use crate::consts::{CONTROL_GROUP, MIN_ZOOM_SCALE, MOVE_TOOL_ID, PAN_ZOOM_TOOL_ID};
use crate::container::{Cursor, HeadlessContainer};
use crate::geom::{Point, Size};
use crate::input::Button;
use crate::pan_zoom::{PanMode, PanZoomTool};
use crate::scheduler::ManualScheduler;
use crate::viewport::{ImageViewport, Viewport, ViewportChange, ZoomDirection};

// =============================================================
// Helpers
// =============================================================

struct Fixture {
    scheduler: Rc<ManualScheduler>,
    viewport: Rc<RefCell<ImageViewport>>,
    surface: Surface,
}

fn mounted() -> Fixture {
    let scheduler = Rc::new(ManualScheduler::new());
    let mut vp = ImageViewport::with_sizes(ZoomConfig::default(), Size::new(1000.0, 500.0), Size::new(2000.0, 500.0)).unwrap();
    vp.attach_container(Box::new(HeadlessContainer::new()));
    let viewport = Rc::new(RefCell::new(vp));
    let mut surface = Surface::new(scheduler.clone()).unwrap();
    surface.mount(viewport.clone());
    Fixture { scheduler, viewport, surface }
}

impl Fixture {
    fn position(&self) -> Point {
        self.viewport.borrow().zoom_position()
    }

    fn scale(&self) -> f64 {
        self.viewport.borrow().zoom_scale()
    }

    fn cursor(&self) -> Option<Cursor> {
        self.viewport.borrow_mut().stage_container().and_then(|c| c.cursor())
    }

    fn selected_control(&self) -> Option<&str> {
        self.surface.manager().selected_in_group(CONTROL_GROUP).map(|t| t.id().as_str())
    }
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Modifiers::default() }
}

// =============================================================
// Construction and mounting
// =============================================================

#[test]
fn new_registers_move_then_pan_and_selects_move() {
    let surface = Surface::new(Rc::new(ManualScheduler::new())).unwrap();
    let ids: Vec<&str> = surface.manager().all_tools().iter().map(|t| t.id().as_str()).collect();
    assert_eq!(ids, vec![MOVE_TOOL_ID, PAN_ZOOM_TOOL_ID]);
    assert_eq!(surface.manager().selected_in_group(CONTROL_GROUP).map(|t| t.id().as_str()), Some(MOVE_TOOL_ID));
    assert!(!surface.is_mounted());
}

#[test]
fn mount_applies_selected_cursor() {
    let fx = mounted();
    assert!(fx.surface.is_mounted());
    assert!(fx.surface.viewport().is_some());
    assert_eq!(fx.cursor(), Some(Cursor::Default));
}

#[test]
fn empty_surface_rejects_zoom_actions() {
    let mut surface = Surface::empty(Rc::new(ManualScheduler::new()));
    assert_eq!(surface.perform(&ToolAction::SizeToFit), Err(ToolError::NoPanZoomTool));
    assert_eq!(surface.perform(&ToolAction::SizeToAuto), Err(ToolError::NoPanZoomTool));
    assert_eq!(
        surface.perform(&ToolAction::Toggle(PAN_ZOOM_TOOL_ID.into())),
        Err(ToolError::UnknownTool(PAN_ZOOM_TOOL_ID.into()))
    );
}

// =============================================================
// Drag scenario
// =============================================================

#[test]
fn three_moves_one_frame_one_write() {
    let mut fx = mounted();
    fx.surface.perform(&ToolAction::Zoom(ZoomDirection::In)).unwrap();
    assert!(fx.scale() > 1.0);
    fx.viewport.borrow_mut().set_zoom_position(10.0, 20.0);

    let writes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&writes);
    let _sub = fx.viewport.borrow().subscribe(move |change| {
        if let ViewportChange::Moved { position } = change {
            sink.borrow_mut().push(*position);
        }
    });

    fx.surface.select_tool(PAN_ZOOM_TOOL_ID, true).unwrap();
    fx.surface.pointer_down(&PointerEvent::button(Button::Primary));
    fx.surface.pointer_move(&PointerEvent::movement(5.0, 0.0));
    fx.surface.pointer_move(&PointerEvent::movement(3.0, 2.0));
    fx.surface.pointer_move(&PointerEvent::movement(-1.0, 4.0));
    assert_eq!(fx.scheduler.requested(), 1);
    assert_eq!(fx.position(), Point::new(10.0, 20.0));

    assert_eq!(fx.scheduler.run_frame(), 1);
    assert_eq!(fx.position(), Point::new(17.0, 26.0));
    assert_eq!(*writes.borrow(), vec![Point::new(17.0, 26.0)]);

    fx.surface.pointer_up(&PointerEvent::button(Button::Primary));
    assert_eq!(writes.borrow().len(), 1);
    assert_eq!(fx.cursor(), Some(Cursor::Grab));
}

#[test]
fn release_before_frame_loses_nothing() {
    let mut fx = mounted();
    fx.surface.perform(&ToolAction::Zoom(ZoomDirection::In)).unwrap();
    fx.viewport.borrow_mut().set_zoom_position(0.0, 0.0);
    fx.surface.select_tool(PAN_ZOOM_TOOL_ID, true).unwrap();

    fx.surface.pointer_down(&PointerEvent::button(Button::Primary));
    fx.surface.pointer_move(&PointerEvent::movement(4.0, 4.0));
    fx.surface.pointer_up(&PointerEvent::button(Button::Primary));

    assert_eq!(fx.position(), Point::new(4.0, 4.0));
    assert_eq!(fx.scheduler.pending(), 0);
    assert_eq!(fx.scheduler.run_frame(), 0);
    assert_eq!(fx.position(), Point::new(4.0, 4.0));
}

#[test]
fn no_pan_at_natural_scale() {
    let mut fx = mounted();
    fx.surface.perform(&ToolAction::SizeToOriginal).unwrap();
    fx.surface.select_tool(PAN_ZOOM_TOOL_ID, true).unwrap();
    let before = fx.position();

    fx.surface.pointer_down(&PointerEvent::button(Button::Primary));
    fx.surface.pointer_move(&PointerEvent::movement(30.0, 30.0));
    fx.surface.pointer_up(&PointerEvent::button(Button::Primary));
    assert_eq!(fx.position(), before);
    assert_eq!(fx.scheduler.requested(), 0);
}

#[test]
fn unmount_flushes_and_cancels() {
    let mut fx = mounted();
    fx.surface.perform(&ToolAction::Zoom(ZoomDirection::In)).unwrap();
    fx.viewport.borrow_mut().set_zoom_position(1.0, 1.0);
    fx.surface.select_tool(PAN_ZOOM_TOOL_ID, true).unwrap();
    fx.surface.pointer_down(&PointerEvent::button(Button::Primary));
    fx.surface.pointer_move(&PointerEvent::movement(2.0, 3.0));

    fx.surface.unmount();
    assert!(!fx.surface.is_mounted());
    assert_eq!(fx.scheduler.pending(), 0);
    assert_eq!(fx.position(), Point::new(3.0, 4.0));
    assert_eq!(fx.surface.manager().pan_zoom().map(PanZoomTool::mode), Some(PanMode::Viewing));

    fx.surface.unmount();
    assert_eq!(fx.position(), Point::new(3.0, 4.0));
}

// =============================================================
// Zoom and fit
// =============================================================

#[test]
fn zoom_out_saturates_at_minimum() {
    let mut fx = mounted();
    let zooms = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&zooms);
    let _sub = fx.viewport.borrow().subscribe(move |change| {
        if matches!(change, ViewportChange::Zoomed { .. }) {
            *sink.borrow_mut() += 1;
        }
    });

    for _ in 0..100 {
        fx.surface.perform(&ToolAction::Zoom(ZoomDirection::Out)).unwrap();
    }
    assert_eq!(fx.scale(), MIN_ZOOM_SCALE);
    let settled = *zooms.borrow();

    fx.surface.perform(&ToolAction::Zoom(ZoomDirection::Out)).unwrap();
    assert_eq!(fx.scale(), MIN_ZOOM_SCALE);
    assert_eq!(*zooms.borrow(), settled);
}

#[test]
fn fit_and_original_centre_content() {
    let mut fx = mounted();
    fx.surface.perform(&ToolAction::SizeToFit).unwrap();
    assert_eq!(fx.scale(), 0.5);
    assert_eq!(fx.position(), Point::new(0.0, 125.0));

    fx.surface.perform(&ToolAction::SizeToOriginal).unwrap();
    assert_eq!(fx.scale(), 1.0);
    assert_eq!(fx.position(), Point::new(-500.0, 0.0));
}

#[test]
fn auto_size_fits_wide_content_and_keeps_small_content_natural() {
    let mut fx = mounted();
    fx.surface.perform(&ToolAction::SizeToAuto).unwrap();
    assert_eq!(fx.scale(), 0.5);
    assert_eq!(fx.position(), Point::new(0.0, 125.0));

    fx.viewport.borrow_mut().set_content_size(Size::new(500.0, 250.0));
    fx.surface.perform(&ToolAction::SizeToAuto).unwrap();
    assert_eq!(fx.scale(), 1.0);
    assert_eq!(fx.position(), Point::new(250.0, 125.0));
}

// =============================================================
// Actions and shortcuts
// =============================================================

#[test]
fn toggle_flips_selection() {
    let mut fx = mounted();
    let pan = ToolAction::Toggle(PAN_ZOOM_TOOL_ID.into());
    fx.surface.perform(&pan).unwrap();
    assert_eq!(fx.selected_control(), Some(PAN_ZOOM_TOOL_ID));
    assert_eq!(fx.cursor(), Some(Cursor::Grab));

    fx.surface.perform(&pan).unwrap();
    assert_eq!(fx.selected_control(), None);
}

#[test]
fn key_down_resolves_default_bindings() {
    let mut fx = mounted();
    let action = fx.surface.key_down(&Key("h".into()), Modifiers::default()).unwrap();
    assert_eq!(action, Some(ToolAction::Toggle(PAN_ZOOM_TOOL_ID.into())));
    assert_eq!(fx.selected_control(), Some(PAN_ZOOM_TOOL_ID));

    let action = fx.surface.key_down(&Key("v".into()), Modifiers::default()).unwrap();
    assert_eq!(action, Some(ToolAction::Toggle(MOVE_TOOL_ID.into())));
    assert_eq!(fx.selected_control(), Some(MOVE_TOOL_ID));

    fx.surface.key_down(&Key("!".into()), shift()).unwrap();
    assert_eq!(fx.scale(), 0.5);
}

#[test]
fn key_down_ignores_unbound_keys() {
    let mut fx = mounted();
    assert_eq!(fx.surface.key_down(&Key("q".into()), Modifiers::default()), Ok(None));
    assert_eq!(fx.selected_control(), Some(MOVE_TOOL_ID));
}

#[test]
fn bindings_expose_default_table() {
    let fx = mounted();
    assert_eq!(fx.surface.bindings().len(), 6);
    assert_eq!(fx.surface.bindings()[1].shortcut.to_string(), "h");
}
