use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn counter_callback(counter: &Rc<Cell<u32>>) -> FrameCallback {
    let counter = Rc::clone(counter);
    Box::new(move || counter.set(counter.get() + 1))
}

#[test]
fn request_does_not_run_synchronously() {
    let sched = ManualScheduler::new();
    let hits = Rc::new(Cell::new(0));
    sched.request_frame(counter_callback(&hits));
    assert_eq!(hits.get(), 0);
    assert_eq!(sched.pending(), 1);
}

#[test]
fn run_frame_fires_each_callback_once() {
    let sched = ManualScheduler::new();
    let hits = Rc::new(Cell::new(0));
    sched.request_frame(counter_callback(&hits));
    sched.request_frame(counter_callback(&hits));
    assert_eq!(sched.run_frame(), 2);
    assert_eq!(hits.get(), 2);
    assert_eq!(sched.run_frame(), 0);
    assert_eq!(hits.get(), 2);
}

#[test]
fn handles_are_unique() {
    let sched = ManualScheduler::new();
    let a = sched.request_frame(Box::new(|| {}));
    let b = sched.request_frame(Box::new(|| {}));
    assert_ne!(a, b);
}

#[test]
fn cancel_prevents_callback() {
    let sched = ManualScheduler::new();
    let hits = Rc::new(Cell::new(0));
    let handle = sched.request_frame(counter_callback(&hits));
    sched.cancel_frame(handle);
    assert!(!sched.is_pending(handle));
    sched.run_frame();
    assert_eq!(hits.get(), 0);
    assert_eq!(sched.cancelled(), 1);
}

#[test]
fn cancel_twice_is_noop() {
    let sched = ManualScheduler::new();
    let handle = sched.request_frame(Box::new(|| {}));
    sched.cancel_frame(handle);
    sched.cancel_frame(handle);
    assert_eq!(sched.cancelled(), 1);
}

#[test]
fn cancel_after_fire_is_noop() {
    let sched = ManualScheduler::new();
    let hits = Rc::new(Cell::new(0));
    let handle = sched.request_frame(counter_callback(&hits));
    sched.run_frame();
    sched.cancel_frame(handle);
    sched.run_frame();
    assert_eq!(hits.get(), 1);
    assert_eq!(sched.cancelled(), 0);
}

#[test]
fn cancel_unknown_handle_is_noop() {
    let sched = ManualScheduler::new();
    sched.cancel_frame(FrameHandle(99));
    assert_eq!(sched.cancelled(), 0);
}

#[test]
fn callbacks_requested_during_frame_wait_for_next_frame() {
    let sched = Rc::new(ManualScheduler::new());
    let hits = Rc::new(Cell::new(0));
    let inner_sched = Rc::clone(&sched);
    let inner_hits = Rc::clone(&hits);
    sched.request_frame(Box::new(move || {
        inner_sched.request_frame(counter_callback(&inner_hits));
    }));
    assert_eq!(sched.run_frame(), 1);
    assert_eq!(hits.get(), 0);
    assert_eq!(sched.pending(), 1);
    assert_eq!(sched.run_frame(), 1);
    assert_eq!(hits.get(), 1);
}

#[test]
fn requested_counts_all_requests() {
    let sched = ManualScheduler::new();
    let h = sched.request_frame(Box::new(|| {}));
    sched.cancel_frame(h);
    sched.request_frame(Box::new(|| {}));
    assert_eq!(sched.requested(), 2);
}

#[test]
fn frame_handle_display() {
    assert_eq!(FrameHandle(4).to_string(), "frame#4");
}
