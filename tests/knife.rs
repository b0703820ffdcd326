//! Knife gesture tests: stroke recording, per-frame highlight, commit on release.

mod common;

use common::*;
use slint::platform::PointerEventButton;
use slint_wire_tools::{
    EditorContext, FrameScheduler, Graph, GraphStore, KnifeController, ManualFrames, PointerEvent, PresentationChange,
    ScreenPoint, Transaction, TransactionKind, Viewport, WireId,
};
use std::rc::Rc;

struct Setup {
    ctx: EditorContext<Graph>,
    host: Rc<FakeHost>,
    frames: ManualFrames,
    knife: KnifeController<Graph>,
}

fn setup() -> Setup {
    let ctx = knife_context();
    let host = FakeHost::new();
    let frames = ManualFrames::new();
    let knife = KnifeController::new(ctx.clone(), host.clone(), frames.clone());
    Setup { ctx, host, frames, knife }
}

/// Press at the first point, move through the rest, release at the last.
/// Runs a frame after every move when `run_frames` is set.
fn stroke(s: &Setup, points: &[(f32, f32)], run_frames: bool) {
    let (x, y) = points[0];
    let mut down = knife_press(x, y);
    s.knife.pointer_down(&mut down);
    assert!(down.is_consumed());

    for &(x, y) in &points[1..] {
        let mut event = pointer(x, y);
        s.knife.pointer_move(&mut event);
        assert!(event.is_consumed());
        if run_frames {
            s.frames.run_frame();
        }
    }

    let (x, y) = points[points.len() - 1];
    let mut up = pointer(x, y);
    s.knife.pointer_up(&mut up);
    assert!(up.is_consumed());
}

fn transactions(ctx: &EditorContext<Graph>) -> Vec<Transaction> {
    ctx.store.borrow().transactions().to_vec()
}

fn ids(ids: &[&str]) -> Vec<WireId> {
    ids.iter().map(|id| WireId::from(*id)).collect()
}

#[test]
fn test_stroke_cuts_crossed_wires_in_one_transaction() {
    let s = setup();
    stroke(&s, &[(250.0, -50.0), (250.0, 200.0), (250.0, 500.0)], true);

    assert_eq!(
        transactions(&s.ctx),
        vec![Transaction {
            label: "Cut 2 edges".to_string(),
            kind: TransactionKind::RemoveWires(ids(&["e1", "e3"])),
        }]
    );
    assert_eq!(wire_ids(&s.ctx), vec!["e2"]);
}

#[test]
fn test_single_wire_label() {
    let s = setup();
    stroke(&s, &[(250.0, -50.0), (250.0, 100.0)], false);

    let log = transactions(&s.ctx);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].label, "Cut edge");
    assert_eq!(log[0].kind, TransactionKind::RemoveWires(ids(&["e1"])));
}

#[test]
fn test_cut_set_does_not_depend_on_move_frequency() {
    let sparse = setup();
    stroke(&sparse, &[(250.0, -50.0), (250.0, 500.0)], false);

    let dense = setup();
    let points: Vec<(f32, f32)> = (0..=11).map(|i| (250.0, -50.0 + 50.0 * i as f32)).collect();
    stroke(&dense, &points, true);

    assert_eq!(transactions(&sparse.ctx), transactions(&dense.ctx));
    assert_eq!(wire_ids(&sparse.ctx), vec!["e2"]);
}

#[test]
fn test_press_and_release_without_moving_cuts_nothing() {
    let s = setup();
    // Directly on e1, but a single point is not a stroke
    stroke(&s, &[(250.0, 20.0)], false);

    assert!(transactions(&s.ctx).is_empty());
    assert_eq!(wire_ids(&s.ctx), vec!["e1", "e2", "e3"]);
    assert_eq!(s.host.captured.get(), None);
}

#[test]
fn test_stroke_missing_every_wire_cuts_nothing() {
    let s = setup();
    stroke(&s, &[(450.0, -50.0), (550.0, 500.0)], true);

    assert!(transactions(&s.ctx).is_empty());
    assert_eq!(wire_ids(&s.ctx).len(), 3);
}

#[test]
fn test_highlight_updates_once_per_frame() {
    let s = setup();
    let mut down = knife_press(250.0, -50.0);
    s.knife.pointer_down(&mut down);

    s.knife.pointer_move(&mut pointer(250.0, 100.0));
    assert!(s.ctx.presentation.highlighted().is_empty(), "Hit test waits for the frame");
    assert!(s.frames.is_pending());

    // More moves before the frame: the points are kept, the request coalesces
    s.knife.pointer_move(&mut pointer(250.0, 300.0));
    s.knife.pointer_move(&mut pointer(250.0, 500.0));
    assert_eq!(s.knife.points().len(), 4);

    assert!(s.frames.run_frame());
    assert_eq!(s.ctx.presentation.highlighted(), ids(&["e1", "e3"]));
    assert!(!s.frames.is_pending());
}

#[test]
fn test_overlay_tracks_stroke() {
    let s = setup();
    let changes = record_changes(&s.ctx);

    s.knife.pointer_down(&mut knife_press(250.0, -50.0));
    assert!(s.ctx.presentation.knife_active());
    assert_eq!(s.ctx.presentation.knife_points(), vec![ScreenPoint::new(250.0, -50.0)]);

    s.knife.pointer_move(&mut pointer(250.0, 100.0));
    assert_eq!(
        s.ctx.presentation.knife_path_commands().as_str(),
        "M 250 -50 L 250 100"
    );
    s.frames.run_frame();

    s.knife.pointer_up(&mut pointer(250.0, 100.0));
    assert!(!s.ctx.presentation.knife_active());
    assert!(s.ctx.presentation.knife_points().is_empty());
    assert!(s.ctx.presentation.highlighted().is_empty());

    assert_eq!(count(&changes, PresentationChange::Knife), 3);
    assert_eq!(count(&changes, PresentationChange::Highlight), 2);
}

#[test]
fn test_plain_press_is_left_to_the_host() {
    let s = setup();
    let mut down = pointer(250.0, -50.0);
    s.knife.pointer_down(&mut down);

    assert!(!down.is_consumed());
    assert!(!s.knife.is_cutting());
    assert_eq!(s.host.captured.get(), None);

    let mut moved = pointer(250.0, 500.0);
    s.knife.pointer_move(&mut moved);
    assert!(!moved.is_consumed());
    assert!(!s.frames.is_pending());
}

#[test]
fn test_gesture_owns_pointer_and_context_menu() {
    let s = setup();
    s.knife.pointer_down(&mut knife_press(250.0, -50.0));

    assert!(s.knife.is_cutting());
    assert_eq!(s.host.captured.get(), Some(1));
    assert!(s.host.context_menu_suppressed.get());

    s.knife.pointer_up(&mut pointer(250.0, -50.0));
    assert_eq!(s.host.captured.get(), None);
    assert!(!s.host.context_menu_suppressed.get());
    assert!(!s.knife.is_cutting());
}

#[test]
fn test_refused_capture_does_not_start_gesture() {
    let s = setup();
    s.host.refuse_capture.set(true);

    let mut down = knife_press(250.0, -50.0);
    s.knife.pointer_down(&mut down);

    assert!(!down.is_consumed());
    assert!(!s.knife.is_cutting());
    assert!(!s.host.context_menu_suppressed.get());
    assert!(!s.ctx.presentation.knife_active());
}

#[test]
fn test_other_pointers_pass_through() {
    let s = setup();
    s.knife.pointer_down(&mut knife_press(250.0, -50.0));

    let mut other = PointerEvent::new(2, PointerEventButton::Left, ScreenPoint::new(250.0, 500.0));
    s.knife.pointer_move(&mut other);
    assert!(!other.is_consumed());
    s.knife.pointer_up(&mut other);
    assert!(!other.is_consumed());

    assert!(s.knife.is_cutting());
    assert_eq!(s.knife.points().len(), 1);
}

#[test]
fn test_cancel_aborts_without_cutting() {
    let s = setup();
    s.knife.pointer_down(&mut knife_press(250.0, -50.0));
    s.knife.pointer_move(&mut pointer(250.0, 500.0));
    s.frames.run_frame();
    assert!(!s.ctx.presentation.highlighted().is_empty());

    s.knife.pointer_cancel(1);

    assert!(transactions(&s.ctx).is_empty());
    assert!(!s.knife.is_cutting());
    assert!(s.ctx.presentation.highlighted().is_empty());
    assert_eq!(s.host.captured.get(), None);
}

#[test]
fn test_teardown_mid_gesture_cancels_pending_frame() {
    let s = setup();
    s.knife.pointer_down(&mut knife_press(250.0, -50.0));
    s.knife.pointer_move(&mut pointer(250.0, 500.0));
    assert!(s.frames.is_pending());

    s.knife.teardown();

    assert!(!s.frames.is_pending());
    assert!(!s.frames.run_frame());
    assert!(s.ctx.presentation.highlighted().is_empty());
    assert!(!s.ctx.presentation.knife_active());
    assert_eq!(s.host.captured.get(), None);

    // Events after teardown are ignored
    let mut up = pointer(250.0, 500.0);
    s.knife.pointer_up(&mut up);
    assert!(!up.is_consumed());
    let mut down = knife_press(250.0, -50.0);
    s.knife.pointer_down(&mut down);
    assert!(!down.is_consumed());

    assert!(transactions(&s.ctx).is_empty());
    assert_eq!(wire_ids(&s.ctx).len(), 3);
}

#[test]
fn test_drop_releases_capture() {
    let s = setup();
    s.knife.pointer_down(&mut knife_press(250.0, -50.0));
    s.knife.pointer_move(&mut pointer(250.0, 500.0));

    let Setup { ctx, host, frames, knife } = s;
    drop(knife);

    assert_eq!(host.captured.get(), None);
    assert!(!frames.run_frame());
    assert!(ctx.store.borrow().transactions().is_empty());
}

#[test]
fn test_stroke_is_mapped_through_viewport() {
    let s = setup();
    s.host.viewport.set(Viewport::new(2.0, 100.0, 0.0));

    // Screen x = 250 * 2 + 100
    stroke(&s, &[(600.0, -100.0), (600.0, 200.0)], false);

    let log = transactions(&s.ctx);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, TransactionKind::RemoveWires(ids(&["e1"])));
}

#[test]
fn test_failed_transaction_still_ends_gesture() {
    let s = setup();
    s.knife.pointer_down(&mut knife_press(250.0, -50.0));
    s.knife.pointer_move(&mut pointer(250.0, 100.0));

    // e1 disappears behind the knife's back; removal of the stale id fails
    s.ctx.store.borrow_mut().remove_wires(&ids(&["e1"]), "external").unwrap();
    s.knife.pointer_up(&mut pointer(250.0, 100.0));

    assert_eq!(transactions(&s.ctx).len(), 1);
    assert!(!s.knife.is_cutting());
    assert!(!s.ctx.presentation.knife_active());
    assert_eq!(s.host.captured.get(), None);
}

#[test]
fn test_store_sees_no_removal_for_short_or_missing_strokes() {
    let ctx = recording(&knife_context());
    let host = FakeHost::new();
    let frames = ManualFrames::new();
    let knife = KnifeController::new(ctx.clone(), host.clone(), frames.clone());

    // One point, directly on e1
    knife.pointer_down(&mut knife_press(250.0, 20.0));
    knife.pointer_up(&mut pointer(250.0, 20.0));

    // A stroke between the wires
    knife.pointer_down(&mut knife_press(450.0, -50.0));
    knife.pointer_move(&mut pointer(550.0, 500.0));
    frames.run_frame();
    knife.pointer_up(&mut pointer(550.0, 500.0));

    assert!(store_calls(&ctx).is_empty());
    assert_eq!(host.captured.get(), None);
}

#[test]
fn test_store_sees_one_removal_per_cutting_stroke() {
    let ctx = recording(&knife_context());
    let host = FakeHost::new();
    let frames = ManualFrames::new();
    let knife = KnifeController::new(ctx.clone(), host.clone(), frames.clone());

    knife.pointer_down(&mut knife_press(250.0, -50.0));
    for y in [100.0, 200.0, 300.0, 500.0] {
        knife.pointer_move(&mut pointer(250.0, y));
        frames.run_frame();
    }
    knife.pointer_up(&mut pointer(250.0, 500.0));

    assert_eq!(
        store_calls(&ctx),
        vec![StoreCall::RemoveWires { ids: ids(&["e1", "e3"]), label: "Cut 2 edges".to_string() }]
    );
}
