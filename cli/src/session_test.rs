#![allow(clippy::float_cmp)]

use super::*;
use canvas::color::{BLACK, WHITE};

const BLUE: Rgba = Rgba::rgb(0, 0, 255);

fn session() -> Session {
    Session::new(64, 64)
}

/// Drive one full local stroke through the echo path: emit, apply the echo,
/// release the pointer.
fn stroke(s: &mut Session, from: (f64, f64), to: (f64, f64)) {
    let begin = s.pointer_down(from.0, from.1);
    s.apply(&begin);
    if let Some(draw) = s.pointer_move(to.0, to.1) {
        s.apply(&draw);
    }
    s.pointer_up();
}

#[test]
fn local_stroke_via_echo_inks_canvas_and_records_history() {
    let mut s = session();
    stroke(&mut s, (10.0, 32.0), (40.0, 32.0));

    // Default tool: blue pencil.
    assert_eq!(s.machine().raster().pixel(25, 32), Some(BLUE));
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.history().cursor(), 0);
}

#[test]
fn pointer_move_without_pointer_down_emits_nothing() {
    let mut s = session();
    assert!(s.pointer_move(10.0, 10.0).is_none());
}

#[test]
fn eraser_strokes_emit_the_background_color() {
    let mut s = session();
    s.apply(&Event::Eraser(EraserToggle { eraser_flag: true }));

    let _ = s.pointer_down(5.0, 5.0);
    let Some(Event::DrawLine(line)) = s.pointer_move(20.0, 20.0) else {
        panic!("expected drawLine");
    };
    assert_eq!(line.color.as_ref().map(ColorToken::as_str), Some("white"));
    assert_eq!(line.width, Some(DEFAULT_ERASER_WIDTH));
}

#[test]
fn second_pointer_down_implicitly_closes_the_prior_trace() {
    let mut s = session();
    let begin = s.pointer_down(10.0, 10.0);
    s.apply(&begin);
    if let Some(draw) = s.pointer_move(30.0, 30.0) {
        s.apply(&draw);
    }

    // No pointer_up: the next pointer-down must close the trace itself.
    let _ = s.pointer_down(40.0, 40.0);
    assert_eq!(s.history().len(), 1);
}

#[test]
fn undo_emits_the_entire_stack_with_the_moved_cursor() {
    let mut s = session();
    stroke(&mut s, (10.0, 10.0), (20.0, 10.0));
    stroke(&mut s, (10.0, 20.0), (20.0, 20.0));
    assert_eq!(s.history().cursor(), 1);

    let Event::UndoRedoCanvas(sync) = s.undo() else {
        panic!("expected undoRedoCanvas");
    };
    assert_eq!(sync.undo_redo_index, 0);
    assert_eq!(sync.undo_redo_stack.len(), 2);
}

#[test]
fn undo_at_the_oldest_entry_still_emits_a_sync() {
    let mut s = session();
    stroke(&mut s, (10.0, 10.0), (20.0, 10.0));

    let Event::UndoRedoCanvas(first) = s.undo() else {
        panic!("expected undoRedoCanvas");
    };
    assert_eq!(first.undo_redo_index, 0);

    // Already at the oldest entry: the cursor stays put but the sync goes out.
    let Event::UndoRedoCanvas(second) = s.undo() else {
        panic!("expected undoRedoCanvas");
    };
    assert_eq!(second.undo_redo_index, 0);
    assert_eq!(second.undo_redo_stack.len(), 1);
}

#[test]
fn redo_round_trip_restores_the_newer_snapshot() {
    let mut s = session();
    stroke(&mut s, (10.0, 32.0), (40.0, 32.0));
    stroke(&mut s, (10.0, 50.0), (40.0, 50.0));

    let undo_sync = s.undo();
    s.apply(&undo_sync);
    // Back to the first snapshot: the second stroke is gone.
    assert_eq!(s.machine().raster().pixel(25, 50), Some(WHITE));
    assert_eq!(s.machine().raster().pixel(25, 32), Some(BLUE));

    let redo_sync = s.redo();
    s.apply(&redo_sync);
    assert_eq!(s.machine().raster().pixel(25, 50), Some(BLUE));
}

#[test]
fn applying_the_same_sync_twice_is_idempotent() {
    let mut s = session();
    stroke(&mut s, (10.0, 10.0), (20.0, 10.0));
    stroke(&mut s, (10.0, 20.0), (20.0, 20.0));

    let sync = s.undo();
    s.apply(&sync);
    let raster_after_first = s.machine().raster().clone();

    s.apply(&sync);
    assert_eq!(s.machine().raster(), &raster_after_first);
    assert_eq!(s.history().len(), 2);
    assert_eq!(s.history().cursor(), 0);
}

#[test]
fn two_sessions_converge_after_an_identical_event_stream() {
    let mut a = session();
    let mut b = session();

    let mut events = Vec::new();
    events.push(a.pointer_down(5.0, 5.0));
    for i in 1..=5 {
        let p = 5.0 + 8.0 * f64::from(i);
        if let Some(draw) = a.pointer_move(p, p) {
            events.push(draw);
        }
    }
    events.push(Event::Setting(SettingToggle { setting_flag: true, shape_mode: ShapeKind::Triangle }));
    events.push(Event::BeginPath(BeginPath { x: 30.0, y: 10.0 }));
    events.push(Event::DrawLine(DrawLine {
        x: 45.0,
        y: 30.0,
        color: Some(ColorToken::from("red")),
        width: Some(2.0),
    }));

    for event in &events {
        a.apply(event);
        b.apply(event);
    }

    assert_eq!(a.machine().raster(), b.machine().raster());
}

#[test]
fn corrupt_snapshot_restore_leaves_canvas_and_peers_of_the_blob_intact() {
    let mut s = session();
    for i in 0..5 {
        let y = 10.0 + 10.0 * f64::from(i);
        stroke(&mut s, (10.0, y), (50.0, y));
    }
    assert_eq!(s.history().len(), 5);

    let mut stack: Vec<String> =
        s.history().snapshots().iter().map(|snap| snap.as_blob().to_owned()).collect();
    stack[2] = "data:image/png;base64,@@corrupt@@".into();

    let before = s.machine().raster().clone();
    s.apply(&Event::UndoRedoCanvas(UndoRedoSync {
        undo_redo_index: 2,
        undo_redo_stack: stack,
    }));

    // The failed restore is local and harmless: last-good canvas kept.
    assert_eq!(s.machine().raster(), &before);
    // The rest of the stack is untouched and still decodable.
    assert_eq!(s.history().len(), 5);
    for (i, snap) in s.history().snapshots().iter().enumerate() {
        if i != 2 {
            assert!(snap.decode().is_ok(), "snapshot {i} should stay intact");
        }
    }
}

#[test]
fn mode_events_keep_exactly_one_tool_active() {
    let mut s = session();

    s.apply(&Event::Setting(SettingToggle { setting_flag: true, shape_mode: ShapeKind::Rectangle }));
    assert!(s.state().tool.is_shape_tool());

    s.apply(&Event::Pencil(PencilToggle { pencil_flag: true }));
    assert!(s.state().tool.is_pencil());
    assert!(!s.state().tool.is_shape_tool());
    assert_eq!(s.state().shape_mode, ShapeKind::None);
    assert!(!s.state().setting_open);

    s.apply(&Event::Eraser(EraserToggle { eraser_flag: true }));
    assert!(s.state().tool.is_eraser());
    assert!(!s.state().tool.is_pencil());
}

#[test]
fn panel_toggles_start_closed_and_flip_via_echo() {
    let mut s = session();
    // Drawing defaults to the pencil, but its panel starts closed, so the
    // first toggle opens it.
    let Event::Pencil(toggle) = s.select_pencil() else {
        panic!("expected pencil");
    };
    assert!(toggle.pencil_flag);

    s.apply(&Event::Pencil(toggle));
    assert!(s.state().pencil_open);

    // The next toggle closes it again.
    let Event::Pencil(toggle) = s.select_pencil() else {
        panic!("expected pencil");
    };
    assert!(!toggle.pencil_flag);
}

#[test]
fn activating_one_panel_closes_the_others() {
    let mut s = session();
    s.apply(&Event::Pencil(PencilToggle { pencil_flag: true }));
    s.apply(&Event::Eraser(EraserToggle { eraser_flag: true }));

    assert!(s.state().eraser_open);
    assert!(!s.state().pencil_open);
    assert!(!s.state().setting_open);
}

#[test]
fn pen_color_and_width_are_local_and_ride_on_draw_lines() {
    let mut s = session();
    s.set_pen_color(ColorToken::from("red"));
    s.set_pen_width(6.0);

    let _ = s.pointer_down(5.0, 5.0);
    let Some(Event::DrawLine(line)) = s.pointer_move(20.0, 20.0) else {
        panic!("expected drawLine");
    };
    assert_eq!(line.color.as_ref().map(ColorToken::as_str), Some("red"));
    assert_eq!(line.width, Some(6.0));
}

#[test]
fn pencil_off_toggle_leaves_the_active_tool_alone() {
    let mut s = session();
    s.apply(&Event::Eraser(EraserToggle { eraser_flag: true }));
    s.apply(&Event::Pencil(PencilToggle { pencil_flag: false }));
    assert!(s.state().tool.is_eraser());
}

#[test]
fn setting_toggle_synchronizes_the_shape_picker() {
    let mut s = session();

    s.apply(&Event::Setting(SettingToggle { setting_flag: true, shape_mode: ShapeKind::Heart }));
    assert!(s.state().setting_open);
    assert_eq!(s.state().shape_mode, ShapeKind::Heart);
    assert_eq!(s.machine().shape_mode(), ShapeKind::Heart);

    // Closing the picker drops back to freehand pencil.
    s.apply(&Event::Setting(SettingToggle { setting_flag: false, shape_mode: ShapeKind::None }));
    assert!(!s.state().setting_open);
    assert_eq!(s.state().shape_mode, ShapeKind::None);
    assert!(s.state().tool.is_pencil());
}

#[test]
fn shape_mode_event_switches_the_shape_kind_directly() {
    let mut s = session();
    s.apply(&Event::Setting(SettingToggle { setting_flag: true, shape_mode: ShapeKind::Circle }));
    s.apply(&Event::ShapeMode(ShapeKind::Heart));
    assert_eq!(s.state().shape_mode, ShapeKind::Heart);
    assert_eq!(s.state().tool.shape_kind(), ShapeKind::Heart);
}

#[test]
fn eraser_width_sync_updates_state_and_stroke_style() {
    let mut s = session();
    s.apply(&Event::Eraser(EraserToggle { eraser_flag: true }));
    s.apply(&Event::EraserWidthEle(EraserWidth {
        eraser_width: 24.0,
        line_width: 24.0,
        stroke_style: ColorToken::from("white"),
    }));

    assert_eq!(s.state().eraser_width, 24.0);
    let (_, width) = s.state().tool.stroke_style();
    assert_eq!(width, 24.0);

    let style = s.machine().style();
    assert_eq!(style.color, Rgba::from_token(&ColorToken::from("white")));
    assert_eq!(style.width, 24.0);
}

#[test]
fn remote_stream_without_pointer_up_never_snapshots() {
    // A peer's stroke arrives as beginPath + drawLine only; stroke completion
    // is local to the peer, so our history must not grow.
    let mut s = session();
    s.apply(&Event::BeginPath(BeginPath { x: 10.0, y: 10.0 }));
    s.apply(&Event::DrawLine(DrawLine {
        x: 30.0,
        y: 30.0,
        color: Some(ColorToken::from("black")),
        width: Some(3.0),
    }));

    assert_eq!(s.machine().raster().pixel(20, 20), Some(BLACK));
    assert!(s.history().is_empty());
}
