//! Session coordinator — wires local intent to the relay and relayed events
//! back into the canvas machine and history.
//!
//! DESIGN
//! ======
//! Outbound methods build wire events without touching the canvas: the hub's
//! fan-out is self-inclusive, so the sender's own echo applies each drawing
//! event exactly once, the same way it applies a peer's. The two exceptions
//! mirror the observed protocol: stroke completion (pointer-up) is purely
//! local and never broadcast, and undo/redo moves the local cursor first and
//! then broadcasts the entire stack for everyone (sender included) to apply.
//!
//! Inbound, every wire event maps to exactly one state-transition function.
//! Events are applied in arrival order on the session's single task, which
//! serializes snapshot restores; a restore swaps the raster only after a
//! complete decode.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use canvas::color::Rgba;
use canvas::consts::{
    DEFAULT_ERASER_WIDTH, DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH, DEFAULT_SHAPE_WIDTH,
    DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, ERASER_COLOR,
};
use canvas::history::HistoryLog;
use canvas::machine::CanvasMachine;
use canvas::raster::Point;
use canvas::snapshot::CanvasSnapshot;
use canvas::tool::ToolMode;
use strokes::{
    BeginPath, ColorToken, DrawLine, EraserToggle, EraserWidth, Event, PencilToggle, SettingToggle,
    ShapeKind, UndoRedoSync,
};
use tracing::warn;

/// Per-client tool state. One explicit struct instead of free-floating
/// globals: the active tool plus the remembered parameters used to rebuild
/// tools when modes switch.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The single active tool.
    pub tool: ToolMode,
    pub pen_color: ColorToken,
    pub pen_width: f64,
    pub eraser_width: f64,
    pub shape_width: f64,
    /// The synchronized shape-picker kind (`None` = freehand).
    pub shape_mode: ShapeKind,
    /// Whether the pencil panel is open. Panels start closed even though
    /// drawing defaults to the pencil, matching the toolbar.
    pub pencil_open: bool,
    /// Whether the eraser panel is open.
    pub eraser_open: bool,
    /// Whether the facilitator shape picker is open. Synchronized across
    /// clients deliberately.
    pub setting_open: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            tool: ToolMode::default(),
            pen_color: ColorToken::from(DEFAULT_PEN_COLOR),
            pen_width: DEFAULT_PEN_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
            shape_width: DEFAULT_SHAPE_WIDTH,
            shape_mode: ShapeKind::None,
            pencil_open: false,
            eraser_open: false,
            setting_open: false,
        }
    }
}

/// One client's whiteboard session: tool state, canvas machine, and history.
pub struct Session {
    state: SessionState,
    machine: CanvasMachine,
    history: HistoryLog,
    pointer_down: bool,
}

impl Session {
    /// Create a session with a blank canvas of the given viewport size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: SessionState::default(),
            machine: CanvasMachine::new(width, height),
            history: HistoryLog::new(),
            pointer_down: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn machine(&self) -> &CanvasMachine {
        &self.machine
    }

    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    // --- Outbound: local intent → events to emit ---

    /// Pointer pressed. A second pointer-down before pointer-up implicitly
    /// closes the prior trace, keeping at most one active trace per client.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Event {
        if self.pointer_down {
            self.finish_stroke();
        }
        self.pointer_down = true;
        Event::BeginPath(BeginPath { x, y })
    }

    /// Pointer moved. Emits a draw instruction styled by the active tool
    /// while the pointer is down; the eraser paints the background color.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Event> {
        if !self.pointer_down {
            return None;
        }
        let (color, width) = self.state.tool.stroke_style();
        Some(Event::DrawLine(DrawLine { x, y, color: Some(color), width: Some(width) }))
    }

    /// Pointer released. Records a local history snapshot; never broadcast —
    /// histories diverge between clients until the next undo/redo sync.
    pub fn pointer_up(&mut self) {
        if !self.pointer_down {
            return;
        }
        self.pointer_down = false;
        self.finish_stroke();
    }

    /// Move the cursor back (bounds permitting) and emit the entire stack
    /// plus cursor. Emitted even when the cursor did not move.
    pub fn undo(&mut self) -> Event {
        self.history.undo();
        self.history_sync_event()
    }

    /// Move the cursor forward (bounds permitting) and emit the entire
    /// stack plus cursor. Emitted even when the cursor did not move.
    pub fn redo(&mut self) -> Event {
        self.history.redo();
        self.history_sync_event()
    }

    /// Toggle the pencil panel on peers' toolbars and our own (via echo).
    #[must_use]
    pub fn select_pencil(&self) -> Event {
        Event::Pencil(PencilToggle { pencil_flag: !self.state.pencil_open })
    }

    /// Toggle the eraser panel on peers' toolbars and our own (via echo).
    #[must_use]
    pub fn select_eraser(&self) -> Event {
        Event::Eraser(EraserToggle { eraser_flag: !self.state.eraser_open })
    }

    /// Toggle the shared shape picker, carrying the picked kind.
    #[must_use]
    pub fn toggle_shape_picker(&self, kind: ShapeKind) -> Event {
        Event::Setting(SettingToggle { setting_flag: !self.state.setting_open, shape_mode: kind })
    }

    /// Pick a shape kind directly.
    #[must_use]
    pub fn pick_shape(&self, kind: ShapeKind) -> Event {
        Event::ShapeMode(kind)
    }

    /// Set the pencil/shape color. Local only: color is never its own wire
    /// event, it rides on each `drawLine`.
    pub fn set_pen_color(&mut self, color: ColorToken) {
        self.state.pen_color = color.clone();
        match &mut self.state.tool {
            ToolMode::Pencil { color: c, .. } | ToolMode::ShapeTool { color: c, .. } => *c = color,
            ToolMode::Eraser { .. } => {}
        }
    }

    /// Set the pencil/shape width. Local only, like the color.
    pub fn set_pen_width(&mut self, width: f64) {
        self.state.pen_width = width;
        self.state.shape_width = width;
        match &mut self.state.tool {
            ToolMode::Pencil { width: w, .. } | ToolMode::ShapeTool { width: w, .. } => *w = width,
            ToolMode::Eraser { .. } => {}
        }
    }

    /// Sync the eraser width (and the matching stroke style) everywhere.
    #[must_use]
    pub fn set_eraser_width(&self, width: f64) -> Event {
        Event::EraserWidthEle(EraserWidth {
            eraser_width: width,
            line_width: width,
            stroke_style: ColorToken::from(ERASER_COLOR),
        })
    }

    // --- Inbound: one transition function per wire event ---

    /// Apply one relayed event (a peer's or our own echo).
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::BeginPath(begin) => self.apply_begin_path(begin),
            Event::DrawLine(line) => self.apply_draw_line(line),
            Event::UndoRedoCanvas(sync) => self.apply_undo_redo(sync),
            Event::ShapeMode(kind) => self.apply_shape_mode(*kind),
            Event::Pencil(toggle) => self.apply_pencil(toggle),
            Event::Eraser(toggle) => self.apply_eraser(toggle),
            Event::Setting(setting) => self.apply_setting(setting),
            Event::EraserWidthEle(width) => self.apply_eraser_width(width),
        }
    }

    fn apply_begin_path(&mut self, begin: &BeginPath) {
        self.machine.begin_path(Point::new(begin.x, begin.y));
    }

    fn apply_draw_line(&mut self, line: &DrawLine) {
        self.machine.draw_segment(Point::new(line.x, line.y), line.color.as_ref(), line.width);
    }

    fn apply_undo_redo(&mut self, sync: &UndoRedoSync) {
        let snapshots = sync.undo_redo_stack.iter().cloned().map(CanvasSnapshot::from_blob).collect();
        let restored = self.history.apply_remote(sync.undo_redo_index, snapshots);
        let Some(snapshot) = restored else {
            return;
        };
        if let Err(e) = self.machine.restore(snapshot) {
            // Local failure only: the canvas keeps its last-good state and
            // no other client is affected.
            warn!(error = %e, "snapshot restore failed, canvas left at last-good state");
        }
    }

    fn apply_shape_mode(&mut self, kind: ShapeKind) {
        self.state.shape_mode = kind;
        self.machine.set_shape_mode(kind);
        if kind.is_shape() {
            self.state.tool = ToolMode::ShapeTool {
                kind,
                color: self.state.pen_color.clone(),
                width: self.state.shape_width,
            };
        } else if self.state.tool.is_shape_tool() {
            self.state.tool = self.pencil_tool();
        }
    }

    fn apply_pencil(&mut self, toggle: &PencilToggle) {
        self.state.pencil_open = toggle.pencil_flag;
        if !toggle.pencil_flag {
            // Collapses the pencil panel; the active tool is unchanged.
            return;
        }
        // Activating the pencil resets its color, matching the toolbar.
        self.state.pen_color = ColorToken::from(DEFAULT_PEN_COLOR);
        self.state.tool = self.pencil_tool();
        self.state.shape_mode = ShapeKind::None;
        self.state.eraser_open = false;
        self.state.setting_open = false;
        self.machine.set_shape_mode(ShapeKind::None);
        self.machine
            .set_stroke_style(Rgba::from_token(&self.state.pen_color), self.state.pen_width);
    }

    fn apply_eraser(&mut self, toggle: &EraserToggle) {
        self.state.eraser_open = toggle.eraser_flag;
        if !toggle.eraser_flag {
            return;
        }
        self.state.tool = ToolMode::Eraser { width: self.state.eraser_width };
        self.state.shape_mode = ShapeKind::None;
        self.state.pencil_open = false;
        self.state.setting_open = false;
        self.machine.set_shape_mode(ShapeKind::None);
        self.machine
            .set_stroke_style(Rgba::from_token(&ColorToken::from(ERASER_COLOR)), self.state.eraser_width);
    }

    fn apply_setting(&mut self, setting: &SettingToggle) {
        if setting.setting_flag {
            self.state.setting_open = true;
            self.state.pencil_open = false;
            self.state.eraser_open = false;
            self.apply_shape_mode(setting.shape_mode);
        } else {
            self.state.setting_open = false;
            self.apply_shape_mode(ShapeKind::None);
        }
    }

    fn apply_eraser_width(&mut self, width: &EraserWidth) {
        self.state.eraser_width = width.eraser_width;
        if self.state.tool.is_eraser() {
            self.state.tool = ToolMode::Eraser { width: width.eraser_width };
        }
        self.machine
            .set_stroke_style(Rgba::from_token(&width.stroke_style), width.line_width);
    }

    // --- Helpers ---

    fn pencil_tool(&self) -> ToolMode {
        ToolMode::Pencil { color: self.state.pen_color.clone(), width: self.state.pen_width }
    }

    fn finish_stroke(&mut self) {
        match self.machine.pointer_up() {
            Ok(snapshot) => self.history.record(snapshot),
            Err(e) => warn!(error = %e, "stroke snapshot capture failed, history unchanged"),
        }
    }

    fn history_sync_event(&self) -> Event {
        let stack = self.history.snapshots().iter().map(|s| s.as_blob().to_owned()).collect();
        Event::UndoRedoCanvas(UndoRedoSync {
            undo_redo_index: self.history.cursor(),
            undo_redo_stack: stack,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}
