//! The per-client canvas state machine.
//!
//! Consumes stroke events and mutates the local raster. Freehand ink
//! accumulates point by point and is irreversible within the stroke; shape
//! previews repeatedly redraw the full candidate shape over a raw-pixel
//! baseline captured when the trace began, so each pointer sample erases the
//! previous preview instead of accumulating.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use strokes::{ColorToken, ShapeKind};

use crate::color::Rgba;
use crate::consts::{DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH};
use crate::raster::{Point, Raster};
use crate::shape;
use crate::snapshot::{CanvasSnapshot, SnapshotError};

/// The stroke style most recently applied to the surface. Segments that omit
/// color or width fall back to these, mirroring how a drawing context keeps
/// its last `strokeStyle`/`lineWidth`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self { color: Rgba::from_token(&ColorToken::from(DEFAULT_PEN_COLOR)), width: DEFAULT_PEN_WIDTH }
    }
}

/// The active trace between pointer-down and pointer-up.
///
/// Each active variant carries the context needed to apply the next
/// incremental draw instruction.
#[derive(Debug, Clone)]
pub enum TraceState {
    /// No trace in progress; waiting for the next `beginPath`.
    Idle,
    /// Freehand ink accumulating directly on the live raster.
    TracingFreehand {
        /// End of the last applied segment; the next segment starts here.
        cursor: Point,
    },
    /// A shape candidate being re-rendered over an untouched baseline.
    PreviewingShape {
        /// Shape kind captured when the trace began. A mid-stroke mode
        /// change never affects a trace in progress.
        kind: ShapeKind,
        /// Anchor point of the shape.
        start: Point,
        /// Raw pixels of the surface at trace start, restored before every
        /// preview redraw.
        baseline: Raster,
    },
}

impl Default for TraceState {
    fn default() -> Self {
        Self::Idle
    }
}

/// The canvas state machine: one per client, exclusive owner of its raster.
#[derive(Debug, Clone)]
pub struct CanvasMachine {
    raster: Raster,
    trace: TraceState,
    shape_mode: ShapeKind,
    style: StrokeStyle,
    viewport_width: u32,
    viewport_height: u32,
}

impl CanvasMachine {
    /// Create a machine with a blank raster matching the viewport.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raster: Raster::new(width, height),
            trace: TraceState::default(),
            shape_mode: ShapeKind::None,
            style: StrokeStyle::default(),
            viewport_width: width,
            viewport_height: height,
        }
    }

    /// The live raster surface.
    #[must_use]
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// The trace currently in progress, if any.
    #[must_use]
    pub fn trace(&self) -> &TraceState {
        &self.trace
    }

    /// The active shape tool kind ([`ShapeKind::None`] = freehand).
    #[must_use]
    pub fn shape_mode(&self) -> ShapeKind {
        self.shape_mode
    }

    /// Set the shape tool kind for the *next* trace. A trace already in
    /// progress finishes under the mode captured at its `beginPath`.
    pub fn set_shape_mode(&mut self, kind: ShapeKind) {
        self.shape_mode = kind;
    }

    /// The current stroke style.
    #[must_use]
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Set the stroke style directly (width/style sync events).
    pub fn set_stroke_style(&mut self, color: Rgba, width: f64) {
        self.style = StrokeStyle { color, width };
    }

    /// Record the viewport size used when restoring snapshots. The live
    /// raster keeps its dimensions until the next restore.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Start a trace at `p`: freehand when no shape tool is active, else a
    /// shape preview anchored at `p` with the surface captured as baseline.
    /// A second `begin_path` before `pointer_up` restarts the trace.
    pub fn begin_path(&mut self, p: Point) {
        self.trace = if self.shape_mode.is_shape() {
            TraceState::PreviewingShape { kind: self.shape_mode, start: p, baseline: self.raster.clone() }
        } else {
            TraceState::TracingFreehand { cursor: p }
        };
    }

    /// Apply one incremental draw instruction at `p`. Absent color/width
    /// fall back to the current stroke style; present values update it.
    /// Dropped when no trace is in progress.
    pub fn draw_segment(&mut self, p: Point, color: Option<&ColorToken>, width: Option<f64>) {
        if let Some(token) = color {
            self.style.color = Rgba::from_token(token);
        }
        if let Some(w) = width {
            self.style.width = w;
        }
        let StrokeStyle { color, width } = self.style;

        match &mut self.trace {
            TraceState::Idle => {}
            TraceState::TracingFreehand { cursor } => {
                let from = *cursor;
                *cursor = p;
                // Zero-length repeats (the sender's own echo) are no-ops.
                self.raster.stroke_line(from, p, color, width);
            }
            TraceState::PreviewingShape { kind, start, baseline } => {
                self.raster.copy_from(baseline);
                shape::draw_shape(&mut self.raster, *kind, *start, p, color, width);
            }
        }
    }

    /// Finish the trace and capture a full-canvas snapshot for the history.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the PNG capture fails; the trace still
    /// returns to idle.
    pub fn pointer_up(&mut self) -> Result<CanvasSnapshot, SnapshotError> {
        self.trace = TraceState::Idle;
        CanvasSnapshot::capture(&self.raster)
    }

    /// Replace the surface with a decoded snapshot, rescaled to the current
    /// viewport. The swap happens only after a complete decode; on error the
    /// raster is left in its last-good state.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the blob cannot be decoded.
    pub fn restore(&mut self, snapshot: &CanvasSnapshot) -> Result<(), SnapshotError> {
        let decoded = snapshot.decode()?;
        self.raster.reset(self.viewport_width, self.viewport_height);
        self.raster.blit_scaled(&decoded);
        Ok(())
    }
}
