//! Shared wire vocabulary and JSON codec for the whiteboard realtime protocol.
//!
//! This crate owns the wire representation used by both `server` and `cli`.
//! Every message on the wire is one [`Event`], encoded as a JSON text frame
//! of the form `{"event": "<name>", "data": <payload>}`. Payload field names
//! are camelCase to match the protocol as spoken by existing clients
//! (`undoRedoIndex`, `pencilFlag`, `eraserWidthEle`, ...).
//!
//! The codec checks shape only: color tokens and snapshot blobs are carried
//! opaquely and validated by the layer that consumes them.

use serde::{Deserialize, Serialize};

/// Error returned by [`decode_event`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The text is not a well-formed event frame. The caller must drop the
    /// event: never applied, never rebroadcast.
    #[error("failed to decode event frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// An opaque CSS-ish color token (`"blue"`, `"white"`, `"#1f1a17"`).
///
/// The codec carries tokens verbatim; resolution to pixels happens in the
/// `canvas` crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColorToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// The active shape tool kind. [`ShapeKind::None`] means freehand mode and
/// is written as the empty string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Freehand mode; no shape tool active.
    #[default]
    #[serde(rename = "", alias = "none")]
    None,
    Rectangle,
    Circle,
    Triangle,
    Heart,
}

impl ShapeKind {
    /// Whether a shape tool is active (anything but freehand).
    #[must_use]
    pub fn is_shape(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Starts a freehand path or anchors a shape baseline at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeginPath {
    pub x: f64,
    pub y: f64,
}

/// One incremental draw instruction: a freehand line-to or a shape-preview
/// update, depending on the receiver's trace state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawLine {
    pub x: f64,
    pub y: f64,
    /// Stroke color. Absent means "use the current stroke style".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorToken>,
    /// Stroke width. Absent means "use the current stroke style".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Full history replacement: the entire snapshot stack plus the cursor is
/// retransmitted on every undo/redo click, keeping all clients' stacks
/// byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoRedoSync {
    pub undo_redo_index: usize,
    /// Opaque snapshot blobs, oldest first.
    pub undo_redo_stack: Vec<String>,
}

/// Pencil tool toggle, broadcast so peer toolbars mirror the sender's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PencilToggle {
    pub pencil_flag: bool,
}

/// Eraser tool toggle, broadcast so peer toolbars mirror the sender's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EraserToggle {
    pub eraser_flag: bool,
}

/// Shape-picker visibility toggle plus the picked kind. Synchronized across
/// clients to keep a shared facilitator workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingToggle {
    pub setting_flag: bool,
    #[serde(default)]
    pub shape_mode: ShapeKind,
}

/// Width/style sync for the eraser tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EraserWidth {
    pub eraser_width: f64,
    pub line_width: f64,
    pub stroke_style: ColorToken,
}

/// A single message on the realtime wire protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum Event {
    BeginPath(BeginPath),
    DrawLine(DrawLine),
    UndoRedoCanvas(UndoRedoSync),
    /// Sets the active shape tool kind by name (`""` = freehand).
    ShapeMode(ShapeKind),
    Pencil(PencilToggle),
    Eraser(EraserToggle),
    Setting(SettingToggle),
    EraserWidthEle(EraserWidth),
}

impl Event {
    /// Wire name of this event. The relay hub depends on nothing else.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeginPath(_) => "beginPath",
            Self::DrawLine(_) => "drawLine",
            Self::UndoRedoCanvas(_) => "undoRedoCanvas",
            Self::ShapeMode(_) => "shapeMode",
            Self::Pencil(_) => "pencil",
            Self::Eraser(_) => "eraser",
            Self::Setting(_) => "setting",
            Self::EraserWidthEle(_) => "eraserWidthEle",
        }
    }
}

/// Encode an event into a JSON text frame.
#[must_use]
pub fn encode_event(event: &Event) -> String {
    // Serializing these types cannot fail: all payloads are plain structs
    // with string keys.
    serde_json::to_string(event).unwrap_or_default()
}

/// Decode a JSON text frame into an event.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] for anything that is not a well-formed
/// frame: invalid JSON, an unknown event name, or a payload whose shape does
/// not match the event.
pub fn decode_event(text: &str) -> Result<Event, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
