//! Tool modes.
//!
//! Exactly one tool is active per client at a time; the enum makes two
//! simultaneously-active tools unrepresentable. Switching is a client-local
//! UI action that is also broadcast so every toolbar mirrors the active
//! session's mode.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use strokes::{ColorToken, ShapeKind};

use crate::consts::{DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH, ERASER_COLOR};

/// The active drawing tool and its stroke parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolMode {
    /// Freehand ink.
    Pencil { color: ColorToken, width: f64 },
    /// Freehand background-colored ink.
    Eraser { width: f64 },
    /// Shape preview/commit with the given kind.
    ShapeTool { kind: ShapeKind, color: ColorToken, width: f64 },
}

impl Default for ToolMode {
    fn default() -> Self {
        Self::Pencil { color: ColorToken::from(DEFAULT_PEN_COLOR), width: DEFAULT_PEN_WIDTH }
    }
}

impl ToolMode {
    #[must_use]
    pub fn is_pencil(&self) -> bool {
        matches!(self, Self::Pencil { .. })
    }

    #[must_use]
    pub fn is_eraser(&self) -> bool {
        matches!(self, Self::Eraser { .. })
    }

    #[must_use]
    pub fn is_shape_tool(&self) -> bool {
        matches!(self, Self::ShapeTool { .. })
    }

    /// The shape kind this tool previews; `None` for freehand tools.
    #[must_use]
    pub fn shape_kind(&self) -> ShapeKind {
        match self {
            Self::ShapeTool { kind, .. } => *kind,
            Self::Pencil { .. } | Self::Eraser { .. } => ShapeKind::None,
        }
    }

    /// The color token and width this tool paints with. The eraser paints
    /// the canvas background color.
    #[must_use]
    pub fn stroke_style(&self) -> (ColorToken, f64) {
        match self {
            Self::Pencil { color, width } | Self::ShapeTool { color, width, .. } => (color.clone(), *width),
            Self::Eraser { width } => (ColorToken::from(ERASER_COLOR), *width),
        }
    }
}
