mod controller;
pub use controller::{TextPrompt, ToolController};

/// The drawing tools offered in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Line,
    Rectangle,
    Oval,
    Text,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Brush,
        Tool::Eraser,
        Tool::Line,
        Tool::Rectangle,
        Tool::Oval,
        Tool::Text,
    ];

    /// Return the name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
            Self::Line => "Line",
            Self::Rectangle => "Rectangle",
            Self::Oval => "Oval",
            Self::Text => "Text",
        }
    }

    /// Tools that paint on every pointer move.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }

    /// Tools that draw a shape from the gesture origin on release.
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Line | Self::Rectangle | Self::Oval)
    }
}
