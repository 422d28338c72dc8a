use egui::{Color32, Pos2};

use crate::font::FontChoice;
use crate::tools::Tool;

pub const STROKE_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 1..=20;
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 10..=50;

/// Where the pointer gesture stands.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pointer went down at `origin` and has not been released yet.
    Dragging { origin: Pos2 },
}

impl GestureState {
    pub fn origin(&self) -> Option<Pos2> {
        match self {
            Self::Idle => None,
            Self::Dragging { origin } => Some(*origin),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Colors the user chose to keep, in order of first insertion, without duplicates.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color32>,
}

impl Palette {
    /// Returns false if the color was already saved.
    pub fn insert(&mut self, color: Color32) -> bool {
        if self.contains(color) {
            return false;
        }
        self.colors.push(color);
        true
    }

    pub fn contains(&self, color: Color32) -> bool {
        self.colors.contains(&color)
    }

    pub fn colors(&self) -> &[Color32] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Tool settings, owned by the tool controller for the lifetime of the app.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    pub(crate) tool: Tool,
    pub(crate) brush_color: Color32,
    pub(crate) background: Color32,
    pub(crate) eraser: bool,
    pub(crate) stroke_width: u32,
    pub(crate) font: FontChoice,
    pub(crate) font_size: u32,
    pub(crate) palette: Palette,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            brush_color: Color32::BLACK,
            background: Color32::WHITE,
            eraser: false,
            stroke_width: 5,
            font: FontChoice::Proportional,
            font_size: 20,
            palette: Palette::default(),
        }
    }
}

impl DrawingState {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn brush_color(&self) -> Color32 {
        self.brush_color
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn is_erasing(&self) -> bool {
        self.eraser
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub fn font(&self) -> FontChoice {
        self.font
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color strokes and shapes are drawn in: the background while erasing.
    pub fn paint_color(&self) -> Color32 {
        if self.eraser {
            self.background
        } else {
            self.brush_color
        }
    }

    /// Builder-style overrides used when seeding from configuration.
    pub fn with_colors(mut self, brush: Color32, background: Color32) -> Self {
        self.brush_color = brush;
        self.background = background;
        self
    }

    pub fn with_stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = clamp_to(width, &STROKE_WIDTH_RANGE);
        self
    }

    pub fn with_font(mut self, font: FontChoice, size: u32) -> Self {
        self.font = font;
        self.font_size = clamp_to(size, &FONT_SIZE_RANGE);
        self
    }
}

pub(crate) fn clamp_to(value: u32, range: &std::ops::RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_keeps_first_insertion_order() {
        let mut palette = Palette::default();
        assert!(palette.insert(Color32::RED));
        assert!(palette.insert(Color32::BLUE));
        assert!(!palette.insert(Color32::RED));
        assert_eq!(palette.colors(), &[Color32::RED, Color32::BLUE]);
    }

    #[test]
    fn test_paint_color_follows_eraser_mode() {
        let mut state = DrawingState::default().with_colors(Color32::RED, Color32::WHITE);
        assert_eq!(state.paint_color(), Color32::RED);
        state.eraser = true;
        assert_eq!(state.paint_color(), Color32::WHITE);
    }

    #[test]
    fn test_builders_clamp_to_slider_ranges() {
        let state = DrawingState::default().with_stroke_width(0).with_font(FontChoice::Monospace, 99);
        assert_eq!(state.stroke_width(), 1);
        assert_eq!(state.font_size(), 50);
    }

    #[test]
    fn test_gesture_origin() {
        assert_eq!(GestureState::Idle.origin(), None);
        let dragging = GestureState::Dragging { origin: Pos2::new(3.0, 4.0) };
        assert!(dragging.is_dragging());
        assert_eq!(dragging.origin(), Some(Pos2::new(3.0, 4.0)));
    }
}
