use egui::{Color32, Pos2};
use image::RgbImage;

use super::Tool;
use crate::font::FontChoice;
use crate::state::{DrawingState, FONT_SIZE_RANGE, GestureState, STROKE_WIDTH_RANGE, clamp_to};
use crate::surface::Surface;

/// Asks the user for a line of text. `None` means the prompt was dismissed.
pub trait TextPrompt {
    fn ask_text(&mut self) -> Option<String>;
}

/// An answer collected ahead of time, e.g. by a dialog that already closed.
impl TextPrompt for Option<String> {
    fn ask_text(&mut self) -> Option<String> {
        self.take()
    }
}

/// Turns UI actions and pointer gestures into drawing commands.
///
/// Every command goes to a single [`Surface`]; the app passes a
/// [`crate::surface::Mirror`] of the raster buffer and the display canvas.
#[derive(Debug, Default)]
pub struct ToolController {
    state: DrawingState,
    gesture: GestureState,
}

impl ToolController {
    pub fn new(state: DrawingState) -> Self {
        Self {
            state,
            gesture: GestureState::Idle,
        }
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn select_tool(&mut self, tool: Tool) {
        log::debug!("Tool selected: {}", tool.name());
        self.state.tool = tool;
        self.state.eraser = tool == Tool::Eraser;
    }

    /// Apply the color picker's result; a cancelled picker changes nothing.
    pub fn set_color(&mut self, picked: Option<Color32>) {
        let Some(color) = picked else {
            log::debug!("Color picker cancelled");
            return;
        };
        log::debug!("Brush color set to {color:?}");
        self.state.brush_color = color;
        self.state.eraser = false;
    }

    /// Add the current brush color to the palette. Returns false if it was already there.
    pub fn save_color(&mut self) -> bool {
        let color = self.state.brush_color;
        let added = self.state.palette.insert(color);
        if added {
            log::debug!("Saved color {color:?} ({} in palette)", self.state.palette.len());
        }
        added
    }

    /// Switch to a color from the palette. Colors that were never saved are ignored.
    pub fn pick_saved_color(&mut self, color: Color32) -> bool {
        if !self.state.palette.contains(color) {
            log::warn!("Ignoring pick of unsaved color {color:?}");
            return false;
        }
        self.state.brush_color = color;
        self.state.eraser = false;
        true
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.state.stroke_width = clamp_to(width, &STROKE_WIDTH_RANGE);
    }

    pub fn set_font(&mut self, font: FontChoice) {
        log::debug!("Font set to {}", font.label());
        self.state.font = font;
    }

    pub fn set_font_size(&mut self, size: u32) {
        self.state.font_size = clamp_to(size, &FONT_SIZE_RANGE);
    }

    /// Handle pointer press on the canvas.
    ///
    /// With the text tool the prompt is consulted right away; a non-empty
    /// answer is placed at `point` and ends the gesture.
    pub fn on_pointer_down(&mut self, point: Pos2, prompt: &mut dyn TextPrompt, surface: &mut impl Surface) {
        self.gesture = GestureState::Dragging { origin: point };

        if self.state.tool != Tool::Text {
            return;
        }
        match prompt.ask_text().filter(|text| !text.is_empty()) {
            Some(text) => {
                log::trace!("Placing text {text:?} at {point:?}");
                surface.paint_text(
                    point,
                    &text,
                    self.state.brush_color,
                    self.state.font,
                    self.state.font_size as f32,
                );
                self.gesture = GestureState::Idle;
            }
            None => log::debug!("Text entry cancelled"),
        }
    }

    /// Handle a pointer motion sample while the button is held.
    ///
    /// Brush and eraser stamp a disc per sample; shapes have no live preview.
    pub fn on_pointer_move(&mut self, point: Pos2, surface: &mut impl Surface) {
        match self.state.tool {
            Tool::Brush | Tool::Eraser => {
                let radius = self.state.stroke_width as f32;
                log::trace!("Disc at {point:?} r={radius}");
                surface.paint_disc(point, radius, self.state.paint_color());
            }
            Tool::Line | Tool::Rectangle | Tool::Oval | Tool::Text => {}
        }
    }

    /// Handle pointer release; shape tools draw from the gesture origin.
    pub fn on_pointer_up(&mut self, point: Pos2, surface: &mut impl Surface) {
        let origin = self.gesture.origin();
        self.gesture = GestureState::Idle;
        let Some(origin) = origin else {
            return;
        };

        let width = self.state.stroke_width as f32;
        let color = self.state.paint_color();
        match self.state.tool {
            Tool::Line => surface.paint_line(origin, point, width, color),
            Tool::Rectangle => surface.paint_rect_outline(origin, point, width, color),
            Tool::Oval => surface.paint_oval_outline(origin, point, width, color),
            Tool::Brush | Tool::Eraser | Tool::Text => return,
        }
        log::trace!("{} from {origin:?} to {point:?}", self.state.tool.name());
    }

    /// Wipe both surfaces to the background color.
    pub fn clear(&mut self, surface: &mut impl Surface) {
        log::info!("Clearing canvas");
        self.gesture = GestureState::Idle;
        surface.clear(self.state.background);
    }

    /// Show a freshly loaded image, already resampled to the canvas size.
    pub fn load_image(&mut self, image: &RgbImage, surface: &mut impl Surface) {
        log::info!("Showing loaded image {}x{}", image.width(), image.height());
        self.gesture = GestureState::Idle;
        surface.replace(image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasOp, DisplayCanvas};

    fn no_text() -> Option<String> {
        None
    }

    #[test]
    fn test_select_tool_toggles_eraser_mode() {
        let mut controller = ToolController::default();
        controller.select_tool(Tool::Eraser);
        assert!(controller.state().is_erasing());
        controller.select_tool(Tool::Line);
        assert!(!controller.state().is_erasing());
    }

    #[test]
    fn test_cancelled_color_is_noop() {
        let mut controller = ToolController::default();
        controller.select_tool(Tool::Eraser);
        controller.set_color(None);
        assert!(controller.state().is_erasing());
        assert_eq!(controller.state().brush_color(), Color32::BLACK);

        controller.set_color(Some(Color32::RED));
        assert!(!controller.state().is_erasing());
        assert_eq!(controller.state().brush_color(), Color32::RED);
    }

    #[test]
    fn test_save_color_twice_keeps_one_entry() {
        let mut controller = ToolController::default();
        controller.set_color(Some(Color32::GREEN));
        assert!(controller.save_color());
        assert!(!controller.save_color());
        assert_eq!(controller.state().palette().colors(), &[Color32::GREEN]);
    }

    #[test]
    fn test_pick_saved_color_clears_eraser() {
        let mut controller = ToolController::default();
        controller.set_color(Some(Color32::BLUE));
        controller.save_color();
        controller.select_tool(Tool::Eraser);

        assert!(controller.pick_saved_color(Color32::BLUE));
        assert!(!controller.state().is_erasing());
        assert!(!controller.pick_saved_color(Color32::YELLOW));
        assert_eq!(controller.state().brush_color(), Color32::BLUE);
    }

    #[test]
    fn test_gesture_state_machine() {
        let mut controller = ToolController::default();
        let mut canvas = DisplayCanvas::new(Color32::WHITE);
        controller.select_tool(Tool::Rectangle);

        controller.on_pointer_down(Pos2::new(1.0, 1.0), &mut no_text(), &mut canvas);
        assert_eq!(controller.gesture().origin(), Some(Pos2::new(1.0, 1.0)));

        controller.on_pointer_move(Pos2::new(5.0, 5.0), &mut canvas);
        assert!(controller.gesture().is_dragging());
        assert!(canvas.ops().is_empty(), "shapes have no live preview");

        controller.on_pointer_up(Pos2::new(9.0, 9.0), &mut canvas);
        assert_eq!(controller.gesture(), GestureState::Idle);
        assert_eq!(canvas.ops().len(), 1);
    }

    #[test]
    fn test_release_without_press_draws_nothing() {
        let mut controller = ToolController::default();
        let mut canvas = DisplayCanvas::new(Color32::WHITE);
        controller.select_tool(Tool::Line);
        controller.on_pointer_up(Pos2::new(9.0, 9.0), &mut canvas);
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn test_brush_move_stamps_disc_with_stroke_width_radius() {
        let mut controller = ToolController::default();
        let mut canvas = DisplayCanvas::new(Color32::WHITE);
        controller.set_stroke_width(7);
        controller.on_pointer_move(Pos2::new(3.0, 4.0), &mut canvas);

        assert_eq!(
            canvas.ops(),
            &[CanvasOp::Disc {
                center: Pos2::new(3.0, 4.0),
                radius: 7.0,
                color: Color32::BLACK,
            }]
        );
    }

    #[test]
    fn test_text_tool_places_text_and_ends_gesture() {
        let mut controller = ToolController::default();
        let mut canvas = DisplayCanvas::new(Color32::WHITE);
        controller.select_tool(Tool::Text);
        controller.set_font(FontChoice::Monospace);
        controller.set_font_size(30);

        controller.on_pointer_down(Pos2::new(40.0, 50.0), &mut Some("hello".to_owned()), &mut canvas);
        assert_eq!(controller.gesture(), GestureState::Idle);
        assert_eq!(
            canvas.ops(),
            &[CanvasOp::Text {
                at: Pos2::new(40.0, 50.0),
                text: "hello".to_owned(),
                color: Color32::BLACK,
                font: FontChoice::Monospace,
                size: 30.0,
            }]
        );
    }

    #[test]
    fn test_empty_text_is_treated_as_cancel() {
        let mut controller = ToolController::default();
        let mut canvas = DisplayCanvas::new(Color32::WHITE);
        controller.select_tool(Tool::Text);

        controller.on_pointer_down(Pos2::new(1.0, 1.0), &mut Some(String::new()), &mut canvas);
        assert!(canvas.ops().is_empty());
        assert!(controller.gesture().is_dragging());

        controller.on_pointer_up(Pos2::new(1.0, 1.0), &mut canvas);
        assert!(canvas.ops().is_empty());
        assert_eq!(controller.gesture(), GestureState::Idle);
    }

    #[test]
    fn test_setters_clamp() {
        let mut controller = ToolController::default();
        controller.set_stroke_width(100);
        controller.set_font_size(1);
        assert_eq!(controller.state().stroke_width(), 20);
        assert_eq!(controller.state().font_size(), 10);
    }
}
