use egui::{Context, PointerButton, Pos2, Rect};

/// A primary-button pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed over the canvas
    Down(Pos2),
    /// Motion sample while the button is held; may lie outside the canvas
    Move(Pos2),
    /// Button released, wherever the pointer is
    Up(Pos2),
}

/// Handles converting raw egui input into canvas pointer events.
///
/// A gesture starts only with a press inside the canvas; from then on every
/// motion sample is reported until the button is released, even outside.
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    dragging: bool,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            dragging: false,
            last_pointer_pos: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process raw egui input and generate our pointer events.
    ///
    /// `accept_press` is false when something covers the canvas, e.g. a dialog.
    pub fn process_input(&mut self, ctx: &Context, accept_press: bool) -> Vec<PointerEvent> {
        ctx.input(|input| self.process_events(&input.raw.events, accept_press))
    }

    /// Translate a batch of raw events, in order.
    pub fn process_events(&mut self, events: &[egui::Event], accept_press: bool) -> Vec<PointerEvent> {
        let mut out = Vec::new();
        for event in events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    if accept_press && !self.dragging && self.canvas_rect.contains(*pos) {
                        self.dragging = true;
                        out.push(PointerEvent::Down(self.to_local(*pos)));
                    }
                    self.last_pointer_pos = Some(*pos);
                }
                egui::Event::PointerMoved(pos) => {
                    if self.dragging && Some(*pos) != self.last_pointer_pos {
                        out.push(PointerEvent::Move(self.to_local(*pos)));
                    }
                    self.last_pointer_pos = Some(*pos);
                }
                egui::Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    if self.dragging {
                        self.dragging = false;
                        out.push(PointerEvent::Up(self.to_local(*pos)));
                    }
                    self.last_pointer_pos = Some(*pos);
                }
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Modifiers;

    fn button(x: f32, y: f32, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos: Pos2::new(x, y),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(Pos2::new(100.0, 50.0), egui::vec2(800.0, 500.0)))
    }

    #[test]
    fn test_gesture_is_reported_in_canvas_coordinates() {
        let mut input = handler();
        let events = input.process_events(
            &[
                button(110.0, 60.0, true),
                egui::Event::PointerMoved(Pos2::new(120.0, 70.0)),
                egui::Event::PointerMoved(Pos2::new(2000.0, 70.0)),
                button(2000.0, 70.0, false),
            ],
            true,
        );
        assert_eq!(
            events,
            vec![
                PointerEvent::Down(Pos2::new(10.0, 10.0)),
                PointerEvent::Move(Pos2::new(20.0, 20.0)),
                PointerEvent::Move(Pos2::new(1900.0, 20.0)),
                PointerEvent::Up(Pos2::new(1900.0, 20.0)),
            ]
        );
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut input = handler();
        let events = input.process_events(
            &[
                button(10.0, 10.0, true),
                egui::Event::PointerMoved(Pos2::new(150.0, 70.0)),
                button(150.0, 70.0, false),
            ],
            true,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_moves_without_button_are_ignored() {
        let mut input = handler();
        let events = input.process_events(&[egui::Event::PointerMoved(Pos2::new(150.0, 70.0))], true);
        assert!(events.is_empty());
    }

    #[test]
    fn test_blocked_press_starts_nothing() {
        let mut input = handler();
        let events = input.process_events(&[button(150.0, 70.0, true)], false);
        assert!(events.is_empty());
        assert!(!input.is_dragging());
    }
}
