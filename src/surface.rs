use egui::{Color32, Pos2, Rect};
use image::RgbImage;

use crate::font::FontChoice;

/// Anything that can receive drawing commands.
///
/// The raster buffer and the on-screen canvas both implement this, so a
/// gesture is dispatched once and lands on both.
/// Coordinates are canvas-local; anything outside the surface is clipped.
pub trait Surface {
    /// Filled disc, used for brush and eraser dabs.
    fn paint_disc(&mut self, center: Pos2, radius: f32, color: Color32);

    /// Straight segment with butt ends.
    fn paint_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);

    /// Rectangle outline spanned by two opposite corners, stroked inward.
    fn paint_rect_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32);

    /// Ellipse outline inscribed in the box spanned by two corners, stroked inward.
    fn paint_oval_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32);

    /// Text with the top-left of its layout box at `at`.
    fn paint_text(&mut self, at: Pos2, text: &str, color: Color32, font: FontChoice, size: f32);

    /// Reset to a blank surface of `color`.
    fn clear(&mut self, color: Color32);

    /// Replace the contents with an image already sized to the surface.
    fn replace(&mut self, image: &RgbImage);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn paint_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        (**self).paint_disc(center, radius, color);
    }

    fn paint_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        (**self).paint_line(from, to, width, color);
    }

    fn paint_rect_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32) {
        (**self).paint_rect_outline(corner_a, corner_b, width, color);
    }

    fn paint_oval_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32) {
        (**self).paint_oval_outline(corner_a, corner_b, width, color);
    }

    fn paint_text(&mut self, at: Pos2, text: &str, color: Color32, font: FontChoice, size: f32) {
        (**self).paint_text(at, text, color, font, size);
    }

    fn clear(&mut self, color: Color32) {
        (**self).clear(color);
    }

    fn replace(&mut self, image: &RgbImage) {
        (**self).replace(image);
    }
}

/// Forwards every command to two surfaces in order.
pub struct Mirror<A, B> {
    pub primary: A,
    pub secondary: B,
}

impl<A: Surface, B: Surface> Mirror<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A: Surface, B: Surface> Surface for Mirror<A, B> {
    fn paint_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.primary.paint_disc(center, radius, color);
        self.secondary.paint_disc(center, radius, color);
    }

    fn paint_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.primary.paint_line(from, to, width, color);
        self.secondary.paint_line(from, to, width, color);
    }

    fn paint_rect_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32) {
        self.primary.paint_rect_outline(corner_a, corner_b, width, color);
        self.secondary.paint_rect_outline(corner_a, corner_b, width, color);
    }

    fn paint_oval_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32) {
        self.primary.paint_oval_outline(corner_a, corner_b, width, color);
        self.secondary.paint_oval_outline(corner_a, corner_b, width, color);
    }

    fn paint_text(&mut self, at: Pos2, text: &str, color: Color32, font: FontChoice, size: f32) {
        self.primary.paint_text(at, text, color, font, size);
        self.secondary.paint_text(at, text, color, font, size);
    }

    fn clear(&mut self, color: Color32) {
        self.primary.clear(color);
        self.secondary.clear(color);
    }

    fn replace(&mut self, image: &RgbImage) {
        self.primary.replace(image);
        self.secondary.replace(image);
    }
}

/// Pixel-snapped box and stroke width shared by the outline primitives.
///
/// The box holds the first and last covered pixel on each axis (inclusive),
/// so a click without drag still yields a one-pixel box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineBox {
    pub min: Pos2,
    pub max: Pos2,
    pub width: f32,
}

impl OutlineBox {
    pub fn new(corner_a: Pos2, corner_b: Pos2, width: f32) -> Self {
        let rect = Rect::from_two_pos(corner_a, corner_b);
        Self {
            min: rect.min.round(),
            max: rect.max.round(),
            width: width.round().max(1.0),
        }
    }

    pub fn center(&self) -> Pos2 {
        self.min + (self.max - self.min) / 2.0
    }

    /// Radii of the outer edge of an inscribed ellipse, in pixels.
    pub fn outer_radii(&self) -> egui::Vec2 {
        (self.max - self.min) / 2.0 + egui::Vec2::splat(0.5)
    }

    /// Radii of the inner edge of the oval band.
    pub fn inner_radii(&self) -> egui::Vec2 {
        self.outer_radii() - egui::Vec2::splat(self.width)
    }

    /// The oval band leaves no hole on at least one axis.
    pub fn oval_is_solid(&self) -> bool {
        let inner = self.inner_radii();
        inner.x <= 0.0 || inner.y <= 0.0
    }

    /// The inward rectangle band covers the whole box.
    pub fn rect_is_solid(&self) -> bool {
        let pixels = self.max - self.min + egui::Vec2::splat(1.0);
        pixels.x <= 2.0 * self.width || pixels.y <= 2.0 * self.width
    }
}
