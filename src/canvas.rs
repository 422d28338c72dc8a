use egui::{Align2, Color32, ColorImage, FontId, Pos2, Rect, Stroke, TextureHandle, TextureOptions, Vec2};
use image::RgbImage;

use crate::font::FontChoice;
use crate::surface::{OutlineBox, Surface};

/// A drawing command retained for display, in canvas-local pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Disc {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
    Rect {
        outline: OutlineBox,
        color: Color32,
    },
    Oval {
        outline: OutlineBox,
        color: Color32,
    },
    Text {
        at: Pos2,
        text: String,
        color: Color32,
        font: FontChoice,
        size: f32,
    },
}

impl CanvasOp {
    /// Issue this op again to another surface.
    pub fn replay(&self, surface: &mut impl Surface) {
        match self {
            Self::Disc { center, radius, color } => surface.paint_disc(*center, *radius, *color),
            Self::Line { from, to, width, color } => surface.paint_line(*from, *to, *width, *color),
            Self::Rect { outline, color } => {
                surface.paint_rect_outline(outline.min, outline.max, outline.width, *color)
            }
            Self::Oval { outline, color } => {
                surface.paint_oval_outline(outline.min, outline.max, outline.width, *color)
            }
            Self::Text { at, text, color, font, size } => surface.paint_text(*at, text, *color, *font, *size),
        }
    }
}

/// The visible drawing surface.
///
/// egui repaints every frame, so the canvas keeps a display list of every
/// command it received since the last clear or load and replays it.
pub struct DisplayCanvas {
    background: Color32,
    ops: Vec<CanvasOp>,
    /// Image shown under the display list after a load.
    image: Option<ColorImage>,
    texture: Option<TextureHandle>,
}

// Custom Debug implementation since the texture handle is not interesting to print
impl std::fmt::Debug for DisplayCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayCanvas")
            .field("background", &self.background)
            .field("ops", &self.ops.len())
            .field("image", &self.image.as_ref().map(|image| image.size))
            .field("texture_loaded", &self.texture.is_some())
            .finish()
    }
}

impl DisplayCanvas {
    pub fn new(background: Color32) -> Self {
        Self {
            background,
            ops: Vec::new(),
            image: None,
            texture: None,
        }
    }

    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Size of the loaded image, if one is shown.
    pub fn image_size(&self) -> Option<[usize; 2]> {
        self.image.as_ref().map(|image| image.size)
    }

    /// Paint the canvas into `rect`, whose top-left is canvas origin.
    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, self.background);

        if self.texture.is_none() {
            if let Some(image) = &self.image {
                self.texture = Some(ctx.load_texture("loaded_image", image.clone(), TextureOptions::LINEAR));
            }
        }
        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }

        // Pixel (x, y) on screen covers [x, x + 1); shift by half a pixel so
        // its center sits on the integer coordinate the raster buffer samples.
        let offset = rect.min.to_vec2() + Vec2::splat(0.5);
        for op in &self.ops {
            paint_op(painter, op, offset);
        }
    }
}

fn paint_op(painter: &egui::Painter, op: &CanvasOp, offset: Vec2) {
    match op {
        CanvasOp::Disc { center, radius, color } => {
            painter.circle_filled(*center + offset, *radius, *color);
        }
        CanvasOp::Line { from, to, width, color } => {
            painter.line_segment([*from + offset, *to + offset], Stroke::new(width.max(1.0), *color));
        }
        CanvasOp::Rect { outline, color } => {
            if outline.rect_is_solid() {
                let half = Vec2::splat(0.5);
                let rect = Rect::from_min_max(outline.min - half + offset, outline.max + half + offset);
                painter.rect_filled(rect, 0.0, *color);
                return;
            }
            // The raster band runs inward from the box edge; center the stroke on it.
            let inset = Vec2::splat((outline.width - 1.0) / 2.0);
            let rect = Rect::from_min_max(outline.min + inset + offset, outline.max - inset + offset);
            painter.rect_stroke(rect, 0.0, Stroke::new(outline.width, *color));
        }
        CanvasOp::Oval { outline, color } => {
            let center = outline.center() + offset;
            if outline.oval_is_solid() {
                painter.add(egui::Shape::ellipse_filled(center, outline.outer_radii(), *color));
                return;
            }
            let radius = outline.outer_radii() - Vec2::splat(outline.width / 2.0);
            painter.add(egui::Shape::ellipse_stroke(
                center,
                radius,
                Stroke::new(outline.width, *color),
            ));
        }
        CanvasOp::Text { at, text, color, font, size } => {
            painter.text(
                *at + offset,
                Align2::LEFT_TOP,
                text,
                FontId::new(*size, font.family()),
                *color,
            );
        }
    }
}

impl Surface for DisplayCanvas {
    fn paint_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.ops.push(CanvasOp::Disc { center, radius, color });
    }

    fn paint_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.ops.push(CanvasOp::Line { from, to, width, color });
    }

    fn paint_rect_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32) {
        let outline = OutlineBox::new(corner_a, corner_b, width);
        self.ops.push(CanvasOp::Rect { outline, color });
    }

    fn paint_oval_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32) {
        let outline = OutlineBox::new(corner_a, corner_b, width);
        self.ops.push(CanvasOp::Oval { outline, color });
    }

    fn paint_text(&mut self, at: Pos2, text: &str, color: Color32, font: FontChoice, size: f32) {
        self.ops.push(CanvasOp::Text {
            at,
            text: text.to_owned(),
            color,
            font,
            size,
        });
    }

    fn clear(&mut self, color: Color32) {
        self.background = color;
        self.ops.clear();
        self.image = None;
        self.texture = None;
    }

    fn replace(&mut self, image: &RgbImage) {
        let size = [image.width() as usize, image.height() as usize];
        self.image = Some(ColorImage::from_rgb(size, image.as_raw()));
        self.texture = None;
        self.ops.clear();
    }
}
