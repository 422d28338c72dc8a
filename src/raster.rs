use egui::{Color32, Pos2, Vec2};
use image::{Rgb, RgbImage};

use crate::font::{FontBook, FontChoice};
use crate::surface::{OutlineBox, Surface};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 500;

fn rgb(color: Color32) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

/// Off-screen RGB pixel buffer mirroring the canvas, used for export.
///
/// A pixel `(x, y)` is painted when the point `(x, y)` lies inside the
/// shape. Everything outside the buffer is silently clipped.
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    pixels: RgbImage,
    background: Color32,
    /// Dimensions at creation; `clear` always returns to these.
    initial_size: [u32; 2],
}

impl Default for RasterBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, Color32::WHITE)
    }
}

impl RasterBuffer {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, rgb(background)),
            background,
            initial_size: [width, height],
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|p| Color32::from_rgb(p[0], p[1], p[2]))
    }

    /// Snapshot of the current pixels.
    pub fn export(&self) -> RgbImage {
        self.pixels.clone()
    }

    /// Set every in-bounds pixel of the box `[min, max]` for which
    /// `inside(x, y)` holds.
    fn fill_where(&mut self, min: Pos2, max: Pos2, color: Color32, inside: impl Fn(f32, f32) -> bool) {
        let (width, height) = self.pixels.dimensions();
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(width as f32 - 1.0);
        let y1 = max.y.ceil().min(height as f32 - 1.0);
        // Also rejects NaN bounds.
        if !(x0 <= x1 && y0 <= y1) {
            return;
        }

        let pixel = rgb(color);
        for y in y0 as u32..=y1 as u32 {
            for x in x0 as u32..=x1 as u32 {
                if inside(x as f32, y as f32) {
                    self.pixels.put_pixel(x, y, pixel);
                }
            }
        }
    }

    /// Blend `color` over the pixel at `(x, y)` by `coverage`.
    fn blend(&mut self, x: i64, y: i64, color: Color32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        let src = [color.r(), color.g(), color.b()];
        for (d, s) in dst.0.iter_mut().zip(src) {
            *d = (*d as f32 * (1.0 - coverage) + s as f32 * coverage).round() as u8;
        }
    }
}

impl Surface for RasterBuffer {
    fn paint_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        let radius = radius.max(0.0);
        let r2 = radius * radius;
        let extent = Vec2::splat(radius);
        self.fill_where(center - extent, center + extent, color, |x, y| {
            let (dx, dy) = (x - center.x, y - center.y);
            dx * dx + dy * dy <= r2
        });
    }

    fn paint_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let half = (width / 2.0).max(0.5);
        let dir = to - from;
        let length_sq = dir.length_sq();
        let min = from.min(to) - Vec2::splat(half);
        let max = from.max(to) + Vec2::splat(half);
        self.fill_where(min, max, color, |x, y| {
            let offset = Pos2::new(x, y) - from;
            if length_sq == 0.0 {
                return offset.length() <= half;
            }
            let t = offset.dot(dir) / length_sq;
            if !(0.0..=1.0).contains(&t) {
                return false;
            }
            (offset - dir * t).length() <= half
        });
    }

    fn paint_rect_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32) {
        let OutlineBox { min, max, width } = OutlineBox::new(corner_a, corner_b, width);
        self.fill_where(min, max, color, |x, y| {
            x < min.x + width || x > max.x - width || y < min.y + width || y > max.y - width
        });
    }

    fn paint_oval_outline(&mut self, corner_a: Pos2, corner_b: Pos2, width: f32, color: Color32) {
        let outline = OutlineBox::new(corner_a, corner_b, width);
        let center = outline.center();
        let outer = outline.outer_radii();
        let inner = outline.inner_radii();
        let solid = outline.oval_is_solid();

        let normalized = |x: f32, y: f32, radii: Vec2| {
            let (nx, ny) = ((x - center.x) / radii.x, (y - center.y) / radii.y);
            nx * nx + ny * ny
        };
        self.fill_where(outline.min, outline.max, color, |x, y| {
            normalized(x, y, outer) <= 1.0 && (solid || normalized(x, y, inner) > 1.0)
        });
    }

    fn paint_text(&mut self, at: Pos2, text: &str, color: Color32, font: FontChoice, size: f32) {
        let drawn = FontBook::global().rasterize(font, size, at, text, |x, y, coverage| {
            self.blend(x, y, color, coverage);
        });
        if !drawn {
            log::warn!("No {} font available, text not rasterized", font.label());
        }
    }

    fn clear(&mut self, color: Color32) {
        let [width, height] = self.initial_size;
        self.pixels = RgbImage::from_pixel(width, height, rgb(color));
        self.background = color;
    }

    fn replace(&mut self, image: &RgbImage) {
        self.pixels = image.clone();
    }
}
