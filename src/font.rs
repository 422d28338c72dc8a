use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};
use egui::{FontDefinitions, FontFamily, Pos2};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Font family used for text placement.
///
/// Both surfaces draw from the same font files: the display through egui's
/// font system, the raster buffer through `ab_glyph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontChoice {
    #[default]
    Proportional,
    Monospace,
}

impl FontChoice {
    pub const ALL: [FontChoice; 2] = [FontChoice::Proportional, FontChoice::Monospace];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Proportional => "Proportional",
            Self::Monospace => "Monospace",
        }
    }

    pub fn family(&self) -> FontFamily {
        match self {
            Self::Proportional => FontFamily::Proportional,
            Self::Monospace => FontFamily::Monospace,
        }
    }
}

/// Parsed fonts for raster text, one per [`FontChoice`].
pub struct FontBook {
    proportional: Option<FontArc>,
    monospace: Option<FontArc>,
}

impl FontBook {
    /// Load the primary font of each family from egui's default definitions.
    pub fn from_egui_defaults() -> Self {
        let definitions = FontDefinitions::default();
        Self {
            proportional: Self::primary_font(&definitions, &FontFamily::Proportional),
            monospace: Self::primary_font(&definitions, &FontFamily::Monospace),
        }
    }

    /// Shared instance, parsed on first use.
    pub fn global() -> &'static FontBook {
        static BOOK: OnceLock<FontBook> = OnceLock::new();
        BOOK.get_or_init(Self::from_egui_defaults)
    }

    fn primary_font(definitions: &FontDefinitions, family: &FontFamily) -> Option<FontArc> {
        let name = definitions.families.get(family)?.first()?;
        let data = definitions.font_data.get(name)?;
        match FontArc::try_from_vec(data.font.to_vec()) {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("Could not parse font {name}: {err}");
                None
            }
        }
    }

    pub fn font(&self, choice: FontChoice) -> Option<&FontArc> {
        match choice {
            FontChoice::Proportional => self.proportional.as_ref(),
            FontChoice::Monospace => self.monospace.as_ref(),
        }
    }

    /// Rasterize `text` with its layout box anchored at `origin` (top-left).
    ///
    /// `plot` receives absolute pixel coordinates and a coverage in `0..=1`.
    /// Returns false when the font is unavailable.
    pub fn rasterize(
        &self,
        choice: FontChoice,
        size: f32,
        origin: Pos2,
        text: &str,
        mut plot: impl FnMut(i64, i64, f32),
    ) -> bool {
        let Some(font) = self.font(choice) else {
            return false;
        };
        let scale = px_scale(font, size);
        let scaled = font.as_scaled(scale);

        let mut baseline = origin.y + scaled.ascent();
        for line in text.lines() {
            let mut caret = origin.x;
            let mut previous: Option<GlyphId> = None;
            for ch in line.chars() {
                let id = scaled.glyph_id(ch);
                if let Some(prev) = previous {
                    caret += scaled.kern(prev, id);
                }
                let glyph = id.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
                caret += scaled.h_advance(id);
                previous = Some(id);

                if let Some(outlined) = font.outline_glyph(glyph) {
                    let bounds = outlined.px_bounds();
                    outlined.draw(|x, y, coverage| {
                        plot(
                            bounds.min.x as i64 + x as i64,
                            bounds.min.y as i64 + y as i64,
                            coverage,
                        );
                    });
                }
            }
            baseline += scaled.height() + scaled.line_gap();
        }
        true
    }
}

/// egui sizes fonts so that the full line height (not the em square)
/// matches the requested size; do the same here.
fn px_scale(font: &FontArc, size: f32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1.0);
    PxScale::from(size * font.height_unscaled() / units_per_em)
}
