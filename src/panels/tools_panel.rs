use egui::Color32;

use crate::PaintApp;
use crate::components::ToolButton;
use crate::file_handler::DEFAULT_EXTENSION;
use crate::font::FontChoice;
use crate::panels::Dialog;
use crate::state::{FONT_SIZE_RANGE, STROKE_WIDTH_RANGE};
use crate::tools::Tool;

fn swatch(ui: &mut egui::Ui, color: Color32, hover: &str) -> egui::Response {
    ui.add(egui::Button::new("").fill(color).min_size(egui::vec2(18.0, 18.0)))
        .on_hover_text(hover)
}

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            let active_tool = app.controller().state().tool();
            for tool in Tool::ALL {
                if ToolButton::new(tool, active_tool == tool).show(ui).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    app.controller_mut().select_tool(tool);
                }
            }
            ui.separator();

            if ui.button("Color").clicked() {
                let color = app.controller().state().brush_color();
                app.open_dialog(Dialog::Color { color });
            }
            if ui.button("Clear").clicked() {
                app.clear_canvas();
            }
            if ui.button("Save").clicked() {
                let path = app
                    .files()
                    .last_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| format!("drawing.{DEFAULT_EXTENSION}"));
                app.open_dialog(Dialog::Save { path });
            }
            if ui.button("Load").clicked() {
                let path = app
                    .files()
                    .last_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                app.open_dialog(Dialog::Open { path });
            }
        });

        ui.horizontal_wrapped(|ui| {
            ui.label("Size:");
            let mut width = app.controller().state().stroke_width();
            if ui.add(egui::Slider::new(&mut width, STROKE_WIDTH_RANGE)).changed() {
                app.controller_mut().set_stroke_width(width);
            }
            ui.separator();

            ui.label("Font:");
            let current = app.controller().state().font();
            let mut chosen = current;
            egui::ComboBox::from_id_salt("font_choice")
                .selected_text(current.label())
                .show_ui(ui, |ui| {
                    for font in FontChoice::ALL {
                        ui.selectable_value(&mut chosen, font, font.label());
                    }
                });
            if chosen != current {
                app.controller_mut().set_font(chosen);
            }

            ui.label("Size:");
            let mut font_size = app.controller().state().font_size();
            if ui.add(egui::Slider::new(&mut font_size, FONT_SIZE_RANGE)).changed() {
                app.controller_mut().set_font_size(font_size);
            }
            ui.separator();

            let current_color = app.controller().state().brush_color();
            swatch(ui, current_color, "Current color");
            if ui.button("Save color").clicked() {
                app.controller_mut().save_color();
            }

            // Copy out so the palette can be picked from while iterating.
            let saved: Vec<Color32> = app.controller().state().palette().colors().to_vec();
            for color in saved {
                let [r, g, b, _] = color.to_array();
                if swatch(ui, color, &format!("#{r:02x}{g:02x}{b:02x}")).clicked() {
                    app.controller_mut().pick_saved_color(color);
                }
            }
        });
    });
}
