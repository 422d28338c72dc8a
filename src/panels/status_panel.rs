use crate::PaintApp;

pub fn status_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let state = app.controller().state();
            ui.label(format!("Tool: {}", state.tool().name()));
            if state.is_erasing() {
                ui.label("(erasing)");
            }
            ui.separator();
            if let Some(message) = app.status() {
                ui.label(message);
            }
        });
    });
}
