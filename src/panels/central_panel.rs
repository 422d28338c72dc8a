use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let [width, height] = app.canvas_size();
        let (response, painter) = ui.allocate_painter(
            egui::vec2(width as f32, height as f32),
            egui::Sense::click_and_drag(),
        );
        let canvas_rect = response.rect;

        // Handle input before drawing so this frame shows its effect
        app.handle_canvas_input(ctx, canvas_rect, response.hovered());

        let painter = painter.with_clip_rect(canvas_rect);
        app.render_canvas(ctx, &painter, canvas_rect);

        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    });
}
