use egui::{Color32, Pos2, Rect};
use std::path::Path;

use crate::canvas::DisplayCanvas;
use crate::config::PaintConfig;
use crate::error::PaintError;
use crate::file_handler::FileHandler;
use crate::input::{InputHandler, PointerEvent};
use crate::panels::{self, Dialog};
use crate::raster::RasterBuffer;
use crate::surface::Mirror;
use crate::tools::{Tool, ToolController};

/// Window size restored when leaving fullscreen.
const WINDOWED_SIZE: egui::Vec2 = egui::vec2(800.0, 600.0);

/// The paint application: tool state, the two drawing surfaces, and the
/// dialog currently open (if any).
#[derive(Debug)]
pub struct PaintApp {
    controller: ToolController,
    raster: RasterBuffer,
    canvas: DisplayCanvas,
    canvas_size: [u32; 2],
    input: InputHandler,
    files: FileHandler,
    dialog: Dialog,
    status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(&PaintConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: &PaintConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::with_config(config)
    }

    /// Build the app without a window, e.g. for tests.
    pub fn with_config(config: &PaintConfig) -> Self {
        let background = config.background_color();
        let canvas_size = [config.canvas_width, config.canvas_height];
        log::info!("Creating {}x{} canvas", canvas_size[0], canvas_size[1]);
        Self {
            controller: ToolController::new(config.initial_state()),
            raster: RasterBuffer::new(canvas_size[0], canvas_size[1], background),
            canvas: DisplayCanvas::new(background),
            canvas_size,
            input: InputHandler::new(Rect::NOTHING),
            files: FileHandler::new(),
            dialog: Dialog::Closed,
            status: None,
        }
    }

    pub fn controller(&self) -> &ToolController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ToolController {
        &mut self.controller
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    pub fn canvas(&self) -> &DisplayCanvas {
        &self.canvas
    }

    pub fn canvas_size(&self) -> [u32; 2] {
        self.canvas_size
    }

    pub fn files(&self) -> &FileHandler {
        &self.files
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = dialog;
    }

    pub(crate) fn take_dialog(&mut self) -> Dialog {
        std::mem::take(&mut self.dialog)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, message: String) {
        log::info!("{message}");
        self.status = Some(message);
    }

    fn report(&mut self, err: PaintError) {
        log::error!("{err}");
        self.status = Some(format!("{}: {err}", err.kind()));
    }

    /// Feed one canvas pointer event to the tool controller.
    ///
    /// Events are dropped while a dialog is open. A press with the text tool
    /// opens the text dialog instead; the press is completed by [`Self::place_text`].
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.dialog.is_open() {
            return;
        }
        let mut surfaces = Mirror::new(&mut self.raster, &mut self.canvas);
        match event {
            PointerEvent::Down(at) if self.controller.state().tool() == Tool::Text => {
                self.dialog = Dialog::Text {
                    at,
                    text: String::new(),
                };
            }
            PointerEvent::Down(at) => self.controller.on_pointer_down(at, &mut None::<String>, &mut surfaces),
            PointerEvent::Move(at) => self.controller.on_pointer_move(at, &mut surfaces),
            PointerEvent::Up(at) => self.controller.on_pointer_up(at, &mut surfaces),
        }
    }

    /// Finish a text-tool press with the text dialog's answer.
    pub fn place_text(&mut self, at: Pos2, answer: Option<String>) {
        let mut surfaces = Mirror::new(&mut self.raster, &mut self.canvas);
        let mut answer = answer;
        self.controller.on_pointer_down(at, &mut answer, &mut surfaces);
        // The release happened while the dialog was up; close the gesture now.
        if self.controller.gesture().is_dragging() {
            self.controller.on_pointer_up(at, &mut surfaces);
        }
    }

    pub fn apply_color(&mut self, picked: Option<Color32>) {
        self.controller.set_color(picked);
    }

    pub fn clear_canvas(&mut self) {
        self.controller.clear(&mut Mirror::new(&mut self.raster, &mut self.canvas));
        self.status = None;
    }

    pub fn save_to(&mut self, path: &Path) {
        match self.files.save(path, &self.raster) {
            Ok(written) => self.set_status(format!("Saved {}", written.display())),
            Err(err) => self.report(err),
        }
    }

    /// Load `path` stretched to the canvas size into both surfaces.
    /// On failure nothing changes.
    pub fn load_from(&mut self, path: &Path) {
        let [width, height] = self.canvas_size;
        match self.files.load(path, width, height) {
            Ok(image) => {
                self.controller
                    .load_image(&image, &mut Mirror::new(&mut self.raster, &mut self.canvas));
                self.set_status(format!("Loaded {}", path.display()));
            }
            Err(err) => self.report(err),
        }
    }

    /// Route this frame's raw input to the canvas.
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: Rect, hovered: bool) {
        self.input.set_canvas_rect(canvas_rect);
        let accept_press = hovered && !self.dialog.is_open();
        for event in self.input.process_input(ctx, accept_press) {
            self.handle_pointer(event);
        }
    }

    pub(crate) fn render_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect) {
        self.canvas.render(ctx, painter, rect);
    }

    fn toggle_fullscreen(&self, ctx: &egui::Context) {
        let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
        log::debug!("Fullscreen: {}", !fullscreen);
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
        if fullscreen {
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(WINDOWED_SIZE));
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::F11)) {
            self.toggle_fullscreen(ctx);
        }

        panels::tools_panel(self, ctx);
        panels::status_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::dialogs(self, ctx);
    }
}
