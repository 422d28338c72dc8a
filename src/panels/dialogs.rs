use egui::{Color32, Pos2};
use std::path::PathBuf;

use crate::PaintApp;
use crate::file_handler::{OPEN_EXTENSIONS, is_openable};

/// The modal dialog currently shown. Canvas input is ignored while one is open.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Dialog {
    #[default]
    Closed,
    Color {
        color: Color32,
    },
    /// Text entry for a text-tool press at `at`
    Text {
        at: Pos2,
        text: String,
    },
    Open {
        path: String,
    },
    Save {
        path: String,
    },
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

enum Outcome {
    Pending,
    Confirmed,
    Cancelled,
}

/// Window with a body and OK/Cancel buttons. Enter confirms, Escape cancels.
fn modal(ctx: &egui::Context, title: &str, confirm_label: &str, can_confirm: bool, body: impl FnOnce(&mut egui::Ui)) -> Outcome {
    let mut outcome = Outcome::Pending;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            body(ui);
            ui.separator();
            ui.horizontal(|ui| {
                if ui.add_enabled(can_confirm, egui::Button::new(confirm_label)).clicked() {
                    outcome = Outcome::Confirmed;
                }
                if ui.button("Cancel").clicked() {
                    outcome = Outcome::Cancelled;
                }
            });
        });

    if matches!(outcome, Outcome::Pending) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                outcome = Outcome::Cancelled;
            } else if can_confirm && i.key_pressed(egui::Key::Enter) {
                outcome = Outcome::Confirmed;
            }
        });
    }
    outcome
}

fn path_field(ui: &mut egui::Ui, path: &mut String) {
    ui.label("Path:");
    ui.add(egui::TextEdit::singleline(path).desired_width(320.0))
        .request_focus();
}

pub fn dialogs(app: &mut PaintApp, ctx: &egui::Context) {
    let mut dialog = app.take_dialog();
    let outcome = match &mut dialog {
        Dialog::Closed => return,
        Dialog::Color { color } => modal(ctx, "Choose color", "OK", true, |ui| {
            egui::color_picker::color_picker_color32(ui, color, egui::color_picker::Alpha::Opaque);
        }),
        Dialog::Text { text, .. } => modal(ctx, "Text Tool", "OK", true, |ui| {
            ui.label("Enter text:");
            ui.text_edit_singleline(text).request_focus();
        }),
        Dialog::Open { path } => {
            let can_open = is_openable(&PathBuf::from(path.trim()));
            modal(ctx, "Load image", "Load", can_open, |ui| {
                path_field(ui, path);
                ui.label(format!("Image files: {}", OPEN_EXTENSIONS.join(", ")));
            })
        }
        Dialog::Save { path } => {
            let can_save = !path.trim().is_empty();
            modal(ctx, "Save image", "Save", can_save, |ui| {
                path_field(ui, path);
                ui.label("Format follows the extension; .png if none is given.");
            })
        }
    };

    match outcome {
        Outcome::Pending => app.open_dialog(dialog),
        Outcome::Confirmed => finish(app, dialog),
        Outcome::Cancelled => cancel(app, dialog),
    }
}

fn finish(app: &mut PaintApp, dialog: Dialog) {
    match dialog {
        Dialog::Closed => {}
        Dialog::Color { color } => app.apply_color(Some(color)),
        Dialog::Text { at, text } => app.place_text(at, Some(text)),
        Dialog::Open { path } => app.load_from(&PathBuf::from(path.trim())),
        Dialog::Save { path } => app.save_to(&PathBuf::from(path.trim())),
    }
}

fn cancel(app: &mut PaintApp, dialog: Dialog) {
    log::debug!("Dialog dismissed: {dialog:?}");
    match dialog {
        Dialog::Color { .. } => app.apply_color(None),
        Dialog::Text { at, .. } => app.place_text(at, None),
        Dialog::Closed | Dialog::Open { .. } | Dialog::Save { .. } => {}
    }
}
