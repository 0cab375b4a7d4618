use glintstone_core::ZoomboxConfig;

use crate::app::GlintstoneApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::worker::send;

pub fn show(ctx: &egui::Context, app: &mut GlintstoneApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_image(ctx, app);
                }

                if ui.button("Open Sources...").clicked() {
                    ui.close();
                    app.sources.open = true;
                }

                if ui.button("Open Annotations...").clicked() {
                    ui.close();
                    open_annotations(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let loaded = app.zoombox.state().image_loaded;
                if ui.add_enabled(loaded, egui::Button::new("Zoom In")).clicked() {
                    ui.close();
                    app.zoombox.zoom_in(&mut app.ui_state);
                }
                if ui.add_enabled(loaded, egui::Button::new("Zoom Out")).clicked() {
                    ui.close();
                    app.zoombox.zoom_out(&mut app.ui_state);
                }
                if ui.add_enabled(loaded, egui::Button::new("Reset View")).clicked() {
                    ui.close();
                    app.zoombox.reset(&mut app.ui_state);
                }
                if ui.add_enabled(loaded, egui::Button::new("Fit Whole Image")).clicked() {
                    ui.close();
                    app.zoombox.reset_zoom(&mut app.ui_state);
                }

                ui.separator();

                ui.checkbox(&mut app.ui_state.show_minimap, "Minimap");
                ui.checkbox(&mut app.ui_state.show_overlays, "Sign Overlays");
                if ui
                    .add_enabled(!app.zoombox.overlays().is_empty(), egui::Button::new("Clear Overlays"))
                    .clicked()
                {
                    ui.close();
                    app.zoombox.clear_overlays(&mut app.ui_state);
                    app.ui_state.selected = None;
                    app.ui_state.add_log("Overlays cleared".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_image(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_image(ctx: &egui::Context, app: &mut GlintstoneApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "tif", "tiff", "webp", "bmp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            send(&result_tx, &ctx, WorkerResult::ImagePicked { path });
        }
    });
}

fn open_annotations(app: &mut GlintstoneApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadAnnotations { path });
        }
    });
}

fn import_config(ctx: &egui::Context, app: &mut GlintstoneApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match ZoomboxConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { path, config },
            Err(e) => WorkerResult::Error {
                message: format!("Invalid config {}: {e}", path.display()),
            },
        };
        send(&result_tx, &ctx, result);
    });
}

fn export_config(ctx: &egui::Context, app: &mut GlintstoneApp) {
    let config = app.zoombox.config().clone();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("glintstone.toml")
            .save_file()
        {
            let written = toml::to_string_pretty(&config)
                .map_err(|e| e.to_string())
                .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));
            let result = match written {
                Ok(()) => WorkerResult::Log {
                    message: format!("Config saved: {}", path.display()),
                },
                Err(message) => WorkerResult::Error { message },
            };
            send(&result_tx, &ctx, result);
        }
    });
}
