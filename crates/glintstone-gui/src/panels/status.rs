use crate::app::GlintstoneApp;

pub fn show(ctx: &egui::Context, app: &mut GlintstoneApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let state = app.zoombox.state();
            if app.ui_state.loading {
                ui.spinner();
                ui.label("Loading...");
                ui.separator();
            }
            if let Some(ref info) = app.ui_state.loaded {
                ui.label(format!("{}x{}", info.width, info.height));
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", state.scale * 100.0));
                ui.separator();
                ui.label(format!(
                    "Range: {:.0}%-{:.0}%",
                    state.min_scale * 100.0,
                    state.max_scale * 100.0
                ));
                ui.separator();
            } else if app.ui_state.load_error.is_some() {
                ui.label("Image unavailable");
                ui.separator();
            }

            let overlays = app.zoombox.overlays().annotations().len();
            if overlays > 0 {
                ui.label(format!("{overlays} signs"));
                ui.separator();
            }
            if let Some(ref sign) = app.ui_state.hovered_sign {
                ui.label(format!("Hover: {} ({})", sign.sign, sign.surface));
                ui.separator();
            }
            if let Some((ref sign, rect)) = app.ui_state.selected {
                ui.label(format!(
                    "Selected: {} at ({:.0}, {:.0})",
                    sign.sign, rect.x, rect.y
                ));
            }
        });

        ui.add_space(2.0);
    });
}
