use crate::app::GlintstoneApp;

/// Window for entering the three-step source chain by hand.
pub fn show(ctx: &egui::Context, app: &mut GlintstoneApp) {
    if !app.sources.open {
        return;
    }
    let mut open = true;
    let mut load = false;

    egui::Window::new("Image Sources")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("sources_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Local");
                    ui.text_edit_singleline(&mut app.sources.local);
                    ui.end_row();

                    ui.label("Primary");
                    ui.text_edit_singleline(&mut app.sources.primary);
                    ui.end_row();

                    ui.label("Secondary");
                    ui.text_edit_singleline(&mut app.sources.secondary);
                    ui.end_row();

                    ui.label("Cache dir");
                    ui.text_edit_singleline(&mut app.sources.cache_dir);
                    ui.end_row();
                });
            ui.add_space(6.0);
            let any = !app.sources.sources().candidates().is_empty();
            if ui.add_enabled(any, egui::Button::new("Load")).clicked() {
                load = true;
            }
        });

    if load {
        let sources = app.sources.sources();
        let cache_dir = app.sources.cache_dir();
        app.request_load(ctx, sources, cache_dir);
        open = false;
    }
    app.sources.open = open;
}
