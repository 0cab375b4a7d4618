use glintstone_core::InputEvent;

use crate::app::GlintstoneApp;

const MARGIN: f32 = 12.0;

/// Place the minimap in the canvas corner and route its drag to the viewer.
pub fn interact(ui: &egui::Ui, canvas: egui::Rect, app: &mut GlintstoneApp) -> Option<egui::Response> {
    app.viewport.minimap_texture.as_ref()?;
    let layout = app.zoombox.minimap_layout();
    let size = egui::vec2(layout.width as f32, layout.height as f32);
    let rect = egui::Rect::from_min_size(canvas.right_bottom() - size - egui::vec2(MARGIN, MARGIN), size);

    let response = ui.interact(rect, ui.id().with("minimap"), egui::Sense::drag());
    let fraction = |pos: egui::Pos2| {
        let rel = (pos - rect.min) / rect.size();
        (f64::from(rel.x), f64::from(rel.y))
    };

    let pointer = response.interact_pointer_pos();
    if response.drag_started() {
        if let Some((fx, fy)) = pointer.map(fraction) {
            app.zoombox
                .handle_input(InputEvent::MinimapPress { fx, fy }, &mut app.ui_state);
        }
    } else if response.dragged() {
        if let Some((fx, fy)) = pointer.map(fraction) {
            app.zoombox
                .handle_input(InputEvent::MinimapDrag { fx, fy }, &mut app.ui_state);
        }
    }
    if response.drag_stopped() {
        app.zoombox
            .handle_input(InputEvent::MinimapRelease, &mut app.ui_state);
    }
    if response.hovered() || response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
    }
    Some(response)
}

pub fn draw(painter: &egui::Painter, rect: egui::Rect, app: &GlintstoneApp) {
    let Some(ref texture) = app.viewport.minimap_texture else {
        return;
    };
    painter.rect_filled(rect.expand(2.0), 2.0, egui::Color32::from_black_alpha(180));
    painter.image(
        texture.id(),
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    let indicator = app.zoombox.minimap_indicator();
    let min = rect.min
        + egui::vec2(
            rect.width() * (indicator.left / 100.0) as f32,
            rect.height() * (indicator.top / 100.0) as f32,
        );
    let size = egui::vec2(
        rect.width() * (indicator.width / 100.0) as f32,
        rect.height() * (indicator.height / 100.0) as f32,
    );
    painter.rect_stroke(
        egui::Rect::from_min_size(min, size),
        0.0,
        egui::Stroke::new(1.5, egui::Color32::from_rgb(255, 80, 80)),
        egui::StrokeKind::Inside,
    );
}
