use glintstone_core::ScreenRect;

use crate::app::GlintstoneApp;

const BOX_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 170, 255);
const HOVER_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 200, 60);
const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 110, 60);

pub fn draw(painter: &egui::Painter, canvas: egui::Rect, app: &GlintstoneApp) {
    let hovered = app.zoombox.overlays().hovered();
    let selected = app.ui_state.selected.as_ref().map(|(a, _)| a);

    for (annotation, rect) in app.zoombox.overlay_rects() {
        let rect = to_egui(canvas, rect);
        if !rect.intersects(canvas) {
            continue;
        }
        let (color, width) = if Some(annotation) == hovered {
            (HOVER_COLOR, 2.0)
        } else if Some(annotation) == selected {
            (SELECTED_COLOR, 2.0)
        } else {
            (BOX_COLOR, 1.0)
        };
        painter.rect_filled(rect, 0.0, color.gamma_multiply(0.12));
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(width, color), egui::StrokeKind::Outside);
    }

    if let Some(annotation) = hovered {
        if let Some((_, rect)) = app
            .zoombox
            .overlay_rects()
            .into_iter()
            .find(|(a, _)| *a == annotation)
        {
            draw_label(painter, to_egui(canvas, rect), &annotation.sign);
        }
    }
}

fn to_egui(canvas: egui::Rect, rect: ScreenRect) -> egui::Rect {
    egui::Rect::from_min_size(
        canvas.min + egui::vec2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}

fn draw_label(painter: &egui::Painter, rect: egui::Rect, text: &str) {
    if text.is_empty() {
        return;
    }
    let galley = painter.layout_no_wrap(
        text.to_string(),
        egui::FontId::proportional(14.0),
        egui::Color32::BLACK,
    );
    let pos = rect.left_top() - egui::vec2(0.0, galley.size().y + 4.0);
    let bg = egui::Rect::from_min_size(pos, galley.size()).expand(2.0);
    painter.rect_filled(bg, 2.0, HOVER_COLOR);
    painter.galley(pos, galley, egui::Color32::BLACK);
}
