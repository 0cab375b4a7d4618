use std::time::Instant;

use glintstone_core::{InputEvent, Key, Point, Viewport};

use crate::app::GlintstoneApp;
use crate::panels::{minimap, overlays};

pub fn show(ctx: &egui::Context, app: &mut GlintstoneApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            paint_background(ui, rect);
            sync_viewport_size(ctx, app, rect);

            let texture_id = app.viewport.texture.as_ref().map(|t| t.id());
            let Some(texture_id) = texture_id.filter(|_| app.zoombox.state().image_loaded) else {
                show_placeholder(ui, app);
                return;
            };

            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
            let minimap_response = if app.ui_state.show_minimap {
                minimap::interact(ui, rect, app)
            } else {
                None
            };
            let over_minimap = minimap_response
                .as_ref()
                .is_some_and(|r| r.hovered() || r.dragged());

            let touching = handle_touch(ui, app, rect);
            if !touching && !over_minimap {
                handle_wheel(ui, &response, app, rect);
                handle_pointer(ui, &response, app, rect);
            }
            handle_keys(ctx, ui, app);

            let painter = ui.painter_at(rect);
            draw_image(&painter, texture_id, rect, app);
            if app.ui_state.show_overlays {
                overlays::draw(&painter, rect, app);
            }
            if let Some(ref minimap_response) = minimap_response {
                minimap::draw(&painter, minimap_response.rect, app);
            }
        });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Forward canvas size changes to the viewer. The first real size is applied
/// at once; later ones go through the debounce.
fn sync_viewport_size(ctx: &egui::Context, app: &mut GlintstoneApp, rect: egui::Rect) {
    let size = Viewport::new(f64::from(rect.width()), f64::from(rect.height()));
    let now = Instant::now();

    if app.viewport.requested_size != Some(size) {
        app.viewport.requested_size = Some(size);
        if app.zoombox.viewport().is_degenerate() {
            app.zoombox.resize_now(size, &mut app.ui_state);
        } else {
            app.zoombox.resize(size, now);
        }
    }

    app.zoombox.tick(now, &mut app.ui_state);
    if app.zoombox.has_pending_resize() {
        ctx.request_repaint_after(app.zoombox.config().resize_debounce());
    }
}

fn to_canvas(rect: egui::Rect, pos: egui::Pos2) -> (f64, f64) {
    (f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y))
}

fn handle_wheel(ui: &egui::Ui, response: &egui::Response, app: &mut GlintstoneApp, rect: egui::Rect) {
    if !response.hovered() {
        return;
    }
    let (scroll, zoom, hover) = ui.input(|i| (i.raw_scroll_delta.y, i.zoom_delta(), i.pointer.hover_pos()));
    let Some(pos) = hover else {
        return;
    };

    // Scrolling up zooms in; ctrl+wheel and trackpad pinch arrive as zoom_delta.
    let delta_y = if scroll != 0.0 {
        -f64::from(scroll)
    } else if zoom != 1.0 {
        -f64::from(zoom - 1.0)
    } else {
        return;
    };
    let (x, y) = to_canvas(rect, pos);
    app.zoombox
        .handle_input(InputEvent::Wheel { x, y, delta_y }, &mut app.ui_state);
}

fn handle_pointer(ui: &egui::Ui, response: &egui::Response, app: &mut GlintstoneApp, rect: egui::Rect) {
    let primary = egui::PointerButton::Primary;
    let (press_origin, latest) = ui.input(|i| (i.pointer.press_origin(), i.pointer.latest_pos()));
    let mut send = |event: InputEvent| {
        app.zoombox.handle_input(event, &mut app.ui_state);
    };

    if response.clicked_by(primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = to_canvas(rect, pos);
            send(InputEvent::PointerDown { x, y });
            send(InputEvent::PointerUp { x, y });
        }
    } else if response.drag_started_by(primary) {
        if let Some(pos) = press_origin {
            let (x, y) = to_canvas(rect, pos);
            send(InputEvent::PointerDown { x, y });
        }
    }

    if response.dragged_by(primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = to_canvas(rect, pos);
            send(InputEvent::PointerMove { x, y });
        }
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if response.drag_stopped_by(primary) {
        if let Some(pos) = latest {
            let (x, y) = to_canvas(rect, pos);
            send(InputEvent::PointerUp { x, y });
        }
    } else if let Some(pos) = response.hover_pos() {
        let (x, y) = to_canvas(rect, pos);
        send(InputEvent::PointerMove { x, y });
    }

    let inside = response.hovered() || response.dragged();
    if app.viewport.pointer_inside && !inside {
        app.zoombox
            .handle_input(InputEvent::PointerLeave, &mut app.ui_state);
    }
    app.viewport.pointer_inside = inside;
}

/// Track raw touch points and feed the full set to the viewer.
/// Returns true while any finger is down, so synthesized pointer events are
/// not handled twice.
fn handle_touch(ui: &egui::Ui, app: &mut GlintstoneApp, rect: egui::Rect) -> bool {
    let mut changed = false;
    ui.input(|i| {
        for event in &i.events {
            if let egui::Event::Touch { id, phase, pos, .. } = event {
                match phase {
                    egui::TouchPhase::Start | egui::TouchPhase::Move => {
                        if rect.contains(*pos) || app.viewport.touches.contains_key(&id.0) {
                            app.viewport.touches.insert(id.0, *pos);
                            changed = true;
                        }
                    }
                    egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                        changed |= app.viewport.touches.remove(&id.0).is_some();
                    }
                }
            }
        }
    });

    if changed {
        let event = if app.viewport.touches.is_empty() {
            InputEvent::TouchEnd
        } else {
            let touches = app
                .viewport
                .touches
                .values()
                .map(|p| {
                    let (x, y) = to_canvas(rect, *p);
                    Point::new(x, y)
                })
                .collect();
            InputEvent::Touch { touches }
        };
        app.zoombox.handle_input(event, &mut app.ui_state);
    }
    !app.viewport.touches.is_empty()
}

fn handle_keys(ctx: &egui::Context, ui: &egui::Ui, app: &mut GlintstoneApp) {
    if ctx.wants_keyboard_input() {
        return;
    }
    let keys: Vec<Key> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } if !modifiers.command && !modifiers.alt => Key::from_name(key.name()),
                _ => None,
            })
            .collect()
    });
    for key in keys {
        app.zoombox
            .handle_input(InputEvent::Key { key }, &mut app.ui_state);
    }
}

fn draw_image(painter: &egui::Painter, texture_id: egui::TextureId, rect: egui::Rect, app: &GlintstoneApp) {
    let state = app.zoombox.state();
    let img_rect = egui::Rect::from_min_size(
        rect.min + egui::vec2(state.pan_x as f32, state.pan_y as f32),
        egui::vec2(state.scaled_width() as f32, state.scaled_height() as f32),
    );
    painter.image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn show_placeholder(ui: &mut egui::Ui, app: &GlintstoneApp) {
    let text = if app.ui_state.loading {
        "Loading image..."
    } else if app.ui_state.load_error.is_some() {
        "Image unavailable"
    } else {
        "Open an image to begin"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
