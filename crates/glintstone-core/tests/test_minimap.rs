mod common;

use approx::assert_abs_diff_eq;

use common::loaded_zoombox;
use glintstone_core::minimap::{render_thumbnail, MinimapLayout};
use glintstone_core::{InputEvent, NoEvents, RecordingEvents};

#[test]
fn test_layout_wide_image() {
    let layout = MinimapLayout::fit(2000, 1000, 100, 67);
    assert_eq!((layout.width, layout.height), (100, 50));
}

#[test]
fn test_layout_tall_image() {
    let layout = MinimapLayout::fit(1000, 3000, 100, 67);
    assert_eq!((layout.width, layout.height), (22, 67));
}

#[test]
fn test_layout_never_collapses() {
    let layout = MinimapLayout::fit(10_000, 1, 100, 67);
    assert_eq!(layout.height, 1);
}

#[test]
fn test_render_thumbnail_matches_layout() {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(300, 150));
    let layout = MinimapLayout::fit(300, 150, 100, 67);
    let thumb = render_thumbnail(&img, &layout);
    assert_eq!(thumb.dimensions(), (layout.width, layout.height));
}

#[test]
fn test_indicator_at_cover_scale() {
    let zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    let r = zb.minimap_indicator();
    assert_abs_diff_eq!(r.left, 100.0 / 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.width, 200.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.top, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.height, 100.0, epsilon = 1e-9);
}

#[test]
fn test_indicator_clipped_when_whole_image_visible() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.reset_zoom(&mut NoEvents);
    let r = zb.minimap_indicator();
    assert_abs_diff_eq!(r.left, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.top, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.width, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.height, 100.0, epsilon = 1e-9);
}

#[test]
fn test_navigate_centers_point() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 0.15, &mut NoEvents);
    zb.pan_by(300.0, 60.0, &mut NoEvents);

    zb.navigate_minimap(0.5, 0.5, &mut NoEvents);
    let s = zb.state();
    assert_abs_diff_eq!(s.pan_x, -350.0, epsilon = 1e-9);
    assert_abs_diff_eq!(s.pan_y, -75.0, epsilon = 1e-9);
}

#[test]
fn test_navigate_clamps_at_corners() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 0.15, &mut NoEvents);

    zb.navigate_minimap(0.0, 0.0, &mut NoEvents);
    assert_abs_diff_eq!(zb.state().pan_x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(zb.state().pan_y, 0.0, epsilon = 1e-9);

    zb.navigate_minimap(1.5, 1.0, &mut NoEvents);
    assert_abs_diff_eq!(zb.state().pan_x, -700.0, epsilon = 1e-9);
    assert_abs_diff_eq!(zb.state().pan_y, -150.0, epsilon = 1e-9);
}

#[test]
fn test_minimap_drag_only_while_pressed() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 0.15, &mut NoEvents);
    let mut events = RecordingEvents::new();

    assert!(!zb.handle_input(InputEvent::MinimapDrag { fx: 0.0, fy: 0.0 }, &mut events));
    assert!(events.events.is_empty());

    assert!(zb.handle_input(InputEvent::MinimapPress { fx: 0.5, fy: 0.5 }, &mut events));
    assert!(zb.handle_input(InputEvent::MinimapDrag { fx: 0.0, fy: 0.0 }, &mut events));
    assert_abs_diff_eq!(zb.state().pan_x, 0.0, epsilon = 1e-9);
    assert!(zb.handle_input(InputEvent::MinimapRelease, &mut events));

    let before = zb.state();
    zb.handle_input(InputEvent::MinimapDrag { fx: 1.0, fy: 1.0 }, &mut events);
    assert_eq!(zb.state(), before);
}
