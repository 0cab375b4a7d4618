mod common;

use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;

use common::loaded_zoombox;
use glintstone_core::{NoEvents, RecordingEvents, Viewport};

const EPS: f64 = 1e-9;

#[test]
fn test_resize_waits_for_debounce() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    let t0 = Instant::now();
    zb.resize(Viewport::new(1600.0, 1200.0), t0);

    assert!(!zb.tick(t0 + Duration::from_millis(50), &mut NoEvents));
    assert_eq!(zb.viewport(), Viewport::new(800.0, 600.0));
    assert!(zb.tick(t0 + Duration::from_millis(100), &mut NoEvents));
    assert_eq!(zb.viewport(), Viewport::new(1600.0, 1200.0));
    assert!(!zb.has_pending_resize());
}

#[test]
fn test_resize_burst_coalesces_to_last() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    let t0 = Instant::now();
    zb.resize(Viewport::new(900.0, 600.0), t0);
    zb.resize(Viewport::new(1000.0, 700.0), t0 + Duration::from_millis(80));

    assert!(!zb.tick(t0 + Duration::from_millis(120), &mut NoEvents));
    assert!(zb.tick(t0 + Duration::from_millis(180), &mut NoEvents));
    assert_eq!(zb.viewport(), Viewport::new(1000.0, 700.0));
}

#[test]
fn test_resize_keeps_relative_zoom_and_center() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 0.15, &mut NoEvents);
    let before = zb.state();
    let relative = before.scale / before.cover_scale;

    let mut events = RecordingEvents::new();
    zb.resize_now(Viewport::new(1600.0, 1200.0), &mut events);
    let s = zb.state();

    assert_abs_diff_eq!(s.cover_scale, 1.2, epsilon = EPS);
    assert_abs_diff_eq!(s.min_scale, 0.8, epsilon = EPS);
    assert_abs_diff_eq!(s.scale / s.cover_scale, relative, epsilon = EPS);
    assert_abs_diff_eq!(s.scale, 1.5, epsilon = EPS);
    assert_abs_diff_eq!(s.pan_x, -700.0, epsilon = 1e-6);
    assert_abs_diff_eq!(s.pan_y, -150.0, epsilon = 1e-6);
    assert_eq!(events.zoom_changes(), 1);
}

#[test]
fn test_resize_clamps_into_new_bounds() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 10.0, &mut NoEvents);
    assert_abs_diff_eq!(zb.state().scale, 4.0, epsilon = EPS);

    // Relative zoom 4.0 / 0.6 at the new cover of 1.2 would exceed max 4.0.
    zb.resize_now(Viewport::new(1600.0, 1200.0), &mut NoEvents);
    let s = zb.state();
    assert_abs_diff_eq!(s.scale, 4.0, epsilon = EPS);
    assert!(s.pan_x <= 0.0 && s.pan_x >= 1600.0 - s.scaled_width());
    assert!(s.pan_y <= 0.0 && s.pan_y >= 1200.0 - s.scaled_height());
}

#[test]
fn test_resize_to_degenerate_is_ignored() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 0.15, &mut NoEvents);
    let before = zb.state();
    zb.resize_now(Viewport::new(0.0, 600.0), &mut NoEvents);
    assert_eq!(zb.state(), before);
    assert_eq!(zb.viewport(), Viewport::new(800.0, 600.0));

    // Restoring from a minimized window keeps the zoom.
    zb.resize_now(Viewport::new(800.0, 600.0), &mut NoEvents);
    let s = zb.state();
    assert_abs_diff_eq!(s.scale, 0.75, epsilon = EPS);
    assert_abs_diff_eq!(s.pan_x, -350.0, epsilon = 1e-6);
    assert_abs_diff_eq!(s.pan_y, -75.0, epsilon = 1e-6);
}

#[test]
fn test_debounced_degenerate_resize_keeps_zoom() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 0.15, &mut NoEvents);
    let t0 = Instant::now();
    zb.resize(Viewport::new(0.0, 0.0), t0);
    assert!(zb.tick(t0 + Duration::from_millis(100), &mut NoEvents));
    assert_eq!(zb.viewport(), Viewport::new(800.0, 600.0));

    zb.resize(Viewport::new(1600.0, 1200.0), t0 + Duration::from_millis(200));
    assert!(zb.tick(t0 + Duration::from_millis(300), &mut NoEvents));
    assert_abs_diff_eq!(zb.state().scale, 1.5, epsilon = EPS);
}

#[test]
fn test_destroy_cancels_pending_resize() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    let t0 = Instant::now();
    zb.resize(Viewport::new(1000.0, 1000.0), t0);
    zb.destroy(&mut NoEvents);
    assert!(!zb.tick(t0 + Duration::from_secs(1), &mut NoEvents));
    assert!(!zb.state().image_loaded);
}
