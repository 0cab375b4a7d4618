mod common;

use approx::assert_abs_diff_eq;

use common::loaded_zoombox;
use glintstone_core::transform::{clamp_axis, FitBounds};
use glintstone_core::{NoEvents, RecordingEvents, Viewport, Zoombox, ZoomboxConfig};

const EPS: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Fit bounds
// ---------------------------------------------------------------------------

#[test]
fn test_fit_bounds_wide_image() {
    let b = FitBounds::compute(Viewport::new(800.0, 600.0), 2000, 1000).unwrap();
    assert_abs_diff_eq!(b.contain, 0.4, epsilon = EPS);
    assert_abs_diff_eq!(b.cover, 0.6, epsilon = EPS);
}

#[test]
fn test_fit_bounds_degenerate_viewport() {
    assert!(FitBounds::compute(Viewport::new(0.0, 600.0), 2000, 1000).is_none());
    assert!(FitBounds::compute(Viewport::new(800.0, -1.0), 2000, 1000).is_none());
    assert!(FitBounds::compute(Viewport::new(800.0, 600.0), 0, 1000).is_none());
}

#[test]
fn test_scale_range_keeps_cover_inside() {
    // Tiny image: cover (8.0) is above the configured max (4.0).
    let b = FitBounds::compute(Viewport::new(800.0, 600.0), 100, 100).unwrap();
    let (min, max) = b.scale_range(&ZoomboxConfig::default());
    assert_abs_diff_eq!(min, 6.0, epsilon = EPS);
    assert_abs_diff_eq!(max, 8.0, epsilon = EPS);
}

#[test]
fn test_initial_view_is_cover_and_centered() {
    let zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    let s = zb.state();
    assert!(s.image_loaded);
    assert_abs_diff_eq!(s.min_scale, 0.4, epsilon = EPS);
    assert_abs_diff_eq!(s.cover_scale, 0.6, epsilon = EPS);
    assert_abs_diff_eq!(s.scale, s.cover_scale, epsilon = EPS);
    assert_abs_diff_eq!(s.pan_x, -200.0, epsilon = EPS);
    assert_abs_diff_eq!(s.pan_y, 0.0, epsilon = EPS);
}

// ---------------------------------------------------------------------------
// Clamp
// ---------------------------------------------------------------------------

#[test]
fn test_clamp_axis_is_idempotent() {
    for &(pan, scaled, viewport) in &[
        (10.0, 1200.0, 800.0),
        (-900.0, 1200.0, 800.0),
        (-123.4, 1200.0, 800.0),
        (55.0, 400.0, 800.0),
        (-3.0, 800.0, 800.0),
    ] {
        let once = clamp_axis(pan, scaled, viewport);
        assert_eq!(clamp_axis(once, scaled, viewport), once);
    }
}

#[test]
fn test_clamp_axis_edges() {
    assert_eq!(clamp_axis(10.0, 1200.0, 800.0), 0.0);
    assert_eq!(clamp_axis(-900.0, 1200.0, 800.0), -400.0);
    assert_eq!(clamp_axis(-123.0, 1200.0, 800.0), -123.0);
}

#[test]
fn test_clamp_axis_centers_small_image() {
    for pan in [-1000.0, -5.0, 0.0, 42.0, 1e6] {
        assert_eq!(clamp_axis(pan, 300.0, 800.0), 250.0);
    }
}

#[test]
fn test_centered_axis_after_reset_zoom() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.pan_by(-150.0, 0.0, &mut NoEvents);
    zb.reset_zoom(&mut NoEvents);
    let s = zb.state();
    assert_abs_diff_eq!(s.scale, 0.4, epsilon = EPS);
    assert_abs_diff_eq!(s.pan_x, 0.0, epsilon = EPS);
    assert_abs_diff_eq!(s.pan_y, (600.0 - 400.0) / 2.0, epsilon = EPS);
}

#[test]
fn test_pan_by_clamps_to_edges() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.pan_by(10_000.0, 10_000.0, &mut NoEvents);
    assert_abs_diff_eq!(zb.state().pan_x, 0.0, epsilon = EPS);
    assert_abs_diff_eq!(zb.state().pan_y, 0.0, epsilon = EPS);
    zb.pan_by(-10_000.0, -10_000.0, &mut NoEvents);
    assert_abs_diff_eq!(zb.state().pan_x, -400.0, epsilon = EPS);
    assert_abs_diff_eq!(zb.state().pan_y, 0.0, epsilon = EPS);
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_at_center_scenario() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 0.15, &mut NoEvents);
    let s = zb.state();
    assert_abs_diff_eq!(s.scale, 0.75, epsilon = EPS);
    assert_abs_diff_eq!(s.pan_x, -350.0, epsilon = EPS);
    assert_abs_diff_eq!(s.pan_y, -75.0, epsilon = EPS);
}

#[test]
fn test_zoom_at_from_panned_state_keeps_anchor() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 0.15, &mut NoEvents);
    zb.pan_by(350.0, 50.0, &mut NoEvents);
    let before = zb.state();
    assert_abs_diff_eq!(before.pan_x, 0.0, epsilon = EPS);
    assert_abs_diff_eq!(before.pan_y, -25.0, epsilon = EPS);

    let (ix, iy) = before.viewport_to_image(400.0, 300.0);
    zb.zoom_at(400.0, 300.0, 0.15, &mut NoEvents);
    let after = zb.state();
    assert_abs_diff_eq!(after.scale, 0.9, epsilon = EPS);
    assert_abs_diff_eq!(after.pan_x, -80.0, epsilon = 1e-6);
    assert_abs_diff_eq!(after.pan_y, -90.0, epsilon = 1e-6);

    let (vx, vy) = after.image_to_viewport(ix, iy);
    assert_abs_diff_eq!(vx, 400.0, epsilon = 1e-6);
    assert_abs_diff_eq!(vy, 300.0, epsilon = 1e-6);
}

#[test]
fn test_anchor_invariance_off_center() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 1.0, &mut NoEvents);
    for &(x, y, delta) in &[(250.0, 200.0, 0.3), (600.0, 420.0, -0.2), (390.0, 310.0, 0.5)] {
        let before = zb.state();
        let (ix, iy) = before.viewport_to_image(x, y);
        zb.zoom_at(x, y, delta, &mut NoEvents);
        let (vx, vy) = zb.state().image_to_viewport(ix, iy);
        assert_abs_diff_eq!(vx, x, epsilon = 1e-6);
        assert_abs_diff_eq!(vy, y, epsilon = 1e-6);
    }
}

#[test]
fn test_scale_stays_in_bounds() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    let deltas = [5.0, 0.3, -0.1, -10.0, 0.15, 100.0, -0.01, -3.0, 2.5];
    for (i, delta) in deltas.iter().enumerate() {
        let x = 50.0 + i as f64 * 80.0;
        zb.zoom_at(x, 300.0, *delta, &mut NoEvents);
        let s = zb.state();
        assert!(s.scale >= s.min_scale - EPS, "step {i}: {} < {}", s.scale, s.min_scale);
        assert!(s.scale <= s.max_scale + EPS, "step {i}: {} > {}", s.scale, s.max_scale);
        zb.zoom_in(&mut NoEvents);
        zb.zoom_out(&mut NoEvents);
        zb.zoom_out(&mut NoEvents);
        let s = zb.state();
        assert!(s.scale >= s.min_scale - EPS && s.scale <= s.max_scale + EPS);
    }
}

#[test]
fn test_zoom_at_clamped_no_op_emits_nothing() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.reset_zoom(&mut NoEvents);
    let mut events = RecordingEvents::new();
    zb.zoom_at(400.0, 300.0, -1.0, &mut events);
    assert!(events.events.is_empty());
    assert_abs_diff_eq!(zb.state().scale, 0.4, epsilon = EPS);
}

#[test]
fn test_zoom_change_event_carries_new_state() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    let mut events = RecordingEvents::new();
    zb.zoom_in(&mut events);
    assert_eq!(events.zoom_changes(), 1);
    assert_eq!(
        events.events[0],
        glintstone_core::ZoomboxEvent::ZoomChanged(zb.state().zoom_change())
    );
}

#[test]
fn test_reset_returns_to_initial_view() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    let initial = zb.state();
    zb.zoom_at(100.0, 100.0, 1.3, &mut NoEvents);
    zb.pan_by(-40.0, 25.0, &mut NoEvents);
    zb.reset(&mut NoEvents);
    assert_eq!(zb.state(), initial);
}

#[test]
fn test_non_finite_input_is_ignored() {
    let mut zb = loaded_zoombox(800.0, 600.0, 2000, 1000);
    let before = zb.state();
    let mut events = RecordingEvents::new();

    zb.pan_by(f64::NAN, 0.0, &mut events);
    zb.pan_by(0.0, f64::INFINITY, &mut events);
    zb.zoom_at(f64::NAN, 300.0, 0.15, &mut events);
    zb.zoom_at(400.0, f64::NEG_INFINITY, 0.15, &mut events);
    zb.zoom_at(400.0, 300.0, f64::NAN, &mut events);

    assert_eq!(zb.state(), before);
    assert!(events.events.is_empty());
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

#[test]
fn test_operations_before_load_are_no_ops() {
    let mut zb = Zoombox::new(ZoomboxConfig::default(), Viewport::new(800.0, 600.0));
    let mut events = RecordingEvents::new();
    zb.zoom_in(&mut events);
    zb.zoom_at(10.0, 10.0, 1.0, &mut events);
    zb.pan_by(5.0, 5.0, &mut events);
    zb.reset(&mut events);
    zb.reset_zoom(&mut events);
    assert!(events.events.is_empty());
    assert!(!zb.state().image_loaded);
    assert_eq!(zb.state().scale, 0.0);
}

#[test]
fn test_degenerate_viewport_defers_fit() {
    let mut zb = Zoombox::new(ZoomboxConfig::default(), Viewport::new(0.0, 0.0));
    let ticket = zb.begin_load();
    zb.finish_load(ticket, Ok(common::image_info("a", 2000, 1000)), &mut NoEvents);
    zb.zoom_in(&mut NoEvents);
    assert!(zb.state().image_loaded);
    assert_eq!(zb.state().scale, 0.0);

    zb.resize_now(Viewport::new(800.0, 600.0), &mut NoEvents);
    assert_abs_diff_eq!(zb.state().scale, 0.6, epsilon = EPS);
    assert_abs_diff_eq!(zb.state().pan_x, -200.0, epsilon = EPS);
}
