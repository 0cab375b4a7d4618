mod common;

use glintstone_core::consts::{DEFAULT_PINCH_DIVISOR, DEFAULT_ZOOM_STEP};
use glintstone_core::error::ZoomboxError;
use glintstone_core::{LoadOutcome, NoEvents, RecordingEvents, Viewport, Zoombox, ZoomboxConfig};

#[test]
fn test_default_config_is_valid() {
    let c = ZoomboxConfig::default();
    assert!(c.validate().is_ok());
    assert_eq!(c.pinch_divisor, DEFAULT_PINCH_DIVISOR);
    assert_eq!(c.minimap_max_width, 100);
    assert_eq!(c.minimap_max_height, 67);
    assert_eq!(c.resize_debounce().as_millis(), 100);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let c = ZoomboxConfig::from_toml_str("max_scale = 8.0\nhover_threshold = 2.5\n").unwrap();
    assert_eq!(c.max_scale, 8.0);
    assert_eq!(c.hover_threshold, 2.5);
    assert_eq!(c.zoom_step, DEFAULT_ZOOM_STEP);
}

#[test]
fn test_default_roundtrips_through_toml() {
    let text = toml::to_string_pretty(&ZoomboxConfig::default()).unwrap();
    let parsed = ZoomboxConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, ZoomboxConfig::default());
}

#[test]
fn test_max_below_min_rejected() {
    let err = ZoomboxConfig::from_toml_str("min_scale = 2.0\nmax_scale = 1.0\n").unwrap_err();
    assert!(matches!(err, ZoomboxError::InvalidConfig(ref m) if m.contains("max_scale")));
}

#[test]
fn test_zero_pinch_divisor_rejected() {
    let c = ZoomboxConfig {
        pinch_divisor: 0.0,
        ..ZoomboxConfig::default()
    };
    assert!(matches!(c.validate(), Err(ZoomboxError::InvalidConfig(_))));
    assert!(Zoombox::with_validated_config(c, Viewport::new(10.0, 10.0)).is_err());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let err = ZoomboxConfig::from_toml_str("zoom_step = [").unwrap_err();
    assert!(matches!(err, ZoomboxError::Config(_)));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zoombox.toml");
    std::fs::write(&path, "zoom_step = 0.25\n").unwrap();
    let c = ZoomboxConfig::load(&path).unwrap();
    assert_eq!(c.zoom_step, 0.25);

    let missing = ZoomboxConfig::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(missing, ZoomboxError::Io(_)));
}

#[test]
fn test_set_config_refits_loaded_image() {
    let mut zb = common::loaded_zoombox(800.0, 600.0, 2000, 1000);
    zb.zoom_at(400.0, 300.0, 1.0, &mut NoEvents);

    let config = ZoomboxConfig {
        min_scale: 0.5,
        ..ZoomboxConfig::default()
    };
    let mut events = RecordingEvents::new();
    zb.set_config(config, &mut events);

    let s = zb.state();
    assert_eq!(s.min_scale, 0.5);
    assert!((s.scale - 0.6).abs() < 1e-9);
    assert_eq!(events.zoom_changes(), 1);
    assert_eq!(zb.config().min_scale, 0.5);
}

#[test]
fn test_set_config_keeps_load_generation() {
    let mut zb = Zoombox::new(ZoomboxConfig::default(), Viewport::new(800.0, 600.0));
    let ticket = zb.begin_load();
    zb.set_config(ZoomboxConfig::default(), &mut NoEvents);
    let outcome = zb.finish_load(ticket, Ok(common::image_info("a", 100, 50)), &mut NoEvents);
    assert_eq!(outcome, LoadOutcome::Applied);
}
