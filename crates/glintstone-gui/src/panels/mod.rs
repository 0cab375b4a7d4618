pub mod menu_bar;
pub mod minimap;
pub mod overlays;
pub mod sources;
pub mod status;
pub mod viewport;
