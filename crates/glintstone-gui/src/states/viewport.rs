use std::collections::BTreeMap;

use glintstone_core::Viewport;

/// Textures and raw-input bookkeeping for the viewer canvas.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    pub minimap_texture: Option<egui::TextureHandle>,
    /// Active touch points by id, in canvas coordinates.
    pub touches: BTreeMap<u64, egui::Pos2>,
    /// Whether the pointer was over the canvas last frame.
    pub pointer_inside: bool,
    /// Canvas size last handed to the viewer, so a steady size does not
    /// restart the resize debounce every frame.
    pub requested_size: Option<Viewport>,
}

impl ViewportState {
    pub fn clear(&mut self) {
        self.texture = None;
        self.minimap_texture = None;
        self.touches.clear();
    }
}
