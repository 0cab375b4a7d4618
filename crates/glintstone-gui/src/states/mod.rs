mod sources;
mod ui;
mod viewport;

pub use sources::SourcesState;
pub use ui::UIState;
pub use viewport::ViewportState;
