//! Domain layer - Front-matter tag codec and event handling

pub mod preview;
pub mod settings;
pub mod tags;

pub use preview::strip_preview;
pub use settings::TagSettings;
