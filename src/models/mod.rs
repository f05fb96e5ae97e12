pub mod group;
pub mod media;
pub mod wire;

pub use group::{GenerationRunState, PromptGroup};
pub use media::{AspectRatio, GeneratedItem, ImageResolution, MediaType, VideoResolution};
