/// Shared types, parameters, and configuration for glyphcast.
///
/// This crate contains the data model used across the glyphcast
/// workspace: pixel buffers, the ASCII artifact, the character ramp,
/// render parameters, and the error taxonomy.

pub mod config;
pub mod error;
pub mod frame;
pub mod params;
pub mod ramp;

pub use config::{Config, ExportOptions};
pub use error::GlyphError;
pub use frame::{AsciiArtifact, PixelGrid};
pub use params::RenderParams;
pub use ramp::CharRamp;
