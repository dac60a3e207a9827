/// Image acquisition and sampling for glyphcast.
///
/// Decodes user-supplied bytes into an immutable `SourceImage` and
/// downscales it to the requested character-column count.

pub mod image;
pub mod sample;

pub use image::SourceImage;
pub use sample::{CHAR_ASPECT, Sampler};
