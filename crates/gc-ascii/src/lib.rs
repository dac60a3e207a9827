/// ASCII conversion engine for glyphcast.
///
/// Partitions a sampled pixel grid into blocks, maps each block's mean
/// color to a brightness scalar, and assembles the text artifact.

pub mod block;
pub mod brightness;
pub mod render;

pub use block::{BlockGrid, average_blocks};
pub use render::{render_blocks, render_grid};
