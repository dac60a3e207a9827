/// Export backends for glyphcast.
///
/// Turns the text artifact back into pixels (PNG) on a worker thread
/// and writes the downloadable artifacts to disk.

pub mod files;
pub mod rasterizer;
pub mod worker;

pub use rasterizer::TextRasterizer;
pub use worker::{RasterizeReply, RasterizeRequest, spawn_rasterize};
