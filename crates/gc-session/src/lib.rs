/// Session orchestration for glyphcast.
///
/// Owns the loaded image and the published artifact, runs the
/// sample → average → map pipeline, and drives the export backends.

pub mod session;

pub use session::{RenderStage, Session};
