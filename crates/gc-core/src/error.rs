use thiserror::Error;

/// Errors originating from the glyphcast pipeline.
#[derive(Error, Debug)]
pub enum GlyphError {
    /// Missing or zero-size image, or an out-of-range parameter.
    #[error("Entrée invalide : {0}")]
    InvalidInput(String),

    /// Image bytes could not be decoded.
    #[error("Décodage impossible : {0}")]
    DecodeFailure(String),

    /// Unexpected failure during sampling/averaging/mapping.
    #[error("Rendu échoué : {0}")]
    RenderFailure(String),

    /// Rasterization or artifact write failed.
    #[error("Export échoué : {0}")]
    ExportFailure(String),
}
