use std::path::Path;
use std::sync::Arc;

use gc_core::error::GlyphError;
use gc_core::frame::PixelGrid;

/// Image source décodée une seule fois. Immuable; remplacée en bloc
/// à chaque nouvel upload.
///
/// # Example
/// ```no_run
/// use gc_source::image::SourceImage;
/// use std::path::Path;
/// let source = SourceImage::from_path(Path::new("photo.png")).unwrap();
/// assert!(source.natural_width() > 0);
/// ```
#[derive(Clone)]
pub struct SourceImage {
    frame: Arc<PixelGrid>,
}

impl SourceImage {
    /// Décode des bytes image (tout format raster supporté par le décodeur).
    ///
    /// # Errors
    /// `InvalidInput` si le buffer est vide ou l'image de taille nulle,
    /// `DecodeFailure` si les bytes sont illisibles.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GlyphError> {
        if bytes.is_empty() {
            return Err(GlyphError::InvalidInput("buffer image vide".into()));
        }
        let img = image::load_from_memory(bytes)
            .map_err(|e| GlyphError::DecodeFailure(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_pixels(PixelGrid {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Charge et décode un fichier image.
    ///
    /// # Errors
    /// `DecodeFailure` si le fichier est illisible ou indécodable.
    pub fn from_path(path: &Path) -> Result<Self, GlyphError> {
        let bytes = std::fs::read(path)
            .map_err(|e| GlyphError::DecodeFailure(format!("{} : {e}", path.display())))?;
        Self::from_bytes(&bytes)
    }

    /// Construit une source depuis un buffer déjà décodé.
    ///
    /// # Errors
    /// `InvalidInput` si la grille n'a aucun pixel.
    pub fn from_pixels(grid: PixelGrid) -> Result<Self, GlyphError> {
        if grid.is_empty() {
            return Err(GlyphError::InvalidInput(format!(
                "image de taille nulle ({}×{})",
                grid.width, grid.height
            )));
        }
        Ok(Self {
            frame: Arc::new(grid),
        })
    }

    /// Largeur native, avant échantillonnage.
    #[must_use]
    pub fn natural_width(&self) -> u32 {
        self.frame.width
    }

    /// Hauteur native, avant échantillonnage.
    #[must_use]
    pub fn natural_height(&self) -> u32 {
        self.frame.height
    }

    /// Buffer de pixels partagé.
    #[must_use]
    pub fn frame(&self) -> &Arc<PixelGrid> {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(grid: &PixelGrid) -> Vec<u8> {
        let img = image::RgbaImage::from_raw(grid.width, grid.height, grid.data.clone()).unwrap();
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn decode_roundtrip_preserves_dimensions() {
        let mut grid = PixelGrid::new(7, 5);
        grid.data.fill(200);
        let bytes = encode_png(&grid);
        let source = SourceImage::from_bytes(&bytes).unwrap();
        assert_eq!(source.natural_width(), 7);
        assert_eq!(source.natural_height(), 5);
        assert_eq!(source.frame().pixel(3, 2), (200, 200, 200, 200));
    }

    #[test]
    fn empty_bytes_are_invalid_input() {
        assert!(matches!(
            SourceImage::from_bytes(&[]),
            Err(GlyphError::InvalidInput(_))
        ));
    }

    #[test]
    fn garbage_bytes_are_decode_failure() {
        assert!(matches!(
            SourceImage::from_bytes(&[1, 2, 3, 4]),
            Err(GlyphError::DecodeFailure(_))
        ));
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert!(matches!(
            SourceImage::from_pixels(PixelGrid::new(0, 10)),
            Err(GlyphError::InvalidInput(_))
        ));
    }
}
