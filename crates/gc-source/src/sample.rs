use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use gc_core::error::GlyphError;
use gc_core::frame::PixelGrid;

use crate::image::SourceImage;

/// Correction d'aspect des glyphes. 1.0 = cellule carrée supposée.
pub const CHAR_ASPECT: f32 = 1.0;

/// Échantillonneur réutilisable wrappant fast_image_resize.
///
/// Réduit l'image source à exactement `target_width` colonnes par
/// filtre boîte (moyenne de surface), hauteur proportionnelle corrigée
/// par `CHAR_ASPECT`.
///
/// # Example
/// ```
/// use gc_source::sample::Sampler;
/// let s = Sampler::new();
/// ```
pub struct Sampler {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch buffer for the source (owned copy, the resize API wants `&mut`).
    src_buf: Vec<u8>,
}

impl Sampler {
    /// Create a new sampler with a box filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box)),
            src_buf: Vec::new(),
        }
    }

    /// Hauteur de sortie pour une source et une largeur cible données :
    /// `round(natural_height × scale / CHAR_ASPECT)`, minimum 1.
    ///
    /// # Example
    /// ```
    /// use gc_source::sample::Sampler;
    /// assert_eq!(Sampler::output_height(100, 50, 30), 15);
    /// assert_eq!(Sampler::output_height(10, 10, 10), 10);
    /// ```
    #[must_use]
    pub fn output_height(natural_width: u32, natural_height: u32, target_width: u32) -> u32 {
        let scale = target_width as f32 / natural_width as f32;
        ((natural_height as f32 * scale / CHAR_ASPECT).round() as u32).max(1)
    }

    /// Échantillonne la source vers une grille `target_width × output_height`.
    ///
    /// # Errors
    /// `InvalidInput` si `target_width == 0`, `RenderFailure` si le
    /// redimensionnement échoue.
    pub fn sample(
        &mut self,
        source: &SourceImage,
        target_width: u32,
    ) -> Result<PixelGrid, GlyphError> {
        if target_width == 0 {
            return Err(GlyphError::InvalidInput("target_width = 0".into()));
        }

        let src = source.frame();
        let out_height = Self::output_height(src.width, src.height, target_width);
        let mut dst = PixelGrid::new(target_width, out_height);

        if src.width == target_width && src.height == out_height {
            dst.data.copy_from_slice(&src.data);
            return Ok(dst);
        }

        // Copie de la source dans un buffer possédé (l'API exige &mut).
        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .map_err(|e| GlyphError::RenderFailure(format!("source invalide : {e}")))?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .map_err(|e| GlyphError::RenderFailure(format!("destination invalide : {e}")))?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|e| GlyphError::RenderFailure(format!("resize échoué : {e}")))?;

        log::debug!(
            "sampled {}×{} → {}×{}",
            src.width,
            src.height,
            dst.width,
            dst.height
        );
        Ok(dst)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
