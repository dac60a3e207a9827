use serde::{Deserialize, Serialize};

use crate::error::GlyphError;

/// Paramètres d'un passage de rendu. Immuables pendant le rendu :
/// le shell UI construit une nouvelle valeur à chaque changement.
///
/// # Example
/// ```
/// use gc_core::params::RenderParams;
/// let params = RenderParams::default();
/// assert_eq!(params.target_width, 100);
/// assert_eq!(params.granularity, 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct RenderParams {
    /// Largeur cible en colonnes de caractères (> 0).
    pub target_width: u32,
    /// Exposant de contraste (> 0). 1.0 = 100 %.
    pub contrast: f32,
    /// Côté du bloc carré moyenné, en pixels échantillonnés (≥ 1).
    pub granularity: u32,
    /// Atténuateur appliqué aux canaux avant le calcul de luma [0.0, 1.0].
    pub color_intensity: f32,
}

/// Granularité remise à cette valeur à chaque nouvel upload.
pub const DEFAULT_GRANULARITY: u32 = 4;
/// Intensité couleur remise à cette valeur à chaque nouvel upload.
pub const DEFAULT_COLOR_INTENSITY: f32 = 0.7;

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            target_width: 100,
            contrast: 1.0,
            granularity: DEFAULT_GRANULARITY,
            color_intensity: DEFAULT_COLOR_INTENSITY,
        }
    }
}

impl RenderParams {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.target_width = self.target_width.clamp(1, 1000);
        self.contrast = self.contrast.clamp(0.01, 3.0);
        self.granularity = self.granularity.clamp(1, 64);
        self.color_intensity = self.color_intensity.clamp(0.0, 1.0);
    }

    /// Remet granularité et intensité couleur aux défauts d'upload.
    /// Largeur et contraste sont conservés (comportement historique).
    pub fn reset_for_upload(&mut self) {
        self.granularity = DEFAULT_GRANULARITY;
        self.color_intensity = DEFAULT_COLOR_INTENSITY;
    }

    /// Validate ranges without mutating.
    ///
    /// # Errors
    /// Returns `GlyphError::InvalidInput` naming the offending field.
    pub fn validate(&self) -> Result<(), GlyphError> {
        if self.target_width == 0 {
            return Err(GlyphError::InvalidInput("target_width = 0".into()));
        }
        if self.granularity == 0 {
            return Err(GlyphError::InvalidInput("granularity = 0".into()));
        }
        if self.contrast.is_nan() || self.contrast <= 0.0 {
            return Err(GlyphError::InvalidInput(format!(
                "contrast = {}",
                self.contrast
            )));
        }
        if !(0.0..=1.0).contains(&self.color_intensity) {
            return Err(GlyphError::InvalidInput(format!(
                "color_intensity = {}",
                self.color_intensity
            )));
        }
        Ok(())
    }
}
