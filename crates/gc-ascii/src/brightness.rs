use gc_core::params::RenderParams;
use gc_core::ramp::CharRamp;

/// Poids de luma (R, G, B) sur une échelle ×100 : 0.30 / 0.59 / 0.11.
/// En entiers, 255 × (30 + 59 + 11) = 25500 est exact en f32, donc le
/// blanc plein donne luma exactement 1.0 (et le noir exactement 0.0).
const LUMA_WEIGHTS: [f32; 3] = [30.0, 59.0, 11.0];
const LUMA_SCALE: f32 = 25500.0;

/// Brightness normalisée d'un bloc à partir de sa moyenne (R, G, B).
///
/// L'intensité couleur est appliquée aux canaux AVANT la pondération
/// luma : elle agit comme un atténuateur global de brightness, pas
/// comme un biais de rampe a posteriori. Ce choix change quels
/// caractères sont atteignables et doit être conservé tel quel.
/// Le contraste en exposant garde le mapping monotone et borné.
///
/// # Example
/// ```
/// use gc_core::params::RenderParams;
/// use gc_ascii::brightness::block_brightness;
/// let params = RenderParams { color_intensity: 1.0, contrast: 1.0, ..RenderParams::default() };
/// let b = block_brightness([255.0, 255.0, 255.0], &params);
/// assert!((b - 1.0).abs() < 1e-6);
/// ```
#[inline(always)]
#[must_use]
pub fn block_brightness(mean: [f32; 3], params: &RenderParams) -> f32 {
    let r = mean[0] * params.color_intensity;
    let g = mean[1] * params.color_intensity;
    let b = mean[2] * params.color_intensity;
    let luma = (r * LUMA_WEIGHTS[0] + g * LUMA_WEIGHTS[1] + b * LUMA_WEIGHTS[2]) / LUMA_SCALE;
    luma.powf(params.contrast)
}

/// Caractère de rampe pour un bloc donné.
///
/// # Example
/// ```
/// use gc_core::params::RenderParams;
/// use gc_core::ramp::CharRamp;
/// use gc_ascii::brightness::map_block;
/// let ramp = CharRamp::classic();
/// let params = RenderParams { color_intensity: 1.0, ..RenderParams::default() };
/// assert_eq!(map_block([0.0, 0.0, 0.0], &params, &ramp), '@');
/// assert_eq!(map_block([255.0, 255.0, 255.0], &params, &ramp), ' ');
/// ```
#[inline(always)]
#[must_use]
pub fn map_block(mean: [f32; 3], params: &RenderParams, ramp: &CharRamp) -> char {
    ramp.map(block_brightness(mean, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(contrast: f32, intensity: f32) -> RenderParams {
        RenderParams {
            contrast,
            color_intensity: intensity,
            ..RenderParams::default()
        }
    }

    #[test]
    fn brightness_monotonic_in_luma() {
        for &(contrast, intensity) in &[(0.5f32, 1.0f32), (1.0, 1.0), (2.5, 0.7), (1.0, 0.3)] {
            let p = params(contrast, intensity);
            let mut prev = -1.0f32;
            for v in 0..=255u32 {
                let b = block_brightness([v as f32; 3], &p);
                assert!(b >= prev, "non monotone à v={v} (c={contrast}, i={intensity})");
                prev = b;
            }
        }
    }

    #[test]
    fn index_always_in_range() {
        let ramp = CharRamp::classic();
        let chars: Vec<char> = "@%#*+=-:. ".chars().collect();
        for &contrast in &[0.01f32, 0.5, 1.0, 2.0, 3.0] {
            for &intensity in &[0.0f32, 0.25, 0.7, 1.0] {
                let p = params(contrast, intensity);
                for v in (0..=255u32).step_by(5) {
                    let ch = map_block([v as f32, 255.0 - v as f32, 128.0], &p, &ramp);
                    assert!(chars.contains(&ch));
                }
            }
        }
    }

    #[test]
    fn intensity_scales_before_luma() {
        // Avec intensity 0.5, le blanc plein ne dépasse jamais luma 0.5 :
        // la moitié supérieure de la rampe devient inatteignable.
        let p = params(1.0, 0.5);
        let b = block_brightness([255.0; 3], &p);
        assert!((b - 0.5).abs() < 1e-6);
        let ramp = CharRamp::classic();
        assert_eq!(ramp.map(b), '+');
    }

    #[test]
    fn zero_intensity_pins_to_darkest() {
        let ramp = CharRamp::classic();
        let p = params(1.0, 0.0);
        assert_eq!(map_block([255.0; 3], &p, &ramp), '@');
    }

    #[test]
    fn contrast_exponent_darkens_midtones() {
        let p1 = params(1.0, 1.0);
        let p2 = params(2.0, 1.0);
        let mid = [128.0f32; 3];
        assert!(block_brightness(mid, &p2) < block_brightness(mid, &p1));
        // Les extrêmes restent fixes.
        assert_eq!(block_brightness([0.0; 3], &p2), 0.0);
        assert!((block_brightness([255.0; 3], &p2) - 1.0).abs() < 1e-5);
    }
}
