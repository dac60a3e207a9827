use gc_core::error::GlyphError;
use gc_core::frame::{AsciiArtifact, PixelGrid};
use gc_core::params::RenderParams;
use gc_core::ramp::CharRamp;

use crate::block::{BlockGrid, average_blocks};
use crate::brightness::map_block;

/// Étape de mapping : une ligne de texte par rangée de blocs.
/// Infaillible — la grille de blocs garantit ses dimensions.
#[must_use]
pub fn render_blocks(blocks: &BlockGrid, params: &RenderParams, ramp: &CharRamp) -> AsciiArtifact {
    let mut rows = Vec::with_capacity(blocks.rows as usize);
    for row in 0..blocks.rows {
        let mut line = String::with_capacity(blocks.cols as usize);
        for col in 0..blocks.cols {
            line.push(map_block(blocks.mean(col, row), params, ramp));
        }
        rows.push(line);
    }
    AsciiArtifact::from_rows(rows)
}

/// Convertit une grille échantillonnée en artefact texte :
/// moyenne par blocs puis mapping brightness → rampe.
///
/// Fonction pure — la machine à états et la publication de l'artefact
/// vivent dans gc-session.
///
/// # Errors
/// Propage `InvalidInput` du partitionnement en blocs.
///
/// # Example
/// ```
/// use gc_core::frame::PixelGrid;
/// use gc_core::params::RenderParams;
/// use gc_core::ramp::CharRamp;
/// use gc_ascii::render::render_grid;
///
/// let frame = PixelGrid::new(8, 8); // noir
/// let params = RenderParams { granularity: 4, ..RenderParams::default() };
/// let art = render_grid(&frame, &params, &CharRamp::classic()).unwrap();
/// assert_eq!(art.text(), "@@\n@@");
/// ```
pub fn render_grid(
    frame: &PixelGrid,
    params: &RenderParams,
    ramp: &CharRamp,
) -> Result<AsciiArtifact, GlyphError> {
    let blocks = average_blocks(frame, params.granularity)?;
    let artifact = render_blocks(&blocks, params, ramp);

    log::debug!(
        "rendered artifact {}×{} (granularity {})",
        blocks.cols,
        blocks.rows,
        params.granularity
    );
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> PixelGrid {
        let mut grid = PixelGrid::new(width, height);
        for px in grid.data.chunks_exact_mut(4) {
            px[0] = value;
            px[1] = value;
            px[2] = value;
            px[3] = 255;
        }
        grid
    }

    fn unit_params(granularity: u32) -> RenderParams {
        RenderParams {
            target_width: 10,
            contrast: 1.0,
            granularity,
            color_intensity: 1.0,
        }
    }

    #[test]
    fn white_ten_by_ten_is_all_spaces() {
        let frame = solid(10, 10, 255);
        let art = render_grid(&frame, &unit_params(1), &CharRamp::classic()).unwrap();
        assert_eq!(art.line_count(), 10);
        assert_eq!(art.columns(), 10);
        assert!(art.rows().iter().all(|r| r.chars().all(|c| c == ' ')));
    }

    #[test]
    fn black_two_by_two_is_all_at() {
        let frame = solid(2, 2, 0);
        let art = render_grid(&frame, &unit_params(1), &CharRamp::classic()).unwrap();
        assert_eq!(art.text(), "@@\n@@");
    }

    #[test]
    fn row_counts_follow_ceil_of_granularity() {
        let frame = solid(10, 7, 128);
        let art = render_grid(&frame, &unit_params(4), &CharRamp::classic()).unwrap();
        assert_eq!(art.line_count(), 2);
        assert_eq!(art.columns(), 3);
        let first_len = art.rows()[0].chars().count();
        assert!(art.rows().iter().all(|r| r.chars().count() == first_len));
    }

    #[test]
    fn render_is_deterministic() {
        let mut frame = solid(17, 11, 0);
        for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
            px[0] = (i % 256) as u8;
            px[1] = (i * 7 % 256) as u8;
            px[2] = (i * 13 % 256) as u8;
        }
        let params = RenderParams {
            target_width: 17,
            contrast: 1.4,
            granularity: 3,
            color_intensity: 0.7,
        };
        let ramp = CharRamp::classic();
        let a = render_grid(&frame, &params, &ramp).unwrap();
        let b = render_grid(&frame, &params, &ramp).unwrap();
        assert_eq!(a.text(), b.text());
    }
}
