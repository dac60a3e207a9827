use gc_core::error::GlyphError;
use gc_core::frame::PixelGrid;

/// Grille de blocs : moyenne RGB par bloc, row-major.
///
/// Dimensions : `ceil(width / G) × ceil(height / G)`. Les blocs du bord
/// droit/bas sont tronqués à la frontière du buffer.
pub struct BlockGrid {
    /// Moyennes (R, G, B) par bloc, row-major. Alpha ignoré.
    pub cells: Vec<[f32; 3]>,
    /// Nombre de colonnes de blocs.
    pub cols: u32,
    /// Nombre de rangées de blocs.
    pub rows: u32,
}

impl BlockGrid {
    /// Moyenne du bloc (col, row).
    #[inline(always)]
    #[must_use]
    pub fn mean(&self, col: u32, row: u32) -> [f32; 3] {
        self.cells[(row * self.cols + col) as usize]
    }
}

/// Partitionne la grille en blocs carrés de côté `granularity` et
/// calcule la moyenne arithmétique R, G, B de chaque bloc.
///
/// Chaque pixel est couvert exactement une fois. Les blocs partiels
/// moyennent uniquement leurs pixels en-bounds — jamais de zero-padding.
///
/// # Errors
/// `InvalidInput` si `granularity == 0` ou si la grille est vide.
///
/// # Example
/// ```
/// use gc_core::frame::PixelGrid;
/// use gc_ascii::block::average_blocks;
/// let frame = PixelGrid::new(10, 10);
/// let blocks = average_blocks(&frame, 4).unwrap();
/// assert_eq!((blocks.cols, blocks.rows), (3, 3));
/// ```
pub fn average_blocks(frame: &PixelGrid, granularity: u32) -> Result<BlockGrid, GlyphError> {
    if granularity == 0 {
        return Err(GlyphError::InvalidInput("granularity = 0".into()));
    }
    if frame.is_empty() {
        return Err(GlyphError::InvalidInput("grille échantillonnée vide".into()));
    }

    let g = granularity;
    let cols = frame.width.div_ceil(g);
    let rows = frame.height.div_ceil(g);
    let mut cells = Vec::with_capacity((cols * rows) as usize);

    let mut y = 0;
    while y < frame.height {
        let block_h = g.min(frame.height - y);
        let mut x = 0;
        while x < frame.width {
            let block_w = g.min(frame.width - x);
            let mut total = [0.0f32; 3];
            for dy in 0..block_h {
                let row_base = (((y + dy) * frame.width + x) * 4) as usize;
                for dx in 0..block_w {
                    let idx = row_base + (dx * 4) as usize;
                    total[0] += f32::from(frame.data[idx]);
                    total[1] += f32::from(frame.data[idx + 1]);
                    total[2] += f32::from(frame.data[idx + 2]);
                }
            }
            // block_w × block_h > 0 : l'origine du bloc est dans la grille.
            let count = (block_w * block_h) as f32;
            cells.push([total[0] / count, total[1] / count, total[2] / count]);
            x += g;
        }
        y += g;
    }

    debug_assert_eq!(cells.len(), (cols * rows) as usize);
    Ok(BlockGrid { cells, cols, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_pixels(width: u32, height: u32, rgb: &[(u32, u32, [u8; 3])]) -> PixelGrid {
        let mut grid = PixelGrid::new(width, height);
        for &(x, y, [r, g, b]) in rgb {
            let idx = ((y * width + x) * 4) as usize;
            grid.data[idx] = r;
            grid.data[idx + 1] = g;
            grid.data[idx + 2] = b;
            grid.data[idx + 3] = 255;
        }
        grid
    }

    #[test]
    fn grid_dimensions_are_ceil() {
        let frame = PixelGrid::new(10, 7);
        let blocks = average_blocks(&frame, 4).unwrap();
        assert_eq!(blocks.cols, 3);
        assert_eq!(blocks.rows, 2);
        assert_eq!(blocks.cells.len(), 6);
    }

    #[test]
    fn granularity_one_is_identity() {
        let frame = grid_with_pixels(2, 2, &[(0, 0, [10, 20, 30]), (1, 1, [40, 50, 60])]);
        let blocks = average_blocks(&frame, 1).unwrap();
        assert_eq!((blocks.cols, blocks.rows), (2, 2));
        assert_eq!(blocks.mean(0, 0), [10.0, 20.0, 30.0]);
        assert_eq!(blocks.mean(1, 1), [40.0, 50.0, 60.0]);
        assert_eq!(blocks.mean(1, 0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn full_block_mean_is_arithmetic() {
        // Bloc 2×2 : valeurs R 0, 100, 200, 100 → moyenne 100.
        let frame = grid_with_pixels(
            2,
            2,
            &[
                (0, 0, [0, 0, 0]),
                (1, 0, [100, 0, 0]),
                (0, 1, [200, 0, 0]),
                (1, 1, [100, 0, 0]),
            ],
        );
        let blocks = average_blocks(&frame, 2).unwrap();
        assert_eq!(blocks.mean(0, 0)[0], 100.0);
    }

    #[test]
    fn partial_blocks_average_in_bounds_only() {
        // 3×3, G=2 : le bloc droit de la première rangée couvre la
        // colonne 2 seulement (2 pixels). Zero-padding donnerait 75.
        let frame = grid_with_pixels(3, 3, &[(2, 0, [150, 0, 0]), (2, 1, [150, 0, 0])]);
        let blocks = average_blocks(&frame, 2).unwrap();
        assert_eq!((blocks.cols, blocks.rows), (2, 2));
        assert_eq!(blocks.mean(1, 0)[0], 150.0);
        // Bloc bas-droit : 1 seul pixel (2,2), resté noir.
        assert_eq!(blocks.mean(1, 1)[0], 0.0);
    }

    #[test]
    fn granularity_larger_than_frame() {
        let frame = grid_with_pixels(2, 2, &[(0, 0, [40, 40, 40])]);
        let blocks = average_blocks(&frame, 16).unwrap();
        assert_eq!((blocks.cols, blocks.rows), (1, 1));
        assert_eq!(blocks.mean(0, 0)[0], 10.0);
    }

    #[test]
    fn zero_granularity_is_invalid() {
        let frame = PixelGrid::new(4, 4);
        assert!(matches!(
            average_blocks(&frame, 0),
            Err(GlyphError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_frame_is_invalid() {
        let frame = PixelGrid::new(0, 4);
        assert!(matches!(
            average_blocks(&frame, 2),
            Err(GlyphError::InvalidInput(_))
        ));
    }
}
