use std::collections::HashMap;

use ab_glyph::{Font, FontRef, PxScale, point};
use gc_core::config::ExportOptions;
use gc_core::error::GlyphError;
use gc_core::frame::PixelGrid;
use rayon::prelude::*;

/// Convertit le texte d'un artefact en pixels RGBA.
///
/// Les glyphes sont pré-rasterisés dans un atlas alpha à la
/// construction; le dessin lui-même ne rasterise plus rien. Sans
/// police valide, des métriques monospace de repli dimensionnent la
/// toile et l'image produite est fond seul (fail closed, jamais de
/// panique).
pub struct TextRasterizer {
    char_width: u32,
    line_height: u32,
    /// Alpha par caractère (taille = char_width × line_height).
    glyph_cache: HashMap<char, Vec<u8>>,
    /// Glyphe vide pré-alloué pour les caractères absents de l'atlas.
    empty_glyph: Vec<u8>,
}

impl TextRasterizer {
    /// Construit le rasterizer depuis les options d'export.
    ///
    /// Police absente ou invalide → métriques monospace de repli
    /// (0.6 × / 1.2 × la taille de police), atlas vide.
    #[must_use]
    pub fn new(options: &ExportOptions) -> Self {
        if let Some(bytes) = options.font_bytes.as_deref() {
            match FontRef::try_from_slice(bytes) {
                Ok(font) => return Self::from_font(&font, options.font_px),
                Err(e) => {
                    log::warn!("police invalide, repli monospace : {e}");
                }
            }
        }
        Self::with_metrics(
            (options.font_px * 0.6).round().max(1.0) as u32,
            (options.font_px * 1.2).round().max(1.0) as u32,
        )
    }

    /// Métriques fixes, aucun glyphe dessiné. Chemin de repli.
    #[must_use]
    pub fn with_metrics(char_width: u32, line_height: u32) -> Self {
        let char_width = char_width.max(1);
        let line_height = line_height.max(1);
        Self {
            char_width,
            line_height,
            glyph_cache: HashMap::new(),
            empty_glyph: vec![0u8; (char_width * line_height) as usize],
        }
    }

    /// Mesure la police ('M' pour l'avance) et pré-calcule l'atlas ASCII.
    fn from_font(font: &FontRef, scale_px: f32) -> Self {
        let scale = PxScale::from(scale_px);

        let v_advance = font.ascent_unscaled() - font.descent_unscaled() + font.line_gap_unscaled();
        let line_height = ((v_advance * scale.y / font.height_unscaled()).ceil() as u32).max(1);

        let m_glyph = font.glyph_id('M');
        let h_advance = font.h_advance_unscaled(m_glyph);
        let char_width = ((h_advance * scale.x / font.height_unscaled()).ceil() as u32).max(1);

        let mut rasterizer = Self::with_metrics(char_width, line_height);
        rasterizer.cache_charset(font, scale, 32..=126);
        rasterizer
    }

    fn cache_charset(
        &mut self,
        font: &FontRef,
        scale: PxScale,
        range: std::ops::RangeInclusive<u32>,
    ) {
        for codepoint in range {
            let Some(ch) = std::char::from_u32(codepoint) else {
                continue;
            };
            // glyph_id 0 = .notdef — on le saute pour éviter les boîtes "?".
            let gid = font.glyph_id(ch);
            if gid.0 == 0 && ch != '\0' {
                continue;
            }

            let mut buffer = vec![0u8; (self.char_width * self.line_height) as usize];

            let ascent_px = font.ascent_unscaled() * scale.y / font.height_unscaled();
            let glyph = gid.with_scale_and_position(scale, point(0.0, ascent_px));

            if let Some(outline) = font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                #[allow(clippy::cast_possible_wrap)]
                outline.draw(|x, y, v| {
                    let px = (x as i32 + bounds.min.x as i32).max(0) as u32;
                    let py = (y as i32 + bounds.min.y as i32).max(0) as u32;
                    if px < self.char_width && py < self.line_height {
                        let idx = (py * self.char_width + px) as usize;
                        if idx < buffer.len() {
                            buffer[idx] = (v * 255.0).round() as u8;
                        }
                    }
                });
            }
            self.glyph_cache.insert(ch, buffer);
        }
    }

    /// Largeur d'avance d'un caractère, en pixels.
    #[must_use]
    pub fn char_width(&self) -> u32 {
        self.char_width
    }

    /// Hauteur de ligne, en pixels.
    #[must_use]
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Dimensions de la toile pour un texte donné :
    /// `max_cols × char_width + 2×padding` sur
    /// `line_count × line_height + 2×padding`.
    ///
    /// # Example
    /// ```
    /// use gc_export::rasterizer::TextRasterizer;
    /// let r = TextRasterizer::with_metrics(8, 16);
    /// assert_eq!(r.canvas_dimensions("abc\nde", 20), (64, 72));
    /// ```
    #[must_use]
    pub fn canvas_dimensions(&self, text: &str, padding: u32) -> (u32, u32) {
        let lines: Vec<&str> = text.split('\n').collect();
        let max_cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
        (
            max_cols * self.char_width + 2 * padding,
            lines.len() as u32 * self.line_height + 2 * padding,
        )
    }

    /// Dessine le texte sur une toile neuve : fond plein, puis chaque
    /// ligne à (padding, padding + row × line_height), alignée en haut.
    /// Parallélisé par rangée de pixels.
    #[must_use]
    pub fn rasterize(&self, text: &str, options: &ExportOptions) -> PixelGrid {
        let padding = options.padding;
        let (width, height) = self.canvas_dimensions(text, padding);
        let mut canvas = PixelGrid::new(width, height);
        if canvas.is_empty() {
            return canvas;
        }

        let line_chars: Vec<Vec<char>> = text.split('\n').map(|l| l.chars().collect()).collect();

        let [bg_r, bg_g, bg_b] = options.background;
        let [fg_r, fg_g, fg_b] = options.foreground;

        let stride = (width * 4) as usize;
        let char_w = self.char_width as usize;
        let empty_glyph = &self.empty_glyph;

        canvas
            .data
            .par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                for px in row.chunks_exact_mut(4) {
                    px[0] = bg_r;
                    px[1] = bg_g;
                    px[2] = bg_b;
                    px[3] = 255;
                }

                let Some(ty) = (y as u32).checked_sub(padding) else {
                    return;
                };
                let line_idx = (ty / self.line_height) as usize;
                let glyph_row = (ty % self.line_height) as usize;
                let Some(chars) = line_chars.get(line_idx) else {
                    return;
                };

                for (col, ch) in chars.iter().enumerate() {
                    let alpha_buf = self.glyph_cache.get(ch).unwrap_or(empty_glyph);
                    let x_start = padding as usize + col * char_w;
                    for cx in 0..char_w {
                        let alpha = alpha_buf[glyph_row * char_w + cx];
                        if alpha == 0 {
                            continue;
                        }
                        let alpha_f = f32::from(alpha) / 255.0;
                        let idx = (x_start + cx) * 4;
                        if idx + 3 >= row.len() {
                            continue;
                        }
                        row[idx] =
                            (f32::from(fg_r) * alpha_f + f32::from(bg_r) * (1.0 - alpha_f)) as u8;
                        row[idx + 1] =
                            (f32::from(fg_g) * alpha_f + f32::from(bg_g) * (1.0 - alpha_f)) as u8;
                        row[idx + 2] =
                            (f32::from(fg_b) * alpha_f + f32::from(bg_b) * (1.0 - alpha_f)) as u8;
                    }
                }
            });

        canvas
    }
}

/// Encode une grille RGBA en PNG.
///
/// # Errors
/// `ExportFailure` si l'encodage échoue ou si les dimensions sont incohérentes.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>, GlyphError> {
    let img = image::RgbaImage::from_raw(grid.width, grid.height, grid.data.clone())
        .ok_or_else(|| GlyphError::ExportFailure("buffer RGBA incohérent".into()))?;
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .map_err(|e| GlyphError::ExportFailure(format!("encodage PNG : {e}")))?;
    Ok(bytes)
}
