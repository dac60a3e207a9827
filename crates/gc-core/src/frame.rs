/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// Utilisé pour l'image décodée, la grille échantillonnée et la sortie
/// du rasterizer.
///
/// # Example
/// ```
/// use gc_core::frame::PixelGrid;
/// let grid = PixelGrid::new(10, 10);
/// assert_eq!(grid.data.len(), 400);
/// ```
#[derive(Clone)]
pub struct PixelGrid {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelGrid {
    /// Crée un buffer pré-alloué aux dimensions données (pixels noirs opaques à zéro alpha).
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::PixelGrid;
    /// let grid = PixelGrid::new(100, 50);
    /// assert_eq!(grid.width, 100);
    /// assert_eq!(grid.height, 50);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width as usize) * (height as usize) * 4],
            width,
            height,
        }
    }

    /// Construit une grille depuis un buffer RGBA existant.
    ///
    /// Retourne `None` si la taille du buffer ne correspond pas aux dimensions.
    #[must_use]
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::PixelGrid;
    /// let grid = PixelGrid::new(10, 10);
    /// assert_eq!(grid.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 4) as usize;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// True si la grille n'a aucun pixel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Artefact texte produit par un passage de rendu.
///
/// Une ligne par rangée de blocs; toutes les lignes ont le même nombre
/// de caractères. Régénéré entier à chaque rendu réussi.
///
/// # Example
/// ```
/// use gc_core::frame::AsciiArtifact;
/// let art = AsciiArtifact::from_rows(vec!["@@".into(), "..".into()]);
/// assert_eq!(art.text(), "@@\n..");
/// assert_eq!(art.line_count(), 2);
/// assert_eq!(art.columns(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiArtifact {
    rows: Vec<String>,
}

impl AsciiArtifact {
    /// Assemble un artefact depuis ses lignes.
    ///
    /// Les lignes sont supposées de longueur égale (garanti par le
    /// renderer : une cellule par bloc, ceil(w/G) blocs par ligne).
    #[must_use]
    pub fn from_rows(rows: Vec<String>) -> Self {
        debug_assert!(
            rows.windows(2)
                .all(|w| w[0].chars().count() == w[1].chars().count()),
            "artifact rows must have equal length"
        );
        Self { rows }
    }

    /// Texte complet, lignes jointes par `\n`. C'est la forme exportée
    /// (fichier .txt, presse-papiers) et l'entrée du rasterizer.
    #[must_use]
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }

    /// Lignes individuelles.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Nombre de lignes.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rows.len()
    }

    /// Nombre de caractères par ligne (0 si artefact vide).
    #[must_use]
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, |r| r.chars().count())
    }
}
