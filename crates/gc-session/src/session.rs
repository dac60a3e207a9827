use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use gc_ascii::block::average_blocks;
use gc_ascii::render::render_blocks;
use gc_core::config::{Config, ExportOptions};
use gc_core::error::GlyphError;
use gc_core::frame::AsciiArtifact;
use gc_core::params::RenderParams;
use gc_core::ramp::CharRamp;
use gc_export::worker::{RasterizeReply, RasterizeRequest, spawn_rasterize};
use gc_source::image::SourceImage;
use gc_source::sample::Sampler;

/// Étape courante du pipeline de rendu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStage {
    /// Aucune image chargée; toute demande de rendu est un no-op.
    Idle,
    /// Réduction de l'image à la largeur cible.
    Sampling,
    /// Moyenne RGB par bloc.
    Averaging,
    /// Brightness → caractères, assemblage des lignes.
    Mapping,
    /// Artefact publié.
    Complete,
    /// Dernier rendu échoué; l'artefact précédent reste publié.
    Failed,
}

/// Session de rendu : une image source, un artefact publié.
///
/// Toute mutation passe par un seul fil logique de contrôle; l'artefact
/// est publié via `ArcSwap` (last-write-wins) pour des lecteurs
/// lock-free. Un rendu échoué ne touche jamais au dernier artefact
/// valide. Les changements de paramètres passent par un slot de
/// supersession de profondeur 1 : seule la dernière demande est rendue.
///
/// # Example
/// ```
/// use gc_core::frame::PixelGrid;
/// use gc_session::Session;
/// use gc_source::image::SourceImage;
///
/// let mut session = Session::default();
/// let mut grid = PixelGrid::new(4, 4);
/// grid.data.fill(255);
/// session.load_source(SourceImage::from_pixels(grid).unwrap()).unwrap();
/// assert!(session.artifact_text().is_some());
/// ```
pub struct Session {
    source: Option<SourceImage>,
    params: RenderParams,
    /// Slot de supersession : une nouvelle demande remplace la précédente.
    pending: Option<RenderParams>,
    stage: RenderStage,
    sampler: Sampler,
    ramp: CharRamp,
    export: ExportOptions,
    artifact: Arc<ArcSwapOption<AsciiArtifact>>,
}

impl Session {
    /// Session neuve, paramètres et options d'export issus de la config.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            source: None,
            params: config.render,
            pending: None,
            stage: RenderStage::Idle,
            sampler: Sampler::new(),
            ramp: CharRamp::classic(),
            export: config.export,
            artifact: Arc::new(ArcSwapOption::empty()),
        }
    }

    /// Décode des bytes image et en fait la source courante.
    ///
    /// Succès : la source est remplacée en bloc, granularité et
    /// intensité couleur reviennent aux défauts d'upload, l'artefact
    /// précédent est effacé puis un rendu frais est lancé.
    /// Échec : rien ne change, l'artefact précédent reste publié.
    ///
    /// # Errors
    /// `InvalidInput` / `DecodeFailure` du décodage, ou l'erreur du
    /// rendu initial.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<(), GlyphError> {
        let source = SourceImage::from_bytes(bytes)?;
        self.load_source(source)
    }

    /// Charge un fichier image comme source courante.
    ///
    /// # Errors
    /// Voir [`Session::load_image_bytes`].
    pub fn load_image_path(&mut self, path: &Path) -> Result<(), GlyphError> {
        let source = SourceImage::from_path(path)?;
        self.load_source(source)
    }

    /// Installe une source déjà décodée et rend immédiatement.
    ///
    /// # Errors
    /// Propage l'erreur du rendu initial.
    pub fn load_source(&mut self, source: SourceImage) -> Result<(), GlyphError> {
        log::info!(
            "nouvelle source {}×{}",
            source.natural_width(),
            source.natural_height()
        );
        self.source = Some(source);
        self.params.reset_for_upload();
        self.pending = None;
        // Seul un nouvel upload valide efface le dernier artefact.
        self.artifact.store(None);
        self.stage = RenderStage::Idle;
        self.render()
    }

    /// Dépose une demande de rendu avec de nouveaux paramètres.
    /// Remplace toute demande en attente (profondeur 1).
    pub fn submit(&mut self, params: RenderParams) {
        if self.pending.is_some() {
            log::trace!("demande de rendu supersédée");
        }
        self.pending = Some(params);
    }

    /// Consomme la dernière demande en attente et rend.
    ///
    /// Retourne `Ok(false)` si rien n'était en attente.
    ///
    /// # Errors
    /// Propage l'erreur du rendu (l'artefact précédent reste publié).
    pub fn process_pending(&mut self) -> Result<bool, GlyphError> {
        let Some(params) = self.pending.take() else {
            return Ok(false);
        };
        self.params = params;
        self.render()?;
        Ok(true)
    }

    /// Lance un rendu avec les paramètres courants.
    ///
    /// Sans image chargée : no-op (état Idle), jamais une erreur.
    /// Succès : publie un artefact frais (last-write-wins).
    /// Échec : loggé, état Failed, artefact précédent intact.
    ///
    /// # Errors
    /// `InvalidInput` ou `RenderFailure` selon l'étape fautive.
    pub fn render(&mut self) -> Result<(), GlyphError> {
        let Some(source) = self.source.clone() else {
            log::debug!("rendu demandé sans image : no-op");
            self.stage = RenderStage::Idle;
            return Ok(());
        };

        match self.run_pipeline(&source) {
            Ok(artifact) => {
                self.artifact.store(Some(Arc::new(artifact)));
                self.stage = RenderStage::Complete;
                Ok(())
            }
            Err(e) => {
                log::error!("rendu échoué : {e}");
                self.stage = RenderStage::Failed;
                Err(e)
            }
        }
    }

    fn run_pipeline(&mut self, source: &SourceImage) -> Result<AsciiArtifact, GlyphError> {
        self.params.validate()?;

        self.stage = RenderStage::Sampling;
        let sampled = self.sampler.sample(source, self.params.target_width)?;

        self.stage = RenderStage::Averaging;
        let blocks = average_blocks(&sampled, self.params.granularity)?;

        self.stage = RenderStage::Mapping;
        Ok(render_blocks(&blocks, &self.params, &self.ramp))
    }

    /// Artefact publié, s'il existe.
    #[must_use]
    pub fn artifact(&self) -> Option<Arc<AsciiArtifact>> {
        self.artifact.load_full()
    }

    /// Poignée partageable sur l'artefact publié, pour des lecteurs
    /// sur d'autres threads (préviews, shells).
    #[must_use]
    pub fn artifact_handle(&self) -> Arc<ArcSwapOption<AsciiArtifact>> {
        Arc::clone(&self.artifact)
    }

    /// Texte verbatim de l'artefact courant (surface presse-papiers —
    /// l'appel clipboard lui-même appartient au shell).
    #[must_use]
    pub fn artifact_text(&self) -> Option<String> {
        self.artifact().map(|a| a.text())
    }

    /// Étape courante du pipeline.
    #[must_use]
    pub fn stage(&self) -> RenderStage {
        self.stage
    }

    /// Paramètres de rendu courants.
    #[must_use]
    pub fn params(&self) -> RenderParams {
        self.params
    }

    /// Options d'export courantes.
    #[must_use]
    pub fn export_options(&self) -> &ExportOptions {
        &self.export
    }

    /// True si une image est chargée.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Exporte l'artefact courant en `ascii_<date>.txt` dans `dir`.
    ///
    /// Indépendant de l'état du rendu : un export raté n'invalide pas
    /// l'artefact, et réciproquement.
    ///
    /// # Errors
    /// `InvalidInput` sans artefact, `ExportFailure` si l'écriture échoue.
    pub fn export_txt(&self, dir: &Path) -> Result<PathBuf, GlyphError> {
        let text = self
            .artifact_text()
            .ok_or_else(|| GlyphError::InvalidInput("aucun artefact à exporter".into()))?;
        gc_export::files::write_txt(dir, &text)
    }

    /// Rasterise l'artefact courant sur le thread dédié et écrit
    /// `ASCII_<epoch-millis>.png` dans `dir`. Une requête, une réponse.
    ///
    /// # Errors
    /// `InvalidInput` sans artefact, `ExportFailure` si la
    /// rasterisation ou l'écriture échoue.
    pub fn export_png(&self, dir: &Path) -> Result<PathBuf, GlyphError> {
        let text = self
            .artifact_text()
            .ok_or_else(|| GlyphError::InvalidInput("aucun artefact à exporter".into()))?;

        let rx = spawn_rasterize(RasterizeRequest {
            text,
            options: self.export.clone(),
        });
        let reply = rx
            .recv()
            .map_err(|e| GlyphError::ExportFailure(format!("rasterizer parti : {e}")))?;

        match reply {
            RasterizeReply::Image(png) => gc_export::files::write_png(dir, &png),
            RasterizeReply::Error(reason) => Err(GlyphError::ExportFailure(reason)),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
