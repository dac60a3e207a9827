use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::params::RenderParams;

/// Options du rendu PNG (§ export).
///
/// # Example
/// ```
/// use gc_core::config::ExportOptions;
/// let opts = ExportOptions::default();
/// assert_eq!(opts.font_px, 14.0);
/// assert_eq!(opts.padding, 20);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ExportOptions {
    /// Taille de police en pixels.
    pub font_px: f32,
    /// Marge intérieure en pixels, appliquée des deux côtés.
    pub padding: u32,
    /// Couleur de fond RGB.
    pub background: [u8; 3],
    /// Couleur du texte RGB.
    pub foreground: [u8; 3],
    /// Bytes d'une police TTF/OTF. `None` → métriques monospace de repli.
    #[serde(skip)]
    pub font_bytes: Option<Vec<u8>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        // Défauts historiques : 14px monospace, padding 20, texte blanc sur fond noir.
        Self {
            font_px: 14.0,
            padding: 20,
            background: [0, 0, 0],
            foreground: [255, 255, 255],
            font_bytes: None,
        }
    }
}

impl ExportOptions {
    /// Clamp numeric fields to sane ranges.
    pub fn clamp_all(&mut self) {
        self.font_px = self.font_px.clamp(4.0, 128.0);
        self.padding = self.padding.min(256);
    }
}

/// Configuration complète, sérialisable en TOML.
///
/// Chaque champ a une valeur par défaut saine; un fichier partiel ne
/// remplace que ce qu'il nomme.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Paramètres de rendu initiaux.
    pub render: RenderParams,
    /// Options d'export PNG.
    pub export: ExportOptions,
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    export: Option<ExportSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    target_width: Option<u32>,
    contrast: Option<f32>,
    granularity: Option<u32>,
    color_intensity: Option<f32>,
}

/// Export section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct ExportSection {
    font_px: Option<f32>,
    padding: Option<u32>,
    background: Option<[u8; 3]>,
    foreground: Option<[u8; 3]>,
}

/// Parse un contenu TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the content is not valid TOML.
///
/// # Example
/// ```
/// use gc_core::config::from_toml_str;
/// let config = from_toml_str("[render]\ntarget_width = 80\n").unwrap();
/// assert_eq!(config.render.target_width, 80);
/// assert_eq!(config.render.granularity, 4);
/// ```
pub fn from_toml_str(content: &str) -> Result<Config> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = Config::default();

    if let Some(r) = file.render {
        if let Some(v) = r.target_width {
            config.render.target_width = v;
        }
        if let Some(v) = r.contrast {
            config.render.contrast = v;
        }
        if let Some(v) = r.granularity {
            config.render.granularity = v;
        }
        if let Some(v) = r.color_intensity {
            config.render.color_intensity = v;
        }
    }

    if let Some(e) = file.export {
        if let Some(v) = e.font_px {
            config.export.font_px = v;
        }
        if let Some(v) = e.padding {
            config.export.padding = v;
        }
        if let Some(v) = e.background {
            config.export.background = v;
        }
        if let Some(v) = e.foreground {
            config.export.foreground = v;
        }
    }

    config.render.clamp_all();
    config.export.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    from_toml_str(&content).with_context(|| format!("Config invalide : {}", path.display()))
}
