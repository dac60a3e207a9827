use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use gc_core::error::GlyphError;

/// `ascii_<YYYY-MM-DD>.txt`.
#[must_use]
pub fn txt_filename(date: NaiveDate) -> String {
    format!("ascii_{}.txt", date.format("%Y-%m-%d"))
}

/// `ASCII_<epoch-millis>.png`.
#[must_use]
pub fn png_filename(epoch_millis: i64) -> String {
    format!("ASCII_{epoch_millis}.png")
}

/// Écrit le texte de l'artefact en UTF-8 sous `ascii_<date-du-jour>.txt`.
///
/// # Errors
/// `ExportFailure` si l'écriture échoue.
pub fn write_txt(dir: &Path, artifact_text: &str) -> Result<PathBuf, GlyphError> {
    let path = dir.join(txt_filename(Local::now().date_naive()));
    std::fs::write(&path, artifact_text)
        .map_err(|e| GlyphError::ExportFailure(format!("{} : {e}", path.display())))?;
    log::info!("TXT exporté : {}", path.display());
    Ok(path)
}

/// Écrit des bytes PNG sous `ASCII_<epoch-millis>.png`.
///
/// # Errors
/// `ExportFailure` si l'écriture échoue.
pub fn write_png(dir: &Path, png: &[u8]) -> Result<PathBuf, GlyphError> {
    let path = dir.join(png_filename(Utc::now().timestamp_millis()));
    std::fs::write(&path, png)
        .map_err(|e| GlyphError::ExportFailure(format!("{} : {e}", path.display())))?;
    log::info!("PNG exporté : {}", path.display());
    Ok(path)
}
