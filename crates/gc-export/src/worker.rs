use gc_core::config::ExportOptions;

use crate::rasterizer::{TextRasterizer, encode_png};

/// Message de requête : texte complet de l'artefact + options de rendu.
pub struct RasterizeRequest {
    /// Texte de l'artefact, lignes séparées par `\n`.
    pub text: String,
    /// Police, padding, couleurs.
    pub options: ExportOptions,
}

/// Message de réponse — exactement un par requête.
pub enum RasterizeReply {
    /// PNG encodé.
    Image(Vec<u8>),
    /// La rasterisation ou l'encodage a échoué.
    Error(String),
}

/// Lance la rasterisation sur un thread dédié, fire-and-forget côté
/// appelant : une requête envoyée, exactement une réponse à recevoir,
/// aucun état mutable partagé. Deux exports rapprochés tournent chacun
/// jusqu'au bout, indépendamment.
///
/// # Example
/// ```
/// use gc_core::config::ExportOptions;
/// use gc_export::worker::{RasterizeReply, RasterizeRequest, spawn_rasterize};
///
/// let rx = spawn_rasterize(RasterizeRequest {
///     text: "@@\n..".into(),
///     options: ExportOptions::default(),
/// });
/// match rx.recv().unwrap() {
///     RasterizeReply::Image(png) => assert!(!png.is_empty()),
///     RasterizeReply::Error(e) => panic!("{e}"),
/// }
/// ```
#[must_use]
pub fn spawn_rasterize(request: RasterizeRequest) -> flume::Receiver<RasterizeReply> {
    let (tx, rx) = flume::bounded(1);

    let spawned = std::thread::Builder::new()
        .name("rasterizer".into())
        .spawn(move || {
            let rasterizer = TextRasterizer::new(&request.options);
            let canvas = rasterizer.rasterize(&request.text, &request.options);
            let reply = match encode_png(&canvas) {
                Ok(png) => RasterizeReply::Image(png),
                Err(e) => {
                    log::error!("rasterisation échouée : {e}");
                    RasterizeReply::Error(e.to_string())
                }
            };
            // Récepteur parti = export abandonné par l'appelant, rien à faire.
            let _ = tx.send(reply);
        });

    if let Err(e) = spawned {
        log::error!("impossible de lancer le thread rasterizer : {e}");
        let (err_tx, err_rx) = flume::bounded(1);
        let _ = err_tx.send(RasterizeReply::Error(e.to_string()));
        return err_rx;
    }

    rx
}
