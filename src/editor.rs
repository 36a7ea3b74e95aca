use std::path::Path;

use crate::assets::background::BackgroundImage;
use crate::composition::descriptors::CoverDescriptors;
use crate::composition::document::{CoverDocument, RenderSettings};
use crate::composition::params::{CompositionParameters, ParamEdit};
use crate::export::download::DownloadTarget;
use crate::export::pipeline::{ExportError, ExportedCover, Exporter, Notifier};
use crate::foundation::error::{CoverError, CoverResult};
use crate::render::raster::Rasterizer;
use crate::render::region::RenderedRegion;

/// Live editing session: one parameter record, an optional background and the descriptors
/// derived from them.
///
/// Descriptors are recomputed eagerly after every edit, so [`CoverEditor::descriptors`] always
/// reflects the latest parameters.
#[derive(Clone, Debug)]
pub struct CoverEditor {
    params: CompositionParameters,
    background: Option<BackgroundImage>,
    settings: RenderSettings,
    descriptors: CoverDescriptors,
}

impl Default for CoverEditor {
    fn default() -> Self {
        Self::new(CompositionParameters::default(), RenderSettings::default())
    }
}

impl CoverEditor {
    /// Session starting from `params` (clamped) without a background.
    pub fn new(params: CompositionParameters, settings: RenderSettings) -> Self {
        let params = params.clamped();
        let descriptors = CoverDescriptors::compute(&params);
        Self {
            params,
            background: None,
            settings,
            descriptors,
        }
    }

    /// Session for a cover document; loads its background when one is named.
    pub fn from_document(doc: &CoverDocument) -> CoverResult<Self> {
        let mut editor = Self::new(doc.params.clone(), doc.render);
        if let Some(bg) = &doc.background {
            editor.load_background_from_path(bg)?;
        }
        Ok(editor)
    }

    /// Current parameters.
    pub fn params(&self) -> &CompositionParameters {
        &self.params
    }

    /// Descriptors for the current parameters.
    pub fn descriptors(&self) -> &CoverDescriptors {
        &self.descriptors
    }

    /// Region size and device scale used for capture.
    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    /// Replace the render settings.
    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    /// Loaded background, if any.
    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// Return `true` when a background is loaded.
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Apply one edit and recompute the descriptors.
    pub fn apply(&mut self, edit: ParamEdit) {
        tracing::trace!(?edit, "apply edit");
        self.params.apply(edit);
        self.descriptors = CoverDescriptors::compute(&self.params);
    }

    /// Apply edits in order.
    pub fn apply_all(&mut self, edits: impl IntoIterator<Item = ParamEdit>) {
        for edit in edits {
            self.apply(edit);
        }
    }

    /// Set rotation back to 0.
    pub fn reset_rotation(&mut self) {
        self.apply(ParamEdit::ResetRotation);
    }

    /// Replace the background with an already decoded image.
    pub fn set_background(&mut self, background: BackgroundImage) {
        self.background = Some(background);
    }

    /// Decode and load a background from encoded bytes.
    ///
    /// On error the previous background stays in place.
    pub fn load_background_bytes(&mut self, bytes: &[u8]) -> CoverResult<()> {
        let bg = BackgroundImage::from_bytes(bytes)?;
        tracing::debug!(width = bg.width(), height = bg.height(), "background loaded");
        self.background = Some(bg);
        Ok(())
    }

    /// Read, decode and load a background from disk.
    pub fn load_background_from_path(&mut self, path: impl AsRef<Path>) -> CoverResult<()> {
        let bg = BackgroundImage::from_path(path)?;
        self.background = Some(bg);
        Ok(())
    }

    /// Remove the background.
    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Snapshot the current composition for rasterization.
    pub fn capture_region(&self) -> CoverResult<RenderedRegion> {
        RenderedRegion::capture(&self.params, self.background.as_ref(), &self.settings)
    }

    /// Capture the current composition and export it.
    ///
    /// The background check runs before capture. The session is left untouched whatever the
    /// outcome.
    pub fn export<R, D, N>(
        &self,
        exporter: &mut Exporter<R, D, N>,
    ) -> Result<ExportedCover, ExportError>
    where
        R: Rasterizer,
        D: DownloadTarget,
        N: Notifier,
    {
        exporter.export_with(self.has_background(), || self.capture_region())
    }

    /// Document describing the session; `background` is left for the caller to fill in.
    pub fn to_document(&self) -> CoverDocument {
        CoverDocument {
            params: self.params.clone(),
            background: None,
            render: self.settings,
        }
    }
}

impl TryFrom<&CoverDocument> for CoverEditor {
    type Error = CoverError;

    fn try_from(doc: &CoverDocument) -> Result<Self, Self::Error> {
        Self::from_document(doc)
    }
}

#[cfg(test)]
#[path = "../tests/unit/editor.rs"]
mod tests;
