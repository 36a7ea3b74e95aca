use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::composition::params::CompositionParameters;
use crate::foundation::core::Canvas;
use crate::foundation::error::{CoverError, CoverResult};

/// Size and device scale of the rendered region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Edge of the square region in CSS px.
    pub size_px: u32,
    /// Device pixels per CSS px in the exported PNG.
    pub scale: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            size_px: 512,
            scale: 2.0,
        }
    }
}

impl RenderSettings {
    /// Validate and return the region canvas.
    pub fn canvas(&self) -> CoverResult<Canvas> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(CoverError::validation("render scale must be finite and > 0"));
        }
        Canvas::square(self.size_px)
    }
}

/// JSON cover document: parameters, background path and render settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverDocument {
    /// Composition parameters.
    pub params: CompositionParameters,
    /// Background image path; relative paths resolve against the document directory.
    pub background: Option<PathBuf>,
    /// Region size and scale.
    pub render: RenderSettings,
}

impl CoverDocument {
    /// Parse a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CoverResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CoverError::serde(format!("parse cover document JSON: {e}")))
    }

    /// Parse a document from disk and resolve its background path.
    pub fn from_path(path: impl AsRef<Path>) -> CoverResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CoverError::validation(format!("open cover document '{}': {e}", path.display()))
        })?;
        let mut doc = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        doc.background = doc.background.map(|bg| resolve_relative(base, bg));
        Ok(doc)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> CoverResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoverError::serde(e.to_string()))
    }
}

fn resolve_relative(base: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() { p } else { base.join(p) }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/document.rs"]
mod tests;
