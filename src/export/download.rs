use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::CoverResult;
use crate::render::raster::PngPayload;

/// Destination for an exported cover.
///
/// Delivery contract: `deliver` is called at most once per successful export, with the fixed
/// export file name, and returns where the file ended up.
pub trait DownloadTarget {
    /// Store `payload` under `file_name` (or a de-duplicated variant of it).
    fn deliver(&mut self, file_name: &str, payload: &PngPayload) -> CoverResult<PathBuf>;
}

/// Saves downloads into a directory the way a browser download folder does.
///
/// When `overwrite` is off and `name.png` exists, the next free `name (1).png`, `name (2).png`,
/// ... is used.
#[derive(Clone, Debug)]
pub struct DirectoryDownloads {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectoryDownloads {
    /// Downloads into `dir`, keeping existing files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: false,
        }
    }

    /// Replace an existing file of the same name instead of picking a numbered variant.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn destination(&self, file_name: &str) -> PathBuf {
        let first = self.dir.join(file_name);
        if self.overwrite || !first.exists() {
            return first;
        }
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (file_name, None),
        };
        (1u32..)
            .map(|n| {
                let name = match ext {
                    Some(ext) => format!("{stem} ({n}).{ext}"),
                    None => format!("{stem} ({n})"),
                };
                self.dir.join(name)
            })
            .find(|p| !p.exists())
            .unwrap_or(first)
    }
}

impl DownloadTarget for DirectoryDownloads {
    fn deliver(&mut self, file_name: &str, payload: &PngPayload) -> CoverResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create download dir '{}'", self.dir.display()))?;
        let path = self.destination(file_name);
        std::fs::write(&path, payload.as_bytes())
            .with_context(|| format!("write download '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = payload.len(), "cover saved");
        Ok(path)
    }
}

/// Keeps deliveries in memory; useful for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryDownloads {
    /// Delivered `(file_name, payload)` pairs in order.
    pub delivered: Vec<(String, PngPayload)>,
}

impl DownloadTarget for MemoryDownloads {
    fn deliver(&mut self, file_name: &str, payload: &PngPayload) -> CoverResult<PathBuf> {
        self.delivered.push((file_name.to_string(), payload.clone()));
        Ok(PathBuf::from(file_name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/download.rs"]
mod tests;
