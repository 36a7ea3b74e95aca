use std::path::PathBuf;

use crate::export::download::DownloadTarget;
use crate::foundation::error::{CoverError, CoverResult};
use crate::render::raster::{CaptureOptions, PngPayload, Rasterizer, encode_png};
use crate::render::region::RenderedRegion;

/// File name every export is delivered under.
pub const EXPORT_FILE_NAME: &str = "playlist-cover.png";

/// Why an export did not produce a download.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// Export was requested before a background image was loaded.
    #[error("no background image loaded")]
    NoBackground,

    /// The rasterizer (or PNG encoding) failed.
    #[error("rasterization failed: {0}")]
    RasterizationFailed(#[source] CoverError),

    /// The PNG was produced but could not be delivered.
    #[error("download failed: {0}")]
    DownloadFailed(#[source] CoverError),
}

impl ExportError {
    /// Failure class without the cause.
    pub fn kind(&self) -> ExportFailure {
        match self {
            Self::NoBackground => ExportFailure::NoBackground,
            Self::RasterizationFailed(_) => ExportFailure::RasterizationFailed,
            Self::DownloadFailed(_) => ExportFailure::DownloadFailed,
        }
    }

    /// User-facing notice for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            Self::NoBackground => Notice::UploadFirst,
            Self::RasterizationFailed(_) | Self::DownloadFailed(_) => Notice::DownloadError,
        }
    }
}

/// Classification carried by [`ExportPhase::Failed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFailure {
    /// See [`ExportError::NoBackground`].
    NoBackground,
    /// See [`ExportError::RasterizationFailed`].
    RasterizationFailed,
    /// See [`ExportError::DownloadFailed`].
    DownloadFailed,
}

/// Steps an export passes through.
///
/// Every attempt starts at `Idle` and ends at `Notified` or `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportPhase {
    /// Nothing in flight.
    Idle,
    /// Checking that a background is present.
    Checking,
    /// Rasterizer running.
    Rasterizing,
    /// PNG ready.
    Succeeded,
    /// PNG being delivered.
    Downloading,
    /// Success notice sent.
    Notified,
    /// Attempt ended with a failure.
    Failed(ExportFailure),
}

/// Message shown to the user after an export attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Export requested without a background.
    UploadFirst,
    /// Rasterization or delivery failed.
    DownloadError,
    /// Cover delivered.
    CoverDownloaded,
}

impl Notice {
    /// Text of the notice.
    pub fn message(self) -> &'static str {
        match self {
            Self::UploadFirst => "Please upload an image first",
            Self::DownloadError => "An error occurred during download",
            Self::CoverDownloaded => "Cover downloaded!",
        }
    }

    /// Return `true` for notices that report a failure.
    pub fn is_error(self) -> bool {
        !matches!(self, Self::CoverDownloaded)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives user-facing notices.
pub trait Notifier {
    /// Show `notice` to the user.
    fn notify(&mut self, notice: Notice);
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Notifier that reports notices through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!(notice = notice.message(), "export notice");
        } else {
            tracing::info!(notice = notice.message(), "export notice");
        }
    }
}

/// Result of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedCover {
    /// Encoded PNG.
    pub png: PngPayload,
    /// Width of the PNG in pixels.
    pub width: u32,
    /// Height of the PNG in pixels.
    pub height: u32,
    /// Where the download target stored the file.
    pub saved_to: PathBuf,
}

/// Runs exports: background check, rasterize, encode, deliver, notify.
///
/// One attempt at a time; a failed attempt leaves the exporter ready for the next one and is
/// never retried automatically.
#[derive(Debug)]
pub struct Exporter<R, D, N> {
    rasterizer: R,
    downloads: D,
    notifier: N,
    trace: Vec<ExportPhase>,
}

impl<R, D, N> Exporter<R, D, N>
where
    R: Rasterizer,
    D: DownloadTarget,
    N: Notifier,
{
    /// Exporter over the given collaborators.
    pub fn new(rasterizer: R, downloads: D, notifier: N) -> Self {
        Self {
            rasterizer,
            downloads,
            notifier,
            trace: vec![ExportPhase::Idle],
        }
    }

    /// Export `region` as [`EXPORT_FILE_NAME`].
    ///
    /// `has_background` is the caller's view of whether a background is loaded; without one the
    /// rasterizer is never invoked.
    #[tracing::instrument(skip_all, fields(has_background = has_background))]
    pub fn export(
        &mut self,
        region: &RenderedRegion,
        has_background: bool,
    ) -> Result<ExportedCover, ExportError> {
        self.check_background(has_background)?;
        self.trace.push(ExportPhase::Rasterizing);
        self.rasterize_and_deliver(region)
    }

    /// Export a region produced by `capture`, which runs only after the background check.
    ///
    /// A capture error fails the attempt as [`ExportError::RasterizationFailed`], with the same
    /// notice, log line and trace entry as a rasterizer error.
    #[tracing::instrument(skip_all, fields(has_background = has_background))]
    pub fn export_with<F>(
        &mut self,
        has_background: bool,
        capture: F,
    ) -> Result<ExportedCover, ExportError>
    where
        F: FnOnce() -> CoverResult<RenderedRegion>,
    {
        self.check_background(has_background)?;
        self.trace.push(ExportPhase::Rasterizing);
        let region = match capture() {
            Ok(r) => r,
            Err(e) => return Err(self.fail(ExportError::RasterizationFailed(e))),
        };
        self.rasterize_and_deliver(&region)
    }

    fn check_background(&mut self, has_background: bool) -> Result<(), ExportError> {
        self.trace.clear();
        self.trace.push(ExportPhase::Idle);
        self.trace.push(ExportPhase::Checking);
        if !has_background {
            return Err(self.fail(ExportError::NoBackground));
        }
        Ok(())
    }

    fn rasterize_and_deliver(
        &mut self,
        region: &RenderedRegion,
    ) -> Result<ExportedCover, ExportError> {
        let opts = CaptureOptions::for_region(region);
        let encoded = self
            .rasterizer
            .rasterize(region, &opts)
            .and_then(|raster| encode_png(&raster).map(|png| (raster.width, raster.height, png)));
        let (width, height, png) = match encoded {
            Ok(v) => v,
            Err(e) => return Err(self.fail(ExportError::RasterizationFailed(e))),
        };
        self.trace.push(ExportPhase::Succeeded);

        self.trace.push(ExportPhase::Downloading);
        let saved_to = match self.downloads.deliver(EXPORT_FILE_NAME, &png) {
            Ok(p) => p,
            Err(e) => return Err(self.fail(ExportError::DownloadFailed(e))),
        };

        self.notifier.notify(Notice::CoverDownloaded);
        self.trace.push(ExportPhase::Notified);
        tracing::debug!(width, height, bytes = png.len(), "export complete");
        Ok(ExportedCover {
            png,
            width,
            height,
            saved_to,
        })
    }

    fn fail(&mut self, err: ExportError) -> ExportError {
        match &err {
            ExportError::NoBackground => tracing::debug!("export requested without background"),
            other => tracing::error!(error = %other, "cover export failed"),
        }
        self.notifier.notify(err.notice());
        self.trace.push(ExportPhase::Failed(err.kind()));
        err
    }
}

impl<R, D, N> Exporter<R, D, N> {
    /// Phases visited by the most recent attempt, starting at `Idle`.
    pub fn last_trace(&self) -> &[ExportPhase] {
        &self.trace
    }

    /// Phase the most recent attempt ended in.
    pub fn phase(&self) -> ExportPhase {
        self.trace.last().copied().unwrap_or(ExportPhase::Idle)
    }

    /// Rasterizer collaborator.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Download collaborator.
    pub fn downloads(&self) -> &D {
        &self.downloads
    }

    /// Notification collaborator.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Split back into the collaborators.
    pub fn into_parts(self) -> (R, D, N) {
        (self.rasterizer, self.downloads, self.notifier)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
