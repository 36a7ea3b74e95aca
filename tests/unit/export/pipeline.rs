use super::*;
use crate::composition::document::RenderSettings;
use crate::composition::params::CompositionParameters;
use crate::export::download::MemoryDownloads;
use crate::foundation::error::CoverResult;
use crate::render::raster::RasterImage;

#[derive(Default)]
struct SolidRasterizer {
    calls: usize,
    seen: Vec<CaptureOptions>,
}

impl Rasterizer for SolidRasterizer {
    fn rasterize(
        &mut self,
        _region: &RenderedRegion,
        opts: &CaptureOptions,
    ) -> CoverResult<RasterImage> {
        self.calls += 1;
        self.seen.push(*opts);
        Ok(RasterImage {
            width: 2,
            height: 2,
            data: vec![255; 16],
        })
    }
}

struct BrokenRasterizer;

impl Rasterizer for BrokenRasterizer {
    fn rasterize(
        &mut self,
        _region: &RenderedRegion,
        _opts: &CaptureOptions,
    ) -> CoverResult<RasterImage> {
        Err(CoverError::render("canvas exploded"))
    }
}

struct ReadOnlyDownloads;

impl DownloadTarget for ReadOnlyDownloads {
    fn deliver(&mut self, _file_name: &str, _payload: &PngPayload) -> CoverResult<PathBuf> {
        Err(CoverError::Other(anyhow::anyhow!("disk is read-only")))
    }
}

fn region() -> RenderedRegion {
    RenderedRegion::capture(
        &CompositionParameters::default(),
        None,
        &RenderSettings {
            size_px: 16,
            scale: 3.0,
        },
    )
    .unwrap()
}

#[test]
fn no_background_short_circuits_before_rasterizing() {
    let mut exporter = Exporter::new(
        SolidRasterizer::default(),
        MemoryDownloads::default(),
        Vec::new(),
    );
    let err = exporter.export(&region(), false).unwrap_err();

    assert!(matches!(err, ExportError::NoBackground));
    assert_eq!(exporter.rasterizer().calls, 0);
    assert!(exporter.downloads().delivered.is_empty());
    assert_eq!(exporter.notifier(), &vec![Notice::UploadFirst]);
    assert_eq!(
        exporter.last_trace(),
        &[
            ExportPhase::Idle,
            ExportPhase::Checking,
            ExportPhase::Failed(ExportFailure::NoBackground)
        ]
    );
}

#[test]
fn success_delivers_once_under_fixed_name() {
    let mut exporter = Exporter::new(
        SolidRasterizer::default(),
        MemoryDownloads::default(),
        Vec::new(),
    );
    let cover = exporter.export(&region(), true).unwrap();

    assert_eq!((cover.width, cover.height), (2, 2));
    assert_eq!(cover.saved_to, PathBuf::from(EXPORT_FILE_NAME));
    let delivered = &exporter.downloads().delivered;
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, "playlist-cover.png");
    assert_eq!(delivered[0].1, cover.png);
    assert_eq!(exporter.notifier(), &vec![Notice::CoverDownloaded]);
    assert_eq!(exporter.phase(), ExportPhase::Notified);
    assert_eq!(
        exporter.last_trace(),
        &[
            ExportPhase::Idle,
            ExportPhase::Checking,
            ExportPhase::Rasterizing,
            ExportPhase::Succeeded,
            ExportPhase::Downloading,
            ExportPhase::Notified
        ]
    );
}

#[test]
fn rasterizer_receives_fixed_capture_options() {
    let mut exporter = Exporter::new(
        SolidRasterizer::default(),
        MemoryDownloads::default(),
        Vec::new(),
    );
    exporter.export(&region(), true).unwrap();

    let seen = &exporter.rasterizer().seen;
    assert_eq!(seen.len(), 1);
    assert!(seen[0].use_cors && seen[0].allow_taint);
    assert_eq!(seen[0].background_color, None);
    assert_eq!(seen[0].scale, 3.0);
}

#[test]
fn rasterization_failure_downloads_nothing() {
    let mut exporter = Exporter::new(BrokenRasterizer, MemoryDownloads::default(), Vec::new());
    let err = exporter.export(&region(), true).unwrap_err();

    assert!(matches!(err, ExportError::RasterizationFailed(_)));
    assert!(exporter.downloads().delivered.is_empty());
    assert_eq!(exporter.notifier(), &vec![Notice::DownloadError]);
    assert_eq!(exporter.phase(), ExportPhase::Failed(ExportFailure::RasterizationFailed));
    assert!(!exporter.last_trace().contains(&ExportPhase::Succeeded));
}

#[test]
fn delivery_failure_is_classified_separately() {
    let mut exporter = Exporter::new(SolidRasterizer::default(), ReadOnlyDownloads, Vec::new());
    let err = exporter.export(&region(), true).unwrap_err();

    assert!(matches!(err, ExportError::DownloadFailed(_)));
    assert_eq!(err.notice(), Notice::DownloadError);
    assert_eq!(
        exporter.last_trace(),
        &[
            ExportPhase::Idle,
            ExportPhase::Checking,
            ExportPhase::Rasterizing,
            ExportPhase::Succeeded,
            ExportPhase::Downloading,
            ExportPhase::Failed(ExportFailure::DownloadFailed)
        ]
    );
}

#[test]
fn each_attempt_starts_a_fresh_trace() {
    let mut exporter = Exporter::new(
        SolidRasterizer::default(),
        MemoryDownloads::default(),
        Vec::new(),
    );
    let _ = exporter.export(&region(), false);
    exporter.export(&region(), true).unwrap();

    assert_eq!(exporter.last_trace().len(), 6);
    assert_eq!(exporter.rasterizer().calls, 1);
    assert_eq!(exporter.notifier(), &vec![Notice::UploadFirst, Notice::CoverDownloaded]);
}

#[test]
fn notice_messages() {
    assert_eq!(Notice::UploadFirst.message(), "Please upload an image first");
    assert_eq!(Notice::DownloadError.to_string(), "An error occurred during download");
    assert_eq!(Notice::CoverDownloaded.message(), "Cover downloaded!");
    assert!(!Notice::CoverDownloaded.is_error());
    assert!(Notice::UploadFirst.is_error());
}

#[test]
fn fresh_exporter_is_idle() {
    let exporter = Exporter::new(BrokenRasterizer, MemoryDownloads::default(), LogNotifier);
    assert_eq!(exporter.phase(), ExportPhase::Idle);
}

#[test]
fn export_with_skips_capture_without_background() {
    let mut exporter = Exporter::new(
        SolidRasterizer::default(),
        MemoryDownloads::default(),
        Vec::new(),
    );
    let mut captured = false;
    let err = exporter
        .export_with(false, || {
            captured = true;
            Ok(region())
        })
        .unwrap_err();

    assert!(matches!(err, ExportError::NoBackground));
    assert!(!captured);
    assert_eq!(exporter.notifier(), &vec![Notice::UploadFirst]);
}

#[test]
fn export_with_delivers_captured_region() {
    let mut exporter = Exporter::new(
        SolidRasterizer::default(),
        MemoryDownloads::default(),
        Vec::new(),
    );
    exporter.export_with(true, || Ok(region())).unwrap();
    assert_eq!(exporter.rasterizer().calls, 1);
    assert_eq!(exporter.phase(), ExportPhase::Notified);
}
