// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan session — the ordered collection of captured photos, each with its
// detection result and preview, plus export of the rectified pages to PDF.

use std::path::Path;

use chrono::{DateTime, Utc};
use image::DynamicImage;
use scanwerk_bridge::{NativeCamera, NativeFilePicker, NativeShare};
use scanwerk_core::error::Result;
use scanwerk_core::{DetectionResult, PhotoId, RectifyConfig, ScanConfig, ScanwerkError};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use crate::detect::DetectionPipeline;
use crate::image::{decode, encode_jpeg, encode_png};
use crate::pdf::PdfWriter;
use crate::scan::{render_preview, rectify};

/// MIME types offered when importing from storage.
const IMPORT_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/heic", "image/tiff"];

/// A single captured photo and everything derived from it at capture time.
///
/// The rectified page is not stored; it is recomputed from `source` and
/// `detection` whenever it is needed.
#[derive(Debug, Clone)]
pub struct DocumentPhoto {
    id: PhotoId,
    captured_at: DateTime<Utc>,
    source: Vec<u8>,
    content_hash: String,
    width: u32,
    height: u32,
    detection: DetectionResult,
    preview_png: Vec<u8>,
}

impl DocumentPhoto {
    /// Decode, detect and render the preview for one photo.
    #[instrument(skip_all, fields(bytes = source.len()))]
    pub fn process(
        source: Vec<u8>,
        pipeline: &DetectionPipeline,
        config: &ScanConfig,
    ) -> Result<Self> {
        let image = decode(&source)?;
        let detection = pipeline.detect(&image)?;
        let preview = render_preview(
            &image,
            detection.as_ref(),
            config.preview.debug_overlay,
            config,
        )?;
        let preview_png = encode_png(&preview)?;

        Ok(Self {
            id: PhotoId::new(),
            captured_at: Utc::now(),
            content_hash: content_hash(&source),
            width: image.width(),
            height: image.height(),
            detection,
            preview_png,
            source,
        })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn id(&self) -> PhotoId {
        self.id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Encoded bytes exactly as received from the camera or picker.
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Lowercase hex SHA-256 of the source bytes.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn detection(&self) -> DetectionResult {
        self.detection
    }

    /// PNG-encoded preview with the detected outline drawn on it.
    pub fn preview_png(&self) -> &[u8] {
        &self.preview_png
    }

    /// Rectified page for this photo, or the original pixels when nothing
    /// was detected.
    pub fn rectified(&self, config: &RectifyConfig) -> Result<DynamicImage> {
        let image = decode(&self.source)?;
        Ok(rectify(&image, self.detection.as_ref(), config))
    }
}

fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Captured photos, most recent first.
#[derive(Debug, Default)]
pub struct ScanSession {
    config: ScanConfig,
    pipeline: DetectionPipeline,
    photos: Vec<DocumentPhoto>,
}

impl ScanSession {
    pub fn new(config: ScanConfig) -> Self {
        let pipeline = DetectionPipeline::new(config.detection.clone());
        Self {
            config,
            pipeline,
            photos: Vec::new(),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    // -- Acquisition ----------------------------------------------------------

    /// Process encoded photo bytes and add the result to the front of the
    /// collection. Decoding failures propagate and leave the session unchanged.
    pub fn capture_bytes(&mut self, bytes: Vec<u8>) -> Result<&DocumentPhoto> {
        let photo = DocumentPhoto::process(bytes, &self.pipeline, &self.config)?;
        Ok(self.insert(photo))
    }

    /// Take a photo with the device camera. A cancelled capture is `Ok(None)`.
    pub fn capture(&mut self, camera: &dyn NativeCamera) -> Result<Option<&DocumentPhoto>> {
        match camera.capture_image()? {
            Some(bytes) => self.capture_bytes(bytes).map(Some),
            None => {
                debug!("Camera capture cancelled");
                Ok(None)
            }
        }
    }

    /// Import a photo from storage. A cancelled pick is `Ok(None)`.
    pub fn import(&mut self, picker: &dyn NativeFilePicker) -> Result<Option<&DocumentPhoto>> {
        let Some(path) = picker.pick_file(IMPORT_MIME_TYPES)? else {
            debug!("Import cancelled");
            return Ok(None);
        };
        let bytes = picker.read_picked_file(&path)?;
        self.capture_bytes(bytes).map(Some)
    }

    /// Like [`capture_bytes`](Self::capture_bytes), with decoding and
    /// detection run on the blocking thread pool.
    pub async fn capture_async(&mut self, bytes: Vec<u8>) -> Result<&DocumentPhoto> {
        let pipeline = self.pipeline.clone();
        let config = self.config.clone();
        let photo = tokio::task::spawn_blocking(move || {
            DocumentPhoto::process(bytes, &pipeline, &config)
        })
        .await
        .map_err(|err| ScanwerkError::ImageError(format!("capture task failed: {}", err)))??;
        Ok(self.insert(photo))
    }

    fn insert(&mut self, photo: DocumentPhoto) -> &DocumentPhoto {
        info!(
            id = %photo.id,
            hash = %photo.content_hash,
            detected = photo.detection.is_some(),
            "Photo added to session"
        );
        self.photos.insert(0, photo);
        &self.photos[0]
    }

    // -- Collection -----------------------------------------------------------

    pub fn photos(&self) -> &[DocumentPhoto] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn clear(&mut self) {
        self.photos.clear();
    }

    // -- Export ---------------------------------------------------------------

    /// Rectify every photo and encode each page as JPEG, in collection order.
    #[instrument(skip(self), fields(photos = self.photos.len()))]
    pub fn rectified_pages(&self) -> Result<Vec<Vec<u8>>> {
        self.photos
            .iter()
            .map(|photo| {
                let page = photo.rectified(&self.config.rectify)?;
                encode_jpeg(&page, self.config.export.jpeg_quality)
            })
            .collect()
    }

    /// Build a PDF with one rectified page per photo.
    ///
    /// An empty session yields `Ok(None)`: there is nothing to export.
    #[instrument(skip(self), fields(photos = self.photos.len()))]
    pub fn export_pdf(&self) -> Result<Option<Vec<u8>>> {
        if self.photos.is_empty() {
            info!("Nothing to export");
            return Ok(None);
        }

        let pages = self.rectified_pages()?;
        self.pdf_writer().create_from_images(&pages).map(Some)
    }

    /// Write the PDF to `path` and pass it to the share sheet.
    ///
    /// Returns `false` without touching the file system when the session is
    /// empty. The share sheet takes a UTF-8 path; any other path is a
    /// `Bridge` error and nothing is written.
    pub fn share_pdf(&self, share: &dyn NativeShare, path: impl AsRef<Path>) -> Result<bool> {
        if self.photos.is_empty() {
            info!("Nothing to share");
            return Ok(false);
        }
        let path = path.as_ref();
        let share_path = path.to_str().ok_or_else(|| {
            ScanwerkError::Bridge(format!(
                "share sheet needs a UTF-8 path, got {}",
                path.display()
            ))
        })?;

        let pages = self.rectified_pages()?;
        self.pdf_writer().write_to_file(&pages, path)?;
        share.share_file(share_path, "application/pdf")?;
        info!(path = share_path, "PDF shared");
        Ok(true)
    }

    fn pdf_writer(&self) -> PdfWriter {
        let mut writer = PdfWriter::new(self.config.export.paper_size);
        writer.set_title(self.config.export.title.clone());
        writer
    }
}
