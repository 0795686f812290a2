// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image codec — turn captured bytes into pixels and pixels back into PNG
// previews or JPEG pages.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use scanwerk_core::ScanwerkError;
use scanwerk_core::error::Result;
use tracing::{debug, instrument};

// -- Decoding -----------------------------------------------------------------

/// Decode an encoded photo (JPEG, PNG, TIFF, ...) into pixels.
///
/// A decodable but zero-sized image is rejected with `EmptyImage`.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode(data: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(data)
        .map_err(|err| ScanwerkError::ImageError(format!("failed to decode photo: {}", err)))?;
    ensure_not_empty(&img)?;
    debug!(width = img.width(), height = img.height(), "Photo decoded");
    Ok(img)
}

/// Decode a photo from a file on disk.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let img = image::open(path.as_ref()).map_err(|err| {
        ScanwerkError::ImageError(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    ensure_not_empty(&img)?;
    Ok(img)
}

fn ensure_not_empty(img: &DynamicImage) -> Result<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ScanwerkError::EmptyImage {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(())
}

// -- Encoding -----------------------------------------------------------------

/// Encode as PNG (lossless; used for previews).
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|err| ScanwerkError::ImageError(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Encode as baseline JPEG at `quality` (1-100), dropping any alpha channel.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    image
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|err| ScanwerkError::ImageError(format!("JPEG encoding failed: {}", err)))?;
    Ok(buffer)
}
