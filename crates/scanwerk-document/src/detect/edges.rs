// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge map construction — luma conversion, Gaussian smoothing, and Canny
// hysteresis thresholding.

use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use scanwerk_core::DetectionConfig;
use scanwerk_core::error::{Result, ScanwerkError};
use tracing::{debug, instrument};

/// Build a binary edge map (255 = edge, 0 = background) at the source
/// resolution.
///
/// ## Pipeline
///
/// 1. Convert to single-channel luma
/// 2. Gaussian blur with sigma derived from the configured kernel size
///    (2.0 for the default 11x11 kernel)
/// 3. Canny edge detection with the configured hysteresis thresholds
///    (75 / 200 by default)
///
/// The configuration is validated first; settings Canny cannot run with are
/// a `Config` error.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn build_edge_map(image: &DynamicImage, config: &DetectionConfig) -> Result<GrayImage> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(ScanwerkError::EmptyImage { width, height });
    }
    config.validate()?;

    let gray = image.to_luma8();
    let sigma = config.blur_sigma();
    let blurred = gaussian_blur_f32(&gray, sigma);
    let edges = canny(&blurred, config.canny_low, config.canny_high);

    debug!(
        sigma,
        low = config.canny_low,
        high = config.canny_high,
        edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count(),
        "Edge map built"
    );
    Ok(edges)
}
