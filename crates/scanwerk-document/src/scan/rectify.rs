// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — warp the detected document quadrilateral into
// an upright rectangle.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use scanwerk_core::{HeightFormula, QuadCorners, RectifyConfig};
use tracing::{debug, info, instrument, warn};

use crate::geometry::polygon_area;

/// Output size for a rectified document, as `(width, height)` in pixels.
///
/// Width is the longer of the top and bottom edges, height the longer of
/// the right edge and the left-edge estimate selected by `formula`. Both are
/// truncated to whole pixels.
pub fn output_size(corners: &QuadCorners, formula: HeightFormula) -> (u32, u32) {
    let (w, h) = output_extent(corners, formula);
    (w as u32, h as u32)
}

fn output_extent(corners: &QuadCorners, formula: HeightFormula) -> (f64, f64) {
    let QuadCorners { tl, tr, bl, br } = *corners;

    let width_bottom = br.distance(&bl);
    let width_top = tr.distance(&tl);
    let width = width_bottom.max(width_top);

    let height_right = tr.distance(&br);
    let height_left = match formula {
        HeightFormula::Legacy => (tl.x - bl.x).hypot(tr.y - bl.y),
        HeightFormula::Corrected => tl.distance(&bl),
    };
    let height = height_right.max(height_left);

    (width, height)
}

/// Rectify `image` using the detected corners.
///
/// Without corners the image passes through unchanged. With corners, the
/// quadrilateral tl, tr, br, bl is mapped onto the rectangle
/// (0,0), (w-1,0), (w-1,h-1), (0,h-1) by the homography through those four
/// correspondences, and sampled with bilinear interpolation; pixels that
/// fall outside the source are filled with `config.border_fill`.
///
/// Degenerate corners (zero area, zero-sized output, or a singular
/// transform) also pass the image through unchanged.
#[instrument(skip_all, fields(width = image.width(), height = image.height(), detected = corners.is_some()))]
pub fn rectify(
    image: &DynamicImage,
    corners: Option<&QuadCorners>,
    config: &RectifyConfig,
) -> DynamicImage {
    let Some(corners) = corners else {
        debug!("No corners; passing image through");
        return image.clone();
    };

    if polygon_area(&corners.outline()) < 1.0 {
        warn!(?corners, "Corners enclose no area; returning unchanged");
        return image.clone();
    }

    let (width, height) = output_extent(corners, config.height_formula);
    let (out_w, out_h) = (width as u32, height as u32);
    if out_w == 0 || out_h == 0 {
        warn!(out_w, out_h, "Rectified size is empty; returning unchanged");
        return image.clone();
    }

    let src = corners.outline().map(|p| p.to_f32());
    let (w, h) = (width as f32, height as f32);
    let dest: [(f32, f32); 4] = [
        (0.0, 0.0),
        (w - 1.0, 0.0),
        (w - 1.0, h - 1.0),
        (0.0, h - 1.0),
    ];

    let projection = match Projection::from_control_points(src, dest) {
        Some(p) => p,
        None => {
            warn!("Failed to compute projective transform; returning unchanged");
            return image.clone();
        }
    };

    let rgba_input = image.to_rgba8();
    let mut output = RgbaImage::new(out_w, out_h);
    warp_into(
        &rgba_input,
        &projection,
        Interpolation::Bilinear,
        Rgba(config.border_fill),
        &mut output,
    );

    info!(out_w, out_h, "Perspective rectification applied");
    DynamicImage::ImageRgba8(output)
}
