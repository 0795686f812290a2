// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview rendering — highlight the detected quadrilateral on a copy of the
// captured image, optionally with every traced contour underneath.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use scanwerk_core::error::Result;
use scanwerk_core::{Point, PreviewConfig, QuadCorners, ScanConfig};
use tracing::{debug, instrument};

use crate::detect::{build_edge_map, trace_contours};

const QUAD_COLOUR: Rgba<u8> = Rgba([0, 0, 255, 255]);
const CONTOUR_COLOUR: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Render a preview of `image` with the detected outline drawn on top.
///
/// The input is never modified. With `debug_overlay` the edge map is
/// rebuilt from `config.detection` and every traced contour is outlined in
/// green first. The quadrilateral, when present, is drawn in blue as
/// tl-tr, tr-br, br-bl, bl-tl with a stroke of `config.preview.line_width`,
/// clamped to `1..=PreviewConfig::MAX_LINE_WIDTH`.
#[instrument(skip_all, fields(width = image.width(), height = image.height(), detected = corners.is_some(), debug_overlay = debug_overlay))]
pub fn render_preview(
    image: &DynamicImage,
    corners: Option<&QuadCorners>,
    debug_overlay: bool,
    config: &ScanConfig,
) -> Result<DynamicImage> {
    if corners.is_none() && !debug_overlay {
        return Ok(image.clone());
    }

    let mut canvas = image.to_rgba8();

    if debug_overlay {
        let edge_map = build_edge_map(image, &config.detection)?;
        let contours = trace_contours(&edge_map);
        debug!(contours = contours.len(), "Drawing contour overlay");
        for contour in &contours {
            draw_closed(&mut canvas, &contour.points, 1, CONTOUR_COLOUR);
        }
    }

    if let Some(corners) = corners {
        draw_closed(
            &mut canvas,
            &corners.outline(),
            config.preview.line_width,
            QUAD_COLOUR,
        );
    }

    Ok(DynamicImage::ImageRgba8(canvas))
}

fn draw_closed(canvas: &mut RgbaImage, points: &[Point], width: u32, colour: Rgba<u8>) {
    if points.is_empty() {
        return;
    }
    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        draw_thick_segment(canvas, *start, end, width, colour);
    }
}

/// Draw a segment `width` pixels wide as parallel one-pixel strokes offset
/// along the segment normal.
fn draw_thick_segment(canvas: &mut RgbaImage, a: Point, b: Point, width: u32, colour: Rgba<u8>) {
    let (a, b) = (a.to_f32(), b.to_f32());
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = dx.hypot(dy);
    let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };

    let width = width.clamp(1, PreviewConfig::MAX_LINE_WIDTH) as f32;
    let half = (width - 1.0) / 2.0;
    let mut offset = -half;
    while offset <= half {
        let (ox, oy) = (nx * offset, ny * offset);
        draw_line_segment_mut(canvas, (a.0 + ox, a.1 + oy), (b.0 + ox, b.1 + oy), colour);
        offset += 0.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn grey_frame() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 200, Rgb([128, 128, 128])))
    }

    fn square() -> QuadCorners {
        QuadCorners::new(
            Point::new(40.0, 40.0),
            Point::new(160.0, 40.0),
            Point::new(40.0, 160.0),
            Point::new(160.0, 160.0),
        )
    }

    #[test]
    fn nothing_to_draw_returns_copy() {
        let img = grey_frame();
        let out = render_preview(&img, None, false, &ScanConfig::default()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn quadrilateral_is_outlined_in_blue() {
        let img = grey_frame();
        let out = render_preview(&img, Some(&square()), false, &ScanConfig::default())
            .unwrap()
            .to_rgba8();

        // On each edge.
        for (x, y) in [(100, 40), (160, 100), (100, 160), (40, 100)] {
            assert_eq!(out.get_pixel(x, y), &QUAD_COLOUR, "edge pixel ({x},{y})");
        }
        // Stroke is thick: a few pixels off the top edge is still coloured.
        assert_eq!(out.get_pixel(100, 44), &QUAD_COLOUR);
        // Centre and far background untouched.
        assert_eq!(out.get_pixel(100, 100).0, [128, 128, 128, 255]);
        assert_eq!(out.get_pixel(5, 5).0, [128, 128, 128, 255]);
        // Input is not modified.
        assert_eq!(img.to_rgba8().get_pixel(100, 40).0, [128, 128, 128, 255]);
    }

    #[test]
    fn line_width_is_configurable() {
        let mut config = ScanConfig::default();
        config.preview.line_width = 1;
        let out = render_preview(&grey_frame(), Some(&square()), false, &config)
            .unwrap()
            .to_rgba8();
        assert_eq!(out.get_pixel(100, 40), &QUAD_COLOUR);
        assert_eq!(out.get_pixel(100, 44).0, [128, 128, 128, 255]);
    }

    #[test]
    fn oversized_line_width_is_clamped() {
        let mut wide = ScanConfig::default();
        wide.preview.line_width = u32::MAX;
        let mut capped = ScanConfig::default();
        capped.preview.line_width = PreviewConfig::MAX_LINE_WIDTH;

        let img = grey_frame();
        let out = render_preview(&img, Some(&square()), false, &wide).unwrap();
        let expected = render_preview(&img, Some(&square()), false, &capped).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn debug_overlay_draws_contours_in_green() {
        let mut img = RgbImage::from_pixel(200, 200, Rgb([0, 0, 0]));
        for y in 50..150 {
            for x in 50..150 {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let out = render_preview(
            &DynamicImage::ImageRgb8(img),
            None,
            true,
            &ScanConfig::default(),
        )
        .unwrap()
        .to_rgba8();

        let green = out.pixels().filter(|p| **p == CONTOUR_COLOUR).count();
        assert!(green > 100, "expected a green contour outline, got {green} pixels");
        assert!(!out.pixels().any(|p| *p == QUAD_COLOUR));
    }

    #[test]
    fn debug_overlay_on_empty_image_is_an_error() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(render_preview(&img, None, true, &ScanConfig::default()).is_err());
    }
}
