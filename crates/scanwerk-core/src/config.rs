// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanner configuration: detection tuning, rectification geometry, preview
// rendering, and export layout. Persisted as pretty-printed JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, ScanwerkError};
use crate::PaperSize;

/// How the two x-sorted vertex groups are mapped to left/right corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CornerLabeling {
    /// Lower-x group becomes the left side (tl/bl).
    Visual,
    /// Lower-x group becomes the right side (tr/br), as the first mobile
    /// release labelled them.
    Legacy,
}

/// Formula used for the left edge height when sizing the rectified output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightFormula {
    /// `hypot(tl.x - bl.x, tr.y - bl.y)`: mixes the top-right y into the
    /// left edge. Kept until the corrected sizing is signed off.
    Legacy,
    /// `hypot(tl.x - bl.x, tl.y - bl.y)`.
    Corrected,
}

/// Tuning for edge detection, contour search, and corner resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Gaussian kernel size (odd). Sigma is derived from it.
    pub blur_kernel_size: u32,
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Simplification tolerance as a fraction of the contour perimeter.
    pub epsilon_ratio: f64,
    /// Vertices closer than this (pixels) are merged.
    pub dedup_distance: f64,
    /// Upper bound of the relaxed vertex-count filter (`4..=max`).
    pub relaxed_max_vertices: usize,
    pub corner_labeling: CornerLabeling,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 11,
            canny_low: 75.0,
            canny_high: 200.0,
            epsilon_ratio: 0.10,
            dedup_distance: 100.0,
            relaxed_max_vertices: 16,
            corner_labeling: CornerLabeling::Visual,
        }
    }
}

impl DetectionConfig {
    /// Gaussian sigma for the configured kernel size, using the usual
    /// `0.3 * ((k - 1) * 0.5 - 1) + 0.8` rule (2.0 for an 11x11 kernel).
    pub fn blur_sigma(&self) -> f32 {
        let k = self.blur_kernel_size as f32;
        0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(ScanwerkError::Config(format!(
                "blur kernel size must be odd and positive, got {}",
                self.blur_kernel_size
            )));
        }
        if !(self.canny_low >= 0.0 && self.canny_low <= self.canny_high) {
            return Err(ScanwerkError::Config(format!(
                "canny thresholds out of order: low {} high {}",
                self.canny_low, self.canny_high
            )));
        }
        if !(self.epsilon_ratio > 0.0) {
            return Err(ScanwerkError::Config(format!(
                "epsilon ratio must be positive, got {}",
                self.epsilon_ratio
            )));
        }
        if !(self.dedup_distance >= 0.0) {
            return Err(ScanwerkError::Config(format!(
                "dedup distance must be non-negative, got {}",
                self.dedup_distance
            )));
        }
        if self.relaxed_max_vertices < 4 {
            return Err(ScanwerkError::Config(format!(
                "relaxed vertex bound must be at least 4, got {}",
                self.relaxed_max_vertices
            )));
        }
        Ok(())
    }
}

/// Geometry options for perspective rectification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyConfig {
    pub height_formula: HeightFormula,
    /// RGBA fill for output pixels that map outside the source image.
    pub border_fill: [u8; 4],
}

impl Default for RectifyConfig {
    fn default() -> Self {
        Self {
            height_formula: HeightFormula::Legacy,
            border_fill: [0, 0, 0, 255],
        }
    }
}

/// Preview overlay options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Draw every traced contour under the detected outline.
    pub debug_overlay: bool,
    /// Outline stroke width in pixels.
    pub line_width: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debug_overlay: false,
            line_width: 10,
        }
    }
}

impl PreviewConfig {
    /// Widest outline stroke the renderer will draw.
    pub const MAX_LINE_WIDTH: u32 = 64;

    pub fn validate(&self) -> Result<()> {
        if self.line_width == 0 || self.line_width > Self::MAX_LINE_WIDTH {
            return Err(ScanwerkError::Config(format!(
                "preview line width must be 1..={}, got {}",
                Self::MAX_LINE_WIDTH,
                self.line_width
            )));
        }
        Ok(())
    }
}

/// Multi-page PDF export options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub paper_size: PaperSize,
    /// JPEG quality (1-100) for rectified page images.
    pub jpeg_quality: u8,
    /// Title embedded in the PDF metadata.
    pub title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            jpeg_quality: 92,
            title: "Scanwerk Document".into(),
        }
    }
}

/// Persistent scanner settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub detection: DetectionConfig,
    pub rectify: RectifyConfig,
    pub preview: PreviewConfig,
    pub export: ExportConfig,
}

impl ScanConfig {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        debug!(path = %path.as_ref().display(), "Scan config loaded");
        Ok(config)
    }

    /// Check every section the pipeline runs with.
    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        self.preview.validate()
    }

    /// Write settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        info!(path = %path.as_ref().display(), "Scan config saved");
        Ok(())
    }
}
