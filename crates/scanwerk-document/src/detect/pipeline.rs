// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection orchestrator — edge map, strict quadrilateral search, relaxed
// fallback, corner resolution.

use image::{DynamicImage, GrayImage};
use scanwerk_core::error::Result;
use scanwerk_core::{Contour, DetectionConfig, DetectionResult, QuadCorners};
use tracing::{debug, info, instrument};

use super::contours::{VertexCounts, select_candidate, trace_contours};
use super::edges::build_edge_map;
use super::vertices::resolve;

/// Which search tier produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionPass {
    /// Exact four-vertex polygons.
    Strict,
    /// Four up to `relaxed_max_vertices` vertices.
    Relaxed,
}

/// Locates a document quadrilateral in a still image.
///
/// Stateless apart from its configuration: the same pixels always give the
/// same corners.
#[derive(Debug, Clone, Default)]
pub struct DetectionPipeline {
    config: DetectionConfig,
}

impl DetectionPipeline {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect the document corners in `image`.
    ///
    /// A miss is `Ok(None)`; only an unusable (empty) image is an error.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect(&self, image: &DynamicImage) -> Result<DetectionResult> {
        let edge_map = build_edge_map(image, &self.config)?;
        Ok(self.detect_in_edge_map(&edge_map))
    }

    /// Detect on a precomputed binary edge map.
    pub fn detect_in_edge_map(&self, edge_map: &GrayImage) -> DetectionResult {
        let contours = trace_contours(edge_map);
        debug!(contours = contours.len(), "Contours traced");
        self.detect_in_contours(&contours)
    }

    /// Detect among already traced contours.
    pub fn detect_in_contours(&self, contours: &[Contour]) -> DetectionResult {
        self.locate(contours).map(|(corners, _)| corners)
    }

    /// Run both search tiers and report which one succeeded.
    ///
    /// The strict tier accepts only exact quadrilaterals. If it finds no
    /// candidate, or its candidate does not resolve to four separated
    /// corners, the relaxed tier widens the accepted vertex counts and its
    /// candidate is resolved instead.
    pub fn locate(&self, contours: &[Contour]) -> Option<(QuadCorners, DetectionPass)> {
        let strict = select_candidate(contours, &VertexCounts::strict(), &self.config)
            .and_then(|c| resolve(&c, &self.config));
        if let Some(corners) = strict {
            info!(pass = ?DetectionPass::Strict, ?corners, "Document detected");
            return Some((corners, DetectionPass::Strict));
        }

        debug!("Strict pass found nothing usable; retrying with relaxed vertex counts");
        let relaxed_counts = VertexCounts::relaxed(self.config.relaxed_max_vertices);
        let relaxed = select_candidate(contours, &relaxed_counts, &self.config)
            .and_then(|c| resolve(&c, &self.config));
        match relaxed {
            Some(corners) => {
                info!(pass = ?DetectionPass::Relaxed, ?corners, "Document detected");
                Some((corners, DetectionPass::Relaxed))
            }
            None => {
                info!("No document outline found");
                None
            }
        }
    }
}
