// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour search — trace every closed boundary in an edge map and pick the
// largest one whose simplified polygon has an accepted number of vertices.

use std::ops::RangeInclusive;

use image::GrayImage;
use imageproc::contours::find_contours;
use scanwerk_core::{Contour, DetectionConfig, Polygon};
use tracing::{debug, instrument};

use crate::geometry::{perimeter, polygon_area, simplify_closed};

/// The set of simplified-polygon vertex counts a candidate may have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexCounts(RangeInclusive<usize>);

impl VertexCounts {
    /// Exact quadrilaterals only.
    pub fn strict() -> Self {
        Self(4..=4)
    }

    /// Anything from four up to `max` vertices.
    pub fn relaxed(max: usize) -> Self {
        Self(4..=max.max(4))
    }

    pub fn contains(&self, count: usize) -> bool {
        self.0.contains(&count)
    }
}

/// Simplify a contour with a tolerance proportional to its perimeter.
pub fn approximate(contour: &Contour, epsilon_ratio: f64) -> Polygon {
    let epsilon = epsilon_ratio * perimeter(&contour.points);
    simplify_closed(&contour.points, epsilon)
}

/// Trace all closed contours in a binary image.
///
/// Outer borders and hole borders are both returned, in tracing order, with
/// no nesting information: every boundary is a candidate.
pub fn trace_contours(edge_map: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(edge_map)
        .into_iter()
        .map(|c| Contour::new(c.points.into_iter().map(Into::into).collect()))
        .collect()
}

/// Trace the edge map and return the best document candidate, if any.
#[instrument(skip_all, fields(allowed = ?allowed))]
pub fn find_candidate(
    edge_map: &GrayImage,
    allowed: &VertexCounts,
    config: &DetectionConfig,
) -> Option<Contour> {
    let contours = trace_contours(edge_map);
    debug!(contours = contours.len(), "Contours traced");
    select_candidate(&contours, allowed, config)
}

/// Pick the contour whose simplified polygon has an accepted vertex count
/// and the largest area.
///
/// Candidates are collected as `(area, index)` pairs. On equal areas the
/// later contour replaces the earlier one, so the last-seen candidate of the
/// winning area is returned.
pub fn select_candidate(
    contours: &[Contour],
    allowed: &VertexCounts,
    config: &DetectionConfig,
) -> Option<Contour> {
    let mut candidates: Vec<(f64, usize)> = Vec::new();
    for (index, contour) in contours.iter().enumerate() {
        let polygon = approximate(contour, config.epsilon_ratio);
        if allowed.contains(polygon.vertex_count()) {
            candidates.push((polygon_area(&polygon.vertices), index));
        }
    }

    let mut best: Option<(f64, usize)> = None;
    for (area, index) in candidates.iter().copied() {
        match best {
            Some((best_area, _)) if area < best_area => {}
            _ => best = Some((area, index)),
        }
    }

    debug!(
        candidates = candidates.len(),
        best_area = best.map(|(a, _)| a),
        best_index = best.map(|(_, i)| i),
        "Candidate selection complete"
    );
    best.map(|(_, index)| contours[index].clone())
}
