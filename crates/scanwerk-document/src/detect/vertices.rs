// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vertex resolution — turn a candidate contour into four labelled corners.

use scanwerk_core::{Contour, CornerLabeling, DetectionConfig, Point, QuadCorners};
use tracing::{debug, instrument};

use super::contours::approximate;

/// Resolve a contour into labelled corners.
///
/// The contour is simplified again (the caller only holds the raw contour),
/// near-coincident vertices are removed, and the survivors are split into a
/// left and a right side by x-rank. Returns `None` when fewer than four
/// vertices survive deduplication.
#[instrument(skip_all, fields(points = contour.len()))]
pub fn resolve(contour: &Contour, config: &DetectionConfig) -> Option<QuadCorners> {
    let polygon = approximate(contour, config.epsilon_ratio);
    let simplified = polygon.vertex_count();
    let vertices = dedup_vertices(polygon.vertices, config.dedup_distance);

    debug!(simplified, remaining = vertices.len(), "Vertices deduplicated");
    if vertices.len() < 4 {
        return None;
    }
    Some(label_corners(&vertices, config.corner_labeling))
}

/// Remove vertices that lie closer than `min_distance` to another remaining
/// vertex.
///
/// Vertices are visited from the last index to the first; a visited vertex is
/// dropped as soon as any other vertex still in the list is too close. The
/// visiting order decides which member of a close pair survives.
pub fn dedup_vertices(mut vertices: Vec<Point>, min_distance: f64) -> Vec<Point> {
    for i in (0..vertices.len()).rev() {
        let current = vertices[i];
        let crowded = vertices
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && current.distance(other) < min_distance);
        if crowded {
            vertices.remove(i);
        }
    }
    vertices
}

/// Label corners from at least four well-separated vertices.
///
/// Vertices are ranked by x; the lower half of the ranking forms one side
/// and the rest the other. Each side is ordered by y, and its first and last
/// entries become the top and bottom corners of that side.
pub fn label_corners(vertices: &[Point], labeling: CornerLabeling) -> QuadCorners {
    let mut by_x = vertices.to_vec();
    by_x.sort_by(|a, b| a.x.total_cmp(&b.x));

    let half = by_x.len() / 2;
    let mut low_x = by_x[..half].to_vec();
    let mut high_x = by_x[half..].to_vec();
    low_x.sort_by(|a, b| a.y.total_cmp(&b.y));
    high_x.sort_by(|a, b| a.y.total_cmp(&b.y));

    let (left, right) = match labeling {
        CornerLabeling::Visual => (low_x, high_x),
        CornerLabeling::Legacy => (high_x, low_x),
    };

    QuadCorners {
        tl: left[0],
        bl: left[left.len() - 1],
        tr: right[0],
        br: right[right.len() - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn page_corners() -> Vec<Point> {
        pts(&[(50.0, 50.0), (450.0, 50.0), (450.0, 350.0), (50.0, 350.0)])
    }

    #[test]
    fn separated_vertices_are_untouched() {
        let v = page_corners();
        assert_eq!(dedup_vertices(v.clone(), 100.0), v);
    }

    #[test]
    fn later_member_of_close_pair_is_dropped() {
        let v = pts(&[(0.0, 0.0), (500.0, 0.0), (530.0, 20.0), (500.0, 500.0), (0.0, 500.0)]);
        let out = dedup_vertices(v, 100.0);
        assert_eq!(
            out,
            pts(&[(0.0, 0.0), (500.0, 0.0), (500.0, 500.0), (0.0, 500.0)])
        );
    }

    #[test]
    fn reverse_scan_order_decides_survivor_in_a_chain() {
        // A(0) - B(60) - C(120) on a line: A-B and B-C are close, A-C is not.
        // Scanning from the back removes C (close to B), then B (close to A),
        // leaving only A, although keeping A and C would also have satisfied
        // the distance rule.
        let v = pts(&[(0.0, 0.0), (60.0, 0.0), (120.0, 0.0)]);
        assert_eq!(dedup_vertices(v, 100.0), pts(&[(0.0, 0.0)]));
    }

    #[test]
    fn distance_exactly_at_threshold_is_kept() {
        let v = pts(&[(0.0, 0.0), (100.0, 0.0)]);
        assert_eq!(dedup_vertices(v.clone(), 100.0), v);
    }

    #[test]
    fn visual_labeling_matches_page_orientation() {
        let q = label_corners(&page_corners(), CornerLabeling::Visual);
        assert_eq!(q.tl, Point::new(50.0, 50.0));
        assert_eq!(q.tr, Point::new(450.0, 50.0));
        assert_eq!(q.bl, Point::new(50.0, 350.0));
        assert_eq!(q.br, Point::new(450.0, 350.0));
    }

    #[test]
    fn legacy_labeling_swaps_sides() {
        let q = label_corners(&page_corners(), CornerLabeling::Legacy);
        assert_eq!(q.tl, Point::new(450.0, 50.0));
        assert_eq!(q.tr, Point::new(50.0, 50.0));
        assert_eq!(q.bl, Point::new(450.0, 350.0));
        assert_eq!(q.br, Point::new(50.0, 350.0));
    }

    #[test]
    fn odd_vertex_count_puts_extra_vertex_on_high_x_side() {
        let v = pts(&[
            (0.0, 0.0),
            (0.0, 400.0),
            (300.0, 0.0),
            (320.0, 200.0),
            (300.0, 400.0),
        ]);
        let q = label_corners(&v, CornerLabeling::Visual);
        assert_eq!(q.tl, Point::new(0.0, 0.0));
        assert_eq!(q.bl, Point::new(0.0, 400.0));
        assert_eq!(q.tr, Point::new(300.0, 0.0));
        assert_eq!(q.br, Point::new(300.0, 400.0));
    }

    #[test]
    fn tiny_quadrilateral_does_not_resolve() {
        let contour = Contour::new(pts(&[(0.0, 0.0), (60.0, 0.0), (60.0, 60.0), (0.0, 60.0)]));
        assert!(resolve(&contour, &DetectionConfig::default()).is_none());
    }

    #[test]
    fn resolved_corners_respect_min_separation() {
        let contour = Contour::new(pts(&[
            (10.0, 12.0),
            (610.0, 30.0),
            (590.0, 820.0),
            (25.0, 790.0),
        ]));
        let cfg = DetectionConfig::default();
        let q = resolve(&contour, &cfg).expect("large quad resolves");
        assert!(q.min_separation() >= cfg.dedup_distance);
        assert_eq!(q.tl, Point::new(10.0, 12.0));
        assert_eq!(q.tr, Point::new(610.0, 30.0));
        assert_eq!(q.bl, Point::new(25.0, 790.0));
        assert_eq!(q.br, Point::new(590.0, 820.0));
    }
}
