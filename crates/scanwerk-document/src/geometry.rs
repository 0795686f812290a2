// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Planar geometry helpers for closed contours: perimeter, shoelace area, and
// Douglas-Peucker simplification of closed curves.

use scanwerk_core::{Point, Polygon};

/// Length of a closed curve, including the closing segment.
pub fn perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len();
    (0..n)
        .map(|i| points[i].distance(&points[(i + 1) % n]))
        .sum()
}

/// Unsigned area of a simple polygon via the shoelace formula. The
/// vertices may be in either winding order.
pub fn polygon_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += vertices[i].x * vertices[j].y;
        twice_area -= vertices[j].x * vertices[i].y;
    }
    twice_area.abs() / 2.0
}

/// Simplify a closed curve, dropping every point that lies within
/// `epsilon` of the simplified outline.
///
/// The curve is split at two mutually distant points so the result does not
/// depend on where the tracer happened to start; each half is then reduced
/// with the open Douglas-Peucker recursion. The output starts at the first
/// split point and, like the input, does not repeat it at the end.
pub fn simplify_closed(points: &[Point], epsilon: f64) -> Polygon {
    let n = points.len();
    if n < 3 {
        return Polygon::new(points.to_vec());
    }

    let a = farthest_from(points, 0);
    let b = farthest_from(points, a);
    if points[a].distance(&points[b]) == 0.0 {
        return Polygon::new(vec![points[a]]);
    }

    let forward = cyclic_chain(points, a, b);
    let backward = cyclic_chain(points, b, a);

    let mut vertices = simplify_open(&forward, epsilon);
    vertices.pop();
    let mut rest = simplify_open(&backward, epsilon);
    rest.pop();
    vertices.append(&mut rest);

    Polygon::new(vertices)
}

/// Open-curve Douglas-Peucker. Keeps both endpoints.
fn simplify_open(chain: &[Point], epsilon: f64) -> Vec<Point> {
    if chain.len() < 3 {
        return chain.to_vec();
    }
    let first = chain[0];
    let last = chain[chain.len() - 1];

    let mut max_dist = 0.0;
    let mut index = 0;
    for (i, p) in chain.iter().enumerate().take(chain.len() - 1).skip(1) {
        let d = perpendicular_distance(p, &first, &last);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if max_dist > epsilon {
        let mut left = simplify_open(&chain[..=index], epsilon);
        let right = simplify_open(&chain[index..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Distance from `p` to the infinite line through `a` and `b`; falls back
/// to the point distance when `a == b`.
fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return p.distance(a);
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}

/// Index of the point farthest from `points[origin]`. First one wins on ties.
fn farthest_from(points: &[Point], origin: usize) -> usize {
    let o = points[origin];
    let mut best = origin;
    let mut best_dist = 0.0;
    for (i, p) in points.iter().enumerate() {
        let d = o.distance(p);
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Points from index `from` to index `to` inclusive, wrapping around.
fn cyclic_chain(points: &[Point], from: usize, to: usize) -> Vec<Point> {
    let n = points.len();
    let mut chain = Vec::new();
    let mut i = from;
    loop {
        chain.push(points[i]);
        if i == to {
            break;
        }
        i = (i + 1) % n;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Densely sample the outline of a closed polygon, one point per pixel.
    fn densify(vertices: &[(f64, f64)]) -> Vec<Point> {
        let mut out = Vec::new();
        for i in 0..vertices.len() {
            let (x0, y0) = vertices[i];
            let (x1, y1) = vertices[(i + 1) % vertices.len()];
            let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1.0) as usize;
            for s in 0..steps {
                let t = s as f64 / steps as f64;
                out.push(Point::new(x0 + t * (x1 - x0), y0 + t * (y1 - y0)));
            }
        }
        out
    }

    #[test]
    fn rectangle_perimeter_and_area() {
        let rect = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]);
        assert!((perimeter(&rect) - 30.0).abs() < 1e-9);
        assert!((polygon_area(&rect) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn area_ignores_winding() {
        let mut rect = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]);
        rect.reverse();
        assert!((polygon_area(&rect) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_have_zero_measure() {
        assert_eq!(perimeter(&[]), 0.0);
        assert_eq!(perimeter(&pts(&[(3.0, 3.0)])), 0.0);
        assert_eq!(polygon_area(&pts(&[(0.0, 0.0), (5.0, 5.0)])), 0.0);
    }

    #[test]
    fn dense_rectangle_simplifies_to_its_corners() {
        let corners = [(20.0, 10.0), (220.0, 10.0), (220.0, 160.0), (20.0, 160.0)];
        let dense = densify(&corners);
        let eps = 0.1 * perimeter(&dense);

        let poly = simplify_closed(&dense, eps);
        assert_eq!(poly.vertex_count(), 4);
        for (cx, cy) in corners {
            assert!(
                poly.vertices
                    .iter()
                    .any(|v| (v.x - cx).abs() < 1e-9 && (v.y - cy).abs() < 1e-9),
                "corner ({cx}, {cy}) missing from {:?}",
                poly.vertices
            );
        }
    }

    #[test]
    fn small_notch_survives_only_with_tight_tolerance() {
        // Square with a shallow notch in the right edge.
        let outline = [
            (0.0, 0.0),
            (400.0, 0.0),
            (400.0, 180.0),
            (370.0, 200.0),
            (400.0, 220.0),
            (400.0, 400.0),
            (0.0, 400.0),
        ];
        let dense = densify(&outline);
        let peri = perimeter(&dense);

        assert_eq!(simplify_closed(&dense, 0.10 * peri).vertex_count(), 4);
        assert!(simplify_closed(&dense, 0.005 * peri).vertex_count() > 4);
    }

    #[test]
    fn simplification_is_independent_of_start_point() {
        let corners = [(0.0, 0.0), (300.0, 0.0), (300.0, 200.0), (0.0, 200.0)];
        let dense = densify(&corners);
        let eps = 0.1 * perimeter(&dense);

        let mut rotated = dense.clone();
        rotated.rotate_left(137);

        let mut a = simplify_closed(&dense, eps).vertices;
        let mut b = simplify_closed(&rotated, eps).vertices;
        let key = |p: &Point| (p.x as i64, p.y as i64);
        a.sort_by_key(key);
        b.sort_by_key(key);
        assert_eq!(a, b);
    }

    #[test]
    fn coincident_points_collapse_to_one() {
        let same = pts(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        assert_eq!(simplify_closed(&same, 1.0).vertex_count(), 1);
    }
}
