// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document detection — edge map, contour search with vertex-count fallback,
// and corner resolution.

pub mod contours;
pub mod edges;
pub mod pipeline;
pub mod vertices;

pub use contours::{VertexCounts, find_candidate, select_candidate, trace_contours};
pub use edges::build_edge_map;
pub use pipeline::{DetectionPass, DetectionPipeline};
pub use vertices::resolve;
