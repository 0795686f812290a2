// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwerk-document — Document detection and rectification for Scanwerk.
//
// Finds the outline of a paper document in a photo (edge map, contour search
// with a relaxed fallback, corner labelling), warps it into an upright page,
// renders previews, and exports the collected pages as a PDF.

pub mod detect;
pub mod geometry;
pub mod image;
pub mod pdf;
pub mod scan;
pub mod session;

// Re-export the primary entry points so callers can use
// `scanwerk_document::DetectionPipeline` etc.
pub use detect::{DetectionPass, DetectionPipeline};
pub use pdf::writer::PdfWriter;
pub use scan::{output_size, rectify, render_preview};
pub use session::{DocumentPhoto, ScanSession};
