// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Post-detection stages — perspective rectification of the detected page and
// preview rendering of the detection on the captured photo.

pub mod preview;
pub mod rectify;

pub use preview::render_preview;
pub use rectify::{output_size, rectify};
