// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding captured photos and encoding previews and pages.

pub mod codec;

pub use codec::{decode, encode_jpeg, encode_png, open};
