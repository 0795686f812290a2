// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwerk-bridge — Native platform abstractions for photo acquisition and
// sharing. The scanning pipeline only ever sees encoded image bytes; where
// they come from (camera, gallery, file system) is decided here.

pub mod stub;
pub mod traits;

pub use traits::{NativeCamera, NativeFilePicker, NativeShare, PlatformBridge};

/// Bridge implementation for the current target.
///
/// Only the stub is built in this crate; mobile shells provide their own
/// `PlatformBridge` and pass it to the session directly.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    Box::new(stub::StubBridge)
}
