// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where no camera or share sheet exists.
//
// Every capability returns `PlatformUnavailable`.

use scanwerk_core::error::{Result, ScanwerkError};

use crate::traits::*;

/// Bridge with no native capabilities.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeCamera for StubBridge {
    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        tracing::warn!("NativeCamera::capture_image called on stub bridge");
        Err(ScanwerkError::PlatformUnavailable)
    }
}

impl NativeFilePicker for StubBridge {
    fn pick_file(&self, _mime_types: &[&str]) -> Result<Option<String>> {
        tracing::warn!("NativeFilePicker::pick_file called on stub bridge");
        Err(ScanwerkError::PlatformUnavailable)
    }

    fn read_picked_file(&self, _path: &str) -> Result<Vec<u8>> {
        Err(ScanwerkError::PlatformUnavailable)
    }
}

impl NativeShare for StubBridge {
    fn share_file(&self, _path: &str, _mime_type: &str) -> Result<()> {
        tracing::warn!("NativeShare::share_file called on stub bridge");
        Err(ScanwerkError::PlatformUnavailable)
    }
}
