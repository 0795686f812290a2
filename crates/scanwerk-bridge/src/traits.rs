// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use scanwerk_core::error::Result;

/// Every native capability the scanner needs, behind one object.
pub trait PlatformBridge: NativeCamera + NativeFilePicker + NativeShare {
    /// Human-readable platform name (e.g. "iOS 17", "Android 14").
    fn platform_name(&self) -> &str;
}

/// Capture still photos from the device camera.
pub trait NativeCamera {
    /// Launch the system camera and return the encoded photo bytes.
    /// Returns Ok(None) if the user cancelled.
    fn capture_image(&self) -> Result<Option<Vec<u8>>>;
}

/// Pick files from device storage or the photo library.
pub trait NativeFilePicker {
    /// Show a file picker filtered to the given MIME types.
    /// Returns the chosen path, or None if cancelled.
    fn pick_file(&self, mime_types: &[&str]) -> Result<Option<String>>;

    /// Read the bytes of a previously picked file.
    fn read_picked_file(&self, path: &str) -> Result<Vec<u8>>;
}

/// Hand an exported artifact to the OS share sheet.
pub trait NativeShare {
    fn share_file(&self, path: &str, mime_type: &str) -> Result<()>;
}
