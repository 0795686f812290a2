// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the capture and export screens.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the presentation layer shows it.

use crate::error::ScanwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth trying again straight away.
    Transient,
    /// User must do something (retake the photo, grant access, free space).
    ActionRequired,
    /// Cannot be fixed by retrying or user action.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether retrying the same action might succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `ScanwerkError` into a `HumanError` for display.
pub fn humanize_error(err: &ScanwerkError) -> HumanError {
    match err {
        ScanwerkError::ImageError(_) => HumanError {
            message: "We couldn't read that photo.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try taking the photo again, or pick a JPEG or PNG.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ScanwerkError::EmptyImage { .. } => HumanError {
            message: "The photo came back empty.".into(),
            suggestion: "Try taking the photo again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScanwerkError::PdfError(_) => HumanError {
            message: "We couldn't build the PDF.".into(),
            suggestion: "Try exporting again. If this keeps happening, remove the last page you added and retry.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScanwerkError::Config(detail) => HumanError {
            message: "The scanner settings aren't valid.".into(),
            suggestion: format!("Reset the scanner settings to their defaults. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ScanwerkError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "The app doesn't have permission to use that file.".into(),
                suggestion: "Allow access to your photos and documents in the system settings, then try again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        ScanwerkError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScanwerkError::Bridge(_) => HumanError {
            message: "The camera or file picker didn't respond.".into(),
            suggestion: "Close other apps that may be using the camera, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScanwerkError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on your device.".into(),
            suggestion: "Load an existing photo from a file instead.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}
