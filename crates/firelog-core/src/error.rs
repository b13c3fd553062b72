// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Firelog.

use thiserror::Error;

/// Top-level error type for all Firelog operations.
#[derive(Debug, Error)]
pub enum FirelogError {
    // -- Message shape --
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("unsupported action: {0}")]
    UnsupportedAction(String),

    // -- Analytics client --
    #[error("analytics client error: {0}")]
    Analytics(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FirelogError {
    /// True for errors caused by the shape of an inbound message rather than
    /// by the analytics client or the platform.
    pub fn is_message_error(&self) -> bool {
        matches!(self, Self::MalformedMessage(_) | Self::UnsupportedAction(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FirelogError>;
