// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FirelogError, Result};

/// Settings for the event forwarder and the host binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Forward events to the analytics client. When false, messages are
    /// still validated and converted but nothing is sent.
    pub collection_enabled: bool,
    /// Echo the raw inbound message in rejection diagnostics.
    pub include_message_in_diagnostics: bool,
    /// Fallback `tracing` filter directive when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            collection_enabled: true,
            include_message_in_diagnostics: true,
            log_filter: "info".into(),
        }
    }
}

impl BridgeConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| FirelogError::Config(format!("{}: {e}", path.display())))
    }

    /// Like [`BridgeConfig::load`], but falls back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "using default config: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"collection_enabled": false}}"#).unwrap();

        let config = BridgeConfig::load(file.path()).unwrap();
        assert!(!config.collection_enabled);
        assert!(config.include_message_in_diagnostics);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = BridgeConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, FirelogError::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig::load_or_default(dir.path().join("absent.json"));
        assert_eq!(config, BridgeConfig::default());
    }
}
