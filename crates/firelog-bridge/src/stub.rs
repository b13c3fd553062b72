// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub client for desktop/CI builds where no native analytics SDK exists.
//
// Every call returns `PlatformUnavailable`. Real implementations live in the
// `ios` and `android` modules.

use firelog_core::error::{FirelogError, Result};
use firelog_core::params::ParamSet;

use crate::traits::AnalyticsClient;

/// No-op client returned on non-mobile platforms.
pub struct StubAnalytics;

impl AnalyticsClient for StubAnalytics {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn log_event(&self, name: &str, params: Option<&ParamSet>) -> Result<()> {
        tracing::warn!(
            event = name,
            params = params.map_or(0, ParamSet::len),
            "AnalyticsClient::log_event called on stub client"
        );
        Err(FirelogError::PlatformUnavailable)
    }
}
