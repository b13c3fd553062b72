// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic analytics client trait.

use firelog_core::error::Result;
use firelog_core::params::ParamSet;

/// A native analytics SDK that can log named events.
///
/// `params` is `None` when the event carries no parameters; implementations
/// never receive an empty set from the forwarder.
pub trait AnalyticsClient: Send + Sync {
    /// Human-readable backend name (e.g. "Android", "iOS").
    fn platform_name(&self) -> &str;

    /// Log `name` with optional parameters.
    fn log_event(&self, name: &str, params: Option<&ParamSet>) -> Result<()>;
}

impl<T: AnalyticsClient + ?Sized> AnalyticsClient for Box<T> {
    fn platform_name(&self) -> &str {
        (**self).platform_name()
    }

    fn log_event(&self, name: &str, params: Option<&ParamSet>) -> Result<()> {
        (**self).log_event(name, params)
    }
}

impl<T: AnalyticsClient + ?Sized> AnalyticsClient for &T {
    fn platform_name(&self) -> &str {
        (**self).platform_name()
    }

    fn log_event(&self, name: &str, params: Option<&ParamSet>) -> Result<()> {
        (**self).log_event(name, params)
    }
}
