// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process-wide forwarder for hosts that cannot thread a handle through
// their plugin registry. Created at most once; the first caller's
// initialiser wins and later initialisers are never run.
//
// Code that can own its forwarder should construct an `EventForwarder`
// directly instead.

use std::sync::OnceLock;

use firelog_bridge::AnalyticsClient;
use firelog_core::BridgeConfig;
use firelog_core::error::Result;

use crate::forwarder::EventForwarder;

/// Forwarder type held by the process-wide slot.
pub type SharedForwarder = EventForwarder<Box<dyn AnalyticsClient>>;

static INSTANCE: OnceLock<SharedForwarder> = OnceLock::new();

/// The shared forwarder, if one has been created.
pub fn get() -> Option<&'static SharedForwarder> {
    INSTANCE.get()
}

/// Return the shared forwarder, creating it with `init` on first use.
pub fn get_or_init(init: impl FnOnce() -> SharedForwarder) -> &'static SharedForwarder {
    INSTANCE.get_or_init(init)
}

/// Fallible variant of [`get_or_init`]. A failed `init` leaves the slot
/// empty so a later call can retry.
pub fn get_or_try_init(
    init: impl FnOnce() -> Result<SharedForwarder>,
) -> Result<&'static SharedForwarder> {
    if let Some(existing) = INSTANCE.get() {
        return Ok(existing);
    }
    let created = init()?;
    // If another thread won the race, its instance is kept and ours dropped.
    Ok(INSTANCE.get_or_init(|| created))
}

/// Shared forwarder backed by the platform analytics client.
pub fn platform(config: BridgeConfig) -> Result<&'static SharedForwarder> {
    get_or_try_init(|| {
        let client = firelog_bridge::analytics_client()?;
        tracing::info!(platform = client.platform_name(), "shared forwarder initialised");
        Ok(EventForwarder::with_config(client, config))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use firelog_bridge::MemoryAnalytics;
    use firelog_core::error::FirelogError;

    // Single test: the slot is process-global and tests share the process.
    #[test]
    fn first_initialiser_wins() {
        let failed = get_or_try_init(|| Err(FirelogError::PlatformUnavailable));
        assert!(failed.is_err());
        assert!(get().is_none());

        let first = get_or_init(|| {
            let client: Box<dyn AnalyticsClient> = Box::new(MemoryAnalytics::new());
            EventForwarder::new(client)
        });
        let second = get_or_init(|| panic!("initialiser must not run twice"));
        assert!(std::ptr::eq(first, second));

        let third = platform(BridgeConfig::default()).unwrap();
        assert!(std::ptr::eq(first, third));
        assert_eq!(third.client().platform_name(), "Memory");

        first.log_event("app_open").unwrap();
    }
}
