// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Firelog native analytics client abstractions.
//!
//! The forwarder only ever talks to [`traits::AnalyticsClient`]. Each target
//! OS provides its own implementation: Firebase through JNI on Android,
//! Firebase through the Objective-C runtime on iOS, and a stub elsewhere.
//! [`memory::MemoryAnalytics`] records events in-process for tests and the
//! desktop host.

pub mod memory;
pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

pub use memory::{LoggedEvent, MemoryAnalytics};
pub use traits::AnalyticsClient;

use firelog_core::error::Result;

/// Construct the analytics client for the target operating system.
///
/// Fails on mobile when the SDK cannot be reached (no Android context, or
/// `FIRAnalytics` not linked). Call once and keep the result; the SDK
/// handle is meant to live for the whole process.
pub fn analytics_client() -> Result<Box<dyn AnalyticsClient>> {
    #[cfg(target_os = "ios")]
    {
        Ok(Box::new(ios::IosAnalytics::new()?))
    }
    #[cfg(target_os = "android")]
    {
        Ok(Box::new(android::AndroidAnalytics::new()?))
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Ok(Box::new(stub::StubAnalytics))
    }
}
