// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory analytics client.
//
// Records every logged event with a UTC timestamp instead of sending it
// anywhere. Used by the test suites and by the desktop host binary.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use firelog_core::error::{FirelogError, Result};
use firelog_core::params::ParamSet;
use serde::Serialize;

use crate::traits::AnalyticsClient;

/// One recorded `log_event` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedEvent {
    pub name: String,
    pub params: Option<ParamSet>,
    pub logged_at: DateTime<Utc>,
}

/// Analytics client that keeps events in a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryAnalytics {
    events: Mutex<Vec<LoggedEvent>>,
    failure: Option<String>,
}

impl MemoryAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every call fails with `Analytics(message)`. Calls are
    /// not recorded.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            events: Mutex::default(),
            failure: Some(message.into()),
        }
    }

    /// Snapshot of all recorded events, oldest first.
    pub fn events(&self) -> Vec<LoggedEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return all recorded events.
    pub fn take(&self) -> Vec<LoggedEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LoggedEvent>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnalyticsClient for MemoryAnalytics {
    fn platform_name(&self) -> &str {
        "Memory"
    }

    fn log_event(&self, name: &str, params: Option<&ParamSet>) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(FirelogError::Analytics(message.clone()));
        }

        tracing::info!(
            event = name,
            params = params.map_or(0, ParamSet::len),
            "event recorded"
        );
        self.lock().push(LoggedEvent {
            name: name.to_owned(),
            params: params.cloned(),
            logged_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firelog_core::params::ParamValue;

    #[test]
    fn records_events_in_order() {
        let client = MemoryAnalytics::new();
        let mut params = ParamSet::new();
        params.insert("qty", 3_i64);

        client.log_event("first", None).unwrap();
        client.log_event("second", Some(&params)).unwrap();

        let events = client.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "first");
        assert!(events[0].params.is_none());
        assert_eq!(events[1].name, "second");
        assert_eq!(
            events[1].params.as_ref().and_then(|p| p.get("qty")),
            Some(&ParamValue::Int(3))
        );
        assert!(events[0].logged_at <= events[1].logged_at);
    }

    #[test]
    fn take_drains_the_log() {
        let client = MemoryAnalytics::new();
        client.log_event("a", None).unwrap();
        assert_eq!(client.take().len(), 1);
        assert!(client.is_empty());
    }

    #[test]
    fn failing_client_records_nothing() {
        let client = MemoryAnalytics::failing("quota exceeded");
        let err = client.log_event("a", None).unwrap_err();
        assert!(matches!(err, FirelogError::Analytics(ref m) if m == "quota exceeded"));
        assert_eq!(client.len(), 0);
    }
}
