// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line-oriented message replay.

use std::io::{self, BufRead};

use firelog_bridge::AnalyticsClient;
use firelog_plugin::EventForwarder;
use firelog_plugin::diagnostics;

/// Per-run counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Messages dispatched without error.
    pub accepted: usize,
    /// Messages rejected (bad shape, bad JSON, or client failure).
    pub rejected: usize,
    /// Blank lines.
    pub skipped: usize,
}

/// Dispatch every non-blank line of `input` as one message.
///
/// Rejections are logged and counted, never returned; only read errors
/// abort the replay.
pub fn replay<C: AnalyticsClient>(
    input: impl BufRead,
    forwarder: &EventForwarder<C>,
) -> io::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let raw = line.trim();
        if raw.is_empty() {
            summary.skipped += 1;
            continue;
        }

        match forwarder.handle_message_str(raw) {
            Ok(()) => summary.accepted += 1,
            Err(e) => {
                tracing::debug!(line = index + 1, "message rejected");
                let shown = forwarder.config().include_message_in_diagnostics.then_some(raw);
                diagnostics::log_rejection(shown, &e);
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}
