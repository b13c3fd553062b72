// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Firelog host. Plays the web view host on desktop.
//
// Usage: firelog-host [config.json] < messages.jsonl
//
// Reads one JSON envelope per line from stdin, dispatches each through the
// event forwarder backed by an in-memory client, then writes every recorded
// event to stdout as a JSON line. Logs go to stderr.

mod replay;

use std::io::{self, Write};
use std::process::ExitCode;

use firelog_bridge::MemoryAnalytics;
use firelog_core::BridgeConfig;
use firelog_plugin::EventForwarder;

fn main() -> ExitCode {
    let loaded = std::env::args_os().nth(1).map(|path| {
        let result = BridgeConfig::load(&path);
        (path, result)
    });
    let config = match &loaded {
        Some((_, Ok(config))) => config.clone(),
        _ => BridgeConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Some((path, Err(e))) = &loaded {
        tracing::warn!(path = %path.to_string_lossy(), "using default config: {e}");
    }

    tracing::info!("Firelog host starting");

    let forwarder = EventForwarder::with_config(MemoryAnalytics::new(), config);
    let summary = match replay::replay(io::stdin().lock(), &forwarder) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("failed to read messages from stdin: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    for event in forwarder.client().take() {
        let written = serde_json::to_string(&event)
            .map_err(io::Error::from)
            .and_then(|line| writeln!(stdout, "{line}"));
        if let Err(e) = written {
            tracing::error!("failed to write event: {e}");
            return ExitCode::FAILURE;
        }
    }

    tracing::info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        skipped = summary.skipped,
        "Firelog host finished"
    );
    ExitCode::SUCCESS
}
