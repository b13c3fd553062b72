// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Event forwarder: validates inbound envelopes and hands `logEvent`
// payloads to the analytics client.
//
// Flow: envelope parse → action dispatch → parameter conversion → client.
// The client is called at most once per message, and only after the whole
// message has validated.

use firelog_bridge::AnalyticsClient;
use firelog_core::BridgeConfig;
use firelog_core::error::{FirelogError, Result};
use firelog_core::message::{Action, Envelope, LogEventData};
use firelog_core::params::ParamSet;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::diagnostics;

/// Convert an optional `params` value into a typed parameter set.
///
/// Only integer, float and string entries survive. Returns `None` when the
/// input is absent, null, not an object, or nothing survives.
pub fn convert_params(params: Option<&Value>) -> Option<ParamSet> {
    match params? {
        Value::Object(map) => ParamSet::from_json_object(map),
        Value::Null => None,
        other => {
            debug!(kind = json_kind(other), "params is not an object; ignoring");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Dispatches web view messages to an [`AnalyticsClient`].
pub struct EventForwarder<C> {
    client: C,
    config: BridgeConfig,
}

impl<C: AnalyticsClient> EventForwarder<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, BridgeConfig::default())
    }

    pub fn with_config(client: C, config: BridgeConfig) -> Self {
        debug!(platform = client.platform_name(), "event forwarder created");
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Host entry point. Never fails: rejected messages are logged with a
    /// diagnostic and dropped.
    pub fn on_message(&self, message: &Value) {
        if let Err(e) = self.handle_message(message) {
            self.reject(|| message.to_string(), &e);
        }
    }

    /// Host entry point for raw JSON text. Unparseable text is treated as a
    /// malformed message.
    pub fn on_message_str(&self, raw: &str) {
        if let Err(e) = self.handle_message_str(raw) {
            self.reject(|| raw.to_owned(), &e);
        }
    }

    /// Parse `raw` as JSON and dispatch it. Unparseable text fails with
    /// `MalformedMessage`.
    pub fn handle_message_str(&self, raw: &str) -> Result<()> {
        let message: Value = serde_json::from_str(raw)
            .map_err(|e| FirelogError::MalformedMessage(format!("invalid JSON: {e}")))?;
        self.handle_message(&message)
    }

    /// Validate and dispatch one envelope.
    ///
    /// Fails with `MalformedMessage` or `UnsupportedAction` for bad input,
    /// or with whatever the client reports if the call itself fails.
    #[instrument(level = "debug", skip_all)]
    pub fn handle_message(&self, message: &Value) -> Result<()> {
        let envelope = Envelope::from_value(message)?;
        match envelope.action()? {
            Action::LogEvent => {
                let data = LogEventData::from_data(envelope.data)?;
                let params = convert_params(data.params);
                self.log_event_with(data.event, params)
            }
        }
    }

    /// Log an event with no parameters.
    pub fn log_event(&self, event: &str) -> Result<()> {
        self.log_event_with(event, None)
    }

    /// Log an event with parameters. An empty set is sent as `None`.
    pub fn log_event_with(&self, event: &str, params: Option<ParamSet>) -> Result<()> {
        let params = params.and_then(ParamSet::into_non_empty);

        if !self.config.collection_enabled {
            debug!(event, "collection disabled; event not forwarded");
            return Ok(());
        }

        debug!(
            event,
            params = params.as_ref().map_or(0, ParamSet::len),
            "forwarding event"
        );
        if let Some(params) = &params {
            for (key, value) in params.iter() {
                trace!(event, key, kind = value.kind(), "event parameter");
            }
        }
        self.client.log_event(event, params.as_ref())
    }

    /// Log the rejection diagnostic. `render` only runs when the config
    /// echoes the message.
    fn reject(&self, render: impl FnOnce() -> String, error: &FirelogError) {
        let shown = self.config.include_message_in_diagnostics.then(render);
        diagnostics::log_rejection(shown.as_deref(), error);
    }
}
