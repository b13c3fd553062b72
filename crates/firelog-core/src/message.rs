// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inbound message envelope from web content.
//
//   { "action": "logEvent",
//     "data": { "event": "<string>", "params": { "<key>": <int|float|string> } } }
//
// Extraction borrows from the parsed JSON; nothing outlives one dispatch.
// Unknown fields at either level are ignored (hosts attach routing metadata).

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{FirelogError, Result};

/// Actions understood by the forwarder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Log a named event with optional parameters.
    LogEvent,
}

impl Action {
    /// Every supported action, in wire form.
    pub const SUPPORTED: &'static [&'static str] = &["logEvent"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogEvent => "logEvent",
        }
    }
}

impl FromStr for Action {
    type Err = FirelogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "logEvent" => Ok(Self::LogEvent),
            other => Err(FirelogError::UnsupportedAction(other.to_owned())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level message: an action name and its data object.
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    pub action: &'a str,
    pub data: &'a Map<String, Value>,
}

impl<'a> Envelope<'a> {
    /// Read `action` (string) then `data` (object), in that order.
    pub fn from_value(message: &'a Value) -> Result<Self> {
        let object = message
            .as_object()
            .ok_or_else(|| malformed("message is not an object"))?;

        let action = match object.get("action") {
            Some(Value::String(action)) => action.as_str(),
            Some(_) => return Err(malformed("action is not a string")),
            None => return Err(malformed("action is missing")),
        };

        let data = match object.get("data") {
            Some(Value::Object(data)) => data,
            Some(_) => return Err(malformed("data is not an object")),
            None => return Err(malformed("data is missing")),
        };

        Ok(Self { action, data })
    }

    /// Resolve the action name, failing with `UnsupportedAction`.
    pub fn action(&self) -> Result<Action> {
        self.action.parse()
    }
}

/// Payload of a `logEvent` message.
#[derive(Debug, Clone, Copy)]
pub struct LogEventData<'a> {
    pub event: &'a str,
    /// Raw `params` value; `None` when absent or JSON null.
    pub params: Option<&'a Value>,
}

impl<'a> LogEventData<'a> {
    pub fn from_data(data: &'a Map<String, Value>) -> Result<Self> {
        let event = match data.get("event") {
            Some(Value::String(event)) => event.as_str(),
            Some(_) => return Err(malformed("data.event is not a string")),
            None => return Err(malformed("data.event is missing")),
        };

        let params = data.get("params").filter(|v| !v.is_null());

        Ok(Self { event, params })
    }
}

fn malformed(detail: &str) -> FirelogError {
    FirelogError::MalformedMessage(detail.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(err: FirelogError) -> String {
        match err {
            FirelogError::MalformedMessage(detail) => detail,
            other => panic!("expected MalformedMessage, got {other:?}"),
        }
    }

    #[test]
    fn parses_log_event_envelope() {
        let msg = json!({"action": "logEvent", "data": {"event": "app_open"}});
        let envelope = Envelope::from_value(&msg).unwrap();
        assert_eq!(envelope.action().unwrap(), Action::LogEvent);

        let data = LogEventData::from_data(envelope.data).unwrap();
        assert_eq!(data.event, "app_open");
        assert!(data.params.is_none());
    }

    #[test]
    fn ignores_extra_fields() {
        let msg = json!({
            "type": "plugin",
            "name": "firebaseAnalytics",
            "action": "logEvent",
            "data": {"event": "x", "callback": "cb1"},
        });
        let envelope = Envelope::from_value(&msg).unwrap();
        assert_eq!(LogEventData::from_data(envelope.data).unwrap().event, "x");
    }

    #[test]
    fn action_must_be_a_string() {
        let err = Envelope::from_value(&json!({"action": 1, "data": {}})).unwrap_err();
        assert_eq!(detail(err), "action is not a string");

        let err = Envelope::from_value(&json!({"data": {}})).unwrap_err();
        assert_eq!(detail(err), "action is missing");
    }

    #[test]
    fn data_must_be_an_object() {
        let err = Envelope::from_value(&json!({"action": "logEvent"})).unwrap_err();
        assert_eq!(detail(err), "data is missing");

        let err = Envelope::from_value(&json!({"action": "logEvent", "data": "x"})).unwrap_err();
        assert_eq!(detail(err), "data is not an object");
    }

    #[test]
    fn data_is_checked_before_action_is_resolved() {
        // An unknown action with missing data is malformed, not unsupported.
        let err = Envelope::from_value(&json!({"action": "ping"})).unwrap_err();
        assert!(matches!(err, FirelogError::MalformedMessage(_)));
    }

    #[test]
    fn unknown_action_is_unsupported() {
        let msg = json!({"action": "ping", "data": {}});
        let envelope = Envelope::from_value(&msg).unwrap();
        match envelope.action() {
            Err(FirelogError::UnsupportedAction(name)) => assert_eq!(name, "ping"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn action_names_are_case_sensitive() {
        assert!("LogEvent".parse::<Action>().is_err());
        assert_eq!("logEvent".parse::<Action>().unwrap().to_string(), "logEvent");
    }

    #[test]
    fn event_must_be_a_string() {
        let data = json!({"event": 42});
        let err = LogEventData::from_data(data.as_object().unwrap()).unwrap_err();
        assert_eq!(detail(err), "data.event is not a string");

        let data = json!({"params": {"a": 1}});
        let err = LogEventData::from_data(data.as_object().unwrap()).unwrap_err();
        assert_eq!(detail(err), "data.event is missing");
    }

    #[test]
    fn null_params_read_as_absent() {
        let data = json!({"event": "x", "params": null});
        let parsed = LogEventData::from_data(data.as_object().unwrap()).unwrap();
        assert!(parsed.params.is_none());
    }
}
