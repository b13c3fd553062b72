// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rejection diagnostics.
//
// Web content gets no acknowledgement, so the log line is the only place a
// developer learns why an event went missing. Message-shape errors list the
// usual causes; client errors are reported as-is.

use firelog_core::error::FirelogError;
use firelog_core::message::Action;

/// The usual reasons a message is rejected, one per line in the diagnostic.
pub fn possible_issues() -> [String; 3] {
    [
        format!(
            "action is empty, not a string or not supported (supported actions: {})",
            Action::SUPPORTED.join(", ")
        ),
        "data object is empty or not an object".to_owned(),
        "data.event is empty or not a string".to_owned(),
    ]
}

/// Render the diagnostic text for a rejected message. `message` is omitted
/// when `None`.
pub fn rejection_report(message: Option<&str>, error: &FirelogError) -> String {
    let mut report = String::from("onMessage");
    if let Some(message) = message {
        report.push_str(": ");
        report.push_str(message);
    }
    report.push('\n');
    report.push_str(&format!("error: {error}\n"));

    if error.is_message_error() {
        report.push_str("Possible issues:");
        for issue in possible_issues() {
            report.push_str("\n\t- ");
            report.push_str(&issue);
        }
    }
    report
}

/// Log a rejected message at `error` level. `message` is the raw envelope
/// text, or `None` when it should not be echoed.
pub fn log_rejection(message: Option<&str>, error: &FirelogError) {
    let report = rejection_report(message, error);
    if error.is_message_error() {
        tracing::error!("{report}");
    } else {
        tracing::error!("analytics client failed to log event: {report}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_errors_list_possible_issues() {
        let err = FirelogError::UnsupportedAction("ping".into());
        let report = rejection_report(Some(r#"{"action":"ping","data":{}}"#), &err);

        assert!(report.starts_with(r#"onMessage: {"action":"ping","data":{}}"#));
        assert!(report.contains("unsupported action: ping"));
        assert!(report.contains("supported actions: logEvent"));
        assert!(report.contains("data object is empty or not an object"));
        assert!(report.contains("data.event is empty or not a string"));
    }

    #[test]
    fn client_errors_skip_possible_issues() {
        let err = FirelogError::Analytics("offline".into());
        let report = rejection_report(None, &err);
        assert_eq!(report, "onMessage\nerror: analytics client error: offline\n");
    }

    #[test]
    fn message_can_be_withheld() {
        let err = FirelogError::MalformedMessage("data is missing".into());
        let report = rejection_report(None, &err);
        assert!(report.starts_with("onMessage\nerror: malformed message: data is missing\n"));
        assert!(report.contains("Possible issues:"));
    }
}
