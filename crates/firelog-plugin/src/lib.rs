// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Firelog: forwards `logEvent` messages from web content to a native
// analytics client.
//
// Hosts call `EventForwarder::on_message` from their message-dispatch hook.
// It never returns an error: rejected messages are logged and dropped so a
// bad message from web content cannot take the host down.

pub mod diagnostics;
pub mod forwarder;
pub mod shared;

pub use forwarder::{EventForwarder, convert_params};
