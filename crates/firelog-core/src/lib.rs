// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Firelog core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod message;
pub mod params;

pub use config::BridgeConfig;
pub use error::FirelogError;
pub use message::{Action, Envelope, LogEventData};
pub use params::{ParamSet, ParamValue};
