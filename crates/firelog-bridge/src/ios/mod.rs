// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS analytics client via objc2.
//
// Requires compilation with the iOS SDK and an app that links the
// FirebaseAnalytics framework. The `FIRAnalytics` class is looked up at
// runtime so a missing framework surfaces as `FirelogError::Bridge` instead
// of a link failure.
//
// `+[FIRAnalytics logEventWithName:parameters:]` is thread-safe, so this
// client does not require the main thread.

#![cfg(target_os = "ios")]

use objc2::msg_send;
use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject};
use objc2_foundation::{NSDictionary, NSNumber, NSString};

use firelog_core::error::{FirelogError, Result};
use firelog_core::params::{ParamSet, ParamValue};

use crate::traits::AnalyticsClient;

/// Objective-C counterpart of a [`ParamValue`].
enum ObjcValue {
    Number(Retained<NSNumber>),
    String(Retained<NSString>),
}

impl ObjcValue {
    fn from_param(value: &ParamValue) -> Self {
        match value {
            ParamValue::Int(v) => Self::Number(NSNumber::new_i64(*v)),
            ParamValue::Float(v) => Self::Number(NSNumber::new_f64(*v)),
            ParamValue::String(v) => Self::String(NSString::from_str(v)),
        }
    }

    fn as_object(&self) -> &AnyObject {
        match self {
            Self::Number(n) => n,
            Self::String(s) => s,
        }
    }
}

/// Build an `NSDictionary<NSString, id>` holding every entry of `params`.
fn to_dictionary(params: &ParamSet) -> Retained<NSDictionary<NSString, AnyObject>> {
    let (keys, values): (Vec<Retained<NSString>>, Vec<ObjcValue>) = params
        .iter()
        .map(|(key, value)| (NSString::from_str(key), ObjcValue::from_param(value)))
        .unzip();

    let key_refs: Vec<&NSString> = keys.iter().map(|k| &**k).collect();
    let value_refs: Vec<&AnyObject> = values.iter().map(ObjcValue::as_object).collect();

    NSDictionary::from_slices(&key_refs, &value_refs)
}

/// Firebase Analytics reached through the Objective-C runtime.
pub struct IosAnalytics {
    class: &'static AnyClass,
}

impl IosAnalytics {
    /// Resolve the `FIRAnalytics` class.
    pub fn new() -> Result<Self> {
        let class = AnyClass::get(c"FIRAnalytics").ok_or_else(|| {
            FirelogError::Bridge(
                "FIRAnalytics class not found (is FirebaseAnalytics linked?)".into(),
            )
        })?;
        tracing::info!("iOS: FIRAnalytics class resolved");
        Ok(Self { class })
    }
}

impl AnalyticsClient for IosAnalytics {
    fn platform_name(&self) -> &str {
        "iOS"
    }

    fn log_event(&self, name: &str, params: Option<&ParamSet>) -> Result<()> {
        let ns_name = NSString::from_str(name);
        let dict = params.map(to_dictionary);

        // SAFETY: `logEventWithName:parameters:` is a documented FIRAnalytics
        // class method taking an NSString and a nullable NSDictionary.
        unsafe {
            let _: () = msg_send![
                self.class,
                logEventWithName: &*ns_name,
                parameters: dict.as_deref()
            ];
        }

        tracing::debug!(
            event = name,
            params = params.map_or(0, ParamSet::len),
            "iOS: event logged"
        );
        Ok(())
    }
}
