// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android analytics client via JNI.
//
// Requires the Android NDK and an app that links
// `com.google.firebase:firebase-analytics`. The `FirebaseAnalytics` instance
// is fetched once from the hosting Activity's context and pinned as a JNI
// global reference; every `log_event` call then builds an `android.os.Bundle`
// and invokes `FirebaseAnalytics.logEvent(String, Bundle)`.
//
// ## Debugging
//
// Events are batched by the SDK. To see them immediately in the Firebase
// DebugView:
//
//   adb shell setprop debug.firebase.analytics.app <package_name>
//   adb shell setprop debug.firebase.analytics.app .none.   # to disable

#![cfg(target_os = "android")]

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use firelog_core::error::{FirelogError, Result};
use firelog_core::params::{ParamSet, ParamValue};

use crate::traits::AnalyticsClient;

/// Binary name for `ClassLoader.loadClass`. App classes are invisible to
/// `FindClass` on natively attached threads, so the lookup goes through the
/// Activity's class loader.
const FIREBASE_ANALYTICS_CLASS: &str = "com.google.firebase.analytics.FirebaseAnalytics";
const GET_INSTANCE_SIG: &str =
    "(Landroid/content/Context;)Lcom/google/firebase/analytics/FirebaseAnalytics;";
const LOG_EVENT_SIG: &str = "(Ljava/lang/String;Landroid/os/Bundle;)V";

// ---------------------------------------------------------------------------
// JNI helpers
// ---------------------------------------------------------------------------

/// Convenience: map any `jni::errors::Error` into `FirelogError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> FirelogError {
    FirelogError::Bridge(format!("{context}: {e}"))
}

/// Map a failed JNI call, clearing any pending Java exception first so the
/// thread can keep making JNI calls.
fn java_err(env: &mut JNIEnv, context: &str, e: jni::errors::Error) -> FirelogError {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    jni_err(context, e)
}

/// Build an `android.os.Bundle` holding every entry of `params`.
fn to_bundle<'local>(env: &mut JNIEnv<'local>, params: &ParamSet) -> Result<JObject<'local>> {
    let bundle = env
        .new_object("android/os/Bundle", "()V", &[])
        .map_err(|e| java_err(env, "new Bundle", e))?;

    for (key, value) in params.iter() {
        let j_key: JString = env
            .new_string(key)
            .map_err(|e| jni_err("new_string(key)", e))?;

        let result = match value {
            ParamValue::Int(v) => env.call_method(
                &bundle,
                "putLong",
                "(Ljava/lang/String;J)V",
                &[JValue::Object(&j_key), JValue::Long(*v)],
            ),
            ParamValue::Float(v) => env.call_method(
                &bundle,
                "putDouble",
                "(Ljava/lang/String;D)V",
                &[JValue::Object(&j_key), JValue::Double(*v)],
            ),
            ParamValue::String(v) => {
                let j_value: JString = env
                    .new_string(v)
                    .map_err(|e| jni_err("new_string(value)", e))?;
                let put = env.call_method(
                    &bundle,
                    "putString",
                    "(Ljava/lang/String;Ljava/lang/String;)V",
                    &[JValue::Object(&j_key), JValue::Object(&j_value)],
                );
                let _ = env.delete_local_ref(j_value);
                put
            }
        };
        result.map_err(|e| java_err(env, "Bundle.put", e))?;

        // Bounded local reference table; release per-key refs eagerly.
        let _ = env.delete_local_ref(j_key);
    }

    Ok(bundle)
}

/// Load `binary_name` through `context.getClassLoader()`.
fn load_app_class<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject,
    binary_name: &str,
) -> Result<JClass<'local>> {
    let loader = env
        .call_method(context, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .map_err(|e| java_err(env, "Context.getClassLoader", e))?
        .l()
        .map_err(|e| jni_err("getClassLoader->l", e))?;

    let j_name: JString = env
        .new_string(binary_name)
        .map_err(|e| jni_err("new_string(class name)", e))?;

    let class = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&j_name)],
        )
        .map_err(|e| java_err(env, "ClassLoader.loadClass", e))?
        .l()
        .map_err(|e| jni_err("loadClass->l", e))?;

    Ok(JClass::from(class))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Firebase Analytics reached through JNI.
pub struct AndroidAnalytics {
    vm: JavaVM,
    instance: GlobalRef,
}

impl AndroidAnalytics {
    /// Resolve `FirebaseAnalytics.getInstance(context)` for the hosting
    /// Activity.
    ///
    /// The `JavaVM*` and context come from `ndk_context`, set by
    /// `android_main` or `ANativeActivity_onCreate`.
    pub fn new() -> Result<Self> {
        let ctx = ndk_context::android_context();
        // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
        // The pointer is valid for the lifetime of the process.
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
            .map_err(|e| jni_err("failed to obtain JavaVM", e))?;

        let context_ptr = ctx.context();
        if context_ptr.is_null() {
            return Err(FirelogError::Bridge(
                "Android context is null; native activity not initialised".into(),
            ));
        }

        let instance = {
            let mut env = vm
                .attach_current_thread()
                .map_err(|e| jni_err("failed to attach JNI thread", e))?;
            // SAFETY: the NDK guarantees this pointer is a valid global
            // jobject for the hosting Activity.
            let context = unsafe { JObject::from_raw(context_ptr.cast()) };

            let class = load_app_class(&mut env, &context, FIREBASE_ANALYTICS_CLASS)?;
            let local = env
                .call_static_method(
                    &class,
                    "getInstance",
                    GET_INSTANCE_SIG,
                    &[JValue::Object(&context)],
                )
                .map_err(|e| java_err(&mut env, "FirebaseAnalytics.getInstance", e))?
                .l()
                .map_err(|e| jni_err("getInstance->l", e))?;

            env.new_global_ref(&local)
                .map_err(|e| jni_err("new_global_ref(FirebaseAnalytics)", e))?
        };

        tracing::info!("Android: FirebaseAnalytics instance acquired");
        Ok(Self { vm, instance })
    }
}

impl AnalyticsClient for AndroidAnalytics {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn log_event(&self, name: &str, params: Option<&ParamSet>) -> Result<()> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| jni_err("failed to attach JNI thread", e))?;

        let j_name: JString = env
            .new_string(name)
            .map_err(|e| jni_err("new_string(event)", e))?;

        // A null Bundle is how the SDK expects "no parameters".
        let bundle = match params {
            Some(params) => to_bundle(&mut env, params)?,
            None => JObject::null(),
        };

        let result = env.call_method(
            self.instance.as_obj(),
            "logEvent",
            LOG_EVENT_SIG,
            &[JValue::Object(&j_name), JValue::Object(&bundle)],
        );
        result.map_err(|e| java_err(&mut env, "FirebaseAnalytics.logEvent", e))?;

        tracing::debug!(
            event = name,
            params = params.map_or(0, ParamSet::len),
            "Android: event logged"
        );
        Ok(())
    }
}
