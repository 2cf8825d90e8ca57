//! Process environment access.
//!
//! The scaffolding treats the environment as a read-only key-value
//! mapping supplied by the operating system. [`EnvSnapshot`] captures it
//! for inspection; [`EnvGuard`] gives tests scoped mutation with
//! restore-on-drop.

use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;

/// Immutable capture of the process environment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Keys and values are converted lossily, so capture cannot fail on
    /// non-UTF-8 entries.
    pub fn capture() -> Self {
        let vars = env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect();

        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over captured variables in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sorted variable names.
    pub fn names(&self) -> Vec<&str> {
        self.vars.keys().map(String::as_str).collect()
    }
}

/// Scoped environment mutation for tests.
///
/// The previous state of the variable is restored when the guard drops.
/// The environment is process-wide, so tests holding a guard should also
/// be serialized (`#[serial]`).
#[derive(Debug)]
pub struct EnvGuard {
    key: String,
    previous: Option<OsString>,
}

impl EnvGuard {
    /// Set `key` to `value`, remembering the previous state.
    pub fn set(key: impl Into<String>, value: &str) -> Self {
        let key = key.into();
        let previous = env::var_os(&key);
        env::set_var(&key, value);
        Self { key, previous }
    }

    /// Remove `key`, remembering the previous state.
    pub fn remove(key: impl Into<String>) -> Self {
        let key = key.into();
        let previous = env::var_os(&key);
        env::remove_var(&key);
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}
