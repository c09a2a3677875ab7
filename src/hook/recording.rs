// Tue Jan 20 2026 - Alex

use crate::hook::{CallFrame, HookCallback, InstallError, InterceptionSubstrate};
use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;

type HookPointKey = (String, String);

/// In-process substrate that keeps callbacks in a table and runs them
/// synchronously from `fire`. Used for dry runs and tests.
///
/// In strict mode only methods registered with `with_method` can be hooked.
pub struct RecordingSubstrate {
    hooks: RwLock<AHashMap<HookPointKey, Vec<HookCallback>>>,
    known: Option<AHashSet<HookPointKey>>,
    denied_types: AHashSet<String>,
}

impl RecordingSubstrate {
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(AHashMap::new()),
            known: None,
            denied_types: AHashSet::new(),
        }
    }

    pub fn strict() -> Self {
        Self {
            known: Some(AHashSet::new()),
            ..Self::new()
        }
    }

    pub fn with_method(mut self, type_name: &str, method_name: &str) -> Self {
        self.known
            .get_or_insert_with(AHashSet::new)
            .insert((type_name.to_string(), method_name.to_string()));
        self
    }

    pub fn deny_type(mut self, type_name: &str) -> Self {
        self.denied_types.insert(type_name.to_string());
        self
    }

    /// Runs every callback attached to the method, in install order.
    /// Returns how many ran.
    pub fn fire(&self, type_name: &str, method_name: &str, frame: &CallFrame) -> usize {
        let callbacks = {
            let hooks = self.hooks.read();
            match hooks.get(&(type_name.to_string(), method_name.to_string())) {
                Some(callbacks) => callbacks.clone(),
                None => return 0,
            }
        };

        for callback in &callbacks {
            if let Err(e) = callback(frame) {
                log::debug!("Hook on {}.{} returned error: {}", type_name, method_name, e);
            }
        }
        callbacks.len()
    }

    pub fn hook_count(&self, type_name: &str, method_name: &str) -> usize {
        self.hooks
            .read()
            .get(&(type_name.to_string(), method_name.to_string()))
            .map_or(0, |c| c.len())
    }

    pub fn total_hooks(&self) -> usize {
        self.hooks.read().values().map(|c| c.len()).sum()
    }

    pub fn hook_points(&self) -> Vec<(String, String)> {
        let mut points: Vec<_> = self.hooks.read().keys().cloned().collect();
        points.sort();
        points
    }
}

impl Default for RecordingSubstrate {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptionSubstrate for RecordingSubstrate {
    fn install_post_call_hook(
        &self,
        type_name: &str,
        method_name: &str,
        callback: HookCallback,
    ) -> Result<(), InstallError> {
        if self.denied_types.contains(type_name) {
            return Err(InstallError::Denied(type_name.to_string()));
        }

        let key = (type_name.to_string(), method_name.to_string());
        if let Some(ref known) = self.known {
            if !known.contains(&key) {
                return Err(InstallError::MethodNotFound {
                    type_name: key.0,
                    method_name: key.1,
                });
            }
        }

        self.hooks.write().entry(key).or_default().push(callback);
        Ok(())
    }
}
