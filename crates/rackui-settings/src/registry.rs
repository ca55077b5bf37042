//! Per-window parameter state with change notification.
//!
//! Each window has live values, a saved snapshot and at most one listener.
//! Windows are created on first use with default values; the snapshot
//! starts equal to the live values.

use std::collections::HashMap;
use std::fmt;

use crate::params::{WindowParameter, WindowParameters};

/// Opaque handle naming one host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Change listener: called with the parameter and its new value.
pub type ParameterListener = Box<dyn FnMut(WindowParameter, f32) + Send>;

struct WindowEntry {
    live: WindowParameters,
    saved: WindowParameters,
    listener: Option<ParameterListener>,
}

impl WindowEntry {
    fn new(initial: WindowParameters) -> Self {
        Self {
            live: initial,
            saved: initial,
            listener: None,
        }
    }
}

/// Parameter state of every open window.
pub struct WindowRegistry {
    initial: WindowParameters,
    windows: HashMap<WindowId, WindowEntry>,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WindowRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRegistry")
            .field("initial", &self.initial)
            .field("windows", &self.windows.len())
            .finish()
    }
}

impl WindowRegistry {
    /// Registry whose windows start from [`WindowParameters::default`].
    pub fn new() -> Self {
        Self::with_initial(WindowParameters::default())
    }

    /// Registry whose windows start from `initial`, e.g. values loaded
    /// from the settings file.
    pub fn with_initial(initial: WindowParameters) -> Self {
        Self {
            initial: initial.sanitized(),
            windows: HashMap::new(),
        }
    }

    fn entry(&mut self, window: WindowId) -> &mut WindowEntry {
        let initial = self.initial;
        self.windows
            .entry(window)
            .or_insert_with(|| WindowEntry::new(initial))
    }

    /// Install the listener for `window`, replacing any previous one.
    pub fn set_callback(
        &mut self,
        window: WindowId,
        listener: impl FnMut(WindowParameter, f32) + Send + 'static,
    ) {
        let replaced = self.entry(window).listener.replace(Box::new(listener));
        if replaced.is_some() {
            tracing::debug!(%window, "window parameter listener replaced");
        }
    }

    /// Remove the listener for `window`.
    pub fn clear_callback(&mut self, window: WindowId) {
        if let Some(entry) = self.windows.get_mut(&window) {
            entry.listener = None;
        }
    }

    /// Whether `window` has a listener installed.
    pub fn has_callback(&self, window: WindowId) -> bool {
        self.windows
            .get(&window)
            .is_some_and(|e| e.listener.is_some())
    }

    /// Apply `params` to `window`'s live values.
    ///
    /// The listener fires once per field that changed, in
    /// [`WindowParameter::ALL`] order, with the stored (clamped) value.
    /// Returns the changed parameters.
    pub fn set_values(
        &mut self,
        window: WindowId,
        params: &WindowParameters,
    ) -> Vec<WindowParameter> {
        let entry = self.entry(window);
        let mut changed = Vec::new();
        for param in WindowParameter::ALL {
            if entry.live.set(param, params.get(param)) {
                changed.push(param);
                let value = entry.live.get(param);
                if let Some(listener) = entry.listener.as_mut() {
                    listener(param, value);
                }
            }
        }
        if !changed.is_empty() {
            tracing::trace!(%window, changed = changed.len(), "window parameters updated");
        }
        changed
    }

    /// Set a single parameter; see [`set_values`](Self::set_values).
    pub fn set_value(&mut self, window: WindowId, param: WindowParameter, value: f32) -> bool {
        let params = self.values(window).with(param, value);
        !self.set_values(window, &params).is_empty()
    }

    /// Snapshot `window`'s live values.
    pub fn save(&mut self, window: WindowId) {
        let entry = self.entry(window);
        entry.saved = entry.live;
        tracing::debug!(%window, "window parameters saved");
    }

    /// Revert `window` to its snapshot, notifying every reverted field.
    pub fn restore(&mut self, window: WindowId) -> Vec<WindowParameter> {
        let saved = self.entry(window).saved;
        let reverted = self.set_values(window, &saved);
        tracing::debug!(%window, reverted = reverted.len(), "window parameters restored");
        reverted
    }

    /// Live values of `window`; windows never touched report the initial
    /// values.
    pub fn values(&self, window: WindowId) -> WindowParameters {
        self.windows
            .get(&window)
            .map_or(self.initial, |e| e.live)
    }

    /// Snapshot of `window`.
    pub fn saved(&self, window: WindowId) -> WindowParameters {
        self.windows
            .get(&window)
            .map_or(self.initial, |e| e.saved)
    }

    /// Forget `window` and drop its listener. Returns its last live values.
    pub fn remove(&mut self, window: WindowId) -> Option<WindowParameters> {
        self.windows.remove(&window).map(|e| e.live)
    }

    /// Number of windows with state.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window has state.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<(WindowParameter, f32)>>>;

    fn recorder(registry: &mut WindowRegistry, window: WindowId) -> Calls {
        let calls: Calls = Arc::default();
        let sink = Arc::clone(&calls);
        registry.set_callback(window, move |p, v| sink.lock().unwrap().push((p, v)));
        calls
    }

    const W: WindowId = WindowId(1);

    #[test]
    fn untouched_window_reports_initial_values() {
        let registry = WindowRegistry::new();
        assert_eq!(registry.values(W), WindowParameters::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn set_values_fires_once_per_changed_field() {
        let mut registry = WindowRegistry::new();
        let calls = recorder(&mut registry, W);

        let params = WindowParameters::default()
            .with(WindowParameter::CableTension, 0.8)
            .with(WindowParameter::HaloBrightness, 0.0);
        let changed = registry.set_values(W, &params);

        assert_eq!(
            changed,
            vec![WindowParameter::CableTension, WindowParameter::HaloBrightness]
        );
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                (WindowParameter::CableTension, 0.8),
                (WindowParameter::HaloBrightness, 0.0),
            ]
        );

        registry.set_values(W, &params);
        assert_eq!(calls.lock().unwrap().len(), 2, "no change, no call");
    }

    #[test]
    fn listener_receives_clamped_value() {
        let mut registry = WindowRegistry::new();
        let calls = recorder(&mut registry, W);
        let params = WindowParameters {
            rack_brightness: 0.3,
            cable_opacity: 7.0,
            ..WindowParameters::default()
        };
        registry.set_values(W, &params);
        assert!(calls
            .lock()
            .unwrap()
            .contains(&(WindowParameter::CableOpacity, 1.0)));
    }

    #[test]
    fn set_callback_replaces_previous_listener() {
        let mut registry = WindowRegistry::new();
        let first = recorder(&mut registry, W);
        let second = recorder(&mut registry, W);

        registry.set_value(W, WindowParameter::CableOpacity, 0.1);
        assert!(first.lock().unwrap().is_empty());
        assert_eq!(second.lock().unwrap().len(), 1);
    }

    #[test]
    fn cleared_callback_still_updates_values() {
        let mut registry = WindowRegistry::new();
        let calls = recorder(&mut registry, W);
        registry.clear_callback(W);
        assert!(!registry.has_callback(W));

        assert!(registry.set_value(W, WindowParameter::CableTension, 0.0));
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(registry.values(W).cable_tension, 0.0);
    }

    #[test]
    fn restore_after_save_reverts_and_notifies() {
        let mut registry = WindowRegistry::new();
        registry.set_value(W, WindowParameter::RackBrightness, 0.6);
        registry.save(W);

        registry.set_value(W, WindowParameter::RackBrightness, 0.2);
        registry.set_value(W, WindowParameter::CableOpacity, 0.9);
        let calls = recorder(&mut registry, W);

        let reverted = registry.restore(W);
        assert_eq!(
            reverted,
            vec![WindowParameter::CableOpacity, WindowParameter::RackBrightness]
        );
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                (WindowParameter::CableOpacity, 0.5),
                (WindowParameter::RackBrightness, 0.6),
            ]
        );
        assert_eq!(registry.values(W), registry.saved(W));
    }

    #[test]
    fn restore_without_save_returns_to_initial() {
        let initial = WindowParameters::default().with(WindowParameter::HaloBrightness, 0.75);
        let mut registry = WindowRegistry::with_initial(initial);
        registry.set_value(W, WindowParameter::HaloBrightness, 0.1);
        registry.restore(W);
        assert_eq!(registry.values(W), initial);
    }

    #[test]
    fn windows_are_independent() {
        let mut registry = WindowRegistry::new();
        let other = WindowId(2);
        let calls = recorder(&mut registry, other);

        registry.set_value(W, WindowParameter::CableTension, 0.9);
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(registry.values(other), WindowParameters::default());
    }

    #[test]
    fn remove_forgets_state() {
        let mut registry = WindowRegistry::new();
        registry.set_value(W, WindowParameter::CableTension, 0.9);
        let last = registry.remove(W).unwrap();
        assert_eq!(last.cable_tension, 0.9);
        assert_eq!(registry.values(W), WindowParameters::default());
        assert!(registry.remove(W).is_none());
    }
}
