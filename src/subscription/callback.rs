// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for lifecycle observers.
//!
//! This module provides the core types for managing observer callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::config::DeviceConfig;
use crate::indicator::{StatusIndication, indication_for};
use crate::state::{MaintenanceKind, OperationalState, Transition, TransitionStatus};

/// Unique identifier for a subscription.
///
/// This ID is returned when creating a subscription and can be used to
/// unsubscribe later. IDs are unique within a registry's lifetime.
///
/// # Examples
///
/// ```
/// use aqmon::subscription::CallbackRegistry;
///
/// let registry = CallbackRegistry::new();
/// let id = registry.on_indication_changed(|_| {});
/// assert!(registry.unsubscribe(id));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type StateChangedCallback = Arc<dyn Fn(&Transition) + Send + Sync>;

type IndicationCallback = Arc<dyn Fn(StatusIndication) + Send + Sync>;

type MaintenanceCallback = Arc<dyn Fn(MaintenanceKind) + Send + Sync>;

/// Receives the state the signal was rejected in and the raw signal text.
type SignalRejectedCallback = Arc<dyn Fn(OperationalState, &str) + Send + Sync>;

type ConfigChangedCallback = Arc<dyn Fn(&DeviceConfig) + Send + Sync>;

/// Registry for display, LED and network observers.
///
/// Callbacks are synchronous and fire-and-forget. They are invoked on the
/// thread that handled the signal, in arbitrary order within one kind.
/// The registry lock is not held while a callback runs, so callbacks may
/// subscribe or unsubscribe.
///
/// # Thread Safety
///
/// The registry is fully thread-safe. Callbacks are wrapped in `Arc` so they
/// can be cloned cheaply.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    state_changed_callbacks: RwLock<HashMap<SubscriptionId, StateChangedCallback>>,
    indication_callbacks: RwLock<HashMap<SubscriptionId, IndicationCallback>>,
    maintenance_callbacks: RwLock<HashMap<SubscriptionId, MaintenanceCallback>>,
    signal_rejected_callbacks: RwLock<HashMap<SubscriptionId, SignalRejectedCallback>>,
    config_changed_callbacks: RwLock<HashMap<SubscriptionId, ConfigChangedCallback>>,
}

fn snapshot<T: Clone>(callbacks: &RwLock<HashMap<SubscriptionId, T>>) -> Vec<T> {
    callbacks.read().values().cloned().collect()
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            state_changed_callbacks: RwLock::new(HashMap::new()),
            indication_callbacks: RwLock::new(HashMap::new()),
            maintenance_callbacks: RwLock::new(HashMap::new()),
            signal_rejected_callbacks: RwLock::new(HashMap::new()),
            config_changed_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for applied state transitions.
    pub fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Transition) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_changed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for status indication changes.
    ///
    /// Fires only when a transition changes the indication, so two setup
    /// states sharing an indication do not trigger a redraw.
    pub fn on_indication_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(StatusIndication) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.indication_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for maintenance mode entry.
    pub fn on_maintenance_entered<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(MaintenanceKind) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.maintenance_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for rejected or malformed signals.
    ///
    /// The callback receives the current state and the signal as received.
    pub fn on_signal_rejected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(OperationalState, &str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.signal_rejected_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for accepted configuration changes.
    pub fn on_config_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DeviceConfig) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.config_changed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state_changed_callbacks.write().remove(&id).is_some()
            || self.indication_callbacks.write().remove(&id).is_some()
            || self.maintenance_callbacks.write().remove(&id).is_some()
            || self.signal_rejected_callbacks.write().remove(&id).is_some()
            || self.config_changed_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.state_changed_callbacks.write().clear();
        self.indication_callbacks.write().clear();
        self.maintenance_callbacks.write().clear();
        self.signal_rejected_callbacks.write().clear();
        self.config_changed_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Dispatches a transition to the relevant callbacks.
    ///
    /// - `Applied`: state-changed callbacks, then indication callbacks if the
    ///   indication changed, then maintenance callbacks if a maintenance
    ///   mode was entered.
    /// - `Rejected`: signal-rejected callbacks.
    /// - `Unchanged`: nothing.
    pub fn dispatch(&self, transition: &Transition) {
        match transition.status {
            TransitionStatus::Applied => {
                for callback in snapshot(&self.state_changed_callbacks) {
                    callback(transition);
                }

                let indication = indication_for(transition.to);
                if indication != indication_for(transition.from) {
                    for callback in snapshot(&self.indication_callbacks) {
                        callback(indication);
                    }
                }

                if let Some(kind) = transition.to.maintenance_kind() {
                    for callback in snapshot(&self.maintenance_callbacks) {
                        callback(kind);
                    }
                }
            }
            TransitionStatus::Rejected => {
                self.dispatch_signal_rejected(transition.from, &transition.signal.to_string());
            }
            TransitionStatus::Unchanged => {}
        }
    }

    /// Dispatches a rejected or unparseable signal.
    pub fn dispatch_signal_rejected(&self, state: OperationalState, signal: &str) {
        for callback in snapshot(&self.signal_rejected_callbacks) {
            callback(state, signal);
        }
    }

    /// Dispatches an accepted configuration change.
    pub fn dispatch_config_changed(&self, config: &DeviceConfig) {
        for callback in snapshot(&self.config_changed_callbacks) {
            callback(config);
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.state_changed_callbacks.read().len()
            + self.indication_callbacks.read().len()
            + self.maintenance_callbacks.read().len()
            + self.signal_rejected_callbacks.read().len()
            + self.config_changed_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
