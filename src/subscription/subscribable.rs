// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that accept lifecycle observers.

use crate::config::DeviceConfig;
use crate::indicator::StatusIndication;
use crate::state::{MaintenanceKind, OperationalState, Transition};
use crate::subscription::SubscriptionId;

/// Trait for types that support observer subscriptions.
///
/// Display, LED and network collaborators register here instead of polling.
///
/// # Examples
///
/// ```
/// use aqmon::controller::DeviceController;
/// use aqmon::state::Signal;
/// use aqmon::subscription::Subscribable;
/// use aqmon::types::FirmwareMode;
///
/// let controller = DeviceController::new(FirmwareMode::I9Psl);
///
/// let sub_id = controller.on_state_changed(|transition| {
///     println!("{} -> {}", transition.from, transition.to);
/// });
///
/// controller.handle_signal(Signal::PortalActive);
/// controller.unsubscribe(sub_id);
/// ```
pub trait Subscribable {
    /// Subscribes to applied state transitions.
    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Transition) + Send + Sync + 'static;

    /// Subscribes to status indication changes.
    ///
    /// The callback receives the new indication.
    fn on_indication_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(StatusIndication) + Send + Sync + 'static;

    /// Subscribes to maintenance mode entry.
    fn on_maintenance_entered<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(MaintenanceKind) + Send + Sync + 'static;

    /// Subscribes to rejected and malformed signals.
    ///
    /// The callback receives the state at the time and the signal text.
    fn on_signal_rejected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(OperationalState, &str) + Send + Sync + 'static;

    /// Subscribes to accepted configuration changes.
    fn on_config_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DeviceConfig) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
