// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device controller.
//!
//! [`DeviceController`] is the single accessor for the operational state.
//! It owns the lifecycle machine, the device configuration and the observer
//! channels, and is the one entry point collaborators feed signals and
//! configuration writes through.
//!
//! # Examples
//!
//! ```
//! use aqmon::controller::DeviceController;
//! use aqmon::indicator::{MetricKind, StatusIndication};
//! use aqmon::state::{OperationalState, Signal};
//! use aqmon::types::FirmwareMode;
//!
//! let controller = DeviceController::resume(
//!     FirmwareMode::I9Psl,
//!     Default::default(),
//!     OperationalState::Normal,
//! );
//!
//! let view = controller.render_view();
//! assert_eq!(view.indication, StatusIndication::Live);
//! assert_eq!(view.led_metric, Some(MetricKind::Co2));
//!
//! controller.handle_raw_signal("wifi-lost");
//! let view = controller.render_view();
//! assert_eq!(view.state, OperationalState::WiFiLost);
//! assert_eq!(view.led_metric, None);
//! ```

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::capabilities::{Capabilities, capabilities_of};
use crate::config::{ConfigUpdate, DeviceConfig};
use crate::error::Result;
use crate::event::{EventBus, LifecycleEvent};
use crate::indicator::{MetricKind, StatusIndication, indication_for, led_metric_for};
use crate::state::{LifecycleMachine, MaintenanceKind, OperationalState, Signal, Transition};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::{
    ConfigOrigin, FirmwareMode, PmCorrectionAlgorithm, TempHumCorrectionAlgorithm,
};

/// Everything a display or LED renderer needs for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderView {
    /// Current operational state.
    pub state: OperationalState,
    /// Indication for the state.
    pub indication: StatusIndication,
    /// Metric for the LED bar. `None` outside live-data states, when the bar
    /// is off, or when the unit has no LED bar.
    pub led_metric: Option<MetricKind>,
    /// PM correction in effect.
    pub pm_algorithm: PmCorrectionAlgorithm,
    /// Temperature/humidity correction in effect.
    pub temp_hum_algorithm: TempHumCorrectionAlgorithm,
}

/// Operational-mode controller for one air-quality monitor.
///
/// All methods take `&self`; wrap the controller in an `Arc` to share it
/// between the control loop and renderer or network tasks. Signals must be
/// fed from one control context to keep their arrival order.
pub struct DeviceController {
    firmware_mode: FirmwareMode,
    capabilities: Capabilities,
    machine: Mutex<LifecycleMachine>,
    config: RwLock<DeviceConfig>,
    callbacks: CallbackRegistry,
    events: EventBus,
}

impl DeviceController {
    /// Creates a controller at first boot with the default configuration.
    #[must_use]
    pub fn new(firmware_mode: FirmwareMode) -> Self {
        Self::with_parts(firmware_mode, DeviceConfig::default(), LifecycleMachine::new())
    }

    /// Creates a controller from persisted configuration and the
    /// last-known-good state.
    #[must_use]
    pub fn resume(
        firmware_mode: FirmwareMode,
        config: DeviceConfig,
        state: OperationalState,
    ) -> Self {
        tracing::info!(mode = %firmware_mode, state = %state, "Resuming controller");
        Self::with_parts(firmware_mode, config, LifecycleMachine::resume(state))
    }

    fn with_parts(
        firmware_mode: FirmwareMode,
        config: DeviceConfig,
        machine: LifecycleMachine,
    ) -> Self {
        Self {
            firmware_mode,
            capabilities: capabilities_of(firmware_mode),
            machine: Mutex::new(machine),
            config: RwLock::new(config),
            callbacks: CallbackRegistry::new(),
            events: EventBus::new(),
        }
    }

    /// Returns the firmware mode of this unit.
    #[must_use]
    pub fn firmware_mode(&self) -> FirmwareMode {
        self.firmware_mode
    }

    /// Returns the hardware capabilities of this unit.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns the current operational state.
    #[must_use]
    pub fn current_state(&self) -> OperationalState {
        self.machine.lock().state()
    }

    /// Returns the state restored when the active maintenance mode ends.
    #[must_use]
    pub fn return_point(&self) -> Option<OperationalState> {
        self.machine.lock().return_point()
    }

    /// Returns a snapshot of the configuration.
    #[must_use]
    pub fn config(&self) -> DeviceConfig {
        self.config.read().clone()
    }

    /// Returns the callback registry.
    #[must_use]
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Subscribes to broadcast lifecycle events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.events.subscribe()
    }

    /// Advances the lifecycle machine and returns the new state.
    ///
    /// Never fails. Rejected signals leave the state unchanged and are
    /// reported to observers.
    pub fn handle_signal(&self, signal: Signal) -> OperationalState {
        if let Some(kind) = self.unsupported_maintenance(signal) {
            let state = self.current_state();
            tracing::warn!(
                mode = %self.firmware_mode,
                %signal,
                "{kind} requested on a unit without an LED bar"
            );
            self.report_rejected(state, &signal.to_string());
            return state;
        }

        let transition = self.machine.lock().handle(signal);
        self.notify(&transition);
        transition.to
    }

    /// Parses a signal by its wire name and handles it.
    ///
    /// Malformed input is logged, reported to observers and leaves the state
    /// unchanged.
    pub fn handle_raw_signal(&self, raw: &str) -> OperationalState {
        match raw.parse::<Signal>() {
            Ok(signal) => self.handle_signal(signal),
            Err(e) => {
                let state = self.current_state();
                tracing::warn!(state = %state, error = %e, "Malformed signal ignored");
                self.report_rejected(state, raw);
                state
            }
        }
    }

    /// Applies a configuration write from `origin`.
    ///
    /// Returns `true` if the configuration changed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the origin may not write or the update is
    /// invalid for this firmware mode. The configuration is left untouched.
    pub fn apply_config_update(&self, origin: ConfigOrigin, update: &ConfigUpdate) -> Result<bool> {
        let changed = {
            let mut config = self.config.write();
            if config.apply_update(origin, update, self.firmware_mode)? {
                Some(config.clone())
            } else {
                None
            }
        };

        match changed {
            Some(config) => {
                self.callbacks.dispatch_config_changed(&config);
                self.events.publish(LifecycleEvent::config_changed(config));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Parses a JSON configuration document and applies it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the document is malformed or the write is
    /// refused.
    pub fn apply_config_json(&self, origin: ConfigOrigin, json: &str) -> Result<bool> {
        let update = ConfigUpdate::from_json(json)?;
        self.apply_config_update(origin, &update)
    }

    /// Resolves what renderers show for the current state and configuration.
    #[must_use]
    pub fn render_view(&self) -> RenderView {
        let state = self.current_state();
        let config = self.config.read();

        let led_metric = if self.capabilities.led_bar {
            led_metric_for(state, config.led_bar_mode)
        } else {
            None
        };

        RenderView {
            state,
            indication: indication_for(state),
            led_metric,
            pm_algorithm: config.pm_algorithm(self.firmware_mode),
            temp_hum_algorithm: config.temp_hum_algorithm(self.firmware_mode),
        }
    }

    fn unsupported_maintenance(&self, signal: Signal) -> Option<MaintenanceKind> {
        match signal {
            Signal::MaintenanceStart(
                kind @ (MaintenanceKind::LedBarTest | MaintenanceKind::LedBarPowerUpTest),
            ) if !self.capabilities.led_bar => Some(kind),
            _ => None,
        }
    }

    fn notify(&self, transition: &Transition) {
        self.callbacks.dispatch(transition);
        self.events.publish_transition(transition);
    }

    fn report_rejected(&self, state: OperationalState, signal: &str) {
        self.callbacks.dispatch_signal_rejected(state, signal);
        self.events
            .publish(LifecycleEvent::signal_rejected(state, signal));
    }
}

impl std::fmt::Debug for DeviceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceController")
            .field("firmware_mode", &self.firmware_mode)
            .field("state", &self.current_state())
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

impl Subscribable for DeviceController {
    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Transition) + Send + Sync + 'static,
    {
        self.callbacks.on_state_changed(callback)
    }

    fn on_indication_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(StatusIndication) + Send + Sync + 'static,
    {
        self.callbacks.on_indication_changed(callback)
    }

    fn on_maintenance_entered<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(MaintenanceKind) + Send + Sync + 'static,
    {
        self.callbacks.on_maintenance_entered(callback)
    }

    fn on_signal_rejected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(OperationalState, &str) + Send + Sync + 'static,
    {
        self.callbacks.on_signal_rejected(callback)
    }

    fn on_config_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DeviceConfig) + Send + Sync + 'static,
    {
        self.callbacks.on_config_changed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::error::{ConfigError, Error};
    use crate::types::{ConfigurationControl, LedBarMode};

    fn normal(mode: FirmwareMode) -> DeviceController {
        DeviceController::resume(mode, DeviceConfig::default(), OperationalState::Normal)
    }

    #[test]
    fn new_controller_boots_in_wifi_manager_mode() {
        let controller = DeviceController::new(FirmwareMode::O1Pst);
        assert_eq!(controller.current_state(), OperationalState::WiFiManagerMode);
        assert_eq!(controller.firmware_mode(), FirmwareMode::O1Pst);
        assert!(!controller.capabilities().led_bar);
    }

    #[test]
    fn handle_signal_returns_new_state() {
        let controller = normal(FirmwareMode::I9Psl);
        assert_eq!(
            controller.handle_signal(Signal::ServerLost),
            OperationalState::ServerLost
        );
        assert_eq!(controller.current_state(), OperationalState::ServerLost);
    }

    #[test]
    fn malformed_raw_signal_is_reported() {
        let controller = normal(FirmwareMode::I9Psl);
        let rejected = Arc::new(RwLock::new(Vec::new()));
        let rejected_clone = rejected.clone();
        controller.on_signal_rejected(move |state, signal| {
            rejected_clone.write().push((state, signal.to_string()));
        });

        assert_eq!(controller.handle_raw_signal("reboot"), OperationalState::Normal);
        assert_eq!(
            *rejected.read(),
            vec![(OperationalState::Normal, "reboot".to_string())]
        );
    }

    #[test]
    fn led_test_needs_an_led_bar() {
        let outdoor = normal(FirmwareMode::O1Pp);
        let start = Signal::MaintenanceStart(MaintenanceKind::LedBarTest);
        assert_eq!(outdoor.handle_signal(start), OperationalState::Normal);

        let indoor = normal(FirmwareMode::I9Psl);
        assert_eq!(indoor.handle_signal(start), OperationalState::LedBarTest);
    }

    #[test]
    fn observers_run_after_the_lock_is_released() {
        let controller = Arc::new(normal(FirmwareMode::I9Psl));
        let seen = Arc::new(RwLock::new(None));
        let (inner, seen_clone) = (controller.clone(), seen.clone());
        controller.on_state_changed(move |_| {
            *seen_clone.write() = Some(inner.current_state());
        });

        controller.handle_signal(Signal::WifiLost);
        assert_eq!(*seen.read(), Some(OperationalState::WiFiLost));
    }

    #[test]
    fn render_view_follows_state_and_config() {
        let controller = DeviceController::resume(
            FirmwareMode::I9Psl,
            DeviceConfig::new().with_led_bar_mode(LedBarMode::Pm),
            OperationalState::Normal,
        );
        let view = controller.render_view();
        assert_eq!(view.led_metric, Some(MetricKind::Pm));
        assert_eq!(view.pm_algorithm, PmCorrectionAlgorithm::None);
        assert_eq!(view.temp_hum_algorithm, TempHumCorrectionAlgorithm::None);

        controller.handle_signal(Signal::MaintenanceStart(MaintenanceKind::Co2Calibration));
        let view = controller.render_view();
        assert_eq!(view.indication, StatusIndication::Calibrating);
        assert_eq!(view.led_metric, None);
    }

    #[test]
    fn render_view_without_led_bar() {
        let view = normal(FirmwareMode::O1Pst).render_view();
        assert_eq!(view.led_metric, None);
        assert_eq!(view.pm_algorithm, PmCorrectionAlgorithm::Epa2021);
        assert_eq!(
            view.temp_hum_algorithm,
            TempHumCorrectionAlgorithm::AgPms5003t2024
        );
    }

    #[test]
    fn config_update_notifies_once_per_change() {
        let controller = normal(FirmwareMode::I9Psl);
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();
        controller.on_config_changed(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let update = ConfigUpdate::new().with_led_bar_mode(LedBarMode::Off);
        assert!(controller.apply_config_update(ConfigOrigin::Cloud, &update).unwrap());
        assert!(!controller.apply_config_update(ConfigOrigin::Cloud, &update).unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(controller.config().led_bar_mode, LedBarMode::Off);
    }

    #[test]
    fn refused_config_update_is_an_error() {
        let controller = DeviceController::resume(
            FirmwareMode::I9Psl,
            DeviceConfig::new().with_configuration_control(ConfigurationControl::Local),
            OperationalState::Normal,
        );
        let err = controller
            .apply_config_json(ConfigOrigin::Cloud, r#"{"ledBarMode": "off"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::WriteNotAllowed { .. })
        ));
        assert_eq!(controller.config().led_bar_mode, LedBarMode::Co2);
    }

    #[tokio::test]
    async fn events_are_broadcast() {
        let controller = normal(FirmwareMode::I9Psl);
        let mut rx = controller.subscribe();

        controller.handle_signal(Signal::WifiLost);
        controller.handle_signal(Signal::WifiLost);
        controller.handle_signal(Signal::PortalActive);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.state(), Some(OperationalState::WiFiLost));
        assert!(first.is_state_change());

        let second = rx.recv().await.unwrap();
        assert!(second.is_rejection());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn debug_shows_state() {
        let debug = format!("{:?}", normal(FirmwareMode::I42Ps));
        assert!(debug.contains("DeviceController"));
        assert!(debug.contains("Normal"));
    }
}
