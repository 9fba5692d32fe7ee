// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LED indicator mode resolver and status indications.
//!
//! Renderers ask two questions each tick:
//!
//! - [`metric_for`] / [`led_metric_for`]: which measurement the LED bar
//!   visualizes, if any. Only states that display live data show a metric.
//! - [`indication_for`]: which [`StatusIndication`] to show for the current
//!   state. Every exception and fault state has its own indication so the
//!   operator can tell "fix Wi-Fi" from "fix server reachability" from
//!   "fix sensor configuration".
//!
//! # Examples
//!
//! ```
//! use aqmon::indicator::{FaultHint, MetricKind, indication_for, led_metric_for};
//! use aqmon::state::OperationalState;
//! use aqmon::types::LedBarMode;
//!
//! assert_eq!(led_metric_for(OperationalState::Normal, LedBarMode::Pm), Some(MetricKind::Pm));
//! assert_eq!(led_metric_for(OperationalState::WiFiLost, LedBarMode::Pm), None);
//!
//! let indication = indication_for(OperationalState::ServerLost);
//! assert_eq!(indication.fault_hint(), Some(FaultHint::FixServerReachability));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::OperationalState;
use crate::types::LedBarMode;

/// Measurement shown on the LED bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// PM2.5 concentration.
    Pm,
    /// CO2 concentration.
    Co2,
    /// CO2 concentration using the classic bar pattern.
    Co2Classic,
}

/// Resolves the metric an LED bar mode visualizes.
///
/// Returns `None` for [`LedBarMode::Off`].
#[must_use]
pub const fn metric_for(mode: LedBarMode) -> Option<MetricKind> {
    match mode {
        LedBarMode::Off => None,
        LedBarMode::Pm => Some(MetricKind::Pm),
        LedBarMode::Co2 => Some(MetricKind::Co2),
        LedBarMode::Co2Classic => Some(MetricKind::Co2Classic),
    }
}

/// Resolves the LED bar metric for the current state.
///
/// The bar shows a measurement only while the state displays live data;
/// otherwise it is owned by the status indication.
#[must_use]
pub const fn led_metric_for(state: OperationalState, mode: LedBarMode) -> Option<MetricKind> {
    if state.displays_live_data() {
        metric_for(mode)
    } else {
        None
    }
}

/// What the operator has to fix to leave a fault indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultHint {
    /// Wi-Fi credentials or coverage.
    FixWifi,
    /// Firewall or allow-listing between the device and the server.
    FixServerReachability,
    /// Sensor or device configuration on the server side.
    FixSensorConfig,
}

/// Indication shown on the LED bar and display for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIndication {
    /// Wi-Fi manager portal is up.
    Provisioning,
    /// Associating with the access point.
    WifiConnecting,
    /// Probing the server.
    ServerConnecting,
    /// Wi-Fi association failed during setup.
    SetupWifiFailed,
    /// Server unreachable during setup.
    SetupServerFailed,
    /// Sensor configuration rejected during setup.
    SetupSensorConfigFailed,
    /// Wi-Fi lost during operation.
    WifiLost,
    /// Server lost during operation.
    ServerLost,
    /// Server reported a configuration problem during operation.
    SensorConfigFailed,
    /// CO2 calibration running.
    Calibrating,
    /// LED bar self-test running.
    LedBarTest,
    /// Firmware update running.
    Updating,
    /// Live measurements.
    Live,
}

impl StatusIndication {
    /// Returns the fault hint for exception and fault indications.
    #[must_use]
    pub const fn fault_hint(&self) -> Option<FaultHint> {
        match self {
            Self::SetupWifiFailed | Self::WifiLost => Some(FaultHint::FixWifi),
            Self::SetupServerFailed | Self::ServerLost => Some(FaultHint::FixServerReachability),
            Self::SetupSensorConfigFailed | Self::SensorConfigFailed => {
                Some(FaultHint::FixSensorConfig)
            }
            _ => None,
        }
    }

    /// Returns `true` if the operator needs to act.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        self.fault_hint().is_some()
    }

    /// Returns the configuration-style name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Provisioning => "provisioning",
            Self::WifiConnecting => "wifi_connecting",
            Self::ServerConnecting => "server_connecting",
            Self::SetupWifiFailed => "setup_wifi_failed",
            Self::SetupServerFailed => "setup_server_failed",
            Self::SetupSensorConfigFailed => "setup_sensor_config_failed",
            Self::WifiLost => "wifi_lost",
            Self::ServerLost => "server_lost",
            Self::SensorConfigFailed => "sensor_config_failed",
            Self::Calibrating => "calibrating",
            Self::LedBarTest => "led_bar_test",
            Self::Updating => "updating",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for StatusIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the indication for `state`.
#[must_use]
pub const fn indication_for(state: OperationalState) -> StatusIndication {
    use OperationalState as S;

    match state {
        S::WiFiManagerMode | S::WiFiManagerPortalActive => StatusIndication::Provisioning,
        S::WiFiManagerStaConnecting | S::WiFiManagerStaConnected => {
            StatusIndication::WifiConnecting
        }
        S::WiFiOkServerConnecting | S::WiFiOkServerConnected => StatusIndication::ServerConnecting,
        S::WiFiManagerConnectFailed => StatusIndication::SetupWifiFailed,
        S::WiFiOkServerConnectFailed => StatusIndication::SetupServerFailed,
        S::WiFiOkServerOkSensorConfigFailed => StatusIndication::SetupSensorConfigFailed,
        S::WiFiLost => StatusIndication::WifiLost,
        S::ServerLost => StatusIndication::ServerLost,
        S::SensorConfigFailed => StatusIndication::SensorConfigFailed,
        S::Co2Calibration => StatusIndication::Calibrating,
        S::LedBarTest | S::LedBarPowerUpTest => StatusIndication::LedBarTest,
        S::OtaPerform => StatusIndication::Updating,
        S::Normal => StatusIndication::Live,
    }
}
