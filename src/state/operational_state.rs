// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operational states of the device lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The single authoritative mode the device is in.
///
/// Ordinals follow declaration order and are stable, so a persisted
/// last-known-good state can be restored with [`OperationalState::from_u8`].
///
/// # Examples
///
/// ```
/// use aqmon::state::{OperationalState, StateFamily};
///
/// let state = OperationalState::WiFiOkServerConnectFailed;
/// assert_eq!(state.family(), StateFamily::SetupException);
/// assert_eq!(state.retry_target(), Some(OperationalState::WiFiOkServerConnecting));
/// assert_eq!(OperationalState::from_u8(16).unwrap(), OperationalState::Normal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OperationalState {
    /// Wi-Fi manager running, waiting for a phone to join the portal.
    #[serde(rename = "wifi-manager-mode")]
    WiFiManagerMode = 0,
    /// A phone is connected to the configuration portal.
    #[serde(rename = "wifi-manager-portal-active")]
    WiFiManagerPortalActive = 1,
    /// Credentials submitted, associating with the access point.
    #[serde(rename = "wifi-manager-sta-connecting")]
    WiFiManagerStaConnecting = 2,
    /// Associated with the access point.
    #[serde(rename = "wifi-manager-sta-connected")]
    WiFiManagerStaConnected = 3,
    /// Probing server reachability.
    #[serde(rename = "wifi-ok-server-connecting")]
    WiFiOkServerConnecting = 4,
    /// Server reachable, waiting for configuration validation.
    #[serde(rename = "wifi-ok-server-connected")]
    WiFiOkServerConnected = 5,

    /// Association failed (wrong password, unsupported security, ...).
    #[serde(rename = "wifi-manager-connect-failed")]
    WiFiManagerConnectFailed = 6,
    /// Wi-Fi works but the server is unreachable (firewall, allow-listing).
    #[serde(rename = "wifi-ok-server-connect-failed")]
    WiFiOkServerConnectFailed = 7,
    /// Server reachable but the sensor is not configured correctly.
    #[serde(rename = "wifi-ok-server-ok-sensor-config-failed")]
    WiFiOkServerOkSensorConfigFailed = 8,

    /// Wi-Fi association lost during operation.
    #[serde(rename = "wifi-lost")]
    WiFiLost = 9,
    /// Wi-Fi up but the server became unreachable during operation.
    #[serde(rename = "server-lost")]
    ServerLost = 10,
    /// The server reports a configuration issue to fix on its side.
    #[serde(rename = "sensor-config-failed")]
    SensorConfigFailed = 11,
    /// CO2 sensor calibration in progress.
    #[serde(rename = "co2-calibration")]
    Co2Calibration = 12,
    /// LED bar self-test requested by the user.
    #[serde(rename = "led-bar-test")]
    LedBarTest = 13,
    /// LED bar self-test run at power-up.
    #[serde(rename = "led-bar-power-up-test")]
    LedBarPowerUpTest = 14,
    /// Firmware update in progress.
    #[serde(rename = "ota-perform")]
    OtaPerform = 15,
    /// Monitoring: LED shows the working state, display shows the dashboard.
    #[serde(rename = "normal")]
    Normal = 16,
}

/// The three disjoint families of [`OperationalState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFamily {
    /// First-time provisioning steps.
    Setup,
    /// A provisioning step failed.
    SetupException,
    /// Runtime operation, faults and maintenance modes.
    SteadyState,
}

impl OperationalState {
    /// Every state, in ordinal order.
    pub const ALL: [Self; 17] = [
        Self::WiFiManagerMode,
        Self::WiFiManagerPortalActive,
        Self::WiFiManagerStaConnecting,
        Self::WiFiManagerStaConnected,
        Self::WiFiOkServerConnecting,
        Self::WiFiOkServerConnected,
        Self::WiFiManagerConnectFailed,
        Self::WiFiOkServerConnectFailed,
        Self::WiFiOkServerOkSensorConfigFailed,
        Self::WiFiLost,
        Self::ServerLost,
        Self::SensorConfigFailed,
        Self::Co2Calibration,
        Self::LedBarTest,
        Self::LedBarPowerUpTest,
        Self::OtaPerform,
        Self::Normal,
    ];

    /// Returns the stable name of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WiFiManagerMode => "wifi-manager-mode",
            Self::WiFiManagerPortalActive => "wifi-manager-portal-active",
            Self::WiFiManagerStaConnecting => "wifi-manager-sta-connecting",
            Self::WiFiManagerStaConnected => "wifi-manager-sta-connected",
            Self::WiFiOkServerConnecting => "wifi-ok-server-connecting",
            Self::WiFiOkServerConnected => "wifi-ok-server-connected",
            Self::WiFiManagerConnectFailed => "wifi-manager-connect-failed",
            Self::WiFiOkServerConnectFailed => "wifi-ok-server-connect-failed",
            Self::WiFiOkServerOkSensorConfigFailed => "wifi-ok-server-ok-sensor-config-failed",
            Self::WiFiLost => "wifi-lost",
            Self::ServerLost => "server-lost",
            Self::SensorConfigFailed => "sensor-config-failed",
            Self::Co2Calibration => "co2-calibration",
            Self::LedBarTest => "led-bar-test",
            Self::LedBarPowerUpTest => "led-bar-power-up-test",
            Self::OtaPerform => "ota-perform",
            Self::Normal => "normal",
        }
    }

    /// Returns the persisted ordinal.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Decodes a persisted ordinal.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownOrdinal` if `value` is out of range.
    pub fn from_u8(value: u8) -> Result<Self, ValueError> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ValueError::UnknownOrdinal {
                kind: "operational state",
                value,
            })
    }

    /// Returns the family this state belongs to.
    #[must_use]
    pub const fn family(&self) -> StateFamily {
        match self {
            Self::WiFiManagerMode
            | Self::WiFiManagerPortalActive
            | Self::WiFiManagerStaConnecting
            | Self::WiFiManagerStaConnected
            | Self::WiFiOkServerConnecting
            | Self::WiFiOkServerConnected => StateFamily::Setup,
            Self::WiFiManagerConnectFailed
            | Self::WiFiOkServerConnectFailed
            | Self::WiFiOkServerOkSensorConfigFailed => StateFamily::SetupException,
            Self::WiFiLost
            | Self::ServerLost
            | Self::SensorConfigFailed
            | Self::Co2Calibration
            | Self::LedBarTest
            | Self::LedBarPowerUpTest
            | Self::OtaPerform
            | Self::Normal => StateFamily::SteadyState,
        }
    }

    /// Returns `true` for steady-state family members.
    #[must_use]
    pub const fn is_steady(&self) -> bool {
        matches!(self.family(), StateFamily::SteadyState)
    }

    /// Returns `true` for runtime connectivity/configuration faults.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::WiFiLost | Self::ServerLost | Self::SensorConfigFailed
        )
    }

    /// Returns `true` for calibration, LED tests and OTA.
    #[must_use]
    pub const fn is_maintenance(&self) -> bool {
        self.maintenance_kind().is_some()
    }

    /// Returns the maintenance mode this state represents, if any.
    #[must_use]
    pub const fn maintenance_kind(&self) -> Option<MaintenanceKind> {
        match self {
            Self::Co2Calibration => Some(MaintenanceKind::Co2Calibration),
            Self::LedBarTest => Some(MaintenanceKind::LedBarTest),
            Self::LedBarPowerUpTest => Some(MaintenanceKind::LedBarPowerUpTest),
            Self::OtaPerform => Some(MaintenanceKind::Ota),
            _ => None,
        }
    }

    /// Returns the in-progress state a retry loops back to.
    ///
    /// Only connectivity exceptions are retried automatically; a sensor
    /// configuration failure waits for corrected input instead.
    #[must_use]
    pub const fn retry_target(&self) -> Option<Self> {
        match self {
            Self::WiFiManagerConnectFailed => Some(Self::WiFiManagerStaConnecting),
            Self::WiFiOkServerConnectFailed => Some(Self::WiFiOkServerConnecting),
            _ => None,
        }
    }

    /// Returns `true` if renderers show live measurements in this state.
    #[must_use]
    pub const fn displays_live_data(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl fmt::Display for OperationalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationalState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s.trim())
            .ok_or_else(|| ValueError::UnknownName {
                kind: "operational state",
                value: s.to_string(),
            })
    }
}

/// A maintenance mode that preempts normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceKind {
    /// CO2 sensor calibration.
    #[serde(rename = "calibration")]
    Co2Calibration,
    /// LED bar self-test requested by the user.
    #[serde(rename = "led-test")]
    LedBarTest,
    /// LED bar self-test at power-up.
    #[serde(rename = "led-power-up-test")]
    LedBarPowerUpTest,
    /// Firmware update.
    #[serde(rename = "ota")]
    Ota,
}

impl MaintenanceKind {
    /// Every maintenance kind.
    pub const ALL: [Self; 4] = [
        Self::Co2Calibration,
        Self::LedBarTest,
        Self::LedBarPowerUpTest,
        Self::Ota,
    ];

    /// Returns the state entered for this maintenance mode.
    #[must_use]
    pub const fn state(&self) -> OperationalState {
        match self {
            Self::Co2Calibration => OperationalState::Co2Calibration,
            Self::LedBarTest => OperationalState::LedBarTest,
            Self::LedBarPowerUpTest => OperationalState::LedBarPowerUpTest,
            Self::Ota => OperationalState::OtaPerform,
        }
    }

    /// Returns the name used in signal wire names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Co2Calibration => "calibration",
            Self::LedBarTest => "led-test",
            Self::LedBarPowerUpTest => "led-power-up-test",
            Self::Ota => "ota",
        }
    }
}

impl fmt::Display for MaintenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_declaration_order() {
        for (position, state) in OperationalState::ALL.iter().enumerate() {
            assert_eq!(usize::from(state.as_u8()), position);
            assert_eq!(OperationalState::from_u8(state.as_u8()).unwrap(), *state);
        }
        assert!(OperationalState::from_u8(17).is_err());
    }

    #[test]
    fn every_state_belongs_to_exactly_one_family() {
        let count = |family| {
            OperationalState::ALL
                .iter()
                .filter(|state| state.family() == family)
                .count()
        };
        assert_eq!(count(StateFamily::Setup), 6);
        assert_eq!(count(StateFamily::SetupException), 3);
        assert_eq!(count(StateFamily::SteadyState), 8);
    }

    #[test]
    fn maintenance_kinds_map_both_ways() {
        for kind in MaintenanceKind::ALL {
            assert_eq!(kind.state().maintenance_kind(), Some(kind));
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.as_str())
            );
            assert!(kind.state().is_steady());
        }
        assert_eq!(
            OperationalState::ALL
                .iter()
                .filter(|state| state.is_maintenance())
                .count(),
            4
        );
    }

    #[test]
    fn faults_are_steady_and_not_maintenance() {
        for state in OperationalState::ALL.into_iter().filter(OperationalState::is_fault) {
            assert!(state.is_steady());
            assert!(!state.is_maintenance());
        }
    }

    #[test]
    fn only_connectivity_exceptions_retry() {
        assert_eq!(
            OperationalState::WiFiManagerConnectFailed.retry_target(),
            Some(OperationalState::WiFiManagerStaConnecting)
        );
        assert_eq!(
            OperationalState::WiFiOkServerOkSensorConfigFailed.retry_target(),
            None
        );
        assert_eq!(OperationalState::WiFiLost.retry_target(), None);
    }

    #[test]
    fn names_round_trip() {
        for state in OperationalState::ALL {
            assert_eq!(state.as_str().parse::<OperationalState>().unwrap(), state);
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
        }
    }

    #[test]
    fn only_normal_displays_live_data() {
        let live: Vec<_> = OperationalState::ALL
            .into_iter()
            .filter(OperationalState::displays_live_data)
            .collect();
        assert_eq!(live, vec![OperationalState::Normal]);
    }
}
