// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Signals delivered to the lifecycle state machine by its collaborators.
//!
//! Each signal has a stable kebab-case wire name so collaborators that only
//! speak strings (serial console, cloud commands) can feed the machine
//! through [`Signal::from_str`](std::str::FromStr).
//!
//! | Collaborator        | Signals                                                                  |
//! |---------------------|--------------------------------------------------------------------------|
//! | Wi-Fi manager       | `portal-active`, `sta-connecting`, `sta-connected`, `sta-connect-failed`, `wifi-lost` |
//! | Server reachability | `server-connecting`, `server-connected`, `server-connect-failed`, `server-lost` |
//! | Config validator    | `config-valid`, `config-invalid`                                         |
//! | Retry timer         | `retry`                                                                  |
//! | Maintenance         | `<kind>-start`, `<kind>-complete`, `<kind>-abort`                        |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::MaintenanceKind;
use crate::error::ValueError;

/// An already-resolved event from a collaborator.
///
/// # Examples
///
/// ```
/// use aqmon::state::{MaintenanceKind, Signal};
///
/// assert_eq!("wifi-lost".parse::<Signal>().unwrap(), Signal::WifiLost);
/// assert_eq!(
///     "ota-start".parse::<Signal>().unwrap(),
///     Signal::MaintenanceStart(MaintenanceKind::Ota)
/// );
/// assert_eq!(Signal::MaintenanceComplete(MaintenanceKind::LedBarTest).to_string(), "led-test-complete");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// A phone joined the configuration portal.
    PortalActive,
    /// SSID and password were submitted; association starts.
    StaConnecting,
    /// Association with the access point succeeded.
    StaConnected,
    /// Association failed.
    StaConnectFailed,
    /// Wi-Fi association was lost.
    WifiLost,
    /// A server reachability probe started.
    ServerConnecting,
    /// The server responded.
    ServerConnected,
    /// The server could not be reached during provisioning.
    ServerConnectFailed,
    /// The server became unreachable while Wi-Fi stayed up.
    ServerLost,
    /// Sensor/device configuration validated.
    ConfigValid,
    /// Sensor/device configuration is invalid.
    ConfigInvalid,
    /// Retry timer tick or collaborator-driven retry.
    Retry,
    /// A maintenance mode was requested.
    MaintenanceStart(MaintenanceKind),
    /// A maintenance mode finished.
    MaintenanceComplete(MaintenanceKind),
    /// A maintenance mode was cancelled.
    MaintenanceAbort(MaintenanceKind),
}

impl Signal {
    /// Returns the maintenance kind carried by this signal, if any.
    #[must_use]
    pub const fn maintenance_kind(&self) -> Option<MaintenanceKind> {
        match self {
            Self::MaintenanceStart(kind)
            | Self::MaintenanceComplete(kind)
            | Self::MaintenanceAbort(kind) => Some(*kind),
            _ => None,
        }
    }

    const fn simple_name(&self) -> Option<&'static str> {
        match self {
            Self::PortalActive => Some("portal-active"),
            Self::StaConnecting => Some("sta-connecting"),
            Self::StaConnected => Some("sta-connected"),
            Self::StaConnectFailed => Some("sta-connect-failed"),
            Self::WifiLost => Some("wifi-lost"),
            Self::ServerConnecting => Some("server-connecting"),
            Self::ServerConnected => Some("server-connected"),
            Self::ServerConnectFailed => Some("server-connect-failed"),
            Self::ServerLost => Some("server-lost"),
            Self::ConfigValid => Some("config-valid"),
            Self::ConfigInvalid => Some("config-invalid"),
            Self::Retry => Some("retry"),
            Self::MaintenanceStart(_)
            | Self::MaintenanceComplete(_)
            | Self::MaintenanceAbort(_) => None,
        }
    }

    const SIMPLE: [Self; 12] = [
        Self::PortalActive,
        Self::StaConnecting,
        Self::StaConnected,
        Self::StaConnectFailed,
        Self::WifiLost,
        Self::ServerConnecting,
        Self::ServerConnected,
        Self::ServerConnectFailed,
        Self::ServerLost,
        Self::ConfigValid,
        Self::ConfigInvalid,
        Self::Retry,
    ];
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaintenanceStart(kind) => write!(f, "{kind}-start"),
            Self::MaintenanceComplete(kind) => write!(f, "{kind}-complete"),
            Self::MaintenanceAbort(kind) => write!(f, "{kind}-abort"),
            other => f.write_str(other.simple_name().unwrap_or_default()),
        }
    }
}

impl FromStr for Signal {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        if let Some(signal) = Self::SIMPLE
            .into_iter()
            .find(|signal| signal.simple_name() == Some(name.as_str()))
        {
            return Ok(signal);
        }

        for kind in MaintenanceKind::ALL {
            let Some(action) = name
                .strip_prefix(kind.as_str())
                .and_then(|rest| rest.strip_prefix('-'))
            else {
                continue;
            };
            match action {
                "start" => return Ok(Self::MaintenanceStart(kind)),
                "complete" => return Ok(Self::MaintenanceComplete(kind)),
                "abort" => return Ok(Self::MaintenanceAbort(kind)),
                _ => {}
            }
        }

        Err(ValueError::MalformedSignal(s.to_string()))
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
