// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LED bar configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Which quantity, if any, the RGB LED bar visualizes during normal operation.
///
/// The mode is independent of the lifecycle state and persists across
/// transitions.
///
/// # Examples
///
/// ```
/// use aqmon::types::LedBarMode;
///
/// assert_eq!(LedBarMode::default(), LedBarMode::Co2);
/// assert_eq!("co2_classic".parse::<LedBarMode>().unwrap(), LedBarMode::Co2Classic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedBarMode {
    /// LED bar unused.
    Off,
    /// PM2.5 level.
    Pm,
    /// CO2 level, reversed fuel-gauge style.
    #[default]
    Co2,
    /// CO2 level, original pattern.
    Co2Classic,
}

impl LedBarMode {
    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Pm => "pm",
            Self::Co2 => "co2",
            Self::Co2Classic => "co2_classic",
        }
    }
}

impl fmt::Display for LedBarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedBarMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "pm" => Ok(Self::Pm),
            "co2" => Ok(Self::Co2),
            "co2_classic" | "co2classic" => Ok(Self::Co2Classic),
            _ => Err(ValueError::UnknownName {
                kind: "LED bar mode",
                value: s.to_string(),
            }),
        }
    }
}
