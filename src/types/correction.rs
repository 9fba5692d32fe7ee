// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Measurement-correction algorithm identifiers.
//!
//! Both enums carry fixed ordinals. Persisted settings store the ordinal, so
//! variants must never be reordered or renumbered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Formula applied to raw particulate-matter readings.
///
/// `Unknown` means the selector has not been run yet; it is never a valid
/// algorithm to apply.
///
/// # Examples
///
/// ```
/// use aqmon::types::PmCorrectionAlgorithm;
///
/// assert_eq!(PmCorrectionAlgorithm::Epa2021.as_ordinal(), 2);
/// assert_eq!(PmCorrectionAlgorithm::from_ordinal(3).unwrap(), PmCorrectionAlgorithm::SlrCustom);
/// assert_eq!("epa_2021".parse::<PmCorrectionAlgorithm>().unwrap(), PmCorrectionAlgorithm::Epa2021);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PmCorrectionAlgorithm {
    /// Not initialized.
    #[serde(rename = "unknown")]
    Unknown = 0,
    /// Raw readings are reported unchanged.
    #[serde(rename = "none")]
    None = 1,
    /// US EPA 2021 humidity-adjusted PM2.5 correction.
    #[serde(rename = "epa_2021")]
    Epa2021 = 2,
    /// Custom simple linear regression coefficients.
    #[serde(rename = "slr_custom")]
    SlrCustom = 3,
}

impl PmCorrectionAlgorithm {
    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::None => "none",
            Self::Epa2021 => "epa_2021",
            Self::SlrCustom => "slr_custom",
        }
    }

    /// Returns the persisted ordinal.
    #[must_use]
    pub const fn as_ordinal(&self) -> u8 {
        *self as u8
    }

    /// Decodes a persisted ordinal.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownOrdinal` if `value` names no variant.
    pub fn from_ordinal(value: u8) -> Result<Self, ValueError> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::None),
            2 => Ok(Self::Epa2021),
            3 => Ok(Self::SlrCustom),
            _ => Err(ValueError::UnknownOrdinal {
                kind: "PM correction algorithm",
                value,
            }),
        }
    }
}

impl fmt::Display for PmCorrectionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PmCorrectionAlgorithm {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" => Ok(Self::Unknown),
            "none" => Ok(Self::None),
            "epa_2021" => Ok(Self::Epa2021),
            "slr_custom" => Ok(Self::SlrCustom),
            _ => Err(ValueError::UnknownName {
                kind: "PM correction algorithm",
                value: s.to_string(),
            }),
        }
    }
}

/// Formula applied to raw temperature and humidity readings.
///
/// Declaration order is load-bearing; see the module documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum TempHumCorrectionAlgorithm {
    /// Not initialized.
    #[serde(rename = "unknown")]
    Unknown = 0,
    /// Raw readings are reported unchanged.
    #[serde(rename = "none")]
    None = 1,
    /// 2024 compensation for the PMS5003T on-board temperature/humidity cell.
    #[serde(rename = "ag_pms5003t_2024")]
    AgPms5003t2024 = 2,
    /// Custom simple linear regression coefficients.
    #[serde(rename = "slr_custom")]
    SlrCustom = 3,
}

impl TempHumCorrectionAlgorithm {
    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::None => "none",
            Self::AgPms5003t2024 => "ag_pms5003t_2024",
            Self::SlrCustom => "slr_custom",
        }
    }

    /// Returns the persisted ordinal.
    #[must_use]
    pub const fn as_ordinal(&self) -> u8 {
        *self as u8
    }

    /// Decodes a persisted ordinal.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownOrdinal` if `value` names no variant.
    pub fn from_ordinal(value: u8) -> Result<Self, ValueError> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::None),
            2 => Ok(Self::AgPms5003t2024),
            3 => Ok(Self::SlrCustom),
            _ => Err(ValueError::UnknownOrdinal {
                kind: "temperature/humidity correction algorithm",
                value,
            }),
        }
    }
}

impl fmt::Display for TempHumCorrectionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TempHumCorrectionAlgorithm {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" => Ok(Self::Unknown),
            "none" => Ok(Self::None),
            "ag_pms5003t_2024" => Ok(Self::AgPms5003t2024),
            "slr_custom" => Ok(Self::SlrCustom),
            _ => Err(ValueError::UnknownName {
                kind: "temperature/humidity correction algorithm",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pm_ordinals_are_stable() {
        assert_eq!(PmCorrectionAlgorithm::Unknown.as_ordinal(), 0);
        assert_eq!(PmCorrectionAlgorithm::None.as_ordinal(), 1);
        assert_eq!(PmCorrectionAlgorithm::Epa2021.as_ordinal(), 2);
        assert_eq!(PmCorrectionAlgorithm::SlrCustom.as_ordinal(), 3);
    }

    #[test]
    fn temp_hum_ordinals_are_stable() {
        assert_eq!(TempHumCorrectionAlgorithm::Unknown.as_ordinal(), 0);
        assert_eq!(TempHumCorrectionAlgorithm::None.as_ordinal(), 1);
        assert_eq!(TempHumCorrectionAlgorithm::AgPms5003t2024.as_ordinal(), 2);
        assert_eq!(TempHumCorrectionAlgorithm::SlrCustom.as_ordinal(), 3);
        assert!(TempHumCorrectionAlgorithm::Unknown < TempHumCorrectionAlgorithm::SlrCustom);
    }

    #[test]
    fn from_ordinal_rejects_out_of_range() {
        assert_eq!(
            PmCorrectionAlgorithm::from_ordinal(4),
            Err(ValueError::UnknownOrdinal {
                kind: "PM correction algorithm",
                value: 4,
            })
        );
        assert!(TempHumCorrectionAlgorithm::from_ordinal(200).is_err());
    }

    #[test]
    fn ordinal_round_trip() {
        for value in 0..=3 {
            assert_eq!(
                PmCorrectionAlgorithm::from_ordinal(value).unwrap().as_ordinal(),
                value
            );
            assert_eq!(
                TempHumCorrectionAlgorithm::from_ordinal(value).unwrap().as_ordinal(),
                value
            );
        }
    }

    #[test]
    fn serde_uses_config_names() {
        let json = serde_json::to_string(&TempHumCorrectionAlgorithm::AgPms5003t2024).unwrap();
        assert_eq!(json, "\"ag_pms5003t_2024\"");
        let algo: PmCorrectionAlgorithm = serde_json::from_str("\"slr_custom\"").unwrap();
        assert_eq!(algo, PmCorrectionAlgorithm::SlrCustom);
    }

    #[test]
    fn from_str_invalid() {
        assert!("epa_2024".parse::<PmCorrectionAlgorithm>().is_err());
        assert!("ag_2023".parse::<TempHumCorrectionAlgorithm>().is_err());
    }
}
