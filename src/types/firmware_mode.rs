// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware mode identifiers.
//!
//! A firmware mode names the physical hardware and sensor bundle a build
//! targets. It is fixed for the lifetime of a build; the sensors and
//! capabilities behind each mode live in [`crate::capabilities`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Hardware/sensor bundle targeted by a firmware build.
///
/// # Examples
///
/// ```
/// use aqmon::types::FirmwareMode;
///
/// assert_eq!(FirmwareMode::I9Psl.as_str(), "I-9PSL");
/// assert_eq!("o-1pst".parse::<FirmwareMode>().unwrap(), FirmwareMode::O1Pst);
/// assert!(FirmwareMode::O1Pp.is_outdoor());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FirmwareMode {
    /// ONE indoor monitor: PMS5003, S8, SGP41, SHT4x, LED bar and display.
    #[serde(rename = "I-9PSL")]
    I9Psl,
    /// Open Air outdoor: PMS5003T, S8 and SGP41.
    #[serde(rename = "O-1PST")]
    O1Pst,
    /// Open Air outdoor: two PMS5003T channels and SGP41.
    #[serde(rename = "O-1PPT")]
    O1Ppt,
    /// Open Air outdoor: two PMS5003T channels.
    #[serde(rename = "O-1PP")]
    O1Pp,
    /// Open Air outdoor: PMS5003T and S8.
    #[serde(rename = "O-1PS")]
    O1Ps,
    /// Open Air outdoor: a single PMS5003T.
    #[serde(rename = "O-1P")]
    O1P,
    /// DIY Pro kit, board revision 4.2.
    #[serde(rename = "DIY-PRO-I-4.2PS")]
    I42Ps,
    /// DIY Pro kit, board revision 3.3.
    #[serde(rename = "DIY-PRO-I-3.3PS")]
    I33Ps,
    /// DIY Basic kit, board revision 4.0.
    #[serde(rename = "DIY-BASIC-I-4.0PS")]
    IBasic40Ps,
}

impl FirmwareMode {
    /// Every firmware mode, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::I9Psl,
        Self::O1Pst,
        Self::O1Ppt,
        Self::O1Pp,
        Self::O1Ps,
        Self::O1P,
        Self::I42Ps,
        Self::I33Ps,
        Self::IBasic40Ps,
    ];

    /// Returns the human-readable model name reported to the cloud.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::I9Psl => "I-9PSL",
            Self::O1Pst => "O-1PST",
            Self::O1Ppt => "O-1PPT",
            Self::O1Pp => "O-1PP",
            Self::O1Ps => "O-1PS",
            Self::O1P => "O-1P",
            Self::I42Ps => "DIY-PRO-I-4.2PS",
            Self::I33Ps => "DIY-PRO-I-3.3PS",
            Self::IBasic40Ps => "DIY-BASIC-I-4.0PS",
        }
    }

    /// Returns the position of this mode in [`FirmwareMode::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::I9Psl => 0,
            Self::O1Pst => 1,
            Self::O1Ppt => 2,
            Self::O1Pp => 3,
            Self::O1Ps => 4,
            Self::O1P => 5,
            Self::I42Ps => 6,
            Self::I33Ps => 7,
            Self::IBasic40Ps => 8,
        }
    }

    /// Returns `true` for the outdoor (Open Air) family.
    #[must_use]
    pub const fn is_outdoor(&self) -> bool {
        matches!(
            self,
            Self::O1Pst | Self::O1Ppt | Self::O1Pp | Self::O1Ps | Self::O1P
        )
    }
}

impl fmt::Display for FirmwareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FirmwareMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValueError::UnknownName {
                kind: "firmware mode",
                value: s.to_string(),
            })
    }
}
