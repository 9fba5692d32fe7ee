// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware mode registry.
//!
//! Maps each [`FirmwareMode`] to the fixed hardware it ships with: the
//! installed sensors and whether the unit has an LED bar or a display. The
//! table is built at compile time and has no mutation path.
//!
//! # Examples
//!
//! ```
//! use aqmon::capabilities::{name_of, sensor_set_for};
//! use aqmon::types::{FirmwareMode, Sensor};
//!
//! assert_eq!(name_of(FirmwareMode::O1Ppt), "O-1PPT");
//! let sensors = sensor_set_for(FirmwareMode::O1Ppt);
//! assert!(sensors.contains(Sensor::Pms5003tSecondary));
//! assert!(!sensors.contains(Sensor::SenseairS8));
//! ```

use crate::types::{FirmwareMode, Sensor, SensorSet};

/// Hardware capabilities of a firmware mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Installed sensors.
    pub sensors: SensorSet,

    /// Has an RGB LED bar.
    pub led_bar: bool,

    /// Has a display.
    pub display: bool,
}

impl Capabilities {
    const fn new(sensors: SensorSet, led_bar: bool, display: bool) -> Self {
        Self {
            sensors,
            led_bar,
            display,
        }
    }

    /// Returns `true` if the unit measures CO2.
    #[must_use]
    pub const fn has_co2(&self) -> bool {
        self.sensors.contains(Sensor::SenseairS8)
    }

    /// Returns `true` if the unit measures TVOC/NOx.
    #[must_use]
    pub const fn has_tvoc(&self) -> bool {
        self.sensors.contains(Sensor::Sgp41)
    }

    /// Returns `true` for Open Air units.
    ///
    /// Every outdoor model measures PM through PMS5003T channels.
    #[must_use]
    pub const fn is_outdoor(&self) -> bool {
        self.sensors.has_pms5003t()
    }

    /// Returns `true` if the unit measures temperature and humidity.
    ///
    /// PMS5003T channels report temperature/humidity alongside PM.
    #[must_use]
    pub const fn has_temp_hum(&self) -> bool {
        self.sensors.contains(Sensor::Sht4x)
            || self.sensors.contains(Sensor::Sht3x)
            || self.sensors.has_pms5003t()
    }
}

const PMS: SensorSet = SensorSet::EMPTY.with(Sensor::Pms5003);
const PMS_T: SensorSet = SensorSet::EMPTY.with(Sensor::Pms5003t);
const PMS_T_DUAL: SensorSet = PMS_T.with(Sensor::Pms5003tSecondary);

/// Registry table, indexed by [`FirmwareMode::index`].
const REGISTRY: [Capabilities; FirmwareMode::ALL.len()] = [
    // I-9PSL
    Capabilities::new(
        PMS.with(Sensor::SenseairS8)
            .with(Sensor::Sgp41)
            .with(Sensor::Sht4x),
        true,
        true,
    ),
    // O-1PST
    Capabilities::new(
        PMS_T.with(Sensor::SenseairS8).with(Sensor::Sgp41),
        false,
        false,
    ),
    // O-1PPT
    Capabilities::new(PMS_T_DUAL.with(Sensor::Sgp41), false, false),
    // O-1PP
    Capabilities::new(PMS_T_DUAL, false, false),
    // O-1PS
    Capabilities::new(PMS_T.with(Sensor::SenseairS8), false, false),
    // O-1P
    Capabilities::new(PMS_T, false, false),
    // DIY-PRO-I-4.2PS
    Capabilities::new(
        PMS.with(Sensor::SenseairS8)
            .with(Sensor::Sgp41)
            .with(Sensor::Sht4x),
        false,
        true,
    ),
    // DIY-PRO-I-3.3PS
    Capabilities::new(
        PMS.with(Sensor::SenseairS8).with(Sensor::Sht3x),
        false,
        true,
    ),
    // DIY-BASIC-I-4.0PS
    Capabilities::new(
        PMS.with(Sensor::SenseairS8).with(Sensor::Sht4x),
        false,
        true,
    ),
];

/// Returns the capabilities of `mode`.
#[must_use]
pub const fn capabilities_of(mode: FirmwareMode) -> Capabilities {
    REGISTRY[mode.index()]
}

/// Returns the set of sensors installed for `mode`.
#[must_use]
pub const fn sensor_set_for(mode: FirmwareMode) -> SensorSet {
    capabilities_of(mode).sensors
}

/// Returns the human-readable model name of `mode`.
#[must_use]
pub const fn name_of(mode: FirmwareMode) -> &'static str {
    mode.as_str()
}
