// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor identifiers and sensor sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A physical sensor that a firmware mode may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    /// Plantower PMS5003 particulate-matter sensor.
    Pms5003,
    /// Plantower PMS5003T (PM plus temperature/humidity), first channel.
    Pms5003t,
    /// Second PMS5003T channel on dual-sensor outdoor units.
    Pms5003tSecondary,
    /// Senseair S8 NDIR CO2 sensor.
    SenseairS8,
    /// Sensirion SGP41 TVOC/NOx sensor.
    Sgp41,
    /// Sensirion SHT4x temperature/humidity sensor.
    Sht4x,
    /// Sensirion SHT3x temperature/humidity sensor.
    Sht3x,
}

impl Sensor {
    /// Every sensor identifier.
    pub const ALL: [Self; 7] = [
        Self::Pms5003,
        Self::Pms5003t,
        Self::Pms5003tSecondary,
        Self::SenseairS8,
        Self::Sgp41,
        Self::Sht4x,
        Self::Sht3x,
    ];

    /// Returns the short name of the part.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pms5003 => "PMS5003",
            Self::Pms5003t => "PMS5003T",
            Self::Pms5003tSecondary => "PMS5003T_2",
            Self::SenseairS8 => "S8",
            Self::Sgp41 => "SGP41",
            Self::Sht4x => "SHT4x",
            Self::Sht3x => "SHT3x",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable set of [`Sensor`]s.
///
/// # Examples
///
/// ```
/// use aqmon::types::{Sensor, SensorSet};
///
/// let set = SensorSet::EMPTY.with(Sensor::Pms5003).with(Sensor::SenseairS8);
/// assert!(set.contains(Sensor::SenseairS8));
/// assert!(!set.contains(Sensor::Sgp41));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SensorSet(u8);

impl SensorSet {
    /// The set with no sensors.
    pub const EMPTY: Self = Self(0);

    /// Returns a copy of this set with `sensor` added.
    #[must_use]
    pub const fn with(self, sensor: Sensor) -> Self {
        Self(self.0 | sensor.bit())
    }

    /// Returns `true` if `sensor` is part of the set.
    #[must_use]
    pub const fn contains(&self, sensor: Sensor) -> bool {
        self.0 & sensor.bit() != 0
    }

    /// Returns the number of sensors in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set holds no sensors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if any PMS5003T channel is installed.
    #[must_use]
    pub const fn has_pms5003t(&self) -> bool {
        self.contains(Sensor::Pms5003t) || self.contains(Sensor::Pms5003tSecondary)
    }

    /// Iterates over the sensors in the set.
    pub fn iter(&self) -> impl Iterator<Item = Sensor> + '_ {
        Sensor::ALL.into_iter().filter(|sensor| self.contains(*sensor))
    }
}

impl FromIterator<Sensor> for SensorSet {
    fn from_iter<I: IntoIterator<Item = Sensor>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}
