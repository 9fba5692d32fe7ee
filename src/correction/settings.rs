// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted correction settings and their application to raw readings.

use serde::{Deserialize, Serialize};

use super::formula;
use crate::error::CorrectionError;
use crate::types::{PmCorrectionAlgorithm, TempHumCorrectionAlgorithm};

/// Simple linear regression coefficients: `raw * scaling_factor + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlrCoefficients {
    /// Multiplicative factor.
    pub scaling_factor: f32,
    /// Additive offset.
    pub intercept: f32,
}

impl SlrCoefficients {
    /// Creates a coefficient pair.
    #[must_use]
    pub const fn new(scaling_factor: f32, intercept: f32) -> Self {
        Self {
            scaling_factor,
            intercept,
        }
    }

    /// Applies the regression to `raw`.
    #[must_use]
    pub fn apply(&self, raw: f32) -> f32 {
        raw * self.scaling_factor + self.intercept
    }
}

/// PM correction setting.
///
/// # Examples
///
/// ```
/// use aqmon::correction::{PmCorrection, SlrCoefficients};
///
/// let correction = PmCorrection::slr(SlrCoefficients::new(0.5, 2.0));
/// assert_eq!(correction.apply(10.0, 50.0).unwrap(), 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmCorrection {
    /// Selected algorithm.
    pub algorithm: PmCorrectionAlgorithm,

    /// Coefficients for [`PmCorrectionAlgorithm::SlrCustom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slr: Option<SlrCoefficients>,
}

impl PmCorrection {
    /// Creates a setting without SLR coefficients.
    #[must_use]
    pub const fn new(algorithm: PmCorrectionAlgorithm) -> Self {
        Self {
            algorithm,
            slr: None,
        }
    }

    /// Creates a custom SLR setting.
    #[must_use]
    pub const fn slr(coefficients: SlrCoefficients) -> Self {
        Self {
            algorithm: PmCorrectionAlgorithm::SlrCustom,
            slr: Some(coefficients),
        }
    }

    /// Corrects a raw PM2.5 reading (µg/m³). The result is never negative.
    ///
    /// # Errors
    ///
    /// Returns `CorrectionError::Uninitialized` for `Unknown` and
    /// `CorrectionError::MissingSlrCoefficients` for `SlrCustom` without
    /// coefficients.
    pub fn apply(&self, pm25: f32, relative_humidity: f32) -> Result<f32, CorrectionError> {
        match self.algorithm {
            PmCorrectionAlgorithm::Unknown => Err(CorrectionError::Uninitialized("PM")),
            PmCorrectionAlgorithm::None => Ok(pm25),
            PmCorrectionAlgorithm::Epa2021 => Ok(formula::epa_2021(pm25, relative_humidity)),
            PmCorrectionAlgorithm::SlrCustom => self
                .slr
                .map(|slr| slr.apply(pm25).max(0.0))
                .ok_or(CorrectionError::MissingSlrCoefficients("PM")),
        }
    }
}

/// Temperature/humidity correction setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempHumCorrection {
    /// Selected algorithm.
    pub algorithm: TempHumCorrectionAlgorithm,

    /// Temperature coefficients for [`TempHumCorrectionAlgorithm::SlrCustom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_slr: Option<SlrCoefficients>,

    /// Humidity coefficients for [`TempHumCorrectionAlgorithm::SlrCustom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_slr: Option<SlrCoefficients>,
}

impl TempHumCorrection {
    /// Creates a setting without SLR coefficients.
    #[must_use]
    pub const fn new(algorithm: TempHumCorrectionAlgorithm) -> Self {
        Self {
            algorithm,
            temperature_slr: None,
            humidity_slr: None,
        }
    }

    /// Creates a custom SLR setting.
    #[must_use]
    pub const fn slr(temperature: SlrCoefficients, humidity: SlrCoefficients) -> Self {
        Self {
            algorithm: TempHumCorrectionAlgorithm::SlrCustom,
            temperature_slr: Some(temperature),
            humidity_slr: Some(humidity),
        }
    }

    /// Returns `true` when both SLR coefficient sets are present.
    #[must_use]
    pub const fn has_slr(&self) -> bool {
        self.temperature_slr.is_some() && self.humidity_slr.is_some()
    }

    /// Corrects a raw temperature reading (°C).
    ///
    /// # Errors
    ///
    /// See [`PmCorrection::apply`].
    pub fn apply_temperature(&self, raw: f32) -> Result<f32, CorrectionError> {
        match self.algorithm {
            TempHumCorrectionAlgorithm::Unknown => {
                Err(CorrectionError::Uninitialized("temperature"))
            }
            TempHumCorrectionAlgorithm::None => Ok(raw),
            TempHumCorrectionAlgorithm::AgPms5003t2024 => {
                Ok(formula::pms5003t_2024_temperature(raw))
            }
            TempHumCorrectionAlgorithm::SlrCustom => self
                .temperature_slr
                .map(|slr| slr.apply(raw))
                .ok_or(CorrectionError::MissingSlrCoefficients("temperature")),
        }
    }

    /// Corrects a raw relative humidity reading (%RH), clamped to 0..=100.
    ///
    /// # Errors
    ///
    /// See [`PmCorrection::apply`].
    pub fn apply_humidity(&self, raw: f32) -> Result<f32, CorrectionError> {
        match self.algorithm {
            TempHumCorrectionAlgorithm::Unknown => Err(CorrectionError::Uninitialized("humidity")),
            TempHumCorrectionAlgorithm::None => Ok(raw),
            TempHumCorrectionAlgorithm::AgPms5003t2024 => {
                Ok(formula::pms5003t_2024_humidity(raw))
            }
            TempHumCorrectionAlgorithm::SlrCustom => self
                .humidity_slr
                .map(|slr| slr.apply(raw).clamp(0.0, 100.0))
                .ok_or(CorrectionError::MissingSlrCoefficients("humidity")),
        }
    }
}
