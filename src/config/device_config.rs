// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted device configuration.

use serde::{Deserialize, Serialize};

use super::ConfigUpdate;
use crate::authority::is_write_allowed;
use crate::correction::{
    PmCorrection, TempHumCorrection, select_pm_algorithm, select_temp_hum_algorithm,
    supports_pm_algorithm, supports_temp_hum_algorithm,
};
use crate::error::ConfigError;
use crate::types::{
    ConfigOrigin, ConfigurationControl, FirmwareMode, LedBarMode, PmCorrectionAlgorithm,
    TempHumCorrectionAlgorithm,
};

/// Configuration managed by the device.
///
/// Missing keys take their defaults: both origins may write, the LED bar
/// shows CO2, and corrections follow the firmware mode.
///
/// # Examples
///
/// ```
/// use aqmon::config::DeviceConfig;
/// use aqmon::types::{ConfigurationControl, FirmwareMode, LedBarMode, PmCorrectionAlgorithm};
///
/// let config = DeviceConfig::from_json(r#"{"ledBarMode": "pm"}"#).unwrap();
/// assert_eq!(config.configuration_control, ConfigurationControl::Both);
/// assert_eq!(config.led_bar_mode, LedBarMode::Pm);
/// assert_eq!(config.pm_algorithm(FirmwareMode::O1Pst), PmCorrectionAlgorithm::Epa2021);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceConfig {
    /// Which origin may change the configuration.
    pub configuration_control: ConfigurationControl,

    /// What the LED bar shows during normal operation.
    pub led_bar_mode: LedBarMode,

    /// PM correction override. `None` uses the firmware-mode default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm_correction: Option<PmCorrection>,

    /// Temperature/humidity correction override. `None` uses the
    /// firmware-mode default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_hum_correction: Option<TempHumCorrection>,
}

impl DeviceConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration control.
    #[must_use]
    pub fn with_configuration_control(mut self, control: ConfigurationControl) -> Self {
        self.configuration_control = control;
        self
    }

    /// Sets the LED bar mode.
    #[must_use]
    pub fn with_led_bar_mode(mut self, mode: LedBarMode) -> Self {
        self.led_bar_mode = mode;
        self
    }

    /// Sets the PM correction override.
    #[must_use]
    pub fn with_pm_correction(mut self, correction: PmCorrection) -> Self {
        self.pm_correction = Some(correction);
        self
    }

    /// Sets the temperature/humidity correction override.
    #[must_use]
    pub fn with_temp_hum_correction(mut self, correction: TempHumCorrection) -> Self {
        self.temp_hum_correction = Some(correction);
        self
    }

    /// Loads a configuration from persisted JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the document cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration for persistence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns the PM algorithm in effect for `mode`.
    #[must_use]
    pub fn pm_algorithm(&self, mode: FirmwareMode) -> PmCorrectionAlgorithm {
        select_pm_algorithm(mode, self.pm_correction.map(|c| c.algorithm))
    }

    /// Returns the temperature/humidity algorithm in effect for `mode`.
    #[must_use]
    pub fn temp_hum_algorithm(&self, mode: FirmwareMode) -> TempHumCorrectionAlgorithm {
        select_temp_hum_algorithm(mode, self.temp_hum_correction.map(|c| c.algorithm))
    }

    /// Returns the PM correction to apply on `mode`, coefficients included.
    #[must_use]
    pub fn pm_correction_for(&self, mode: FirmwareMode) -> PmCorrection {
        let algorithm = self.pm_algorithm(mode);
        match self.pm_correction {
            Some(correction) if correction.algorithm == algorithm => correction,
            _ => PmCorrection::new(algorithm),
        }
    }

    /// Returns the temperature/humidity correction to apply on `mode`,
    /// coefficients included.
    #[must_use]
    pub fn temp_hum_correction_for(&self, mode: FirmwareMode) -> TempHumCorrection {
        let algorithm = self.temp_hum_algorithm(mode);
        match self.temp_hum_correction {
            Some(correction) if correction.algorithm == algorithm => correction,
            _ => TempHumCorrection::new(algorithm),
        }
    }

    /// Applies a configuration write.
    ///
    /// The write is authorized against the configuration control in force
    /// before the update, validated against `mode`, and then applied as a
    /// whole. Returns `true` if anything changed.
    ///
    /// # Errors
    ///
    /// - `ConfigError::WriteNotAllowed` if `origin` may not write.
    /// - `ConfigError::UnknownAlgorithm` if a correction names `unknown`.
    /// - `ConfigError::MissingSlrCoefficients` for `slr_custom` without
    ///   coefficients.
    /// - `ConfigError::UnsupportedAlgorithm` if the installed sensors cannot
    ///   use the algorithm.
    ///
    /// On error the configuration is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use aqmon::config::{ConfigUpdate, DeviceConfig};
    /// use aqmon::types::{ConfigOrigin, ConfigurationControl, FirmwareMode, LedBarMode};
    ///
    /// let mut config = DeviceConfig::new().with_configuration_control(ConfigurationControl::Cloud);
    /// let update = ConfigUpdate::new().with_led_bar_mode(LedBarMode::Off);
    ///
    /// assert!(config.apply_update(ConfigOrigin::Local, &update, FirmwareMode::I9Psl).is_err());
    /// assert!(config.apply_update(ConfigOrigin::Cloud, &update, FirmwareMode::I9Psl).unwrap());
    /// ```
    pub fn apply_update(
        &mut self,
        origin: ConfigOrigin,
        update: &ConfigUpdate,
        mode: FirmwareMode,
    ) -> Result<bool, ConfigError> {
        let control = self.configuration_control;
        if !is_write_allowed(origin, control) {
            tracing::warn!(origin = %origin, control = %control, "Configuration write refused");
            return Err(ConfigError::WriteNotAllowed { origin, control });
        }

        if let Some(pm) = &update.pm_correction {
            validate_pm(pm, mode)?;
        }
        if let Some(temp_hum) = &update.temp_hum_correction {
            validate_temp_hum(temp_hum, mode)?;
        }

        let mut next = self.clone();
        if let Some(control) = update.configuration_control {
            next.configuration_control = control;
        }
        if let Some(led_bar_mode) = update.led_bar_mode {
            next.led_bar_mode = led_bar_mode;
        }
        if update.pm_correction.is_some() {
            next.pm_correction = update.pm_correction;
        }
        if update.temp_hum_correction.is_some() {
            next.temp_hum_correction = update.temp_hum_correction;
        }

        if next == *self {
            tracing::debug!(origin = %origin, "Configuration write changed nothing");
            return Ok(false);
        }

        *self = next;
        tracing::info!(origin = %origin, mode = %mode, "Configuration updated");
        Ok(true)
    }
}

fn validate_pm(pm: &PmCorrection, mode: FirmwareMode) -> Result<(), ConfigError> {
    match pm.algorithm {
        PmCorrectionAlgorithm::Unknown => Err(ConfigError::UnknownAlgorithm("PM")),
        PmCorrectionAlgorithm::SlrCustom if pm.slr.is_none() => {
            Err(ConfigError::MissingSlrCoefficients("PM"))
        }
        algorithm if !supports_pm_algorithm(mode, algorithm) => {
            Err(ConfigError::UnsupportedAlgorithm {
                algorithm: algorithm.as_str(),
                mode,
            })
        }
        _ => Ok(()),
    }
}

fn validate_temp_hum(temp_hum: &TempHumCorrection, mode: FirmwareMode) -> Result<(), ConfigError> {
    match temp_hum.algorithm {
        TempHumCorrectionAlgorithm::Unknown => {
            Err(ConfigError::UnknownAlgorithm("temperature/humidity"))
        }
        TempHumCorrectionAlgorithm::SlrCustom if !temp_hum.has_slr() => {
            Err(ConfigError::MissingSlrCoefficients("temperature/humidity"))
        }
        algorithm if !supports_temp_hum_algorithm(mode, algorithm) => {
            Err(ConfigError::UnsupportedAlgorithm {
                algorithm: algorithm.as_str(),
                mode,
            })
        }
        _ => Ok(()),
    }
}
