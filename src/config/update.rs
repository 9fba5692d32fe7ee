// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial configuration updates.

use serde::{Deserialize, Serialize};

use crate::correction::{PmCorrection, TempHumCorrection};
use crate::error::ConfigError;
use crate::types::{ConfigurationControl, LedBarMode};

/// A partial configuration write from the local HTTP server or the cloud.
///
/// Absent fields are left untouched. Keys this crate does not manage are
/// ignored so a full cloud configuration document can be passed as is.
///
/// # Examples
///
/// ```
/// use aqmon::config::ConfigUpdate;
/// use aqmon::types::LedBarMode;
///
/// let update = ConfigUpdate::from_json(r#"{"ledBarMode": "pm", "country": "TH"}"#).unwrap();
/// assert_eq!(update.led_bar_mode, Some(LedBarMode::Pm));
/// assert!(update.pm_correction.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    /// New configuration control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_control: Option<ConfigurationControl>,

    /// New LED bar mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led_bar_mode: Option<LedBarMode>,

    /// New PM correction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_correction: Option<PmCorrection>,

    /// New temperature/humidity correction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_hum_correction: Option<TempHumCorrection>,
}

impl ConfigUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an update from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the document is malformed or a known
    /// key has an invalid value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the configuration control.
    #[must_use]
    pub fn with_configuration_control(mut self, control: ConfigurationControl) -> Self {
        self.configuration_control = Some(control);
        self
    }

    /// Sets the LED bar mode.
    #[must_use]
    pub fn with_led_bar_mode(mut self, mode: LedBarMode) -> Self {
        self.led_bar_mode = Some(mode);
        self
    }

    /// Sets the PM correction.
    #[must_use]
    pub fn with_pm_correction(mut self, correction: PmCorrection) -> Self {
        self.pm_correction = Some(correction);
        self
    }

    /// Sets the temperature/humidity correction.
    #[must_use]
    pub fn with_temp_hum_correction(mut self, correction: TempHumCorrection) -> Self {
        self.temp_hum_correction = Some(correction);
        self
    }

    /// Returns `true` if the update carries no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
