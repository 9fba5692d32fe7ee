// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Measurement correction.
//!
//! - [`select_pm_algorithm`] / [`select_temp_hum_algorithm`] decide which
//!   formula is active for a firmware mode and an optional override.
//! - [`PmCorrection`] / [`TempHumCorrection`] are the persisted settings and
//!   apply the selected formula to raw readings.

pub mod formula;
mod selector;
mod settings;

pub use selector::{
    DEFAULTS, DefaultCorrections, default_pm_algorithm, default_temp_hum_algorithm,
    select_pm_algorithm, select_temp_hum_algorithm, supports_pm_algorithm,
    supports_temp_hum_algorithm,
};
pub use settings::{PmCorrection, SlrCoefficients, TempHumCorrection};
