// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Correction formulas.

/// US EPA 2021 PM2.5 correction for low-cost optical sensors.
///
/// Piecewise in the raw concentration with blended segments between the
/// breakpoints, adjusted by relative humidity. The result is never negative.
#[must_use]
pub fn epa_2021(pm25: f32, relative_humidity: f32) -> f32 {
    let rh = relative_humidity.clamp(0.0, 100.0);
    let corrected = if pm25 < 30.0 {
        0.524 * pm25 - 0.0862 * rh + 5.75
    } else if pm25 < 50.0 {
        let w = pm25 / 20.0 - 1.5;
        (0.786 * w + 0.524 * (1.0 - w)) * pm25 - 0.0862 * rh + 5.75
    } else if pm25 < 210.0 {
        0.786 * pm25 - 0.0862 * rh + 5.75
    } else if pm25 < 260.0 {
        let w = pm25 / 50.0 - 4.2;
        (0.69 * w + 0.786 * (1.0 - w)) * pm25 - 0.0862 * rh * (1.0 - w)
            + 2.966 * w
            + 5.75 * (1.0 - w)
            + 8.84e-4 * pm25 * pm25 * w
    } else {
        2.966 + 0.69 * pm25 + 8.84e-4 * pm25 * pm25
    };
    corrected.max(0.0)
}

/// 2024 compensation for the PMS5003T temperature cell, in °C.
#[must_use]
pub fn pms5003t_2024_temperature(raw: f32) -> f32 {
    if raw < 10.0 {
        raw * 1.327 - 6.738
    } else {
        raw * 1.181 - 5.113
    }
}

/// 2024 compensation for the PMS5003T humidity cell, in %RH.
#[must_use]
pub fn pms5003t_2024_humidity(raw: f32) -> f32 {
    (raw * 1.259 + 7.34).clamp(0.0, 100.0)
}
