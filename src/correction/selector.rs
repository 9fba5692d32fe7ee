// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Correction algorithm selection.
//!
//! An explicit override always wins. Without one, the firmware mode's
//! default from [`DEFAULTS`] applies. `Unknown` is never returned: an
//! `Unknown` override is logged and replaced by the default.

use crate::capabilities::sensor_set_for;
use crate::types::{FirmwareMode, PmCorrectionAlgorithm, TempHumCorrectionAlgorithm};

/// Default algorithms of a firmware mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCorrections {
    /// Default PM correction.
    pub pm: PmCorrectionAlgorithm,
    /// Default temperature/humidity correction.
    pub temp_hum: TempHumCorrectionAlgorithm,
}

const INDOOR: DefaultCorrections = DefaultCorrections {
    pm: PmCorrectionAlgorithm::None,
    temp_hum: TempHumCorrectionAlgorithm::None,
};

const OUTDOOR: DefaultCorrections = DefaultCorrections {
    pm: PmCorrectionAlgorithm::Epa2021,
    temp_hum: TempHumCorrectionAlgorithm::AgPms5003t2024,
};

/// Per-mode defaults, indexed by [`FirmwareMode::index`].
///
/// Outdoor units carry PMS5003T sensors, whose readings are biased enough
/// to warrant correction out of the box.
pub const DEFAULTS: [DefaultCorrections; FirmwareMode::ALL.len()] = [
    INDOOR,  // I-9PSL
    OUTDOOR, // O-1PST
    OUTDOOR, // O-1PPT
    OUTDOOR, // O-1PP
    OUTDOOR, // O-1PS
    OUTDOOR, // O-1P
    INDOOR,  // DIY-PRO-I-4.2PS
    INDOOR,  // DIY-PRO-I-3.3PS
    INDOOR,  // DIY-BASIC-I-4.0PS
];

/// Returns the default PM correction of `mode`.
#[must_use]
pub const fn default_pm_algorithm(mode: FirmwareMode) -> PmCorrectionAlgorithm {
    DEFAULTS[mode.index()].pm
}

/// Returns the default temperature/humidity correction of `mode`.
#[must_use]
pub const fn default_temp_hum_algorithm(mode: FirmwareMode) -> TempHumCorrectionAlgorithm {
    DEFAULTS[mode.index()].temp_hum
}

/// Chooses the PM correction to apply.
///
/// # Examples
///
/// ```
/// use aqmon::correction::select_pm_algorithm;
/// use aqmon::types::{FirmwareMode, PmCorrectionAlgorithm};
///
/// assert_eq!(
///     select_pm_algorithm(FirmwareMode::O1Pst, None),
///     PmCorrectionAlgorithm::Epa2021
/// );
/// assert_eq!(
///     select_pm_algorithm(FirmwareMode::O1Pst, Some(PmCorrectionAlgorithm::None)),
///     PmCorrectionAlgorithm::None
/// );
/// ```
#[must_use]
pub fn select_pm_algorithm(
    mode: FirmwareMode,
    override_algorithm: Option<PmCorrectionAlgorithm>,
) -> PmCorrectionAlgorithm {
    match override_algorithm {
        Some(PmCorrectionAlgorithm::Unknown) => {
            let fallback = default_pm_algorithm(mode);
            tracing::warn!(mode = %mode, fallback = %fallback, "Unknown PM correction override, using default");
            fallback
        }
        Some(algorithm) => algorithm,
        None => default_pm_algorithm(mode),
    }
}

/// Chooses the temperature/humidity correction to apply.
#[must_use]
pub fn select_temp_hum_algorithm(
    mode: FirmwareMode,
    override_algorithm: Option<TempHumCorrectionAlgorithm>,
) -> TempHumCorrectionAlgorithm {
    match override_algorithm {
        Some(TempHumCorrectionAlgorithm::Unknown) => {
            let fallback = default_temp_hum_algorithm(mode);
            tracing::warn!(
                mode = %mode,
                fallback = %fallback,
                "Unknown temperature/humidity correction override, using default"
            );
            fallback
        }
        Some(algorithm) => algorithm,
        None => default_temp_hum_algorithm(mode),
    }
}

/// Returns `true` if `algorithm` can be configured on `mode`.
///
/// `Unknown` is never configurable. Every mode carries a PM sensor, so the
/// remaining PM algorithms are always valid.
#[must_use]
pub fn supports_pm_algorithm(_mode: FirmwareMode, algorithm: PmCorrectionAlgorithm) -> bool {
    algorithm != PmCorrectionAlgorithm::Unknown
}

/// Returns `true` if `algorithm` can be configured on `mode`.
///
/// The PMS5003T compensation only applies to units that carry one.
#[must_use]
pub fn supports_temp_hum_algorithm(
    mode: FirmwareMode,
    algorithm: TempHumCorrectionAlgorithm,
) -> bool {
    match algorithm {
        TempHumCorrectionAlgorithm::Unknown => false,
        TempHumCorrectionAlgorithm::AgPms5003t2024 => sensor_set_for(mode).has_pms5003t(),
        TempHumCorrectionAlgorithm::None | TempHumCorrectionAlgorithm::SlrCustom => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_never_unknown() {
        for mode in FirmwareMode::ALL {
            assert_ne!(select_pm_algorithm(mode, None), PmCorrectionAlgorithm::Unknown);
            assert_ne!(
                select_temp_hum_algorithm(mode, None),
                TempHumCorrectionAlgorithm::Unknown
            );
        }
    }

    #[test]
    fn documented_per_mode_defaults() {
        let expected = [
            (FirmwareMode::I9Psl, PmCorrectionAlgorithm::None),
            (FirmwareMode::O1Pst, PmCorrectionAlgorithm::Epa2021),
            (FirmwareMode::O1Ppt, PmCorrectionAlgorithm::Epa2021),
            (FirmwareMode::O1Pp, PmCorrectionAlgorithm::Epa2021),
            (FirmwareMode::O1Ps, PmCorrectionAlgorithm::Epa2021),
            (FirmwareMode::O1P, PmCorrectionAlgorithm::Epa2021),
            (FirmwareMode::I42Ps, PmCorrectionAlgorithm::None),
            (FirmwareMode::I33Ps, PmCorrectionAlgorithm::None),
            (FirmwareMode::IBasic40Ps, PmCorrectionAlgorithm::None),
        ];
        for (mode, algorithm) in expected {
            assert_eq!(select_pm_algorithm(mode, None), algorithm, "{mode}");
        }
    }

    #[test]
    fn temp_hum_defaults_follow_pms5003t() {
        for mode in FirmwareMode::ALL {
            let expected = if sensor_set_for(mode).has_pms5003t() {
                TempHumCorrectionAlgorithm::AgPms5003t2024
            } else {
                TempHumCorrectionAlgorithm::None
            };
            assert_eq!(select_temp_hum_algorithm(mode, None), expected, "{mode}");
        }
    }

    #[test]
    fn override_wins() {
        assert_eq!(
            select_pm_algorithm(FirmwareMode::I9Psl, Some(PmCorrectionAlgorithm::SlrCustom)),
            PmCorrectionAlgorithm::SlrCustom
        );
        assert_eq!(
            select_temp_hum_algorithm(
                FirmwareMode::O1P,
                Some(TempHumCorrectionAlgorithm::None)
            ),
            TempHumCorrectionAlgorithm::None
        );
    }

    #[test]
    fn unknown_override_falls_back_to_default() {
        assert_eq!(
            select_pm_algorithm(FirmwareMode::O1Ps, Some(PmCorrectionAlgorithm::Unknown)),
            PmCorrectionAlgorithm::Epa2021
        );
        assert_eq!(
            select_temp_hum_algorithm(
                FirmwareMode::I42Ps,
                Some(TempHumCorrectionAlgorithm::Unknown)
            ),
            TempHumCorrectionAlgorithm::None
        );
    }

    #[test]
    fn pms5003t_compensation_requires_the_sensor() {
        assert!(supports_temp_hum_algorithm(
            FirmwareMode::O1Pst,
            TempHumCorrectionAlgorithm::AgPms5003t2024
        ));
        assert!(!supports_temp_hum_algorithm(
            FirmwareMode::I9Psl,
            TempHumCorrectionAlgorithm::AgPms5003t2024
        ));
        assert!(supports_temp_hum_algorithm(
            FirmwareMode::I9Psl,
            TempHumCorrectionAlgorithm::SlrCustom
        ));
    }

    #[test]
    fn unknown_is_never_supported() {
        for mode in FirmwareMode::ALL {
            assert!(!supports_pm_algorithm(mode, PmCorrectionAlgorithm::Unknown));
            assert!(!supports_temp_hum_algorithm(
                mode,
                TempHumCorrectionAlgorithm::Unknown
            ));
        }
    }
}
