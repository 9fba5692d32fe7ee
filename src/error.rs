// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `aqmon` library.
//!
//! Connectivity and sensor-configuration failures are never errors: the
//! lifecycle state machine models them as explicit states. The types here
//! cover the remaining failure classes: values that cannot be parsed,
//! configuration writes that are refused, and corrections applied with an
//! algorithm that was never initialized.

use thiserror::Error;

use crate::types::{ConfigOrigin, ConfigurationControl, FirmwareMode};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be parsed or converted.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A configuration write was refused or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A measurement correction could not be applied.
    #[error("correction error: {0}")]
    Correction(#[from] CorrectionError),
}

/// Errors related to parsing names, ordinals and raw signals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A string does not name any variant of the expected type.
    #[error("unknown {kind}: {value:?}")]
    UnknownName {
        /// The type that was being parsed.
        kind: &'static str,
        /// The offending input.
        value: String,
    },

    /// A persisted ordinal does not map to any variant.
    #[error("unknown {kind} ordinal: {value}")]
    UnknownOrdinal {
        /// The type that was being decoded.
        kind: &'static str,
        /// The offending ordinal.
        value: u8,
    },

    /// A raw collaborator signal could not be parsed.
    #[error("malformed signal: {0:?}")]
    MalformedSignal(String),
}

/// Errors raised while ingesting configuration from the local HTTP server or
/// the cloud.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The origin is not permitted to write under the current control mode.
    #[error("{origin} writes are not allowed while configuration control is {control}")]
    WriteNotAllowed {
        /// Where the write came from.
        origin: ConfigOrigin,
        /// The control mode that was in force.
        control: ConfigurationControl,
    },

    /// A correction setting named the `unknown` algorithm.
    #[error("{0} correction algorithm must not be unknown")]
    UnknownAlgorithm(&'static str),

    /// A custom linear-regression correction was requested without coefficients.
    #[error("{0} correction requires SLR coefficients")]
    MissingSlrCoefficients(&'static str),

    /// The algorithm cannot be used with the installed sensors.
    #[error("{algorithm} correction is not supported by firmware mode {mode}")]
    UnsupportedAlgorithm {
        /// The rejected algorithm name.
        algorithm: &'static str,
        /// The firmware mode of this build.
        mode: FirmwareMode,
    },

    /// The configuration document is not valid JSON or has the wrong shape.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when a correction formula is applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorrectionError {
    /// The algorithm is still `Unknown`; the selector was bypassed.
    #[error("{0} correction algorithm is not initialized")]
    Uninitialized(&'static str),

    /// `SlrCustom` was selected without coefficients.
    #[error("{0} SLR correction has no coefficients")]
    MissingSlrCoefficients(&'static str),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::UnknownName {
            kind: "LED bar mode",
            value: "rainbow".to_string(),
        };
        assert_eq!(err.to_string(), "unknown LED bar mode: \"rainbow\"");
    }

    #[test]
    fn write_not_allowed_display() {
        let err = ConfigError::WriteNotAllowed {
            origin: ConfigOrigin::Cloud,
            control: ConfigurationControl::Local,
        };
        assert_eq!(
            err.to_string(),
            "cloud writes are not allowed while configuration control is local"
        );
    }

    #[test]
    fn error_from_correction_error() {
        let err: Error = CorrectionError::Uninitialized("PM").into();
        assert!(matches!(
            err,
            Error::Correction(CorrectionError::Uninitialized("PM"))
        ));
    }

    #[test]
    fn unsupported_algorithm_display() {
        let err = ConfigError::UnsupportedAlgorithm {
            algorithm: "ag_pms5003t_2024",
            mode: FirmwareMode::I9Psl,
        };
        assert_eq!(
            err.to_string(),
            "ag_pms5003t_2024 correction is not supported by firmware mode I-9PSL"
        );
    }
}
