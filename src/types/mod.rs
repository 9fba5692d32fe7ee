// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration and hardware value types.
//!
//! Every configuration axis is an independent closed enum with a stable
//! string name (used in JSON documents and by collaborators) and, where the
//! value is persisted by ordinal, a fixed discriminant.
//!
//! # Types
//!
//! - [`FirmwareMode`] - Hardware/sensor bundle targeted by the build
//! - [`Sensor`] / [`SensorSet`] - Installed sensor identifiers
//! - [`LedBarMode`] - Quantity visualized on the LED bar
//! - [`ConfigurationControl`] / [`ConfigOrigin`] - Configuration write authority
//! - [`PmCorrectionAlgorithm`] - PM correction formula
//! - [`TempHumCorrectionAlgorithm`] - Temperature/humidity correction formula

mod control;
mod correction;
mod firmware_mode;
mod led_bar;
mod sensor;

pub use control::{ConfigOrigin, ConfigurationControl};
pub use correction::{PmCorrectionAlgorithm, TempHumCorrectionAlgorithm};
pub use firmware_mode::FirmwareMode;
pub use led_bar::LedBarMode;
pub use sensor::{Sensor, SensorSet};
