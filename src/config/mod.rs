// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration and configuration ingestion.
//!
//! [`DeviceConfig`] is the persisted configuration. Writes arrive as
//! [`ConfigUpdate`]s from the local HTTP server or the cloud and go through
//! [`DeviceConfig::apply_update`], which consults the configuration
//! authority arbiter and validates correction settings against the
//! firmware mode before anything is changed.

mod device_config;
mod update;

pub use device_config::DeviceConfig;
pub use update::ConfigUpdate;
