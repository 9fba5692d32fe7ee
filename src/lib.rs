// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `aqmon` - Operational-mode controller for air-quality monitors.
//!
//! This library holds the decision core of an air-quality monitor: which
//! operational state the device is in, what the LED bar and display show,
//! which measurement corrections apply, and who may change the
//! configuration. Sensor drivers, networking and rendering stay with the
//! caller and talk to the core through signals and observers.
//!
//! # Components
//!
//! - **Lifecycle state machine** ([`state`]): provisioning, exception,
//!   runtime-fault and maintenance states driven by collaborator signals
//! - **Firmware mode registry** ([`capabilities`]): installed sensors, LED
//!   bar and display per hardware model
//! - **Correction selector** ([`correction`]): per-mode default PM and
//!   temperature/humidity corrections and the formulas themselves
//! - **Configuration authority arbiter** ([`authority`]): local vs. cloud
//!   write permission
//! - **LED indicator resolver** ([`indicator`]): LED metric and status
//!   indication per state
//!
//! # Quick Start
//!
//! ```
//! use aqmon::controller::DeviceController;
//! use aqmon::state::{OperationalState, Signal};
//! use aqmon::subscription::Subscribable;
//! use aqmon::types::FirmwareMode;
//!
//! let controller = DeviceController::new(FirmwareMode::I9Psl);
//!
//! controller.on_indication_changed(|indication| {
//!     println!("LED/display now shows {indication}");
//! });
//!
//! for raw in [
//!     "portal-active",
//!     "sta-connecting",
//!     "sta-connected",
//!     "server-connecting",
//!     "server-connected",
//!     "config-valid",
//! ] {
//!     controller.handle_raw_signal(raw);
//! }
//! assert_eq!(controller.current_state(), OperationalState::Normal);
//!
//! controller.handle_signal(Signal::WifiLost);
//! assert_eq!(controller.current_state(), OperationalState::WiFiLost);
//! ```
//!
//! ## Configuration Ingestion
//!
//! ```
//! use aqmon::controller::DeviceController;
//! use aqmon::types::{ConfigOrigin, FirmwareMode, PmCorrectionAlgorithm};
//!
//! let controller = DeviceController::new(FirmwareMode::O1Pst);
//! assert_eq!(controller.render_view().pm_algorithm, PmCorrectionAlgorithm::Epa2021);
//!
//! let changed = controller.apply_config_json(
//!     ConfigOrigin::Cloud,
//!     r#"{"pmCorrection": {"algorithm": "none"}}"#,
//! )?;
//! assert!(changed);
//! assert_eq!(controller.render_view().pm_algorithm, PmCorrectionAlgorithm::None);
//! # Ok::<(), aqmon::Error>(())
//! ```

pub mod authority;
pub mod capabilities;
pub mod config;
pub mod controller;
pub mod correction;
pub mod error;
pub mod event;
pub mod indicator;
pub mod state;
pub mod subscription;
pub mod types;

pub use capabilities::Capabilities;
pub use config::{ConfigUpdate, DeviceConfig};
pub use controller::{DeviceController, RenderView};
pub use error::{ConfigError, CorrectionError, Error, Result, ValueError};
pub use event::{EventBus, LifecycleEvent};
pub use state::{LifecycleMachine, OperationalState, Signal, Transition};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{FirmwareMode, LedBarMode};
