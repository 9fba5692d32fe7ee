// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device lifecycle state.
//!
//! [`OperationalState`] is the single authoritative mode of the device.
//! [`LifecycleMachine`] advances it in response to [`Signal`]s and reports
//! each step as a [`Transition`].
//!
//! # Examples
//!
//! ```
//! use aqmon::state::{LifecycleMachine, OperationalState, Signal};
//!
//! let mut machine = LifecycleMachine::new();
//! for signal in [
//!     Signal::PortalActive,
//!     Signal::StaConnecting,
//!     Signal::StaConnected,
//!     Signal::ServerConnecting,
//!     Signal::ServerConnected,
//!     Signal::ConfigValid,
//! ] {
//!     machine.handle(signal);
//! }
//! assert_eq!(machine.state(), OperationalState::Normal);
//!
//! machine.handle(Signal::WifiLost);
//! assert_eq!(machine.state(), OperationalState::WiFiLost);
//! machine.handle(Signal::StaConnected);
//! assert_eq!(machine.state(), OperationalState::Normal);
//! ```

mod machine;
mod operational_state;
mod signal;
mod transition;

pub use machine::LifecycleMachine;
pub use operational_state::{MaintenanceKind, OperationalState, StateFamily};
pub use signal::Signal;
pub use transition::{Transition, TransitionStatus};
