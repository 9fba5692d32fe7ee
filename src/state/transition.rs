// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transition records produced by the lifecycle machine.

use serde::{Deserialize, Serialize};

use super::{OperationalState, Signal};

/// Outcome of feeding one signal to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStatus {
    /// The state changed.
    Applied,
    /// The signal was accepted but the state did not change.
    Unchanged,
    /// The signal is not valid in the current state.
    Rejected,
}

/// A single `(from, signal) -> to` step.
///
/// Every signal produces a `Transition`, including rejected ones, so
/// observers and logs see the full signal history. `seq` increases by one
/// for every signal the machine handles.
///
/// # Examples
///
/// ```
/// use aqmon::state::{LifecycleMachine, OperationalState, Signal, TransitionStatus};
///
/// let mut machine = LifecycleMachine::new();
/// let t = machine.handle(Signal::PortalActive);
/// assert_eq!(t.from, OperationalState::WiFiManagerMode);
/// assert_eq!(t.to, OperationalState::WiFiManagerPortalActive);
/// assert_eq!(t.status, TransitionStatus::Applied);
/// assert!(t.changed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// State before the signal.
    pub from: OperationalState,
    /// State after the signal.
    pub to: OperationalState,
    /// The signal that was handled.
    pub signal: Signal,
    /// What happened.
    pub status: TransitionStatus,
    /// Position of this signal in the machine's history.
    pub seq: u64,
}

impl Transition {
    /// Returns `true` if the state changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.status == TransitionStatus::Applied
    }

    /// Returns `true` if the signal was rejected.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.status == TransitionStatus::Rejected
    }

    /// Returns `true` if this transition entered a maintenance mode.
    #[must_use]
    pub const fn entered_maintenance(&self) -> bool {
        matches!(self.status, TransitionStatus::Applied)
            && self.to.is_maintenance()
            && !self.from.is_maintenance()
    }
}
