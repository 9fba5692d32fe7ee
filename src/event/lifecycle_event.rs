// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lifecycle event types.

use serde::{Deserialize, Serialize};

use crate::config::DeviceConfig;
use crate::indicator::{StatusIndication, indication_for};
use crate::state::{OperationalState, Transition};

/// Events broadcast by the device controller.
///
/// # Examples
///
/// ```
/// use aqmon::event::LifecycleEvent;
/// use aqmon::indicator::StatusIndication;
/// use aqmon::state::{LifecycleMachine, OperationalState, Signal};
///
/// let mut machine = LifecycleMachine::resume(OperationalState::Normal);
/// let event = LifecycleEvent::state_changed(machine.handle(Signal::ServerLost));
///
/// assert!(event.is_state_change());
/// assert_eq!(event.state(), Some(OperationalState::ServerLost));
/// if let LifecycleEvent::StateChanged { indication, .. } = event {
///     assert_eq!(indication, StatusIndication::ServerLost);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The operational state changed.
    StateChanged {
        /// The applied transition.
        transition: Transition,
        /// Indication for the new state.
        indication: StatusIndication,
    },

    /// A signal was rejected or could not be parsed.
    SignalRejected {
        /// State at the time; left unchanged.
        state: OperationalState,
        /// The signal as received.
        signal: String,
    },

    /// The configuration changed.
    ConfigChanged {
        /// The configuration now in force.
        config: DeviceConfig,
    },
}

impl LifecycleEvent {
    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(transition: Transition) -> Self {
        Self::StateChanged {
            indication: indication_for(transition.to),
            transition,
        }
    }

    /// Creates a signal rejected event.
    #[must_use]
    pub fn signal_rejected(state: OperationalState, signal: impl Into<String>) -> Self {
        Self::SignalRejected {
            state,
            signal: signal.into(),
        }
    }

    /// Creates a config changed event.
    #[must_use]
    pub fn config_changed(config: DeviceConfig) -> Self {
        Self::ConfigChanged { config }
    }

    /// Returns the operational state after this event.
    ///
    /// Configuration events carry no state and return `None`.
    #[must_use]
    pub fn state(&self) -> Option<OperationalState> {
        match self {
            Self::StateChanged { transition, .. } => Some(transition.to),
            Self::SignalRejected { state, .. } => Some(*state),
            Self::ConfigChanged { .. } => None,
        }
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns `true` if this is a rejected signal event.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::SignalRejected { .. })
    }

    /// Returns `true` if this is a configuration event.
    #[must_use]
    pub fn is_config_change(&self) -> bool {
        matches!(self, Self::ConfigChanged { .. })
    }
}
