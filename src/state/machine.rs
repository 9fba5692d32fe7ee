// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device lifecycle state machine.
//!
//! [`LifecycleMachine`] is the only mutator of [`OperationalState`]. It is a
//! plain value: feed it one [`Signal`] at a time from a single control
//! context and it answers with the resulting [`Transition`].
//!
//! # Provisioning
//!
//! ```text
//! WiFiManagerMode --portal-active--> WiFiManagerPortalActive
//!   --sta-connecting--> WiFiManagerStaConnecting
//!   --sta-connected--> WiFiManagerStaConnected
//!   --server-connecting--> WiFiOkServerConnecting
//!   --server-connected--> WiFiOkServerConnected
//!   --config-valid--> Normal
//! ```
//!
//! Failed steps land in an exception state. `retry` loops a connectivity
//! exception back to its in-progress state; a sensor configuration failure
//! waits for `config-valid` instead.
//!
//! # Maintenance
//!
//! Calibration and LED tests may start from any steady state except
//! `OtaPerform`. OTA may start from any state and is never preempted. Each
//! start suspends the active state, and the matching `complete` or `abort`
//! resumes it. A maintenance mode interrupted by another one is therefore
//! still active afterwards: an LED test started during calibration returns
//! to `Co2Calibration`, and the calibration still ends with its own
//! `calibration-complete`. A mode that is already suspended cannot be
//! started again until it is resumed.
//!
//! Connectivity and configuration signals arriving during maintenance are
//! deferred (left unchanged); their collaborators report again once
//! maintenance ends. `retry` ticks during an in-progress setup step are
//! ignored the same way.

use super::{
    MaintenanceKind, OperationalState, Signal, StateFamily, Transition, TransitionStatus,
};

/// Result of looking up `(state, signal)` in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Go(OperationalState),
    Stay,
    Reject,
    Enter(MaintenanceKind),
    Leave,
}

/// The lifecycle state machine.
///
/// # Examples
///
/// ```
/// use aqmon::state::{LifecycleMachine, MaintenanceKind, OperationalState, Signal};
///
/// let mut machine = LifecycleMachine::resume(OperationalState::Normal);
/// machine.handle(Signal::MaintenanceStart(MaintenanceKind::Ota));
/// assert_eq!(machine.state(), OperationalState::OtaPerform);
///
/// machine.handle(Signal::MaintenanceComplete(MaintenanceKind::Ota));
/// assert_eq!(machine.state(), OperationalState::Normal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleMachine {
    state: OperationalState,
    suspended: Vec<OperationalState>,
    seq: u64,
}

impl Default for LifecycleMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleMachine {
    /// Creates a machine in the boot state, `WiFiManagerMode`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: OperationalState::WiFiManagerMode,
            suspended: Vec::new(),
            seq: 0,
        }
    }

    /// Creates a machine from a persisted last-known-good state.
    ///
    /// Maintenance modes do not survive a power cycle: resuming into one
    /// starts in `Normal` instead.
    #[must_use]
    pub fn resume(state: OperationalState) -> Self {
        let state = if state.is_maintenance() {
            tracing::debug!(%state, "Maintenance mode not restored after restart");
            OperationalState::Normal
        } else {
            state
        };

        Self {
            state,
            suspended: Vec::new(),
            seq: 0,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> OperationalState {
        self.state
    }

    /// Returns the state restored when the active maintenance mode ends.
    #[must_use]
    pub fn return_point(&self) -> Option<OperationalState> {
        self.suspended.last().copied()
    }

    /// Returns the states suspended by maintenance, outermost first.
    #[must_use]
    pub fn suspended(&self) -> &[OperationalState] {
        &self.suspended
    }

    /// Returns how many signals have been handled.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Handles one signal and returns the resulting transition.
    ///
    /// This never fails: signals that are not valid in the current state are
    /// reported as [`TransitionStatus::Rejected`] and leave the state as is.
    pub fn handle(&mut self, signal: Signal) -> Transition {
        self.seq += 1;
        let from = self.state;

        let (to, status) = match step(from, signal, &self.suspended) {
            Step::Go(to) if to == from => (from, TransitionStatus::Unchanged),
            Step::Go(to) => (to, TransitionStatus::Applied),
            Step::Stay => (from, TransitionStatus::Unchanged),
            Step::Reject => (from, TransitionStatus::Rejected),
            Step::Enter(kind) => {
                self.suspended.push(from);
                (kind.state(), TransitionStatus::Applied)
            }
            Step::Leave => {
                let to = self.suspended.pop().unwrap_or(OperationalState::Normal);
                (to, TransitionStatus::Applied)
            }
        };
        self.state = to;

        match status {
            TransitionStatus::Applied => {
                tracing::info!(%from, %to, %signal, seq = self.seq, "State transition");
            }
            TransitionStatus::Unchanged => {
                tracing::debug!(state = %from, %signal, seq = self.seq, "Signal left state unchanged");
            }
            TransitionStatus::Rejected => {
                tracing::warn!(state = %from, %signal, seq = self.seq, "Signal rejected in current state");
            }
        }

        Transition {
            from,
            to,
            signal,
            status,
            seq: self.seq,
        }
    }
}

/// The transition table.
fn step(state: OperationalState, signal: Signal, suspended: &[OperationalState]) -> Step {
    match signal {
        Signal::MaintenanceStart(kind) => start_maintenance(state, kind, suspended),
        Signal::MaintenanceComplete(kind) | Signal::MaintenanceAbort(kind) => {
            if state.maintenance_kind() == Some(kind) {
                Step::Leave
            } else {
                Step::Reject
            }
        }
        _ if state.is_maintenance() => Step::Stay,
        _ => match state.family() {
            StateFamily::Setup => setup_step(state, signal),
            StateFamily::SetupException => exception_step(state, signal),
            StateFamily::SteadyState => steady_step(state, signal),
        },
    }
}

fn start_maintenance(
    state: OperationalState,
    kind: MaintenanceKind,
    suspended: &[OperationalState],
) -> Step {
    if state == kind.state() {
        return Step::Stay;
    }
    if suspended.contains(&kind.state()) {
        return Step::Reject;
    }
    match kind {
        MaintenanceKind::Ota => Step::Enter(kind),
        _ if state == OperationalState::OtaPerform => Step::Reject,
        _ if state.is_steady() => Step::Enter(kind),
        _ => Step::Reject,
    }
}

fn setup_step(state: OperationalState, signal: Signal) -> Step {
    use OperationalState as S;

    match (state, signal) {
        (_, Signal::Retry) => Step::Stay,

        (S::WiFiManagerMode, Signal::PortalActive) => Step::Go(S::WiFiManagerPortalActive),

        (S::WiFiManagerPortalActive, Signal::PortalActive) => Step::Stay,
        (S::WiFiManagerPortalActive, Signal::StaConnecting) => {
            Step::Go(S::WiFiManagerStaConnecting)
        }

        (S::WiFiManagerStaConnecting, Signal::StaConnecting) => Step::Stay,
        (S::WiFiManagerStaConnecting, Signal::StaConnected) => {
            Step::Go(S::WiFiManagerStaConnected)
        }
        (S::WiFiManagerStaConnecting, Signal::StaConnectFailed) => {
            Step::Go(S::WiFiManagerConnectFailed)
        }

        (S::WiFiManagerStaConnected, Signal::StaConnected) => Step::Stay,
        (S::WiFiManagerStaConnected, Signal::ServerConnecting) => {
            Step::Go(S::WiFiOkServerConnecting)
        }

        (S::WiFiOkServerConnecting, Signal::ServerConnecting) => Step::Stay,
        (S::WiFiOkServerConnecting, Signal::ServerConnected) => Step::Go(S::WiFiOkServerConnected),
        (S::WiFiOkServerConnecting, Signal::ServerConnectFailed) => {
            Step::Go(S::WiFiOkServerConnectFailed)
        }

        (S::WiFiOkServerConnected, Signal::ServerConnected) => Step::Stay,
        (S::WiFiOkServerConnected, Signal::ConfigValid) => Step::Go(S::Normal),
        (S::WiFiOkServerConnected, Signal::ConfigInvalid) => {
            Step::Go(S::WiFiOkServerOkSensorConfigFailed)
        }
        (S::WiFiOkServerConnected, Signal::ServerLost) => Step::Go(S::WiFiOkServerConnectFailed),

        (
            S::WiFiManagerStaConnected | S::WiFiOkServerConnecting | S::WiFiOkServerConnected,
            Signal::WifiLost,
        ) => Step::Go(S::WiFiManagerConnectFailed),

        _ => Step::Reject,
    }
}

fn exception_step(state: OperationalState, signal: Signal) -> Step {
    use OperationalState as S;

    match (state, signal) {
        (S::WiFiManagerConnectFailed, Signal::StaConnectFailed | Signal::WifiLost) => Step::Stay,
        (S::WiFiManagerConnectFailed, Signal::PortalActive) => Step::Go(S::WiFiManagerPortalActive),
        (S::WiFiManagerConnectFailed, Signal::StaConnecting) => {
            Step::Go(S::WiFiManagerStaConnecting)
        }

        (S::WiFiOkServerConnectFailed, Signal::ServerConnectFailed | Signal::ServerLost) => {
            Step::Stay
        }
        (S::WiFiOkServerConnectFailed, Signal::ServerConnecting) => {
            Step::Go(S::WiFiOkServerConnecting)
        }

        (S::WiFiOkServerOkSensorConfigFailed, Signal::ConfigInvalid | Signal::Retry) => Step::Stay,
        (S::WiFiOkServerOkSensorConfigFailed, Signal::ConfigValid) => Step::Go(S::Normal),
        (S::WiFiOkServerOkSensorConfigFailed, Signal::ServerLost) => {
            Step::Go(S::WiFiOkServerConnectFailed)
        }

        (S::WiFiOkServerConnectFailed | S::WiFiOkServerOkSensorConfigFailed, Signal::WifiLost) => {
            Step::Go(S::WiFiManagerConnectFailed)
        }

        (_, Signal::Retry) => state.retry_target().map_or(Step::Stay, Step::Go),

        _ => Step::Reject,
    }
}

fn steady_step(state: OperationalState, signal: Signal) -> Step {
    use OperationalState as S;

    match (state, signal) {
        (_, Signal::PortalActive) => Step::Reject,

        (S::Normal, Signal::WifiLost) => Step::Go(S::WiFiLost),
        (S::Normal, Signal::ServerLost) => Step::Go(S::ServerLost),
        (S::Normal, Signal::ConfigInvalid) => Step::Go(S::SensorConfigFailed),
        (
            S::Normal,
            Signal::StaConnected | Signal::ServerConnected | Signal::ConfigValid | Signal::Retry,
        ) => Step::Stay,
        (S::Normal, _) => Step::Reject,

        (S::WiFiLost, Signal::StaConnected | Signal::ServerConnected) => Step::Go(S::Normal),

        (S::ServerLost, Signal::ServerConnected) => Step::Go(S::Normal),
        (S::ServerLost, Signal::WifiLost) => Step::Go(S::WiFiLost),
        (S::ServerLost, Signal::ConfigInvalid) => Step::Go(S::SensorConfigFailed),

        (S::SensorConfigFailed, Signal::ConfigValid) => Step::Go(S::Normal),
        (S::SensorConfigFailed, Signal::WifiLost) => Step::Go(S::WiFiLost),
        (S::SensorConfigFailed, Signal::ServerLost) => Step::Go(S::ServerLost),

        // Recovery attempts and repeated reports while a fault is active.
        _ => Step::Stay,
    }
}
