// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel between the control context and async tasks.

use tokio::sync::broadcast;

use super::LifecycleEvent;
use crate::state::{Transition, TransitionStatus};

/// Events buffered per subscriber before the oldest are dropped.
const CAPACITY: usize = 256;

/// Lifecycle event fan-out for the network task and other async observers.
///
/// Publishing never blocks the control context. A subscriber that falls
/// more than 256 events behind loses the oldest ones and sees
/// `RecvError::Lagged` on its next receive.
///
/// # Examples
///
/// ```
/// use aqmon::event::EventBus;
/// use aqmon::state::{LifecycleMachine, OperationalState, Signal};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// let mut machine = LifecycleMachine::resume(OperationalState::Normal);
/// bus.publish_transition(&machine.handle(Signal::ServerLost));
/// bus.publish_transition(&machine.handle(Signal::ServerLost));
///
/// let event = rx.try_recv().unwrap();
/// assert_eq!(event.state(), Some(OperationalState::ServerLost));
/// assert!(rx.try_recv().is_err());
/// ```
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<LifecycleEvent>,
}

impl EventBus {
    /// Creates an event bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(CAPACITY)
    }

    fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }

    /// Publishes what a transition means to async observers.
    ///
    /// Applied transitions become `StateChanged` and rejected signals become
    /// `SignalRejected`. Unchanged transitions are not published; a repeated
    /// report has nothing new for the network task.
    pub fn publish_transition(&self, transition: &Transition) {
        match transition.status {
            TransitionStatus::Applied => {
                self.publish(LifecycleEvent::state_changed(*transition));
            }
            TransitionStatus::Rejected => self.publish(LifecycleEvent::signal_rejected(
                transition.from,
                transition.signal.to_string(),
            )),
            TransitionStatus::Unchanged => {}
        }
    }

    /// Publishes an event to every subscriber.
    ///
    /// Events published while nobody listens are dropped.
    pub fn publish(&self, event: LifecycleEvent) {
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            tracing::trace!(?event, "No event subscribers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::state::{LifecycleMachine, MaintenanceKind, OperationalState, Signal};

    #[tokio::test]
    async fn applied_transition_is_a_state_change() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        let mut machine = LifecycleMachine::resume(OperationalState::Normal);
        bus.publish_transition(&machine.handle(Signal::WifiLost));

        let event = rx.recv().await.unwrap();
        assert!(event.is_state_change());
        assert_eq!(event.state(), Some(OperationalState::WiFiLost));
    }

    #[tokio::test]
    async fn rejected_signal_names_the_signal() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        let mut machine = LifecycleMachine::resume(OperationalState::Normal);
        bus.publish_transition(&machine.handle(Signal::MaintenanceComplete(MaintenanceKind::Ota)));

        assert_eq!(
            rx.recv().await.unwrap(),
            LifecycleEvent::signal_rejected(OperationalState::Normal, "ota-complete")
        );
    }

    #[test]
    fn unchanged_transition_is_not_published() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        let mut machine = LifecycleMachine::resume(OperationalState::Normal);
        bus.publish_transition(&machine.handle(Signal::ConfigValid));

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::default();
        bus.publish(LifecycleEvent::config_changed(DeviceConfig::new()));

        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn every_subscriber_gets_a_copy() {
        let bus = EventBus::new();
        let mut network = bus.subscribe();
        let mut display = bus.subscribe();

        bus.publish(LifecycleEvent::config_changed(DeviceConfig::new()));

        assert!(network.recv().await.unwrap().is_config_change());
        assert!(display.recv().await.unwrap().is_config_change());
    }

    #[tokio::test]
    async fn slow_subscriber_lags() {
        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe();

        let mut machine = LifecycleMachine::resume(OperationalState::Normal);
        for signal in [
            Signal::WifiLost,
            Signal::StaConnected,
            Signal::ServerLost,
            Signal::ServerConnected,
        ] {
            bus.publish_transition(&machine.handle(signal));
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(2))
        ));
        assert_eq!(
            rx.recv().await.unwrap().state(),
            Some(OperationalState::ServerLost)
        );
    }
}
