// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the device lifecycle through the public API.

use std::sync::Arc;

use aqmon::indicator::{FaultHint, StatusIndication};
use aqmon::state::{MaintenanceKind, StateFamily, TransitionStatus};
use aqmon::subscription::Subscribable;
use aqmon::types::FirmwareMode;
use aqmon::{DeviceConfig, DeviceController, LifecycleMachine, OperationalState, Signal};
use parking_lot::Mutex;

const PROVISIONING: [Signal; 6] = [
    Signal::PortalActive,
    Signal::StaConnecting,
    Signal::StaConnected,
    Signal::ServerConnecting,
    Signal::ServerConnected,
    Signal::ConfigValid,
];

/// Maintenance states are not restored by `resume`, so they are entered
/// from `Normal` instead.
fn controller_in(state: OperationalState) -> DeviceController {
    match state.maintenance_kind() {
        Some(kind) => {
            let controller = controller_in(OperationalState::Normal);
            controller.handle_signal(Signal::MaintenanceStart(kind));
            controller
        }
        None => DeviceController::resume(FirmwareMode::I9Psl, DeviceConfig::default(), state),
    }
}

fn machine_in(state: OperationalState) -> LifecycleMachine {
    let mut machine = LifecycleMachine::resume(state);
    if let Some(kind) = state.maintenance_kind() {
        machine.handle(Signal::MaintenanceStart(kind));
    }
    machine
}

fn steady_states() -> impl Iterator<Item = OperationalState> {
    OperationalState::ALL
        .into_iter()
        .filter(|state| state.family() == StateFamily::SteadyState)
}

// ============================================================================
// Provisioning
// ============================================================================

mod provisioning {
    use super::*;

    #[test]
    fn boot_to_normal_then_wifi_drop_and_recovery() {
        let controller = DeviceController::new(FirmwareMode::I9Psl);
        assert_eq!(controller.current_state(), OperationalState::WiFiManagerMode);

        let expected = [
            OperationalState::WiFiManagerPortalActive,
            OperationalState::WiFiManagerStaConnecting,
            OperationalState::WiFiManagerStaConnected,
            OperationalState::WiFiOkServerConnecting,
            OperationalState::WiFiOkServerConnected,
            OperationalState::Normal,
        ];
        for (signal, state) in PROVISIONING.into_iter().zip(expected) {
            assert_eq!(controller.handle_signal(signal), state, "after {signal}");
            assert_eq!(controller.current_state(), state);
        }

        assert_eq!(
            controller.handle_signal(Signal::WifiLost),
            OperationalState::WiFiLost
        );
        assert_eq!(
            controller.handle_signal(Signal::StaConnected),
            OperationalState::Normal
        );
    }

    #[test]
    fn raw_signals_drive_the_same_path() {
        let controller = DeviceController::new(FirmwareMode::O1Ppt);
        for signal in PROVISIONING {
            controller.handle_raw_signal(&signal.to_string());
        }
        assert_eq!(controller.current_state(), OperationalState::Normal);
    }

    #[test]
    fn wrong_password_then_retry() {
        let controller = DeviceController::new(FirmwareMode::I9Psl);
        controller.handle_signal(Signal::PortalActive);
        controller.handle_signal(Signal::StaConnecting);
        assert_eq!(
            controller.handle_signal(Signal::StaConnectFailed),
            OperationalState::WiFiManagerConnectFailed
        );
        assert_eq!(
            controller.render_view().indication.fault_hint(),
            Some(FaultHint::FixWifi)
        );

        assert_eq!(
            controller.handle_signal(Signal::Retry),
            OperationalState::WiFiManagerStaConnecting
        );
        assert_eq!(
            controller.handle_signal(Signal::StaConnected),
            OperationalState::WiFiManagerStaConnected
        );
    }

    #[test]
    fn firewall_blocks_server_then_retry_loop() {
        let controller = controller_in(OperationalState::WiFiOkServerConnecting);
        for _ in 0..3 {
            assert_eq!(
                controller.handle_signal(Signal::ServerConnectFailed),
                OperationalState::WiFiOkServerConnectFailed
            );
            assert_eq!(
                controller.handle_signal(Signal::Retry),
                OperationalState::WiFiOkServerConnecting
            );
        }
        assert_eq!(
            controller.handle_signal(Signal::ServerConnected),
            OperationalState::WiFiOkServerConnected
        );
    }

    #[test]
    fn sensor_config_failure_needs_new_input() {
        let controller = controller_in(OperationalState::WiFiOkServerConnected);
        controller.handle_signal(Signal::ConfigInvalid);
        assert_eq!(
            controller.handle_signal(Signal::Retry),
            OperationalState::WiFiOkServerOkSensorConfigFailed
        );
        assert_eq!(
            controller.handle_signal(Signal::ConfigValid),
            OperationalState::Normal
        );
    }
}

// ============================================================================
// Transition table
// ============================================================================

mod transition_table {
    use super::*;

    #[test]
    fn every_key_path() {
        use OperationalState as S;

        let rows = [
            (S::WiFiManagerMode, Signal::PortalActive, S::WiFiManagerPortalActive),
            (S::WiFiManagerPortalActive, Signal::StaConnecting, S::WiFiManagerStaConnecting),
            (S::WiFiManagerStaConnecting, Signal::StaConnected, S::WiFiManagerStaConnected),
            (S::WiFiManagerStaConnecting, Signal::StaConnectFailed, S::WiFiManagerConnectFailed),
            (S::WiFiManagerStaConnected, Signal::ServerConnecting, S::WiFiOkServerConnecting),
            (S::WiFiOkServerConnecting, Signal::ServerConnected, S::WiFiOkServerConnected),
            (S::WiFiOkServerConnecting, Signal::ServerConnectFailed, S::WiFiOkServerConnectFailed),
            (S::WiFiOkServerConnected, Signal::ConfigValid, S::Normal),
            (S::WiFiOkServerConnected, Signal::ConfigInvalid, S::WiFiOkServerOkSensorConfigFailed),
            (S::Normal, Signal::WifiLost, S::WiFiLost),
            (S::Normal, Signal::ServerLost, S::ServerLost),
            (S::Normal, Signal::ConfigInvalid, S::SensorConfigFailed),
            (S::WiFiLost, Signal::StaConnected, S::Normal),
            (S::ServerLost, Signal::ServerConnected, S::Normal),
            (S::SensorConfigFailed, Signal::ConfigValid, S::Normal),
        ];

        for (from, signal, to) in rows {
            let mut machine = LifecycleMachine::resume(from);
            let transition = machine.handle(signal);
            assert_eq!(
                (transition.from, transition.to, transition.status),
                (from, to, TransitionStatus::Applied),
                "{from} --{signal}-->"
            );
        }
    }

    #[test]
    fn maintenance_rows() {
        for from in steady_states().filter(|s| *s != OperationalState::OtaPerform) {
            for kind in MaintenanceKind::ALL.into_iter().filter(|k| k.state() != from) {
                let mut machine = machine_in(from);
                machine.handle(Signal::MaintenanceStart(kind));
                assert_eq!(machine.state(), kind.state(), "{from} --{kind}-start-->");

                machine.handle(Signal::MaintenanceComplete(kind));
                assert_eq!(machine.state(), from, "{kind} did not return to {from}");
            }
        }
    }

    #[test]
    fn exactly_one_state_is_active() {
        let mut machine = LifecycleMachine::new();
        let signals = PROVISIONING
            .into_iter()
            .chain([
                Signal::ServerLost,
                Signal::MaintenanceStart(MaintenanceKind::Ota),
                Signal::WifiLost,
                Signal::MaintenanceAbort(MaintenanceKind::Ota),
                Signal::ServerConnected,
            ]);
        for signal in signals {
            machine.handle(signal);
            let state = machine.state();
            assert_eq!(
                OperationalState::ALL.iter().filter(|s| **s == state).count(),
                1
            );
            assert_eq!(machine.return_point().is_some(), state.is_maintenance());
        }
        assert_eq!(machine.state(), OperationalState::Normal);
    }

    #[test]
    fn repeated_server_connected_is_idempotent() {
        let controller = controller_in(OperationalState::WiFiOkServerConnected);
        for _ in 0..2 {
            assert_eq!(
                controller.handle_signal(Signal::ServerConnected),
                OperationalState::WiFiOkServerConnected
            );
        }
    }

    #[test]
    fn recovery_never_returns_to_setup() {
        for signal in [Signal::StaConnected, Signal::ServerConnected] {
            let controller = controller_in(OperationalState::WiFiLost);
            let state = controller.handle_signal(signal);
            assert_eq!(state, OperationalState::Normal);
            assert_ne!(state.family(), StateFamily::Setup);
        }
    }
}

// ============================================================================
// Preemption
// ============================================================================

mod preemption {
    use super::*;

    #[test]
    fn ota_round_trip_from_every_steady_state() {
        for from in steady_states().filter(|s| *s != OperationalState::OtaPerform) {
            let controller = controller_in(from);
            assert_eq!(
                controller.handle_raw_signal("ota-start"),
                OperationalState::OtaPerform
            );
            assert_eq!(controller.return_point(), Some(from));
            assert_eq!(controller.handle_raw_signal("ota-complete"), from);
        }
    }

    #[test]
    fn interrupted_calibration_finishes_after_update() {
        let controller = controller_in(OperationalState::Normal);
        for raw in ["calibration-start", "ota-start", "ota-complete"] {
            controller.handle_raw_signal(raw);
        }
        assert_eq!(controller.current_state(), OperationalState::Co2Calibration);
        assert_eq!(
            controller.handle_raw_signal("calibration-complete"),
            OperationalState::Normal
        );
    }

    #[test]
    fn interrupted_power_up_test_resumes_after_update() {
        let controller = controller_in(OperationalState::Normal);
        for raw in ["led-power-up-test-start", "ota-start", "ota-complete"] {
            controller.handle_raw_signal(raw);
        }
        assert_eq!(
            controller.current_state(),
            OperationalState::LedBarPowerUpTest
        );
    }

    #[test]
    fn ota_preempts_exception_recovery() {
        let controller = controller_in(OperationalState::WiFiManagerConnectFailed);
        controller.handle_signal(Signal::MaintenanceStart(MaintenanceKind::Ota));
        assert_eq!(
            controller.handle_signal(Signal::Retry),
            OperationalState::OtaPerform
        );

        controller.handle_signal(Signal::MaintenanceAbort(MaintenanceKind::Ota));
        assert_eq!(
            controller.handle_signal(Signal::Retry),
            OperationalState::WiFiManagerStaConnecting
        );
    }

    #[test]
    fn ota_is_not_preempted() {
        let controller = controller_in(OperationalState::Normal);
        controller.handle_signal(Signal::MaintenanceStart(MaintenanceKind::Ota));

        for raw in ["calibration-start", "led-test-start", "led-power-up-test-start"] {
            assert_eq!(controller.handle_raw_signal(raw), OperationalState::OtaPerform);
        }
    }

    #[test]
    fn maintenance_entry_is_observed() {
        let controller = controller_in(OperationalState::ServerLost);
        let entered = Arc::new(Mutex::new(Vec::new()));
        let entered_clone = entered.clone();
        controller.on_maintenance_entered(move |kind| entered_clone.lock().push(kind));

        controller.handle_signal(Signal::MaintenanceStart(MaintenanceKind::Co2Calibration));
        controller.handle_signal(Signal::MaintenanceComplete(MaintenanceKind::Co2Calibration));

        assert_eq!(*entered.lock(), vec![MaintenanceKind::Co2Calibration]);
        assert_eq!(controller.current_state(), OperationalState::ServerLost);
    }
}

// ============================================================================
// Observers
// ============================================================================

mod observers {
    use super::*;

    #[test]
    fn indications_follow_the_lifecycle() {
        let controller = DeviceController::new(FirmwareMode::I9Psl);
        let indications = Arc::new(Mutex::new(Vec::new()));
        let indications_clone = indications.clone();
        controller.on_indication_changed(move |indication| {
            indications_clone.lock().push(indication);
        });

        for signal in PROVISIONING {
            controller.handle_signal(signal);
        }
        controller.handle_signal(Signal::ServerLost);

        assert_eq!(
            *indications.lock(),
            vec![
                StatusIndication::WifiConnecting,
                StatusIndication::ServerConnecting,
                StatusIndication::Live,
                StatusIndication::ServerLost,
            ]
        );
    }

    #[test]
    fn rejected_signals_do_not_corrupt_state() {
        let controller = controller_in(OperationalState::Normal);
        let rejected = Arc::new(Mutex::new(0));
        let rejected_clone = rejected.clone();
        controller.on_signal_rejected(move |_, _| *rejected_clone.lock() += 1);

        controller.handle_signal(Signal::PortalActive);
        controller.handle_raw_signal("factory-reset");
        controller.handle_signal(Signal::MaintenanceComplete(MaintenanceKind::Ota));

        assert_eq!(*rejected.lock(), 3);
        assert_eq!(controller.current_state(), OperationalState::Normal);
    }

    #[tokio::test]
    async fn network_task_follows_state_changes() {
        let controller = Arc::new(DeviceController::new(FirmwareMode::O1Pst));
        let mut rx = controller.subscribe();

        let control = controller.clone();
        let handle = tokio::spawn(async move {
            for signal in PROVISIONING {
                control.handle_signal(signal);
            }
        });
        handle.await.unwrap();

        let mut last = None;
        for _ in 0..PROVISIONING.len() {
            last = rx.recv().await.unwrap().state();
        }
        assert_eq!(last, Some(OperationalState::Normal));
    }
}
