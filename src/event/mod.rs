// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast events for async collaborators.
//!
//! The [`EventBus`] uses tokio's broadcast channel so any number of tasks
//! can follow state transitions, rejected signals and configuration
//! changes without registering synchronous callbacks.
//!
//! # Examples
//!
//! ```
//! use aqmon::event::{EventBus, LifecycleEvent};
//! use aqmon::config::DeviceConfig;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(LifecycleEvent::config_changed(DeviceConfig::new()));
//! assert!(rx.try_recv().unwrap().is_config_change());
//! ```

mod event_bus;
mod lifecycle_event;

pub use event_bus::EventBus;
pub use lifecycle_event::LifecycleEvent;
