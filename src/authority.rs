// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration authority arbiter.
//!
//! A pure policy gate consulted before any configuration write is accepted.
//!
//! | origin \ control | `Local` | `Cloud` | `Both` |
//! |------------------|---------|---------|--------|
//! | `Local`          | yes     | no      | yes    |
//! | `Cloud`          | no      | yes     | yes    |

use crate::types::{ConfigOrigin, ConfigurationControl};

/// Returns `true` if `origin` may write configuration under `control`.
///
/// # Examples
///
/// ```
/// use aqmon::authority::is_write_allowed;
/// use aqmon::types::{ConfigOrigin, ConfigurationControl};
///
/// assert!(!is_write_allowed(ConfigOrigin::Local, ConfigurationControl::Cloud));
/// assert!(is_write_allowed(ConfigOrigin::Cloud, ConfigurationControl::Both));
/// ```
#[must_use]
pub const fn is_write_allowed(origin: ConfigOrigin, control: ConfigurationControl) -> bool {
    matches!(
        (origin, control),
        (
            ConfigOrigin::Local,
            ConfigurationControl::Local | ConfigurationControl::Both
        ) | (
            ConfigOrigin::Cloud,
            ConfigurationControl::Cloud | ConfigurationControl::Both
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_truth_table() {
        let table = [
            (ConfigOrigin::Local, ConfigurationControl::Local, true),
            (ConfigOrigin::Local, ConfigurationControl::Cloud, false),
            (ConfigOrigin::Local, ConfigurationControl::Both, true),
            (ConfigOrigin::Cloud, ConfigurationControl::Local, false),
            (ConfigOrigin::Cloud, ConfigurationControl::Cloud, true),
            (ConfigOrigin::Cloud, ConfigurationControl::Both, true),
        ];
        for (origin, control, allowed) in table {
            assert_eq!(
                is_write_allowed(origin, control),
                allowed,
                "{origin} under {control}"
            );
        }
    }
}
