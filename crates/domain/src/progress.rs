// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Represents a task's completion extent as a 0 to 100 integer.
///
/// Progress is never rejected for being out of range. Construction clamps
/// into the valid range, matching the leniency of the progress override
/// operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// Zero progress.
    pub const ZERO: Self = Self(0);

    /// Full progress.
    pub const COMPLETE: Self = Self(100);

    /// Creates a `Progress` from an arbitrary integer, clamping to 0..=100.
    #[must_use]
    pub const fn clamped(value: i64) -> Self {
        if value <= 0 {
            Self(0)
        } else if value >= 100 {
            Self(100)
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let clamped: u8 = value as u8;
            Self(clamped)
        }
    }

    /// Returns the progress value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns whether this progress marks the task as completed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.0 == 100
    }

    /// Returns whether no progress has been made yet.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
