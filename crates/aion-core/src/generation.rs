// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Monotonic generation stamps used to detect stale handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monotonic stamp identifying an allocation epoch.
///
/// One generation is minted per lifetime frame, not per resource: every
/// resource registered while a frame is open shares that frame's stamp.
/// A handle whose recorded generation no longer matches the generation
/// stored in its slot is stale: the resource it named has been retired,
/// possibly with the slot already reused by a newer frame.
///
/// [`Generation::EMPTY`] (zero) is reserved as the vacant-slot sentinel and
/// is never assigned to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u32);

impl Generation {
    /// The reserved sentinel marking a vacant slot. Never a valid frame
    /// generation.
    pub const EMPTY: Self = Self(0);

    /// Builds a generation from its raw counter value.
    ///
    /// Normal code receives generations from the lifetime manager; this
    /// constructor exists for pool implementations and round-trip tests.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value (for diagnostics and serialization).
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the successor stamp.
    ///
    /// # Panics
    ///
    /// Panics if the counter overflows `u32::MAX`. Generations advance once
    /// per frame push, so reaching the limit indicates runaway frame churn
    /// rather than a recoverable condition.
    #[must_use]
    pub fn next(self) -> Self {
        Self(
            self.0
                .checked_add(1)
                .expect("generation counter overflowed u32::MAX"),
        )
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero_and_never_produced_by_next() {
        assert_eq!(Generation::EMPTY.raw(), 0);

        let mut current = Generation::EMPTY;
        for expected in 1..=8u32 {
            current = current.next();
            assert_eq!(current.raw(), expected, "stamps must advance by one");
            assert_ne!(current, Generation::EMPTY);
        }
    }

    #[test]
    fn ordering_follows_the_counter() {
        let older = Generation::new(3);
        let newer = older.next();
        assert!(older < newer);
        assert_eq!(newer, Generation::new(4));
    }
}
