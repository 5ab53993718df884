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

//! Defines the hierarchy of error types for the resource-lifetime system.

use crate::generation::Generation;
use std::fmt;

/// An error raised by the slot pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The handle's recorded generation no longer matches its slot: the
    /// resource behind it has been retired, or the slot has been reused by a
    /// newer generation.
    ///
    /// This is the one condition routine code is expected to handle locally,
    /// typically by treating it as a cache miss and re-registering.
    StaleHandle {
        /// The slot index the handle points at.
        index: u32,
        /// The generation recorded in the handle at issue time.
        expected: Generation,
        /// The generation currently stored in the slot
        /// ([`Generation::EMPTY`] if the slot is vacant or out of range).
        found: Generation,
    },
    /// Backing storage could not grow to admit another resource.
    ///
    /// Only possible when the underlying allocation fails; callers should
    /// propagate it to the top of the call stack rather than mask it.
    Exhausted {
        /// The total slot capacity the pool attempted to reserve.
        requested: usize,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::StaleHandle {
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Stale handle for slot {index}: issued at generation {expected}, \
                     slot now holds generation {found}"
                )
            }
            PoolError::Exhausted { requested } => {
                write!(
                    f,
                    "Slot pool exhausted: failed to grow storage to {requested} slots"
                )
            }
        }
    }
}

impl std::error::Error for PoolError {}

/// An error raised by the lifetime manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeError {
    /// A resource was registered while no lifetime frame was open.
    ///
    /// This is a misuse of the API, not a runtime condition to recover from:
    /// an un-scoped resource could never be deterministically retired.
    NoActiveFrame,
    /// A pool condition, propagated unchanged.
    Pool(PoolError),
}

impl fmt::Display for LifetimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifetimeError::NoActiveFrame => {
                write!(
                    f,
                    "No active lifetime frame: push a frame before registering resources"
                )
            }
            LifetimeError::Pool(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LifetimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LifetimeError::Pool(e) => Some(e),
            LifetimeError::NoActiveFrame => None,
        }
    }
}

impl From<PoolError> for LifetimeError {
    fn from(e: PoolError) -> Self {
        LifetimeError::Pool(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_slot_and_generations() {
        let e = PoolError::StaleHandle {
            index: 5,
            expected: Generation::new(2),
            found: Generation::new(7),
        };
        let rendered = e.to_string();
        assert!(rendered.contains("slot 5"), "got: {rendered}");
        assert!(rendered.contains("generation 2"), "got: {rendered}");
        assert!(rendered.contains("generation 7"), "got: {rendered}");
    }

    #[test]
    fn pool_errors_convert_into_lifetime_errors() {
        let e = PoolError::Exhausted { requested: 128 };
        let wrapped: LifetimeError = e.into();
        assert_eq!(wrapped, LifetimeError::Pool(e));

        // The chain must expose the pool error as the source.
        let source = std::error::Error::source(&wrapped);
        assert!(source.is_some(), "Pool variant should carry a source");
    }
}
