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

//! Dense slot storage with generation-stamped occupancy.
//!
//! The [`SlotPool`] maps a slot index to an owned resource plus the
//! [`Generation`] it was registered under. It is the sole owner of every
//! resource inside it: ownership transfers to the pool at registration, and
//! the resource's teardown (its `Drop` impl) runs exactly once, when the
//! pool retires the slot.
//!
//! # Allocation policy
//!
//! Free slots are tracked with two watermarks instead of an explicit free
//! list:
//!
//! ```text
//! slots:  [occ][occ][   ][occ][   ][   ]
//!                    ^lowest_unused
//!                         ^highest_used
//! ```
//!
//! Registration fills `lowest_unused` and advances it forward to the next
//! vacant slot; the scan only ever moves past slots the pool filled, so
//! allocation is amortized O(1). Retiring a slot pulls `lowest_unused` back
//! down if the freed index is smaller, and rescans backward for the new
//! `highest_used` when the top occupant frees. Storage grows by doubling,
//! which leaves every existing slot index intact.
//!
//! [`SlotPool::dispose_all`] is deliberately a full scan bounded by the high
//! watermark: it runs once per frame close, not per resource, so O(capacity)
//! is acceptable and avoids the bookkeeping of a per-generation index.

use aion_core::{Generation, Handle, PoolError};
use std::any::Any;
use std::fmt;

/// Slot count a default-constructed pool starts with.
const DEFAULT_CAPACITY: usize = 64;

/// A single storage location: an owned occupant and the generation it was
/// registered under. `occupant.is_some()` iff `generation != EMPTY`.
struct Slot {
    occupant: Option<Box<dyn Any>>,
    generation: Generation,
}

impl Slot {
    fn vacant() -> Self {
        Self {
            occupant: None,
            generation: Generation::EMPTY,
        }
    }
}

/// Dense, generation-stamped storage for externally-owned resources.
///
/// Resources of any type can share one pool: slots store the occupant
/// type-erased, while the issued [`Handle<T>`] keeps the concrete type as a
/// compile-time tag. Dereferencing validates the generation first (the one
/// correctness-critical check in the system) and only then recovers the
/// typed occupant.
///
/// The pool never hands out owning references and never exposes teardown;
/// retirement happens exclusively through [`dispose_all`](Self::dispose_all).
pub struct SlotPool {
    slots: Vec<Slot>,
    /// Lowest vacant index, or `slots.len()` when every slot is occupied.
    lowest_unused: usize,
    /// Highest occupied index, `None` while the pool is empty.
    highest_used: Option<usize>,
    len: usize,
}

impl SlotPool {
    /// Creates a pool with the default initial capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a pool with room for `capacity` resources before it grows.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::vacant);
        Self {
            slots,
            lowest_unused: 0,
            highest_used: None,
            len: 0,
        }
    }

    /// Registers `resource` under `generation`, transferring ownership to
    /// the pool, and returns the handle that names it.
    ///
    /// The pool does not validate the generation beyond it not being the
    /// vacant-slot sentinel; stamping resources with the correct frame
    /// generation is the lifetime manager's job.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Exhausted`] if backing storage needed to grow
    /// and the allocation failed. This is a fatal condition for the caller.
    pub fn add<T: Any>(
        &mut self,
        resource: T,
        generation: Generation,
    ) -> Result<Handle<T>, PoolError> {
        debug_assert_ne!(
            generation,
            Generation::EMPTY,
            "EMPTY is the vacant-slot sentinel, never a registration generation"
        );

        if self.lowest_unused >= self.slots.len() {
            self.grow()?;
        }

        let index = self.lowest_unused;
        let slot = &mut self.slots[index];
        debug_assert!(
            slot.occupant.is_none(),
            "lowest_unused must reference a vacant slot"
        );
        slot.occupant = Some(Box::new(resource));
        slot.generation = generation;
        self.len += 1;

        if self.highest_used.map_or(true, |highest| index > highest) {
            self.highest_used = Some(index);
        }

        // Advance to the next vacant slot. The scan only moves forward past
        // slots this pool filled, keeping allocation amortized O(1).
        self.lowest_unused += 1;
        while self.lowest_unused < self.slots.len()
            && self.slots[self.lowest_unused].generation != Generation::EMPTY
        {
            self.lowest_unused += 1;
        }

        Ok(Handle::from_raw_parts(index as u32, generation))
    }

    /// Dereferences `handle`, returning the resource it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::StaleHandle`] when the slot's stored generation
    /// no longer matches the handle: the resource has been retired or the
    /// slot reused by a newer generation. An out-of-range index reports the
    /// same way: the slot cannot currently hold the referenced resource.
    pub fn get<T: Any>(&self, handle: Handle<T>) -> Result<&T, PoolError> {
        let slot = self
            .slots
            .get(handle.index() as usize)
            .ok_or_else(|| Self::stale(handle, Generation::EMPTY))?;
        if slot.generation != handle.generation() {
            return Err(Self::stale(handle, slot.generation));
        }
        // A generation match with a missing or differently-typed occupant is
        // only reachable through a handle forged from raw parts; such a
        // handle never named a live resource of its claimed type.
        slot.occupant
            .as_deref()
            .and_then(|occupant| occupant.downcast_ref::<T>())
            .ok_or_else(|| Self::stale(handle, slot.generation))
    }

    /// Mutable counterpart of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Same contract as [`get`](Self::get).
    pub fn get_mut<T: Any>(&mut self, handle: Handle<T>) -> Result<&mut T, PoolError> {
        let slot = self
            .slots
            .get_mut(handle.index() as usize)
            .ok_or_else(|| Self::stale(handle, Generation::EMPTY))?;
        if slot.generation != handle.generation() {
            return Err(Self::stale(handle, slot.generation));
        }
        let found = slot.generation;
        slot.occupant
            .as_deref_mut()
            .and_then(|occupant| occupant.downcast_mut::<T>())
            .ok_or_else(|| Self::stale(handle, found))
    }

    /// Reports whether `handle` still references a live resource, without
    /// dereferencing it. Used by caches that want to recheck an entry
    /// without routing through an error.
    #[must_use]
    pub fn is_valid<T>(&self, handle: Handle<T>) -> bool {
        self.slots.get(handle.index() as usize).is_some_and(|slot| {
            slot.generation != Generation::EMPTY && slot.generation == handle.generation()
        })
    }

    /// Retires every slot registered under `generation`: each occupant is
    /// dropped (its teardown runs exactly once), the slot is cleared, and
    /// the watermarks are pulled back. Returns the number of retired slots.
    ///
    /// Linear in pool capacity by design; this runs once per frame close.
    pub fn dispose_all(&mut self, generation: Generation) -> usize {
        debug_assert_ne!(
            generation,
            Generation::EMPTY,
            "EMPTY is the vacant-slot sentinel, never a retirement generation"
        );

        let Some(highest) = self.highest_used else {
            return 0;
        };

        let mut retired = 0;
        for index in 0..=highest {
            let slot = &mut self.slots[index];
            if slot.generation != generation {
                continue;
            }
            // Teardown: dropping the owned box runs the occupant's Drop.
            slot.occupant = None;
            slot.generation = Generation::EMPTY;
            self.len -= 1;
            retired += 1;
            if index < self.lowest_unused {
                self.lowest_unused = index;
            }
        }

        if retired > 0 {
            self.highest_used = self.slots[..=highest]
                .iter()
                .rposition(|slot| slot.generation != Generation::EMPTY);
        }

        retired
    }

    /// Number of resources currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pool holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slot capacity before the next growth.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Doubles the slot storage, preserving every existing index.
    fn grow(&mut self) -> Result<(), PoolError> {
        let target = (self.slots.len() * 2).max(1);
        let additional = target - self.slots.len();
        self.slots
            .try_reserve(additional)
            .map_err(|_| PoolError::Exhausted { requested: target })?;
        self.slots.resize_with(target, Slot::vacant);
        Ok(())
    }

    fn stale<T>(handle: Handle<T>, found: Generation) -> PoolError {
        PoolError::StaleHandle {
            index: handle.index(),
            expected: handle.generation(),
            found,
        }
    }
}

impl Default for SlotPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SlotPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotPool")
            .field("len", &self.len)
            .field("capacity", &self.slots.len())
            .field("lowest_unused", &self.lowest_unused)
            .field("highest_used", &self.highest_used)
            .finish_non_exhaustive()
    }
}
