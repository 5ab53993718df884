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

//! The phantom-typed handle issued for every pooled resource.

use crate::generation::Generation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// An opaque capability token referencing a pooled resource.
///
/// It combines a slot index with a [`Generation`] stamp to solve the "ABA
/// problem": slot storage is recycled continuously, but a recycled slot
/// carries a newer generation, so every handle recorded against the old
/// occupant fails validation instead of silently observing a different
/// resource.
///
/// The type parameter is compile-time only: a `Handle<Texture>` and a
/// `Handle<Buffer>` share the same eight-byte representation but cannot be
/// mixed up at call sites. The marker is `PhantomData<fn() -> T>`, so a
/// handle is `Copy`, `Send`, and `Sync` no matter what `T` is.
///
/// A handle is not a smart pointer. Copying it is free, never extends the
/// resource's lifetime, and it is meaningful only relative to the pool that
/// issued it; handles are never exchanged across pool instances.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Handle<T> {
    /// Slot index into the pool's dense storage.
    index: u32,
    /// The generation stamped on the slot when this handle was issued.
    generation: Generation,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Assembles a handle from raw parts.
    ///
    /// Handles are normally minted only by pool registration. This seam
    /// exists for the pool implementation itself and for round-trip tests;
    /// a forged handle never validates against a resource it was not issued
    /// for.
    #[must_use]
    pub const fn from_raw_parts(index: u32, generation: Generation) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation recorded at issue time.
    #[must_use]
    pub const fn generation(self) -> Generation {
        self.generation
    }
}

// Manual impls: deriving would add unwanted `T: ...` bounds even though the
// type parameter has no runtime presence.

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}@gen{})", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Texture;
    struct Buffer;

    #[test]
    fn equality_requires_index_and_generation() {
        let gen1 = Generation::new(1);
        let gen2 = Generation::new(2);

        let a: Handle<Texture> = Handle::from_raw_parts(0, gen1);
        let same: Handle<Texture> = Handle::from_raw_parts(0, gen1);
        let other_slot: Handle<Texture> = Handle::from_raw_parts(1, gen1);
        let other_gen: Handle<Texture> = Handle::from_raw_parts(0, gen2);

        assert_eq!(a, same);
        assert_ne!(a, other_slot);
        assert_ne!(a, other_gen);
    }

    #[test]
    fn raw_parts_round_trip() {
        let handle: Handle<Buffer> = Handle::from_raw_parts(42, Generation::new(7));
        assert_eq!(handle.index(), 42);
        assert_eq!(handle.generation(), Generation::new(7));
    }

    #[test]
    fn copyable_regardless_of_payload_type() {
        // `Texture` is neither Clone nor Copy; the handle still is.
        let handle: Handle<Texture> = Handle::from_raw_parts(3, Generation::new(1));
        let copy = handle;
        assert_eq!(handle, copy);
    }

    #[test]
    fn debug_names_slot_and_generation() {
        let handle: Handle<Texture> = Handle::from_raw_parts(3, Generation::new(9));
        assert_eq!(format!("{handle:?}"), "Handle(3@gen9)");
    }
}
