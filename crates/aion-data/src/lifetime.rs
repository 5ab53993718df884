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

//! Frame-stack lifetime management over the slot pool.
//!
//! Applications move through coarse phases (initialization, a scene load, a
//! shader hot-reload, shutdown) and the resources created in a phase should
//! die with it. The [`LifetimeManager`] models each phase as a named *frame*
//! on a LIFO stack, stamped with a fresh [`Generation`] at push time. Every
//! resource registered while a frame is open carries that frame's stamp;
//! closing the frame retires all of them in one pass, no matter how many
//! call sites created them.
//!
//! Frame names are purely diagnostic. Pushing a new frame with a name used
//! before creates an independent scope under a fresh, larger generation.

use crate::pool::SlotPool;
use aion_core::{Generation, Handle, LifetimeError};
use std::any::Any;

/// A named lifetime scope and the generation assigned to it at push time.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    name: String,
    generation: Generation,
}

/// Routes resource registration into the slot pool, stamped with the
/// generation of the innermost open frame, and bulk-retires a frame's
/// resources when it closes.
///
/// The manager is an explicitly owned object: collaborators receive a
/// reference to it rather than reaching for ambient global state, which
/// keeps it testable in isolation. All mutating operations take `&mut self`;
/// callers serialize access (single-threaded contract). Handles it issues
/// are plain values and may cross threads freely.
///
/// # Example
///
/// ```
/// use aion_data::LifetimeManager;
///
/// struct Texture(&'static str);
///
/// let mut lifetimes = LifetimeManager::new();
/// lifetimes.push_frame("Level1");
/// let grass = lifetimes.add(Texture("grass")).unwrap();
/// assert_eq!(lifetimes.get(grass).unwrap().0, "grass");
///
/// assert!(lifetimes.pop_frame().is_some());
/// assert!(!lifetimes.is_valid(grass));
/// ```
#[derive(Debug)]
pub struct LifetimeManager {
    pool: SlotPool,
    /// Open frames, innermost last. Closed strictly in LIFO order.
    frames: Vec<Frame>,
    /// Last generation handed out. Pre-incremented on push, so no frame ever
    /// receives the vacant-slot sentinel.
    counter: Generation,
}

impl LifetimeManager {
    /// Creates a manager backed by a pool with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pool: SlotPool::new(),
            frames: Vec::new(),
            counter: Generation::EMPTY,
        }
    }

    /// Creates a manager whose pool starts with room for `capacity`
    /// resources.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: SlotPool::with_capacity(capacity),
            frames: Vec::new(),
            counter: Generation::EMPTY,
        }
    }

    /// Opens a new lifetime frame and returns the generation assigned to it.
    ///
    /// Nesting depth is unbounded; typical use is a handful of long-lived
    /// frames ("Initialization", "CurrentScene") plus short-lived reload
    /// scopes.
    pub fn push_frame(&mut self, name: impl Into<String>) -> Generation {
        let name = name.into();
        self.counter = self.counter.next();
        log::info!("Lifetime frame '{name}' opened (generation {}).", self.counter);
        self.frames.push(Frame {
            name,
            generation: self.counter,
        });
        self.counter
    }

    /// Registers `resource` under the innermost open frame and returns its
    /// handle. Ownership transfers to the pool; the resource is dropped when
    /// the frame closes.
    ///
    /// # Errors
    ///
    /// - [`LifetimeError::NoActiveFrame`] when the frame stack is empty;
    ///   an un-scoped resource could never be deterministically retired.
    /// - [`LifetimeError::Pool`] when pool storage failed to grow.
    pub fn add<T: Any>(&mut self, resource: T) -> Result<Handle<T>, LifetimeError> {
        let generation = self
            .frames
            .last()
            .map(|frame| frame.generation)
            .ok_or(LifetimeError::NoActiveFrame)?;
        Ok(self.pool.add(resource, generation)?)
    }

    /// Dereferences `handle`, propagating the pool's staleness check
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`LifetimeError::Pool`] wrapping `StaleHandle` when the referenced
    /// resource has been retired.
    pub fn get<T: Any>(&self, handle: Handle<T>) -> Result<&T, LifetimeError> {
        Ok(self.pool.get(handle)?)
    }

    /// Mutable counterpart of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Same contract as [`get`](Self::get).
    pub fn get_mut<T: Any>(&mut self, handle: Handle<T>) -> Result<&mut T, LifetimeError> {
        Ok(self.pool.get_mut(handle)?)
    }

    /// Reports whether `handle` still references a live resource.
    #[must_use]
    pub fn is_valid<T>(&self, handle: Handle<T>) -> bool {
        self.pool.is_valid(handle)
    }

    /// Closes the innermost frame, synchronously retiring every resource
    /// registered under it, and returns the closed frame's generation.
    ///
    /// Frames close strictly in reverse push order; there is no pop by name.
    /// Returns `None` (with a warning) when no frame is open.
    pub fn pop_frame(&mut self) -> Option<Generation> {
        let Some(frame) = self.frames.pop() else {
            log::warn!("pop_frame requested but no lifetime frames are open.");
            return None;
        };
        let retired = self.pool.dispose_all(frame.generation);
        log::info!(
            "Lifetime frame '{}' closed (generation {}, {retired} resource(s) retired).",
            frame.name,
            frame.generation
        );
        Some(frame.generation)
    }

    /// Closes every frame still open, innermost first.
    ///
    /// Idempotent: a second call finds no frames and does nothing. The
    /// manager's `Drop` impl routes through this, so scopes a caller forgot
    /// to close are still retired deterministically.
    pub fn shutdown(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        log::debug!(
            "Lifetime manager shutting down with {} frame(s) still open.",
            self.frames.len()
        );
        while self.pop_frame().is_some() {}
    }

    /// Number of frames currently open.
    #[must_use]
    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    /// Name and generation of the innermost open frame, if any.
    #[must_use]
    pub fn current_frame(&self) -> Option<(&str, Generation)> {
        self.frames
            .last()
            .map(|frame| (frame.name.as_str(), frame.generation))
    }

    /// Number of resources currently alive across all open frames.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.pool.len()
    }
}

impl Default for LifetimeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LifetimeManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
