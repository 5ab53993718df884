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

//! # Aion Core
//!
//! Foundational crate containing the value types and error contracts of the
//! generational resource-lifetime system.
//!
//! A [`Handle`] is an opaque capability token (slot index plus
//! [`Generation`] stamp) issued by a slot pool when a resource is registered.
//! The pool owns the resource; the handle merely names it. When the issuing
//! lifetime frame closes, the slot's generation is retired and every handle
//! recorded against it becomes permanently stale.
//!
//! The pool and frame-stack implementations live in `aion-data`; this crate
//! only defines the contract they and their consumers share.

#![warn(missing_docs)]

pub mod error;
pub mod generation;
pub mod handle;

pub use error::{LifetimeError, PoolError};
pub use generation::Generation;
pub use handle::Handle;
