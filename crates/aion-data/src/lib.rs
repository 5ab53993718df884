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

//! # Aion Data
//!
//! Storage and lifetime management for externally-owned resources.
//!
//! The crate provides two cooperating pieces:
//!
//! - [`SlotPool`], dense generation-stamped slot storage that owns every
//!   resource placed into it and retires whole generations in one pass.
//! - [`LifetimeManager`], a stack of named frames, each stamped with a
//!   fresh generation; closing a frame bulk-retires everything registered
//!   while it was open.
//!
//! Both are single-threaded by contract: all mutating operations take
//! `&mut self` and callers serialize access (typically by confining the
//! manager to one update thread). The handles they issue are plain values
//! and may cross threads freely.

#![warn(missing_docs)]

pub mod lifetime;
pub mod pool;

pub use lifetime::LifetimeManager;
pub use pool::SlotPool;
