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

//! # Mitos Core
//!
//! Foundational crate for the Mitos scripting layer: the value types script
//! code works with (vectors, scalar helpers, colors), entity identity and
//! liveness contracts, and the per-frame clock source that feeds the update
//! loop.
//!
//! Everything engine-specific (component storage, rendering, physics) lives
//! behind the host engine; this crate only defines the narrow contracts the
//! scripting layer needs from it.

#![warn(missing_docs)]

pub mod entity;
pub mod math;
pub mod time;

pub use entity::{EntityId, LivenessProbe};
pub use time::{FrameClock, FrameDelta};
