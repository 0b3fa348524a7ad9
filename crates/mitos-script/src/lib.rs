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

//! # Mitos Script
//!
//! The behavior base layer of the Mitos scripting surface and its core
//! machinery: a cooperative coroutine scheduler that lets script code
//! suspend mid-function, resume on a later frame, and compose nested
//! waits, all on the engine's update thread and without native threads.
//!
//! Each behavior instance owns one [`CoroutineScheduler`]. Script code
//! expresses a suspendable computation as a [`Routine`]: a state machine
//! resumed once per frame, returning a [`Suspension`] that says when it
//! wants to run again: immediately next tick, after a nested routine
//! completes, or once a [`YieldCondition`] releases.
//!
//! ```
//! use mitos_script::{CoroutineScheduler, Suspension, TickContext};
//!
//! let mut scheduler = CoroutineScheduler::new();
//! let mut step = 0;
//! scheduler.start(move |_ctx: &mut TickContext<'_>| {
//!     step += 1;
//!     Ok(match step {
//!         1 => Suspension::wait_seconds(0.5),
//!         _ => Suspension::Done,
//!     })
//! });
//!
//! scheduler.tick(0.25); // runs the first step, starts the wait
//! scheduler.tick(0.25); // wait releases, routine finishes
//! assert!(scheduler.is_empty());
//! ```

#![warn(missing_docs)]

pub mod behavior;
pub mod coroutine;
pub mod error;

pub use behavior::{Behavior, BehaviorContext, BehaviorHost};
pub use coroutine::scheduler::CoroutineScheduler;
pub use coroutine::wait::YieldCondition;
pub use coroutine::{Coroutine, CoroutineHandle, Routine, Suspension, TickContext};
pub use error::ScriptError;
