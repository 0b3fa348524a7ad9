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

//! # Cooperative Coroutines
//!
//! A coroutine is a suspendable unit of script logic advanced by its owning
//! scheduler once per frame. The protocol has three pieces:
//!
//! 1. **[`Routine`]**: the suspendable computation itself, a state machine
//!    whose `resume` runs one step and reports a [`Suspension`].
//! 2. **[`Suspension`]**: what the step yielded. Keep going next tick,
//!    wait for a nested coroutine, wait for a [`YieldCondition`], or done.
//! 3. **[`CoroutineScheduler`]**: owns every active coroutine of one
//!    behavior instance and resolves suspensions depth-first each tick.
//!
//! Suspensions are an explicit tagged union rather than runtime inspection
//! of arbitrary yielded objects, so the scheduler never guesses what a step
//! meant.
//!
//! [`CoroutineScheduler`]: scheduler::CoroutineScheduler
//! [`YieldCondition`]: wait::YieldCondition

pub mod handle;
pub mod scheduler;
pub mod wait;

pub use handle::{Coroutine, CoroutineHandle};

use crate::error::ScriptError;
use wait::YieldCondition;

/// A suspendable sequence of script steps.
///
/// `resume` is called by the scheduler at most once per tick while the
/// coroutine is runnable. One call executes one step and returns the
/// suspension describing when the next step may run. Any
/// `FnMut(&mut TickContext) -> Result<Suspension, ScriptError>` is a
/// routine, so simple coroutines are closures over a step counter.
///
/// Routines run on the engine's update thread only; they are never sent
/// across threads and must not block.
pub trait Routine {
    /// Executes one step of the sequence.
    fn resume(&mut self, ctx: &mut TickContext<'_>) -> Result<Suspension, ScriptError>;
}

impl<F> Routine for F
where
    F: FnMut(&mut TickContext<'_>) -> Result<Suspension, ScriptError>,
{
    fn resume(&mut self, ctx: &mut TickContext<'_>) -> Result<Suspension, ScriptError> {
        self(ctx)
    }
}

/// What a routine step yielded: the explicit suspension protocol between a
/// step and the scheduler.
pub enum Suspension {
    /// Run the next step on the next tick.
    Continue,
    /// Suspend until the nested coroutine has fully finished. The nested
    /// coroutine is driven by this coroutine's scheduler slot, one leaf
    /// step per tick; it is not part of the scheduler's active set.
    Nested(Coroutine),
    /// Suspend until the condition stops waiting.
    Wait(YieldCondition),
    /// The sequence has no further steps; the coroutine completes.
    Done,
}

impl Suspension {
    /// Suspends until the nested `routine` has run to completion.
    pub fn nested(routine: impl Routine + 'static) -> Self {
        Self::Nested(Coroutine::new(routine))
    }

    /// Suspends for `seconds` of scaled gameplay time.
    pub fn wait_seconds(seconds: f32) -> Self {
        Self::Wait(YieldCondition::wait_for_seconds(seconds))
    }

    /// Suspends until `predicate` returns `true`.
    pub fn wait_until(predicate: impl FnMut() -> bool + 'static) -> Self {
        Self::Wait(YieldCondition::wait_until(predicate))
    }

    /// Suspends while `predicate` returns `true`.
    pub fn wait_while(predicate: impl FnMut() -> bool + 'static) -> Self {
        Self::Wait(YieldCondition::wait_while(predicate))
    }
}

impl std::fmt::Debug for Suspension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => write!(f, "Continue"),
            Self::Nested(coroutine) => write!(f, "Nested({})", coroutine.handle()),
            Self::Wait(condition) => write!(f, "Wait({condition:?})"),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// Deferred scheduler operation issued from inside a coroutine step.
pub(crate) enum Command {
    Start(Coroutine),
    Stop(CoroutineHandle),
    StopAll,
}

/// Per-tick context handed to every routine step.
///
/// Carries the tick's elapsed time and a deferred command buffer for
/// scheduler operations. Commands issued here are applied after the current
/// pass over the active set completes: a coroutine started mid-tick is
/// first advanced on the *next* tick, and a stop issued mid-tick takes
/// effect at the end of the current one. This keeps the active set stable
/// while it is being iterated.
pub struct TickContext<'a> {
    delta_seconds: f32,
    commands: &'a mut Vec<Command>,
}

impl<'a> TickContext<'a> {
    pub(crate) fn new(delta_seconds: f32, commands: &'a mut Vec<Command>) -> Self {
        Self {
            delta_seconds,
            commands,
        }
    }

    /// Scaled elapsed time of the current tick, in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    /// Schedules `routine` as a new coroutine on the owning scheduler.
    ///
    /// The coroutine joins the active set after the current pass and runs
    /// its first step on the next tick.
    pub fn start(&mut self, routine: impl Routine + 'static) -> CoroutineHandle {
        let coroutine = Coroutine::new(routine);
        let handle = coroutine.handle();
        self.commands.push(Command::Start(coroutine));
        handle
    }

    /// Marks `handle` for removal at the end of the current tick. Stopping
    /// a finished or foreign handle is a no-op.
    pub fn stop(&mut self, handle: CoroutineHandle) {
        self.commands.push(Command::Stop(handle));
    }

    /// Marks every active coroutine for removal at the end of the current
    /// tick, including coroutines started earlier in the same tick, since
    /// deferred commands apply in the order they were issued.
    pub fn stop_all(&mut self) {
        self.commands.push(Command::StopAll);
    }
}
