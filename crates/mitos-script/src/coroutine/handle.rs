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

//! Coroutine identity and the per-coroutine suspension state machine.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::wait::YieldCondition;
use super::{Routine, Suspension, TickContext};
use crate::error::ScriptError;

static NEXT_COROUTINE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity token for a coroutine, used for cancellation.
///
/// Handles are allocated from a process-wide monotone counter, so a
/// coroutine's identity is stable for its whole lifetime and equality is by
/// identity, never by content. Copies of a handle remain valid after the
/// coroutine finishes; stopping a stale handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoroutineHandle(u64);

impl CoroutineHandle {
    fn next() -> Self {
        Self(NEXT_COROUTINE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CoroutineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a coroutine stands between two of its own steps.
enum Pending {
    /// The routine may be resumed on the next advance.
    Ready,
    /// Suspended on a nested coroutine; resumed once it finishes.
    Nested(Box<Coroutine>),
    /// Suspended on a yield condition; resumed once it releases.
    Wait(YieldCondition),
}

/// Result of advancing a coroutine by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// The coroutine still has work ahead of it.
    Running,
    /// The sequence is exhausted; the coroutine can be dropped.
    Finished,
}

/// A suspendable computation together with its suspension state.
///
/// The continuation owner: a boxed [`Routine`] plus whatever it is
/// currently suspended on. A coroutine is owned either by a scheduler's
/// active set or, when nested, by its parent coroutine; ownership is
/// never shared.
pub struct Coroutine {
    handle: CoroutineHandle,
    routine: Box<dyn Routine>,
    pending: Pending,
}

impl Coroutine {
    /// Wraps `routine` in a fresh coroutine. No side effects beyond
    /// allocation and identity assignment; nothing runs until the owning
    /// scheduler's next tick.
    pub fn new(routine: impl Routine + 'static) -> Self {
        Self {
            handle: CoroutineHandle::next(),
            routine: Box::new(routine),
            pending: Pending::Ready,
        }
    }

    /// The coroutine's identity token.
    pub fn handle(&self) -> CoroutineHandle {
        self.handle
    }

    /// Resolves this coroutine's suspension for the current tick,
    /// depth-first.
    ///
    /// A pending nested coroutine is advanced first; while it still runs,
    /// the outer routine is left untouched so each tick advances at most
    /// one leaf step. A pending condition is evaluated exactly once. Only
    /// when nothing is pending (or the pending wait just released) does the
    /// routine itself resume, and a wait it yields is evaluated once
    /// immediately, so the yielding tick's elapsed time counts towards it.
    ///
    /// An `Err` from any routine in the nested chain propagates to the
    /// scheduler, which drops the whole coroutine.
    pub(crate) fn advance(
        &mut self,
        ctx: &mut TickContext<'_>,
    ) -> Result<StepOutcome, ScriptError> {
        match &mut self.pending {
            Pending::Nested(child) => {
                if child.advance(ctx)? == StepOutcome::Running {
                    return Ok(StepOutcome::Running);
                }
                // Child finished: resume this routine in the same tick.
                self.pending = Pending::Ready;
            }
            Pending::Wait(condition) => {
                if condition.still_waiting(ctx.delta_seconds()) {
                    return Ok(StepOutcome::Running);
                }
                self.pending = Pending::Ready;
            }
            Pending::Ready => {}
        }

        match self.routine.resume(ctx)? {
            Suspension::Done => Ok(StepOutcome::Finished),
            Suspension::Continue => {
                self.pending = Pending::Ready;
                Ok(StepOutcome::Running)
            }
            Suspension::Nested(child) => {
                // The child's first step runs next tick; this tick already
                // advanced the step that produced the yield.
                self.pending = Pending::Nested(Box::new(child));
                Ok(StepOutcome::Running)
            }
            Suspension::Wait(mut condition) => {
                if condition.still_waiting(ctx.delta_seconds()) {
                    self.pending = Pending::Wait(condition);
                } else {
                    self.pending = Pending::Ready;
                }
                Ok(StepOutcome::Running)
            }
        }
    }
}

impl fmt::Debug for Coroutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending = match &self.pending {
            Pending::Ready => "Ready".to_string(),
            Pending::Nested(child) => format!("Nested({})", child.handle()),
            Pending::Wait(condition) => format!("Wait({condition:?})"),
        };
        f.debug_struct("Coroutine")
            .field("handle", &self.handle)
            .field("pending", &pending)
            .finish()
    }
}
