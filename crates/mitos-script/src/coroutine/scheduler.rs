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

//! The per-behavior coroutine scheduler.

use std::collections::HashSet;
use std::mem;

use super::handle::{Coroutine, CoroutineHandle, StepOutcome};
use super::{Command, Routine, TickContext};

/// Owns and advances all coroutines belonging to one behavior instance.
///
/// Scheduling is single-threaded and cooperative: every coroutine runs on
/// the thread that calls [`tick`](Self::tick), in the order it was started,
/// exactly once per tick. There is no parallelism and no locking, and a
/// re-entrant `tick` is impossible by construction: it takes `&mut self`
/// and the [`TickContext`] handed to coroutine bodies carries no scheduler
/// reference.
///
/// Cancellation is deferred: [`stop`](Self::stop) and
/// [`stop_all`](Self::stop_all) only mark handles, and marked coroutines
/// are dropped at the end of a tick's pass. A coroutine mid-step when its
/// stop arrives finishes that step; it is never advanced on a later tick.
pub struct CoroutineScheduler {
    /// Active coroutines; insertion order is iteration order.
    active: Vec<Coroutine>,
    /// Handles marked for removal at the next safe point.
    pending_stop: HashSet<CoroutineHandle>,
}

impl CoroutineScheduler {
    /// Creates a scheduler with no active coroutines.
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            pending_stop: HashSet::new(),
        }
    }

    /// Wraps `routine` in a new coroutine, appends it to the active set and
    /// returns its handle.
    ///
    /// Nothing executes synchronously; the first step runs on the next
    /// [`tick`](Self::tick).
    pub fn start(&mut self, routine: impl Routine + 'static) -> CoroutineHandle {
        let coroutine = Coroutine::new(routine);
        let handle = coroutine.handle();
        log::trace!("Coroutine {handle} started.");
        self.active.push(coroutine);
        handle
    }

    /// Marks `handle` for removal at the end of the next (or current) tick.
    ///
    /// The active set is never mutated immediately. Stopping a handle this
    /// scheduler does not own (already finished, never started here, or
    /// nested inside another coroutine) is a no-op, not an error.
    pub fn stop(&mut self, handle: CoroutineHandle) {
        log::trace!("Coroutine {handle} marked for stop.");
        self.pending_stop.insert(handle);
    }

    /// Marks every active coroutine for removal.
    pub fn stop_all(&mut self) {
        log::trace!("All {} active coroutine(s) marked for stop.", self.active.len());
        for coroutine in &self.active {
            self.pending_stop.insert(coroutine.handle());
        }
    }

    /// Returns `true` while `handle` is in the active set.
    pub fn is_active(&self, handle: CoroutineHandle) -> bool {
        self.active.iter().any(|c| c.handle() == handle)
    }

    /// Number of active coroutines.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns `true` if no coroutines are active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Advances every active coroutine by one tick.
    ///
    /// `delta_seconds` is the elapsed gameplay time of this tick, consumed
    /// by timed waits. It is always an explicit parameter; the scheduler
    /// never reads a clock of its own, which keeps it testable with
    /// synthetic deltas.
    ///
    /// The pass visits coroutines in insertion order, skipping any already
    /// marked for stop. A coroutine whose sequence is exhausted is dropped.
    /// A step that returns an error is reported through `log::error!` and
    /// its whole coroutine (including any nested chain) is dropped;
    /// bookkeeping for the other coroutines is unaffected. After the pass,
    /// deferred commands issued from inside steps are applied in order
    /// (mid-tick starts join the active set now and run their first step
    /// next tick), and every marked handle is removed.
    pub fn tick(&mut self, delta_seconds: f32) {
        let mut commands: Vec<Command> = Vec::new();

        // The active set is detached during the pass so coroutine bodies
        // can never observe it mid-iteration.
        let mut pass = mem::take(&mut self.active);
        pass.retain_mut(|coroutine| {
            if self.pending_stop.contains(&coroutine.handle()) {
                // Dropped below; not advanced this tick.
                return true;
            }
            let mut ctx = TickContext::new(delta_seconds, &mut commands);
            match coroutine.advance(&mut ctx) {
                Ok(StepOutcome::Running) => true,
                Ok(StepOutcome::Finished) => {
                    log::trace!("Coroutine {} finished.", coroutine.handle());
                    false
                }
                Err(e) => {
                    log::error!("Coroutine {} dropped after fault: {e}", coroutine.handle());
                    false
                }
            }
        });
        self.active = pass;

        for command in commands {
            match command {
                Command::Start(coroutine) => {
                    log::trace!("Coroutine {} started mid-tick.", coroutine.handle());
                    self.active.push(coroutine);
                }
                Command::Stop(handle) => {
                    self.pending_stop.insert(handle);
                }
                Command::StopAll => {
                    for coroutine in &self.active {
                        self.pending_stop.insert(coroutine.handle());
                    }
                }
            }
        }

        if !self.pending_stop.is_empty() {
            let stopped = mem::take(&mut self.pending_stop);
            self.active.retain(|c| !stopped.contains(&c.handle()));
        }
    }
}

impl Default for CoroutineScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CoroutineScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoroutineScheduler")
            .field("active", &self.active.len())
            .field("pending_stop", &self.pending_stop.len())
            .finish()
    }
}
