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

//! The behavior base layer: user script types and the host that drives
//! them.
//!
//! A [`Behavior`] is the unit of user script logic attached to an entity.
//! The host engine wraps each instance in a [`BehaviorHost`], which owns
//! the instance's [`CoroutineScheduler`] and drives the whole thing once
//! per frame: lifecycle hooks first, then the coroutine pass.

use mitos_core::entity::{EntityId, LivenessProbe};

use crate::coroutine::scheduler::CoroutineScheduler;
use crate::coroutine::{CoroutineHandle, Routine};

/// User script logic attached to one entity.
///
/// All hooks default to no-ops so a behavior only implements what it needs.
/// Hooks run on the engine's update thread; long-running work belongs in a
/// coroutine started through the [`BehaviorContext`].
pub trait Behavior {
    /// Called once, immediately before the first update while enabled.
    fn on_start(&mut self, _ctx: &mut BehaviorContext<'_>) {}

    /// Called every update while the behavior is enabled and its entity is
    /// alive.
    fn on_update(&mut self, _ctx: &mut BehaviorContext<'_>) {}

    /// Called once when the behavior is destroyed.
    fn on_destroy(&mut self) {}
}

/// Per-update context handed to behavior hooks.
///
/// Hooks run outside the coroutine pass, so coroutine operations here act
/// on the scheduler directly: a coroutine started from `on_update` takes
/// its first step in this same frame's coroutine pass.
pub struct BehaviorContext<'a> {
    delta_seconds: f32,
    entity: EntityId,
    scheduler: &'a mut CoroutineScheduler,
}

impl BehaviorContext<'_> {
    /// Scaled elapsed time of the current frame, in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    /// The entity this behavior is attached to.
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Starts a coroutine on this behavior's scheduler.
    pub fn start_coroutine(&mut self, routine: impl Routine + 'static) -> CoroutineHandle {
        self.scheduler.start(routine)
    }

    /// Marks a coroutine of this behavior for removal. Stopping a finished
    /// or foreign handle is a no-op.
    pub fn stop_coroutine(&mut self, handle: CoroutineHandle) {
        self.scheduler.stop(handle);
    }

    /// Marks every coroutine of this behavior for removal.
    pub fn stop_all_coroutines(&mut self) {
        self.scheduler.stop_all();
    }
}

/// Owns one behavior instance, its coroutine scheduler and its enabled
/// state, and drives all of it once per frame.
pub struct BehaviorHost {
    behavior: Box<dyn Behavior>,
    scheduler: CoroutineScheduler,
    entity: EntityId,
    enabled: bool,
    started: bool,
    destroyed: bool,
}

impl BehaviorHost {
    /// Wraps `behavior` for the entity it is attached to. The behavior
    /// starts enabled; `on_start` fires on the first update.
    pub fn new(entity: EntityId, behavior: impl Behavior + 'static) -> Self {
        Self {
            behavior: Box::new(behavior),
            scheduler: CoroutineScheduler::new(),
            entity,
            enabled: true,
            started: false,
            destroyed: false,
        }
    }

    /// The entity this behavior is attached to.
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Returns `true` while the behavior participates in updates.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the behavior. A disabled behavior receives no
    /// hooks and its coroutines are paused, not cancelled; they resume
    /// where they left off when re-enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The behavior's coroutine scheduler.
    pub fn scheduler(&mut self) -> &mut CoroutineScheduler {
        &mut self.scheduler
    }

    /// Drives one frame: lifecycle hooks, then the coroutine pass.
    ///
    /// Skipped entirely while the behavior is disabled or destroyed, or
    /// when `probe` reports the owning entity dead: a script attached to
    /// a destroyed entity silently stops running.
    pub fn update(&mut self, delta_seconds: f32, probe: &dyn LivenessProbe) {
        if self.destroyed || !self.enabled {
            return;
        }
        if !probe.is_alive(self.entity) {
            log::debug!(
                "Skipping update for behavior on dead entity {}.",
                self.entity
            );
            return;
        }

        let mut ctx = BehaviorContext {
            delta_seconds,
            entity: self.entity,
            scheduler: &mut self.scheduler,
        };
        if !self.started {
            self.started = true;
            self.behavior.on_start(&mut ctx);
        }
        self.behavior.on_update(&mut ctx);

        self.scheduler.tick(delta_seconds);
    }

    /// Destroys the behavior: fires `on_destroy` once and cancels all of
    /// its coroutines. Further `update` calls are no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.scheduler.stop_all();
        self.behavior.on_destroy();
    }
}

impl std::fmt::Debug for BehaviorHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorHost")
            .field("entity", &self.entity)
            .field("enabled", &self.enabled)
            .field("started", &self.started)
            .field("destroyed", &self.destroyed)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}
