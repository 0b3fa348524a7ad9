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

//! Headless driver for the Mitos scripting layer.
//!
//! Runs a demo behavior for a configurable number of frames: a patrol
//! routine walks between two waypoints with a pause at each end, while a
//! second coroutine pulses the beacon color until the behavior is
//! destroyed. Useful for eyeballing scheduler behavior with real
//! wall-clock deltas (`RUST_LOG=debug` shows every waypoint).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use mitos_core::math::{self, Rgba, Vec3};
use mitos_core::{EntityId, FrameClock};
use mitos_script::{Behavior, BehaviorContext, BehaviorHost, ScriptError, Suspension, TickContext};

/// Runtime settings, optionally loaded from a JSON file passed as the
/// first argument.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RuntimeConfig {
    /// Number of frames to simulate.
    frames: u32,
    /// Target frame duration, in seconds.
    frame_seconds: f32,
    /// Gameplay time scale applied to the frame clock.
    time_scale: f32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frames: 240,
            frame_seconds: 1.0 / 60.0,
            time_scale: 1.0,
        }
    }
}

fn load_config() -> Result<RuntimeConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file '{path}'"))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config file '{path}'"))
        }
        None => Ok(RuntimeConfig::default()),
    }
}

/// Demo behavior: patrols between two waypoints with a pause at each end,
/// pulsing its beacon color the whole time.
struct PatrolBeacon {
    position: Rc<Cell<Vec3>>,
    color: Rc<Cell<Rgba>>,
    speed: f32,
}

impl PatrolBeacon {
    fn new() -> Self {
        Self {
            position: Rc::new(Cell::new(Vec3::ZERO)),
            color: Rc::new(Cell::new(Rgba::GREEN)),
            speed: 2.0,
        }
    }
}

impl Behavior for PatrolBeacon {
    fn on_start(&mut self, ctx: &mut BehaviorContext<'_>) {
        log::info!("Patrol starting on entity {}.", ctx.entity());

        let outpost = Vec3::new(4.0, 0.0, 0.0);
        let camp = Vec3::ZERO;
        let position = self.position.clone();
        let speed = self.speed;
        let mut step = 0;
        ctx.start_coroutine(move |_: &mut TickContext<'_>| {
            step += 1;
            Ok(match step {
                1 => Suspension::nested(walk_to(position.clone(), outpost, speed)),
                2 => Suspension::wait_seconds(0.5),
                3 => Suspension::nested(walk_to(position.clone(), camp, speed)),
                4 => Suspension::wait_seconds(0.5),
                5 => Suspension::nested(walk_to(position.clone(), outpost, speed)),
                _ => {
                    log::info!("Patrol route complete.");
                    Suspension::Done
                }
            })
        });

        // Runs until the behavior is destroyed.
        ctx.start_coroutine(pulse(self.color.clone()));
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'_>) {
        log::trace!(
            "Entity {} at {:?}, beacon {:?}.",
            ctx.entity(),
            self.position.get(),
            self.color.get()
        );
    }

    fn on_destroy(&mut self) {
        log::info!("Patrol dismissed at {:?}.", self.position.get());
    }
}

/// Routine advancing the shared position towards `target` one frame at a
/// time.
fn walk_to(
    position: Rc<Cell<Vec3>>,
    target: Vec3,
    speed: f32,
) -> impl FnMut(&mut TickContext<'_>) -> Result<Suspension, ScriptError> {
    move |ctx| {
        let next = Vec3::move_towards(position.get(), target, speed * ctx.delta_seconds());
        position.set(next);
        Ok(if next == target {
            log::debug!("Reached waypoint {target:?}.");
            Suspension::Done
        } else {
            Suspension::Continue
        })
    }
}

/// Endless routine fading the beacon between two colors.
fn pulse(
    color: Rc<Cell<Rgba>>,
) -> impl FnMut(&mut TickContext<'_>) -> Result<Suspension, ScriptError> {
    let mut elapsed = 0.0f32;
    move |ctx| {
        elapsed += ctx.delta_seconds();
        let phase = (elapsed * math::PI).sin().abs();
        color.set(Rgba::lerp(Rgba::GREEN, Rgba::YELLOW, phase));
        Ok(Suspension::Continue)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!(
        "Mitos runtime: {} frame(s) at {:.1} ms, time scale {}.",
        config.frames,
        config.frame_seconds * 1000.0,
        config.time_scale
    );

    let entity = EntityId::new(0, 0);
    let mut world: HashSet<EntityId> = HashSet::new();
    world.insert(entity);

    let mut host = BehaviorHost::new(entity, PatrolBeacon::new());
    let mut clock = FrameClock::new();
    clock.set_time_scale(config.time_scale);

    for frame in 0..config.frames {
        let delta = clock.tick();
        host.update(delta.seconds, &world);
        log::trace!(
            "Frame {frame} took {:.3} ms.",
            delta.unscaled_seconds * 1000.0
        );
        thread::sleep(Duration::from_secs_f32(config.frame_seconds));
    }

    host.destroy();
    log::info!("Mitos runtime: done.");
    Ok(())
}
