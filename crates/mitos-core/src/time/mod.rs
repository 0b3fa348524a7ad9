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

//! The per-frame clock source.
//!
//! [`FrameClock`] measures the wall-clock time between consecutive frames
//! and applies a time scale, producing the [`FrameDelta`] a frame driver
//! hands down to behavior updates. Consumers below this point never read a
//! clock themselves; elapsed time is always an explicit parameter, which
//! keeps the scripting layer testable with synthetic deltas.

use std::time::Instant;

/// The elapsed-time sample for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    /// Scaled elapsed time since the previous frame, in seconds. This is
    /// what gameplay logic and coroutine waits consume.
    pub seconds: f32,
    /// Unscaled elapsed time since the previous frame, in seconds.
    pub unscaled_seconds: f32,
}

impl FrameDelta {
    /// A zero-length frame. The first tick of a clock reports this.
    pub const ZERO: Self = Self {
        seconds: 0.0,
        unscaled_seconds: 0.0,
    };
}

/// Measures per-frame elapsed time with a global time scale.
///
/// The scale stretches or compresses gameplay time relative to wall time:
/// `0.5` is slow motion, `0.0` pauses everything downstream while the
/// unscaled delta keeps flowing for UI and debug overlays.
#[derive(Debug)]
pub struct FrameClock {
    previous: Option<Instant>,
    time_scale: f32,
}

impl FrameClock {
    /// Creates a clock with a time scale of `1.0`. No measurement starts
    /// until the first [`tick`](Self::tick).
    pub fn new() -> Self {
        Self {
            previous: None,
            time_scale: 1.0,
        }
    }

    /// Returns the current time scale.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Sets the time scale applied to subsequent ticks. Negative values are
    /// clamped to `0.0`.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
        log::debug!("Frame clock time scale set to {}.", self.time_scale);
    }

    /// Samples the clock for a new frame and returns the elapsed time since
    /// the previous sample. The first call returns [`FrameDelta::ZERO`].
    pub fn tick(&mut self) -> FrameDelta {
        let now = Instant::now();
        let delta = match self.previous {
            Some(previous) => {
                let unscaled = now.duration_since(previous).as_secs_f32();
                FrameDelta {
                    seconds: unscaled * self.time_scale,
                    unscaled_seconds: unscaled,
                }
            }
            None => FrameDelta::ZERO,
        };
        self.previous = Some(now);
        delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), FrameDelta::ZERO);
    }

    #[test]
    fn tick_measures_elapsed_time() {
        let mut clock = FrameClock::new();
        clock.tick();
        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();
        assert!(delta.unscaled_seconds >= 0.010);
        assert_eq!(delta.seconds, delta.unscaled_seconds);
    }

    #[test]
    fn time_scale_stretches_gameplay_time() {
        let mut clock = FrameClock::new();
        clock.set_time_scale(0.0);
        clock.tick();
        thread::sleep(Duration::from_millis(5));
        let delta = clock.tick();
        assert_eq!(delta.seconds, 0.0);
        assert!(delta.unscaled_seconds > 0.0);
    }

    #[test]
    fn negative_scale_clamps_to_zero() {
        let mut clock = FrameClock::new();
        clock.set_time_scale(-2.0);
        assert_eq!(clock.time_scale(), 0.0);
    }
}
