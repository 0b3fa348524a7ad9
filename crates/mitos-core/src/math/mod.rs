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

//! Mathematics primitives exposed to script code.
//!
//! This module provides the scalar helpers and value types a gameplay script
//! reaches for every frame: interpolation, angle arithmetic, 2D/3D vectors
//! and colors. All angular functions operate in **radians** unless a name
//! says otherwise.

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

// Re-export the standard constants scripts use most.
pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

// --- Declare Sub-Modules ---

pub mod color;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::color::Rgba;
pub use self::vector::{Vec2, Vec3};

// --- Scalar Helpers ---

/// Linearly interpolates between `a` and `b` by `t`, clamping `t` to `[0, 1]`.
///
/// # Examples
///
/// ```
/// use mitos_core::math::lerp;
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(0.0, 10.0, 1.5), 10.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Linearly interpolates between `a` and `b` by `t` without clamping `t`.
#[inline]
pub fn lerp_unclamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Returns where `value` lies between `a` and `b`, as a factor in `[0, 1]`.
///
/// This is the inverse of [`lerp`]: `inverse_lerp(a, b, lerp(a, b, t)) == t`
/// for `t` in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use mitos_core::math::inverse_lerp;
/// assert_eq!(inverse_lerp(10.0, 20.0, 15.0), 0.5);
/// assert_eq!(inverse_lerp(10.0, 20.0, 5.0), 0.0);
/// ```
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if value <= a.min(b) {
        if a <= b {
            0.0
        } else {
            1.0
        }
    } else if value >= a.max(b) {
        if a <= b {
            1.0
        } else {
            0.0
        }
    } else {
        (value - a) / (b - a)
    }
}

/// Moves `current` towards `target` by at most `max_delta`.
///
/// Never overshoots: once the remaining distance is within `max_delta` the
/// result is exactly `target`.
///
/// # Examples
///
/// ```
/// use mitos_core::math::move_towards;
/// assert_eq!(move_towards(0.0, 10.0, 3.0), 3.0);
/// assert_eq!(move_towards(9.5, 10.0, 3.0), 10.0);
/// ```
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let step = target - current;
    if step.abs() <= max_delta {
        target
    } else {
        current + step.signum() * max_delta
    }
}

/// Wraps `t` into the range `[0, length)`.
///
/// # Examples
///
/// ```
/// use mitos_core::math::repeat;
/// assert_eq!(repeat(5.5, 4.0), 1.5);
/// assert_eq!(repeat(-1.0, 4.0), 3.0);
/// ```
#[inline]
pub fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Returns the shortest signed angular difference from `current` to `target`,
/// in radians, in the range `(-PI, PI]`.
#[inline]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = repeat(target - current, TAU);
    if delta > PI {
        delta -= TAU;
    }
    delta
}

/// Clamps a floating-point value to the `[0.0, 1.0]` range.
///
/// # Examples
///
/// ```
/// use mitos_core::math::saturate;
/// assert_eq!(saturate(1.5), 1.0);
/// assert_eq!(saturate(-0.5), 0.0);
/// ```
#[inline]
pub fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Performs an approximate equality comparison with a custom tolerance.
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the module's default
/// [`EPSILON`].
///
/// # Examples
///
/// ```
/// use mitos_core::math::{approx_eq, EPSILON};
/// assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
/// assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}

/// Converts an angle from degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Converts an angle from radians to degrees.
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_clamps_factor() {
        assert_eq!(lerp(0.0, 8.0, 0.25), 2.0);
        assert_eq!(lerp(0.0, 8.0, -1.0), 0.0);
        assert_eq!(lerp(0.0, 8.0, 2.0), 8.0);
        assert_eq!(lerp_unclamped(0.0, 8.0, 2.0), 16.0);
    }

    #[test]
    fn test_inverse_lerp_round_trips() {
        let (a, b) = (-4.0, 12.0);
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_relative_eq!(inverse_lerp(a, b, lerp(a, b, t)), t, epsilon = EPSILON);
        }
        // Reversed endpoints saturate towards the nearer end.
        assert_eq!(inverse_lerp(12.0, -4.0, 20.0), 0.0);
        assert_eq!(inverse_lerp(12.0, -4.0, -20.0), 1.0);
    }

    #[test]
    fn test_move_towards_never_overshoots() {
        let mut x = 0.0;
        for _ in 0..8 {
            x = move_towards(x, 1.0, 0.3);
        }
        assert_eq!(x, 1.0);
        assert_eq!(move_towards(5.0, -5.0, 4.0), 1.0);
    }

    #[test]
    fn test_delta_angle_takes_shortest_path() {
        assert_relative_eq!(delta_angle(0.0, PI / 2.0), PI / 2.0, epsilon = EPSILON);
        // 350° to 10° should be +20°, not -340°.
        assert_relative_eq!(
            delta_angle(350.0 * DEG_TO_RAD, 10.0 * DEG_TO_RAD),
            20.0 * DEG_TO_RAD,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_repeat_wraps_negatives() {
        assert_relative_eq!(repeat(-0.5, 3.0), 2.5, epsilon = EPSILON);
        assert_relative_eq!(repeat(7.0, 3.0), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_degree_radian_round_trip() {
        assert_relative_eq!(
            radians_to_degrees(degrees_to_radians(123.0)),
            123.0,
            epsilon = 1e-4
        );
    }
}
