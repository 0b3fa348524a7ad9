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

//! The `Rgba` color type exposed to script code.

use serde::{Deserialize, Serialize};

/// An RGBA color with `f32` components in the `[0.0, 1.0]` range.
///
/// Scripts tint sprites, lights and UI with this type; the host engine
/// interprets the components at the binding boundary. Components are not
/// clamped on construction, so temporary over-bright values survive
/// arithmetic until the engine consumes them.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl Rgba {
    /// Opaque red (`[1.0, 0.0, 0.0, 1.0]`).
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green (`[0.0, 1.0, 0.0, 1.0]`).
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue (`[0.0, 0.0, 1.0, 1.0]`).
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Opaque yellow (`[1.0, 0.92, 0.016, 1.0]`).
    pub const YELLOW: Self = Self::rgb(1.0, 0.92, 0.016);
    /// Opaque magenta (`[1.0, 0.0, 1.0, 1.0]`).
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    /// Opaque cyan (`[0.0, 1.0, 1.0, 1.0]`).
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque middle grey (`[0.5, 0.5, 0.5, 1.0]`).
    pub const GREY: Self = Self::rgb(0.5, 0.5, 0.5);
    /// Fully transparent black (`[0.0, 0.0, 0.0, 0.0]`).
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new `Rgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Rgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color from 8-bit channel values (`0..=255` maps to `0.0..=1.0`).
    #[inline]
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Returns this color with the alpha component replaced.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Performs a linear interpolation between two colors.
    /// The interpolation factor `t` is clamped to the `[0.0, 1.0]` range.
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: start.r + (end.r - start.r) * t,
            g: start.g + (end.g - start.g) * t,
            b: start.b + (end.b - start.b) * t,
            a: start.a + (end.a - start.a) * t,
        }
    }
}
