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

//! Yield conditions: the closed family of "not yet" predicates a coroutine
//! can suspend on.
//!
//! A condition is evaluated at most once per tick it is reached, including
//! the tick whose step yielded it, so a timed wait counts that tick's
//! elapsed time. Evaluation may be stateful per variant: a timed wait
//! decrements its countdown as a side effect of being asked, while the
//! predicate variants re-evaluate their closure fresh every time with no
//! caching across ticks.

use std::fmt;

/// A predicate object describing when a suspended coroutine may resume.
pub enum YieldCondition {
    /// Waits until the accumulated per-tick elapsed time reaches the
    /// requested duration. Each evaluation subtracts the tick's delta from
    /// `remaining`; the wait releases once `remaining` drops to zero or
    /// below.
    WaitForSeconds {
        /// Gameplay seconds left before the wait releases.
        remaining: f32,
    },
    /// Waits while the predicate returns `false`.
    WaitUntil(Box<dyn FnMut() -> bool>),
    /// Waits while the predicate returns `true`.
    WaitWhile(Box<dyn FnMut() -> bool>),
}

impl YieldCondition {
    /// Waits for `seconds` of scaled gameplay time.
    pub fn wait_for_seconds(seconds: f32) -> Self {
        Self::WaitForSeconds { remaining: seconds }
    }

    /// Waits until `predicate` returns `true`.
    pub fn wait_until(predicate: impl FnMut() -> bool + 'static) -> Self {
        Self::WaitUntil(Box::new(predicate))
    }

    /// Waits while `predicate` returns `true`.
    pub fn wait_while(predicate: impl FnMut() -> bool + 'static) -> Self {
        Self::WaitWhile(Box::new(predicate))
    }

    /// Evaluates whether resumption should still be deferred.
    ///
    /// The caller must invoke this at most once per tick per condition:
    /// the timed variant mutates its countdown on every call.
    pub(crate) fn still_waiting(&mut self, delta_seconds: f32) -> bool {
        match self {
            Self::WaitForSeconds { remaining } => {
                *remaining -= delta_seconds;
                *remaining > 0.0
            }
            Self::WaitUntil(predicate) => !predicate(),
            Self::WaitWhile(predicate) => predicate(),
        }
    }
}

impl fmt::Debug for YieldCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitForSeconds { remaining } => {
                write!(f, "WaitForSeconds {{ remaining: {remaining} }}")
            }
            Self::WaitUntil(_) => write!(f, "WaitUntil(..)"),
            Self::WaitWhile(_) => write!(f, "WaitWhile(..)"),
        }
    }
}
