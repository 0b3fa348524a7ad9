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

//! Entity identity and liveness contracts.
//!
//! The host engine owns entity storage; script code only ever holds an
//! [`EntityId`] and asks the engine whether it still refers to a live
//! entity. That question goes through the [`LivenessProbe`] capability and
//! returns a definite boolean; scripts never compare handles against a
//! null object to infer destruction.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A unique identifier for an entity owned by the host engine.
///
/// It combines an index with a generation count. When the engine despawns an
/// entity its index can be recycled, but the generation is incremented, so a
/// stale `EntityId` held by a script can never accidentally address the
/// entity that reused the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    /// The index of the entity's slot in the engine's storage.
    pub index: u32,
    /// A generation counter incremented each time the index is recycled.
    pub generation: u32,
}

impl EntityId {
    /// Creates an id from its raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Capability for asking the host engine whether an entity is still alive.
///
/// The scripting layer consults this before driving a behavior's update so
/// scripts attached to destroyed entities stop running without observing
/// engine internals.
pub trait LivenessProbe {
    /// Returns `true` while `entity` refers to a live entity.
    fn is_alive(&self, entity: EntityId) -> bool;
}

/// A set of live ids doubles as a probe. Useful in tests and headless
/// drivers where no real engine is present.
impl LivenessProbe for HashSet<EntityId> {
    fn is_alive(&self, entity: EntityId) -> bool {
        self.contains(&entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_distinguishes_recycled_slots() {
        let first = EntityId::new(7, 0);
        let recycled = EntityId::new(7, 1);
        assert_ne!(first, recycled);

        let mut live = HashSet::new();
        live.insert(recycled);
        assert!(!live.is_alive(first));
        assert!(live.is_alive(recycled));
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(EntityId::new(42, 3).to_string(), "42v3");
    }
}
