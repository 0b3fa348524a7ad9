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

//! Error type for the scripting layer.

use thiserror::Error;

/// Error raised by a script step.
///
/// A coroutine step that returns an error is dropped by the scheduler after
/// the error is logged; other coroutines in the same pass are unaffected.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A step failed with an underlying domain error.
    #[error("script step failed: {0}")]
    Fault(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A step failed with a plain message.
    #[error("{0}")]
    Message(String),
}

impl ScriptError {
    /// Wraps a domain error.
    pub fn fault(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Fault(Box::new(err))
    }

    /// Builds an error from a plain message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }
}
