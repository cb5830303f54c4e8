// GEDWORX - GEDCOM 7 Parsing Toolkit
//
// Copyright (c) 2025 the gedworx contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error context helpers.
//!
//! Extension methods on `Result<T, GedError>` for annotating errors as
//! they propagate. The annotation lands in the error's `context` field;
//! the original message and line are untouched.
//!
//! ```rust
//! use gedworx::{parse, GedResultExt};
//!
//! fn load(name: &str, content: &[u8]) -> Result<gedworx::Dataset, gedworx::GedError> {
//!     parse(content).with_context(|| format!("while loading {}", name))
//! }
//! ```

use crate::GedError;
use std::fmt;

/// Extension trait for adding context to `Result<T, GedError>`.
pub trait GedResultExt<T> {
    /// Add context to an error. The message is evaluated immediately;
    /// prefer [`with_context`](GedResultExt::with_context) when it is
    /// expensive to build.
    fn context<C>(self, context: C) -> Result<T, GedError>
    where
        C: fmt::Display;

    /// Add context to an error, evaluated only on the error path.
    fn with_context<C, F>(self, f: F) -> Result<T, GedError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T> GedResultExt<T> for Result<T, GedError> {
    fn context<C>(self, context: C) -> Result<T, GedError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| append_context(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, GedError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| append_context(e, f().to_string()))
    }
}

fn append_context(mut error: GedError, context: String) -> GedError {
    error.context = Some(match error.context.take() {
        Some(existing) => format!("{}; {}", existing, context),
        None => context,
    });
    error
}
