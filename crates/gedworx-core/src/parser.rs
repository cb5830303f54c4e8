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

//! The parse pipeline.
//!
//! Parsing runs in fixed phases, each of which may reject the input:
//!
//! 1. Encoding guard: UTF-8 BOM, UTF-8 validity, banned code points.
//! 2. Tokenizer: raw bytes to `Level [@XREF@] TAG [payload]` lines.
//! 3. Structural validator: nesting, cardinality, document shape.
//! 4. Document builder: the typed [`Dataset`], with pointers resolved.
//!
//! A valid GEDCOM 7 dataset parses without error; the first violation
//! aborts the pipeline with a [`crate::GedError`] naming the line.
//!
//! # Security limits
//!
//! The parser enforces resource limits to keep hostile inputs from
//! exhausting memory or the stack:
//!
//! - `max_file_size`: maximum input size (default: 256MB)
//! - `max_line_length`: maximum line length (default: 1MB)
//! - `max_depth`: maximum structure nesting level (default: 50)
//! - `max_records`: maximum number of level-0 lines (default: 10M)

use crate::builder::build;
use crate::dataset::Dataset;
use crate::encoding::check_encoding;
use crate::error::{GedError, GedResult};
use crate::limits::Limits;
use crate::tokenizer::Tokenizer;
use crate::validator::validate;

/// Parsing options.
///
/// # Examples
///
/// ```rust
/// use gedworx_core::ParseOptions;
///
/// // Restrictive limits for untrusted input
/// let opts = ParseOptions::builder()
///     .max_file_size(10 * 1024 * 1024)
///     .max_depth(20)
///     .build();
/// assert_eq!(opts.limits.max_depth, 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Security limits.
    pub limits: Limits,
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of [`ParseOptions`].
#[derive(Debug, Clone, Default)]
pub struct ParseOptionsBuilder {
    limits: Limits,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum input size in bytes (default: 256MB).
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.limits.max_file_size = size;
        self
    }

    /// Set the maximum line length in bytes (default: 1MB).
    pub fn max_line_length(mut self, length: usize) -> Self {
        self.limits.max_line_length = length;
        self
    }

    /// Set the maximum structure nesting level (default: 50).
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.limits.max_depth = depth;
        self
    }

    /// Set the maximum number of level-0 lines (default: 10M).
    pub fn max_records(mut self, count: usize) -> Self {
        self.limits.max_records = count;
        self
    }

    /// Build the final ParseOptions.
    pub fn build(self) -> ParseOptions {
        ParseOptions {
            limits: self.limits,
        }
    }
}

/// Parse a GEDCOM 7 dataset with default options.
pub fn parse(input: &[u8]) -> GedResult<Dataset> {
    parse_with_limits(input, ParseOptions::default())
}

/// Parse a GEDCOM 7 dataset with explicit options.
pub fn parse_with_limits(input: &[u8], options: ParseOptions) -> GedResult<Dataset> {
    let limits = &options.limits;

    if input.len() > limits.max_file_size {
        return Err(GedError::security(
            format!(
                "input size {} exceeds limit {}",
                input.len(),
                limits.max_file_size
            ),
            0,
        ));
    }

    // Phase 1: encoding guard (whole-input scan, absolute byte offsets)
    let text = check_encoding(input)?;

    // Phases 2 and 3: tokenize lazily, validate into level-0 trees
    let tokens = Tokenizer::with_limits(text, limits);
    let roots = validate(tokens, limits)?;

    // Phase 4: typed model with resolved pointers
    build(&roots)
}
