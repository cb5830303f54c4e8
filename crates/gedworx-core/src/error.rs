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

//! Error types for GEDCOM parsing.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GedErrorKind {
    /// Missing or invalid UTF-8 byte-order mark, or malformed UTF-8.
    Encoding,
    /// Banned code point present in the input.
    CharacterSet,
    /// A physical line could not be tokenized.
    MalformedLine,
    /// A line's level has no valid open parent.
    Nesting,
    /// Required substructure missing, or singleton substructure duplicated.
    Cardinality,
    /// Tag not recognized and not covered by a declared extension schema.
    UnknownTag,
    /// A cross-reference points to an undefined id.
    UnresolvedReference,
    /// Unsupported GEDCOM version.
    Version,
    /// Duplicate cross-reference id or REFN value.
    Collision,
    /// Security limit exceeded.
    Security,
    /// I/O error (file operations).
    Io,
}

impl fmt::Display for GedErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding => write!(f, "EncodingError"),
            Self::CharacterSet => write!(f, "CharacterSetError"),
            Self::MalformedLine => write!(f, "MalformedLineError"),
            Self::Nesting => write!(f, "NestingError"),
            Self::Cardinality => write!(f, "CardinalityError"),
            Self::UnknownTag => write!(f, "UnknownTagError"),
            Self::UnresolvedReference => write!(f, "UnresolvedReferenceError"),
            Self::Version => write!(f, "VersionError"),
            Self::Collision => write!(f, "CollisionError"),
            Self::Security => write!(f, "SecurityError"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// An error that occurred during GEDCOM parsing.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}: {message}")]
pub struct GedError {
    /// The kind of error.
    pub kind: GedErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based, 0 when no line applies).
    pub line: usize,
    /// Byte offset into the input buffer, when known.
    pub offset: Option<usize>,
    /// Additional context (e.g., "in record @I1@ started at line 5").
    pub context: Option<String>,
}

impl GedError {
    /// Create a new error.
    pub fn new(kind: GedErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            offset: None,
            context: None,
        }
    }

    /// Add a byte offset.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Convenience constructors for each error kind
    pub fn encoding(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Encoding, message, line)
    }

    pub fn character_set(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::CharacterSet, message, line)
    }

    pub fn malformed_line(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::MalformedLine, message, line)
    }

    pub fn nesting(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Nesting, message, line)
    }

    pub fn cardinality(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Cardinality, message, line)
    }

    pub fn unknown_tag(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::UnknownTag, message, line)
    }

    pub fn unresolved(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::UnresolvedReference, message, line)
    }

    pub fn version(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Version, message, line)
    }

    pub fn collision(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Collision, message, line)
    }

    pub fn security(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Security, message, line)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(GedErrorKind::Io, message, 0)
    }
}

/// Result type for GEDCOM operations.
pub type GedResult<T> = Result<T, GedError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== GedErrorKind Display tests ====================

    #[test]
    fn test_error_kind_display_encoding() {
        assert_eq!(format!("{}", GedErrorKind::Encoding), "EncodingError");
    }

    #[test]
    fn test_error_kind_display_character_set() {
        assert_eq!(
            format!("{}", GedErrorKind::CharacterSet),
            "CharacterSetError"
        );
    }

    #[test]
    fn test_error_kind_display_malformed_line() {
        assert_eq!(
            format!("{}", GedErrorKind::MalformedLine),
            "MalformedLineError"
        );
    }

    #[test]
    fn test_error_kind_display_nesting() {
        assert_eq!(format!("{}", GedErrorKind::Nesting), "NestingError");
    }

    #[test]
    fn test_error_kind_display_cardinality() {
        assert_eq!(format!("{}", GedErrorKind::Cardinality), "CardinalityError");
    }

    #[test]
    fn test_error_kind_display_unknown_tag() {
        assert_eq!(format!("{}", GedErrorKind::UnknownTag), "UnknownTagError");
    }

    #[test]
    fn test_error_kind_display_unresolved_reference() {
        assert_eq!(
            format!("{}", GedErrorKind::UnresolvedReference),
            "UnresolvedReferenceError"
        );
    }

    #[test]
    fn test_error_kind_display_version() {
        assert_eq!(format!("{}", GedErrorKind::Version), "VersionError");
    }

    #[test]
    fn test_error_kind_display_collision() {
        assert_eq!(format!("{}", GedErrorKind::Collision), "CollisionError");
    }

    #[test]
    fn test_error_kind_display_io() {
        assert_eq!(format!("{}", GedErrorKind::Io), "IOError");
    }

    // ==================== GedError Display tests ====================

    #[test]
    fn test_error_display() {
        let err = GedError::new(GedErrorKind::MalformedLine, "missing tag", 42);
        let msg = format!("{}", err);
        assert!(msg.contains("MalformedLineError"));
        assert!(msg.contains("line 42"));
        assert!(msg.contains("missing tag"));
    }

    #[test]
    fn test_error_with_offset() {
        let err = GedError::character_set("banned code point", 3).with_offset(17);
        assert_eq!(err.offset, Some(17));
    }

    #[test]
    fn test_error_with_context() {
        let err = GedError::cardinality("duplicate GEDC", 5).with_context("in HEAD");
        assert_eq!(err.context, Some("in HEAD".to_string()));
    }

    #[test]
    fn test_error_chained_builders() {
        let err = GedError::character_set("banned", 2)
            .with_offset(10)
            .with_context("in buffer");
        assert_eq!(err.offset, Some(10));
        assert_eq!(err.context, Some("in buffer".to_string()));
    }

    // ==================== Convenience constructor tests ====================

    #[test]
    fn test_error_encoding() {
        let err = GedError::encoding("no BOM", 1);
        assert_eq!(err.kind, GedErrorKind::Encoding);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_error_character_set() {
        let err = GedError::character_set("banned", 2);
        assert_eq!(err.kind, GedErrorKind::CharacterSet);
    }

    #[test]
    fn test_error_malformed_line() {
        let err = GedError::malformed_line("empty", 3);
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
    }

    #[test]
    fn test_error_nesting() {
        let err = GedError::nesting("no parent", 4);
        assert_eq!(err.kind, GedErrorKind::Nesting);
    }

    #[test]
    fn test_error_cardinality() {
        let err = GedError::cardinality("duplicate", 5);
        assert_eq!(err.kind, GedErrorKind::Cardinality);
    }

    #[test]
    fn test_error_unknown_tag() {
        let err = GedError::unknown_tag("XYZZ", 6);
        assert_eq!(err.kind, GedErrorKind::UnknownTag);
    }

    #[test]
    fn test_error_unresolved() {
        let err = GedError::unresolved("@X1@", 7);
        assert_eq!(err.kind, GedErrorKind::UnresolvedReference);
    }

    #[test]
    fn test_error_version() {
        let err = GedError::version("5.5.1", 8);
        assert_eq!(err.kind, GedErrorKind::Version);
    }

    #[test]
    fn test_error_collision() {
        let err = GedError::collision("duplicate @I1@", 9);
        assert_eq!(err.kind, GedErrorKind::Collision);
    }

    #[test]
    fn test_error_security() {
        let err = GedError::security("too deep", 10);
        assert_eq!(err.kind, GedErrorKind::Security);
    }

    #[test]
    fn test_error_io() {
        let err = GedError::io("failed to read file");
        assert_eq!(err.kind, GedErrorKind::Io);
        assert_eq!(err.line, 0);
    }

    // ==================== Error trait tests ====================

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(GedError::nesting("test", 1));
    }

    #[test]
    fn test_error_clone() {
        let original = GedError::character_set("banned", 5).with_offset(10);
        let cloned = original.clone();
        assert_eq!(original.kind, cloned.kind);
        assert_eq!(original.message, cloned.message);
        assert_eq!(original.line, cloned.line);
        assert_eq!(original.offset, cloned.offset);
    }
}
