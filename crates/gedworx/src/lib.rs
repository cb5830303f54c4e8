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

//! # GEDWORX - GEDCOM 7 parsing toolkit
//!
//! GEDWORX reads the FamilySearch GEDCOM 7 text format into a typed,
//! cross-reference-resolved data model. Parsing is all-or-nothing: a
//! conformant dataset produces a [`Dataset`], the first violation
//! produces a [`GedError`] with the offending line.
//!
//! ## Quick start
//!
//! ```rust
//! use gedworx::parse;
//!
//! let input = "\u{FEFF}0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR\n";
//! let dataset = parse(input.as_bytes()).expect("conformant dataset");
//! assert_eq!(dataset.header.gedcom.version, "7.0");
//! assert!(dataset.records.is_empty());
//! ```
//!
//! ## What gets checked
//!
//! - **Encoding**: UTF-8 with BOM, no banned control characters
//! - **Lines**: `Level [@XREF@] TAG [payload]` shape, CONT folding
//! - **Structure**: nesting levels, per-structure cardinalities,
//!   HEAD first and TRLR last
//! - **References**: every pointer resolves to a record (or `@VOID@`),
//!   no duplicate record ids, document-unique REFN values
//! - **Extensions**: underscore tags must be declared in `HEAD.SCHMA`
//!
//! Untrusted input can be parsed with tighter resource limits via
//! [`ParseOptions`].

// Re-export the core pipeline and data model
pub use gedworx_core::{
    build,
    parse as core_parse,
    parse_with_limits,
    // Data model
    Address,
    ChangeDate,
    Corporation,
    Crop,
    Dataset,
    DateExact,
    ExtensionLine,
    ExtensionTag,
    FamilyRecord,
    GedError,
    GedErrorKind,
    GedResult,
    Gedcom,
    HeadSource,
    HeadSourceData,
    Header,
    Identifier,
    IndividualRecord,
    // Parser
    Limits,
    MediaFile,
    Month,
    MultimediaLink,
    MultimediaRecord,
    Note,
    NoteTranslation,
    ParseOptions,
    ParseOptionsBuilder,
    PersonalName,
    Record,
    RecordIndex,
    RecordKind,
    RecordLink,
    RecordMeta,
    RepositoryRecord,
    Schema,
    Sex,
    SharedNoteRecord,
    SourceRecord,
    SubmitterRecord,
    Time,
    Trailer,
};

// Lower pipeline phases, for tooling that needs the intermediate forms
pub mod encoding {
    //! Byte-level encoding guard
    pub use gedworx_core::encoding::{check_encoding, has_utf8_bom, UTF8_BOM};
}

pub mod tokenizer {
    //! Raw line tokenization
    pub use gedworx_core::{tokenize, GedcomLine, Tokenizer};
}

pub mod validator {
    //! Structural validation
    pub use gedworx_core::{validate, LineNode};
}

mod error_ext;
pub use error_ext::GedResultExt;

use std::path::Path;

/// Parse a GEDCOM 7 dataset from a byte buffer.
#[inline]
pub fn parse(input: &[u8]) -> GedResult<Dataset> {
    core_parse(input)
}

/// Read a file into memory as raw bytes.
///
/// I/O failures come back as [`GedErrorKind::Io`] with the path in the
/// message. Bytes, not a string: the encoding guard owns BOM and UTF-8
/// validation.
pub fn read_all(path: impl AsRef<Path>) -> GedResult<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path)
        .map_err(|e| GedError::io(format!("failed to read {}: {}", path.display(), e)))
}

/// Read and parse a GEDCOM 7 file.
///
/// # Examples
///
/// ```rust,no_run
/// use gedworx::parse_file;
///
/// let dataset = parse_file("family.ged")?;
/// println!("{} records", dataset.records.len());
/// # Ok::<(), gedworx::GedError>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> GedResult<Dataset> {
    let path = path.as_ref();
    let bytes = read_all(path)?;
    parse(&bytes).with_context(|| format!("in file {}", path.display()))
}
