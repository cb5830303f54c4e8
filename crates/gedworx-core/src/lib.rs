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

//! Core parser and data model for the GEDCOM 7 text format.
//!
//! This crate reads a GEDCOM 7 byte stream into a typed [`Dataset`]:
//! the header, the records with their cross-references resolved, and
//! the trailer. Parsing either succeeds completely or fails with a
//! [`GedError`] naming the first violation and its line.
//!
//! ```text
//! use gedworx_core::parse;
//!
//! let input = "\u{FEFF}0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR\n";
//! let dataset = parse(input.as_bytes())?;
//! assert_eq!(dataset.header.gedcom.version, "7.0");
//! ```
//!
//! The pipeline phases are exposed individually for tooling that needs
//! the intermediate forms: [`encoding`] for the byte-level guard,
//! [`tokenizer`] for raw lines, [`validator`] for the structural tree,
//! and [`grammar`] for the cardinality table itself.

mod builder;
mod dataset;
mod date;
pub mod encoding;
mod error;
pub mod grammar;
mod limits;
mod parser;
pub mod tokenizer;
pub mod validator;

pub use builder::build;
pub use dataset::{
    Address, ChangeDate, Corporation, Crop, Dataset, ExtensionLine, ExtensionTag, FamilyRecord,
    Gedcom, HeadSource, HeadSourceData, Header, Identifier, IndividualRecord, MediaFile,
    MultimediaLink, MultimediaRecord, Note, NoteTranslation, PersonalName, Record, RecordIndex,
    RecordKind, RecordLink, RecordMeta, RepositoryRecord, Schema, Sex, SharedNoteRecord,
    SourceRecord, SubmitterRecord, Trailer,
};
pub use date::{DateExact, Month, Time};
pub use error::{GedError, GedErrorKind, GedResult};
pub use limits::Limits;
pub use parser::{parse, parse_with_limits, ParseOptions, ParseOptionsBuilder};
pub use tokenizer::{tokenize, GedcomLine, Tokenizer};
pub use validator::{validate, LineNode};
