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

//! The typed GEDCOM document model.
//!
//! A [`Dataset`] owns its [`Header`], [`Record`]s, and [`Trailer`]
//! exclusively; substructures are owned by their immediate parent.
//! Cross-references between records are [`RecordLink`]s: a textual id
//! plus the arena index of the target record, filled in by a resolution
//! pass after the whole document is built. The model is immutable after
//! a successful parse.

use crate::date::DateExact;

/// Stable index of a record within [`Dataset::records`].
pub type RecordIndex = usize;

/// A weak reference to another record.
///
/// Holds the raw cross-reference id from the source text; `target` is
/// `None` until resolution, and stays `None` only for `@VOID@` pointers
/// (an intentional reference to nothing).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecordLink {
    /// The referenced id, without `@` delimiters.
    pub xref: String,
    /// Index of the target record, once resolved.
    pub target: Option<RecordIndex>,
}

impl RecordLink {
    /// Create an unresolved link.
    pub fn pending(xref: impl Into<String>) -> Self {
        Self {
            xref: xref.into(),
            target: None,
        }
    }

    /// Whether this is the `@VOID@` pointer to nothing.
    pub fn is_void(&self) -> bool {
        self.xref == "VOID"
    }
}

/// The root of a parsed GEDCOM document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dataset {
    pub header: Header,
    pub records: Vec<Record>,
    pub trailer: Trailer,
}

impl Dataset {
    /// Get a record by its arena index.
    pub fn record(&self, index: RecordIndex) -> Option<&Record> {
        self.records.get(index)
    }

    /// Find a record by cross-reference id.
    pub fn find(&self, xref: &str) -> Option<(RecordIndex, &Record)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| r.xref() == xref)
    }

    /// Iterate records of one kind.
    pub fn records_of_kind(&self, kind: RecordKind) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(move |r| r.kind() == kind)
    }

    /// Count records of one kind.
    pub fn count_of_kind(&self, kind: RecordKind) -> usize {
        self.records_of_kind(kind).count()
    }
}

/// Document metadata from the HEAD record.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    pub gedcom: Gedcom,
    pub schema: Option<Schema>,
    pub source: Option<HeadSource>,
    /// Identifier for the system expected to receive this document.
    pub destination: Option<String>,
    /// When this document was created.
    pub date: Option<DateExact>,
    /// Contributor of the document's information (pointer to a SUBM record).
    pub submitter: Option<RecordLink>,
    pub copyright: Option<String>,
    /// Default language for the document's text payloads (BCP 47 tag).
    pub language: Option<String>,
    /// Default PLAC.FORM jurisdiction labels.
    pub place_form: Option<Vec<String>>,
    pub notes: Vec<Note>,
    pub shared_notes: Vec<RecordLink>,
    pub extensions: Vec<ExtensionLine>,
}

/// The GEDC structure: information about the document itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Gedcom {
    /// Specification version this document conforms to, e.g. "7.0".
    pub version: String,
}

/// Declared extension tags (HEAD.SCHMA).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schema {
    pub tags: Vec<ExtensionTag>,
}

impl Schema {
    /// Whether an extension tag is declared.
    pub fn declares(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.tag == tag)
    }
}

/// One declared extension tag with its defining URI.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtensionTag {
    pub tag: String,
    pub uri: String,
}

/// Identity of the product that produced the document (HEAD.SOUR).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeadSource {
    /// Registered identifier or URI owned by the product.
    pub id: String,
    pub version: Option<String>,
    pub name: Option<String>,
    pub corporation: Option<Corporation>,
    pub data: Option<HeadSourceData>,
}

/// The business that produced or commissioned the product.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Corporation {
    pub name: String,
    pub address: Option<Address>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub faxes: Vec<String>,
    pub web: Vec<String>,
}

/// The electronic source this dataset was exported from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeadSourceData {
    pub name: String,
    pub date: Option<DateExact>,
    pub copyright: Option<String>,
}

/// A mailing address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Address {
    /// The full address payload, CONT lines folded with newlines.
    pub full: String,
    pub adr1: Option<String>,
    pub adr2: Option<String>,
    pub adr3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// An inline note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Note {
    pub text: String,
    pub media_type: Option<String>,
    pub language: Option<String>,
}

/// A translation of a shared note.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NoteTranslation {
    pub text: String,
    pub media_type: Option<String>,
    pub language: Option<String>,
}

/// Metadata-about-metadata attached to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Identifier {
    /// REFN — a submitter-chosen identifier; no two structures in the
    /// same document may share a value.
    Reference {
        value: String,
        kind: Option<String>,
    },
    /// UID — a globally-unique identifier for the structure.
    Uid(String),
    /// EXID — an identifier maintained by an external authority.
    External {
        value: String,
        kind: Option<String>,
    },
}

/// The most recent change to a record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChangeDate {
    pub date: DateExact,
    pub notes: Vec<Note>,
    pub shared_notes: Vec<RecordLink>,
}

/// A link to a multimedia record, with optional display hints.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MultimediaLink {
    pub target: RecordLink,
    pub title: Option<String>,
    pub crop: Option<Crop>,
}

/// A rectangular region of an image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Crop {
    pub top: Option<u32>,
    pub left: Option<u32>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// An opaque extension structure, preserved as raw lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtensionLine {
    pub tag: String,
    pub value: Option<String>,
    pub children: Vec<ExtensionLine>,
}

/// Substructures shared by every record kind.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecordMeta {
    pub identifiers: Vec<Identifier>,
    pub notes: Vec<Note>,
    pub shared_notes: Vec<RecordLink>,
    pub multimedia: Vec<MultimediaLink>,
    pub change: Option<ChangeDate>,
    pub created: Option<DateExact>,
    pub extensions: Vec<ExtensionLine>,
}

/// The kind of a top-level record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RecordKind {
    Individual,
    Family,
    Submitter,
    Multimedia,
    SharedNote,
    Source,
    Repository,
}

impl RecordKind {
    /// The level-0 tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Individual => "INDI",
            Self::Family => "FAM",
            Self::Submitter => "SUBM",
            Self::Multimedia => "OBJE",
            Self::SharedNote => "SNOTE",
            Self::Source => "SOUR",
            Self::Repository => "REPO",
        }
    }

    /// All record kinds, in tag order.
    pub fn all() -> [RecordKind; 7] {
        [
            Self::Individual,
            Self::Family,
            Self::Submitter,
            Self::Multimedia,
            Self::SharedNote,
            Self::Source,
            Self::Repository,
        ]
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Individual => "individual",
            Self::Family => "family",
            Self::Submitter => "submitter",
            Self::Multimedia => "multimedia",
            Self::SharedNote => "shared note",
            Self::Source => "source",
            Self::Repository => "repository",
        };
        write!(f, "{}", name)
    }
}

/// A top-level record: the tagged union over GEDCOM record kinds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Record {
    Individual(IndividualRecord),
    Family(FamilyRecord),
    Submitter(SubmitterRecord),
    Multimedia(MultimediaRecord),
    SharedNote(SharedNoteRecord),
    Source(SourceRecord),
    Repository(RepositoryRecord),
}

impl Record {
    /// The record's cross-reference id.
    pub fn xref(&self) -> &str {
        match self {
            Self::Individual(r) => &r.xref,
            Self::Family(r) => &r.xref,
            Self::Submitter(r) => &r.xref,
            Self::Multimedia(r) => &r.xref,
            Self::SharedNote(r) => &r.xref,
            Self::Source(r) => &r.xref,
            Self::Repository(r) => &r.xref,
        }
    }

    /// The record's kind.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Individual(_) => RecordKind::Individual,
            Self::Family(_) => RecordKind::Family,
            Self::Submitter(_) => RecordKind::Submitter,
            Self::Multimedia(_) => RecordKind::Multimedia,
            Self::SharedNote(_) => RecordKind::SharedNote,
            Self::Source(_) => RecordKind::Source,
            Self::Repository(_) => RecordKind::Repository,
        }
    }

    /// Shared record metadata.
    pub fn meta(&self) -> &RecordMeta {
        match self {
            Self::Individual(r) => &r.meta,
            Self::Family(r) => &r.meta,
            Self::Submitter(r) => &r.meta,
            Self::Multimedia(r) => &r.meta,
            Self::SharedNote(r) => &r.meta,
            Self::Source(r) => &r.meta,
            Self::Repository(r) => &r.meta,
        }
    }

}

/// An individual (INDI).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndividualRecord {
    pub xref: String,
    pub names: Vec<PersonalName>,
    pub sex: Option<Sex>,
    /// Families this individual is a child in (FAMC).
    pub child_of: Vec<RecordLink>,
    /// Families this individual is a spouse in (FAMS).
    pub spouse_in: Vec<RecordLink>,
    pub meta: RecordMeta,
}

/// A personal name with its parsed pieces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PersonalName {
    /// The full name payload, surname delimited with slashes.
    pub value: String,
    pub kind: Option<String>,
    pub given: Option<String>,
    pub surname: Option<String>,
    pub nickname: Option<String>,
}

/// The sex of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Sex {
    Male,
    Female,
    /// Does not fit the typical definition of only Male or only Female.
    Other,
    Unknown,
}

impl Sex {
    /// Parse the single-letter enumeration value.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "M" => Self::Male,
            "F" => Self::Female,
            "X" => Self::Other,
            "U" => Self::Unknown,
            _ => return None,
        })
    }
}

/// A family (FAM).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FamilyRecord {
    pub xref: String,
    pub husband: Option<RecordLink>,
    pub wife: Option<RecordLink>,
    pub children: Vec<RecordLink>,
    pub meta: RecordMeta,
}

/// A contributor of information in the document (SUBM).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubmitterRecord {
    pub xref: String,
    pub name: String,
    pub address: Option<Address>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub faxes: Vec<String>,
    pub web: Vec<String>,
    pub languages: Vec<String>,
    pub meta: RecordMeta,
}

/// A multimedia object (OBJE).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MultimediaRecord {
    pub xref: String,
    pub files: Vec<MediaFile>,
    pub meta: RecordMeta,
}

/// One file reference within a multimedia record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaFile {
    pub path: String,
    /// Media type from the required FORM substructure.
    pub media_type: String,
    /// Medium classification (FORM.MEDI).
    pub medium: Option<String>,
    pub title: Option<String>,
}

/// A note shared between structures (SNOTE).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SharedNoteRecord {
    pub xref: String,
    pub text: String,
    pub media_type: Option<String>,
    pub language: Option<String>,
    pub translations: Vec<NoteTranslation>,
    pub meta: RecordMeta,
}

/// A source of genealogical data (SOUR).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceRecord {
    pub xref: String,
    pub author: Option<String>,
    pub title: Option<String>,
    pub abbreviation: Option<String>,
    pub publication: Option<String>,
    /// Verbatim source text, with its media type and language.
    pub text: Option<Note>,
    pub repositories: Vec<RecordLink>,
    pub meta: RecordMeta,
}

/// An archive holding sources (REPO).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RepositoryRecord {
    pub xref: String,
    pub name: String,
    pub address: Option<Address>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub faxes: Vec<String>,
    pub web: Vec<String>,
    pub meta: RecordMeta,
}

/// Marks end-of-document; carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Trailer;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> Dataset {
        Dataset {
            header: Header::default(),
            records: vec![
                Record::Individual(IndividualRecord {
                    xref: "I1".into(),
                    ..Default::default()
                }),
                Record::Family(FamilyRecord {
                    xref: "F1".into(),
                    ..Default::default()
                }),
                Record::Individual(IndividualRecord {
                    xref: "I2".into(),
                    ..Default::default()
                }),
            ],
            trailer: Trailer,
        }
    }

    // ==================== Dataset lookup tests ====================

    #[test]
    fn test_record_by_index() {
        let ds = sample_dataset();
        assert_eq!(ds.record(1).unwrap().xref(), "F1");
        assert!(ds.record(3).is_none());
    }

    #[test]
    fn test_find_by_xref() {
        let ds = sample_dataset();
        let (idx, record) = ds.find("I2").unwrap();
        assert_eq!(idx, 2);
        assert_eq!(record.kind(), RecordKind::Individual);
        assert!(ds.find("I9").is_none());
    }

    #[test]
    fn test_count_of_kind() {
        let ds = sample_dataset();
        assert_eq!(ds.count_of_kind(RecordKind::Individual), 2);
        assert_eq!(ds.count_of_kind(RecordKind::Family), 1);
        assert_eq!(ds.count_of_kind(RecordKind::Source), 0);
    }

    // ==================== RecordLink tests ====================

    #[test]
    fn test_pending_link() {
        let link = RecordLink::pending("I1");
        assert_eq!(link.xref, "I1");
        assert_eq!(link.target, None);
        assert!(!link.is_void());
    }

    #[test]
    fn test_void_link() {
        assert!(RecordLink::pending("VOID").is_void());
    }

    // ==================== RecordKind tests ====================

    #[test]
    fn test_record_kind_tags() {
        let tags: Vec<_> = RecordKind::all().iter().map(|k| k.tag()).collect();
        assert_eq!(
            tags,
            vec!["INDI", "FAM", "SUBM", "OBJE", "SNOTE", "SOUR", "REPO"]
        );
    }

    #[test]
    fn test_record_kind_display() {
        assert_eq!(RecordKind::SharedNote.to_string(), "shared note");
    }

    // ==================== Sex tests ====================

    #[test]
    fn test_sex_parse() {
        assert_eq!(Sex::parse("M"), Some(Sex::Male));
        assert_eq!(Sex::parse("F"), Some(Sex::Female));
        assert_eq!(Sex::parse("X"), Some(Sex::Other));
        assert_eq!(Sex::parse("U"), Some(Sex::Unknown));
        assert_eq!(Sex::parse("male"), None);
    }

    // ==================== Schema tests ====================

    #[test]
    fn test_schema_declares() {
        let schema = Schema {
            tags: vec![ExtensionTag {
                tag: "_LOC".into(),
                uri: "https://example.com/loc".into(),
            }],
        };
        assert!(schema.declares("_LOC"));
        assert!(!schema.declares("_XYZ"));
    }
}
