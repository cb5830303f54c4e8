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

//! The document builder: validated line trees to the typed model.
//!
//! The builder walks the forest produced by the structural validator
//! and produces a [`Dataset`]. On the way it:
//!
//! - folds CONT continuation lines into their parent payload with `\n`,
//! - checks the version in GEDC.VERS and the SCHMA declarations,
//! - registers every record's cross-reference id before building, so
//!   pointers resolve to arena indices at the line that uses them,
//! - accepts extension tags only when HEAD.SCHMA declares them,
//! - enforces document-wide uniqueness of REFN values.
//!
//! Pointer payloads of `@VOID@` build a [`RecordLink`] with no target.

use crate::dataset::{
    Address, ChangeDate, Corporation, Crop, Dataset, ExtensionLine, ExtensionTag, FamilyRecord,
    Gedcom, HeadSource, HeadSourceData, Header, Identifier, IndividualRecord, MediaFile,
    MultimediaLink, MultimediaRecord, Note, NoteTranslation, PersonalName, Record, RecordIndex,
    RecordLink, RecordMeta, RepositoryRecord, Schema, SharedNoteRecord, SourceRecord,
    SubmitterRecord, Trailer,
};
use crate::date::{DateExact, Time};
use crate::error::{GedError, GedResult};
use crate::grammar;
use crate::validator::LineNode;
use std::collections::BTreeMap;

/// Build a [`Dataset`] from the validator's level-0 forest.
///
/// The input must come from [`crate::validator::validate`], which
/// guarantees the document shape (HEAD first, TRLR last) and all
/// structural cardinalities.
pub fn build(roots: &[LineNode]) -> GedResult<Dataset> {
    Builder::new(roots)?.build(roots)
}

struct Builder {
    schema: Option<Schema>,
    registry: BTreeMap<String, RecordIndex>,
    refns: BTreeMap<String, usize>,
}

impl Builder {
    /// Register every record id up front; pointers can then resolve at
    /// the line that uses them, regardless of declaration order.
    fn new(roots: &[LineNode]) -> GedResult<Self> {
        let mut registry = BTreeMap::new();
        let mut index = 0;
        for root in roots {
            let line = &root.line;
            if line.tag == "HEAD" || line.tag == "TRLR" {
                if line.xref.is_some() {
                    return Err(GedError::malformed_line(
                        format!("{} does not take a cross-reference identifier", line.tag),
                        line.line_num,
                    ));
                }
                continue;
            }
            let xref = line.xref.as_deref().ok_or_else(|| {
                GedError::malformed_line(
                    format!("{} record requires an @XREF@ identifier", line.tag),
                    line.line_num,
                )
            })?;
            if xref == "VOID" {
                return Err(GedError::malformed_line(
                    "@VOID@ cannot identify a record",
                    line.line_num,
                ));
            }
            if registry.insert(xref.to_string(), index).is_some() {
                return Err(GedError::collision(
                    format!("cross-reference @{}@ is defined more than once", xref),
                    line.line_num,
                ));
            }
            index += 1;
        }
        Ok(Self {
            schema: None,
            registry,
            refns: BTreeMap::new(),
        })
    }

    fn build(mut self, roots: &[LineNode]) -> GedResult<Dataset> {
        let mut header = Header::default();
        let mut records = Vec::new();
        for root in roots {
            match root.line.tag.as_str() {
                "HEAD" => header = self.header(root)?,
                "TRLR" => {}
                "INDI" => records.push(Record::Individual(self.individual(root)?)),
                "FAM" => records.push(Record::Family(self.family(root)?)),
                "SUBM" => records.push(Record::Submitter(self.submitter(root)?)),
                "OBJE" => records.push(Record::Multimedia(self.multimedia(root)?)),
                "SNOTE" => records.push(Record::SharedNote(self.shared_note(root)?)),
                "SOUR" => records.push(Record::Source(self.source(root)?)),
                "REPO" => records.push(Record::Repository(self.repository(root)?)),
                tag => {
                    return Err(GedError::unknown_tag(
                        format!("{} is not a record type", tag),
                        root.line.line_num,
                    ));
                }
            }
        }
        Ok(Dataset {
            header,
            records,
            trailer: Trailer,
        })
    }

    // ==================== Header ====================

    fn header(&mut self, node: &LineNode) -> GedResult<Header> {
        let mut header = Header::default();

        // SCHMA first: extension tags elsewhere in the header must be
        // checked against it even when SCHMA appears after them.
        if let Some(schma) = node.child("SCHMA") {
            header.schema = Some(self.schema_decl(schma)?);
            self.schema = header.schema.clone();
        }

        for child in substructures(node) {
            match child.line.tag.as_str() {
                "GEDC" => header.gedcom = self.gedcom(child)?,
                "SCHMA" => {}
                "SOUR" => header.source = Some(self.head_source(child)?),
                "DEST" => header.destination = payload(child),
                "DATE" => header.date = Some(self.date_exact(child)?),
                "SUBM" => header.submitter = Some(self.pointer(child)?),
                "COPR" => header.copyright = payload(child),
                "LANG" => header.language = payload(child),
                "PLAC" => header.place_form = Some(self.place_form(child)?),
                "NOTE" => header.notes.push(self.note(child)?),
                "SNOTE" => header.shared_notes.push(self.pointer(child)?),
                _ => header.extensions.push(self.extension(child)?),
            }
        }
        Ok(header)
    }

    fn gedcom(&mut self, node: &LineNode) -> GedResult<Gedcom> {
        let mut gedcom = Gedcom::default();
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "VERS" => {
                    let version = required_payload(child)?;
                    if version != "7" && !version.starts_with("7.") {
                        return Err(GedError::version(
                            format!("unsupported GEDCOM version {}; expected 7.x", version),
                            child.line.line_num,
                        ));
                    }
                    gedcom.version = version;
                }
                _ => self.check_extension(child)?,
            }
        }
        Ok(gedcom)
    }

    fn schema_decl(&mut self, node: &LineNode) -> GedResult<Schema> {
        let mut schema = Schema::default();
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "TAG" => {
                    let decl = required_payload(child)?;
                    let (tag, uri) = decl.split_once(' ').ok_or_else(|| {
                        GedError::malformed_line(
                            format!("TAG payload {:?} is not `tag uri`", decl),
                            child.line.line_num,
                        )
                    })?;
                    if !tag.starts_with('_') {
                        return Err(GedError::malformed_line(
                            format!("extension tag {} must begin with an underscore", tag),
                            child.line.line_num,
                        ));
                    }
                    schema.tags.push(ExtensionTag {
                        tag: tag.to_string(),
                        uri: uri.to_string(),
                    });
                }
                _ => self.check_extension(child)?,
            }
        }
        Ok(schema)
    }

    fn head_source(&mut self, node: &LineNode) -> GedResult<HeadSource> {
        let mut source = HeadSource {
            id: required_payload(node)?,
            version: None,
            name: None,
            corporation: None,
            data: None,
        };
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "VERS" => source.version = payload(child),
                "NAME" => source.name = payload(child),
                "CORP" => source.corporation = Some(self.corporation(child)?),
                "DATA" => source.data = Some(self.head_source_data(child)?),
                _ => self.check_extension(child)?,
            }
        }
        Ok(source)
    }

    fn head_source_data(&mut self, node: &LineNode) -> GedResult<HeadSourceData> {
        let mut data = HeadSourceData {
            name: required_payload(node)?,
            date: None,
            copyright: None,
        };
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "DATE" => data.date = Some(self.date_exact(child)?),
                "COPR" => data.copyright = payload(child),
                _ => self.check_extension(child)?,
            }
        }
        Ok(data)
    }

    fn place_form(&mut self, node: &LineNode) -> GedResult<Vec<String>> {
        let mut form = None;
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "FORM" => {
                    let labels = required_payload(child)?;
                    form = Some(labels.split(',').map(|l| l.trim().to_string()).collect());
                }
                _ => self.check_extension(child)?,
            }
        }
        form.ok_or_else(|| {
            GedError::cardinality("missing required FORM under PLAC", node.line.line_num)
        })
    }

    // ==================== Shared structures ====================

    fn corporation(&mut self, node: &LineNode) -> GedResult<Corporation> {
        let mut corp = Corporation {
            name: required_payload(node)?,
            address: None,
            phones: Vec::new(),
            emails: Vec::new(),
            faxes: Vec::new(),
            web: Vec::new(),
        };
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "ADDR" => corp.address = Some(self.address(child)?),
                "PHON" => corp.phones.push(required_payload(child)?),
                "EMAIL" => corp.emails.push(required_payload(child)?),
                "FAX" => corp.faxes.push(required_payload(child)?),
                "WWW" => corp.web.push(required_payload(child)?),
                _ => self.check_extension(child)?,
            }
        }
        Ok(corp)
    }

    fn address(&mut self, node: &LineNode) -> GedResult<Address> {
        let mut addr = Address {
            full: payload(node).unwrap_or_default(),
            ..Address::default()
        };
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "ADR1" => addr.adr1 = payload(child),
                "ADR2" => addr.adr2 = payload(child),
                "ADR3" => addr.adr3 = payload(child),
                "CITY" => addr.city = payload(child),
                "STAE" => addr.state = payload(child),
                "POST" => addr.postal_code = payload(child),
                "CTRY" => addr.country = payload(child),
                _ => self.check_extension(child)?,
            }
        }
        Ok(addr)
    }

    fn date_exact(&mut self, node: &LineNode) -> GedResult<DateExact> {
        let mut date = DateExact::parse(&required_payload(node)?, node.line.line_num)?;
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "TIME" => {
                    date = date.with_time(Time::parse(
                        &required_payload(child)?,
                        child.line.line_num,
                    )?);
                }
                _ => self.check_extension(child)?,
            }
        }
        Ok(date)
    }

    fn note(&mut self, node: &LineNode) -> GedResult<Note> {
        let mut note = Note {
            text: payload(node).unwrap_or_default(),
            media_type: None,
            language: None,
        };
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "MIME" => note.media_type = payload(child),
                "LANG" => note.language = payload(child),
                _ => self.check_extension(child)?,
            }
        }
        Ok(note)
    }

    fn change(&mut self, node: &LineNode) -> GedResult<ChangeDate> {
        let date = node.child("DATE").ok_or_else(|| {
            GedError::cardinality("missing required DATE under CHAN", node.line.line_num)
        })?;
        let mut change = ChangeDate {
            date: self.date_exact(date)?,
            notes: Vec::new(),
            shared_notes: Vec::new(),
        };
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "DATE" => {}
                "NOTE" => change.notes.push(self.note(child)?),
                "SNOTE" => change.shared_notes.push(self.pointer(child)?),
                _ => self.check_extension(child)?,
            }
        }
        Ok(change)
    }

    fn creation(&mut self, node: &LineNode) -> GedResult<DateExact> {
        let date = node.child("DATE").ok_or_else(|| {
            GedError::cardinality("missing required DATE under CREA", node.line.line_num)
        })?;
        self.date_exact(date)
    }

    fn multimedia_link(&mut self, node: &LineNode) -> GedResult<MultimediaLink> {
        let mut link = MultimediaLink {
            target: self.pointer(node)?,
            title: None,
            crop: None,
        };
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "TITL" => link.title = payload(child),
                "CROP" => link.crop = Some(self.crop(child)?),
                _ => self.check_extension(child)?,
            }
        }
        Ok(link)
    }

    fn crop(&mut self, node: &LineNode) -> GedResult<Crop> {
        let mut crop = Crop::default();
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "TOP" => crop.top = Some(dimension(child)?),
                "LEFT" => crop.left = Some(dimension(child)?),
                "HEIGHT" => crop.height = Some(dimension(child)?),
                "WIDTH" => crop.width = Some(dimension(child)?),
                _ => self.check_extension(child)?,
            }
        }
        Ok(crop)
    }

    /// Handle the substructures every record kind shares. Returns false
    /// when the tag belongs to the enclosing record's own grammar.
    fn meta_child(&mut self, node: &LineNode, meta: &mut RecordMeta) -> GedResult<bool> {
        // Only consume tags the grammar sanctioned in this position; an
        // opaque context means the validator did not know the pair.
        if node.context == grammar::OPAQUE {
            return Ok(false);
        }
        match node.line.tag.as_str() {
            "REFN" => {
                let identifier = self.reference(node)?;
                meta.identifiers.push(identifier);
            }
            "UID" => meta.identifiers.push(Identifier::Uid(required_payload(node)?)),
            "EXID" => {
                let mut kind = None;
                for child in substructures(node) {
                    match child.line.tag.as_str() {
                        "TYPE" => kind = payload(child),
                        _ => self.check_extension(child)?,
                    }
                }
                meta.identifiers.push(Identifier::External {
                    value: required_payload(node)?,
                    kind,
                });
            }
            "NOTE" => meta.notes.push(self.note(node)?),
            "SNOTE" => meta.shared_notes.push(self.pointer(node)?),
            "OBJE" => meta.multimedia.push(self.multimedia_link(node)?),
            "CHAN" => meta.change = Some(self.change(node)?),
            "CREA" => meta.created = Some(self.creation(node)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn reference(&mut self, node: &LineNode) -> GedResult<Identifier> {
        let value = required_payload(node)?;
        if let Some(&previous) = self.refns.get(&value) {
            return Err(GedError::collision(
                format!(
                    "REFN {:?} already used at line {}; values must be unique",
                    value, previous
                ),
                node.line.line_num,
            ));
        }
        self.refns.insert(value.clone(), node.line.line_num);
        let mut kind = None;
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "TYPE" => kind = payload(child),
                _ => self.check_extension(child)?,
            }
        }
        Ok(Identifier::Reference { value, kind })
    }

    // ==================== Records ====================

    fn individual(&mut self, node: &LineNode) -> GedResult<IndividualRecord> {
        let mut indi = IndividualRecord {
            xref: record_xref(node),
            ..IndividualRecord::default()
        };
        for child in substructures(node) {
            if self.meta_child(child, &mut indi.meta)? {
                continue;
            }
            match child.line.tag.as_str() {
                "NAME" => indi.names.push(self.personal_name(child)?),
                "SEX" => {
                    let value = required_payload(child)?;
                    indi.sex =
                        Some(crate::dataset::Sex::parse(&value).ok_or_else(|| {
                            GedError::malformed_line(
                                format!("invalid SEX value {:?}; expected M, F, X, or U", value),
                                child.line.line_num,
                            )
                        })?);
                }
                "FAMC" => indi.child_of.push(self.pointer(child)?),
                "FAMS" => indi.spouse_in.push(self.pointer(child)?),
                _ => indi.meta.extensions.push(self.extension(child)?),
            }
        }
        Ok(indi)
    }

    fn personal_name(&mut self, node: &LineNode) -> GedResult<PersonalName> {
        let mut name = PersonalName {
            value: required_payload(node)?,
            ..PersonalName::default()
        };
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "TYPE" => name.kind = payload(child),
                "GIVN" => name.given = payload(child),
                "SURN" => name.surname = payload(child),
                "NICK" => name.nickname = payload(child),
                _ => self.check_extension(child)?,
            }
        }
        Ok(name)
    }

    fn family(&mut self, node: &LineNode) -> GedResult<FamilyRecord> {
        let mut fam = FamilyRecord {
            xref: record_xref(node),
            ..FamilyRecord::default()
        };
        for child in substructures(node) {
            if self.meta_child(child, &mut fam.meta)? {
                continue;
            }
            match child.line.tag.as_str() {
                "HUSB" => fam.husband = Some(self.pointer(child)?),
                "WIFE" => fam.wife = Some(self.pointer(child)?),
                "CHIL" => fam.children.push(self.pointer(child)?),
                _ => fam.meta.extensions.push(self.extension(child)?),
            }
        }
        Ok(fam)
    }

    fn submitter(&mut self, node: &LineNode) -> GedResult<SubmitterRecord> {
        let mut subm = SubmitterRecord {
            xref: record_xref(node),
            ..SubmitterRecord::default()
        };
        for child in substructures(node) {
            if self.meta_child(child, &mut subm.meta)? {
                continue;
            }
            match child.line.tag.as_str() {
                "NAME" => subm.name = required_payload(child)?,
                "ADDR" => subm.address = Some(self.address(child)?),
                "PHON" => subm.phones.push(required_payload(child)?),
                "EMAIL" => subm.emails.push(required_payload(child)?),
                "FAX" => subm.faxes.push(required_payload(child)?),
                "WWW" => subm.web.push(required_payload(child)?),
                "LANG" => subm.languages.push(required_payload(child)?),
                _ => subm.meta.extensions.push(self.extension(child)?),
            }
        }
        Ok(subm)
    }

    fn multimedia(&mut self, node: &LineNode) -> GedResult<MultimediaRecord> {
        let mut obje = MultimediaRecord {
            xref: record_xref(node),
            ..MultimediaRecord::default()
        };
        for child in substructures(node) {
            if self.meta_child(child, &mut obje.meta)? {
                continue;
            }
            match child.line.tag.as_str() {
                "FILE" => obje.files.push(self.media_file(child)?),
                _ => obje.meta.extensions.push(self.extension(child)?),
            }
        }
        Ok(obje)
    }

    fn media_file(&mut self, node: &LineNode) -> GedResult<MediaFile> {
        let form = node.child("FORM").ok_or_else(|| {
            GedError::cardinality("missing required FORM under FILE", node.line.line_num)
        })?;
        let mut file = MediaFile {
            path: required_payload(node)?,
            media_type: required_payload(form)?,
            medium: None,
            title: None,
        };
        for child in substructures(form) {
            match child.line.tag.as_str() {
                "MEDI" => file.medium = payload(child),
                _ => self.check_extension(child)?,
            }
        }
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "FORM" => {}
                "TITL" => file.title = payload(child),
                _ => self.check_extension(child)?,
            }
        }
        Ok(file)
    }

    fn shared_note(&mut self, node: &LineNode) -> GedResult<SharedNoteRecord> {
        let mut snote = SharedNoteRecord {
            xref: record_xref(node),
            text: payload(node).unwrap_or_default(),
            ..SharedNoteRecord::default()
        };
        for child in substructures(node) {
            if self.meta_child(child, &mut snote.meta)? {
                continue;
            }
            match child.line.tag.as_str() {
                "MIME" => snote.media_type = payload(child),
                "LANG" => snote.language = payload(child),
                "TRAN" => snote.translations.push(self.translation(child)?),
                _ => snote.meta.extensions.push(self.extension(child)?),
            }
        }
        Ok(snote)
    }

    fn translation(&mut self, node: &LineNode) -> GedResult<NoteTranslation> {
        let mut tran = NoteTranslation {
            text: required_payload(node)?,
            media_type: None,
            language: None,
        };
        for child in substructures(node) {
            match child.line.tag.as_str() {
                "MIME" => tran.media_type = payload(child),
                "LANG" => tran.language = payload(child),
                _ => self.check_extension(child)?,
            }
        }
        Ok(tran)
    }

    fn source(&mut self, node: &LineNode) -> GedResult<SourceRecord> {
        let mut sour = SourceRecord {
            xref: record_xref(node),
            ..SourceRecord::default()
        };
        for child in substructures(node) {
            if self.meta_child(child, &mut sour.meta)? {
                continue;
            }
            match child.line.tag.as_str() {
                "AUTH" => sour.author = payload(child),
                "TITL" => sour.title = payload(child),
                "ABBR" => sour.abbreviation = payload(child),
                "PUBL" => sour.publication = payload(child),
                "TEXT" => sour.text = Some(self.note(child)?),
                "REPO" => sour.repositories.push(self.pointer(child)?),
                _ => sour.meta.extensions.push(self.extension(child)?),
            }
        }
        Ok(sour)
    }

    fn repository(&mut self, node: &LineNode) -> GedResult<RepositoryRecord> {
        let mut repo = RepositoryRecord {
            xref: record_xref(node),
            ..RepositoryRecord::default()
        };
        for child in substructures(node) {
            if self.meta_child(child, &mut repo.meta)? {
                continue;
            }
            match child.line.tag.as_str() {
                "NAME" => repo.name = required_payload(child)?,
                "ADDR" => repo.address = Some(self.address(child)?),
                "PHON" => repo.phones.push(required_payload(child)?),
                "EMAIL" => repo.emails.push(required_payload(child)?),
                "FAX" => repo.faxes.push(required_payload(child)?),
                "WWW" => repo.web.push(required_payload(child)?),
                _ => repo.meta.extensions.push(self.extension(child)?),
            }
        }
        Ok(repo)
    }

    // ==================== Pointers and extensions ====================

    /// Parse a pointer payload and resolve it against the registry.
    fn pointer(&self, node: &LineNode) -> GedResult<RecordLink> {
        let line = node.line.line_num;
        let value = node.line.value.as_deref().unwrap_or("");
        let xref = value
            .strip_prefix('@')
            .and_then(|v| v.strip_suffix('@'))
            .filter(|v| !v.is_empty() && !v.starts_with('#'))
            .ok_or_else(|| {
                GedError::malformed_line(
                    format!("{} payload {:?} is not an @XREF@ pointer", node.line.tag, value),
                    line,
                )
            })?;
        if xref == "VOID" {
            return Ok(RecordLink::pending("VOID"));
        }
        match self.registry.get(xref) {
            Some(&index) => Ok(RecordLink {
                xref: xref.to_string(),
                target: Some(index),
            }),
            None => Err(GedError::unresolved(
                format!("pointer @{}@ does not match any record", xref),
                line,
            )),
        }
    }

    /// Build an opaque extension subtree, or reject the tag.
    fn extension(&mut self, node: &LineNode) -> GedResult<ExtensionLine> {
        let tag = &node.line.tag;
        if !tag.starts_with('_') {
            return Err(GedError::unknown_tag(
                format!("unexpected tag {}", tag),
                node.line.line_num,
            ));
        }
        if !self.schema.as_ref().map_or(false, |s| s.declares(tag)) {
            return Err(GedError::unknown_tag(
                format!("extension tag {} is not declared in HEAD.SCHMA", tag),
                node.line.line_num,
            ));
        }
        Ok(self.extension_subtree(node))
    }

    /// Substructures of a declared extension are opaque and kept as-is.
    fn extension_subtree(&self, node: &LineNode) -> ExtensionLine {
        ExtensionLine {
            tag: node.line.tag.clone(),
            value: payload(node),
            children: substructures(node)
                .map(|c| self.extension_subtree(c))
                .collect(),
        }
    }

    /// For structures with nowhere to store extensions: accept declared
    /// extension tags silently, reject everything else.
    fn check_extension(&mut self, node: &LineNode) -> GedResult<()> {
        self.extension(node).map(|_| ())
    }
}

/// A record's id; presence was checked during registration.
fn record_xref(node: &LineNode) -> String {
    node.line.xref.clone().unwrap_or_default()
}

/// Substructures in document order, with CONT folded away.
fn substructures(node: &LineNode) -> impl Iterator<Item = &LineNode> {
    node.children.iter().filter(|c| c.line.tag != "CONT")
}

/// The line payload with CONT continuations folded in with `\n`.
fn payload(node: &LineNode) -> Option<String> {
    let mut conts = node.children_tagged("CONT").peekable();
    if node.line.value.is_none() && conts.peek().is_none() {
        return None;
    }
    let mut text = node.line.value.clone().unwrap_or_default();
    for cont in conts {
        text.push('\n');
        text.push_str(cont.line.value.as_deref().unwrap_or(""));
    }
    Some(text)
}

fn required_payload(node: &LineNode) -> GedResult<String> {
    payload(node).ok_or_else(|| {
        GedError::malformed_line(
            format!("{} requires a payload", node.line.tag),
            node.line.line_num,
        )
    })
}

fn dimension(node: &LineNode) -> GedResult<u32> {
    let value = required_payload(node)?;
    value.parse().map_err(|_| {
        GedError::malformed_line(
            format!("{} payload {:?} is not a non-negative integer", node.line.tag, value),
            node.line.line_num,
        )
    })
}
