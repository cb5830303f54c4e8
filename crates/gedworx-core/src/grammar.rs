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

//! The structural grammar table for GEDCOM 7.
//!
//! The grammar is a declarative table consulted by the structural
//! validator: each entry maps a (context, tag) pair to the cardinality
//! of that substructure and the context its own substructures open.
//! Contexts are named after the GEDCOM 7 structure types, so shared
//! structures (ADDR, NOTE, CHAN, ...) are defined once and referenced
//! from every superstructure that carries them.
//!
//! A context with no entries is a leaf: any substructure under it is
//! unknown to the grammar and left for the document builder to accept
//! (declared extension) or reject (`UnknownTagError`).

use std::fmt;

/// How many times a substructure may or must appear under its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// {0:1} — optional, at most once.
    ZeroOrOne,
    /// {1:1} — required, exactly once.
    One,
    /// {0:M} — optional, any number.
    ZeroOrMany,
    /// {1:M} — required, at least once.
    OneOrMany,
}

impl Cardinality {
    /// Whether at least one occurrence is required.
    pub fn required(self) -> bool {
        matches!(self, Self::One | Self::OneOrMany)
    }

    /// Whether more than one occurrence is allowed.
    pub fn repeatable(self) -> bool {
        matches!(self, Self::ZeroOrMany | Self::OneOrMany)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroOrOne => write!(f, "{{0:1}}"),
            Self::One => write!(f, "{{1:1}}"),
            Self::ZeroOrMany => write!(f, "{{0:M}}"),
            Self::OneOrMany => write!(f, "{{1:M}}"),
        }
    }
}

/// A grammar rule for one (context, tag) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// How often the tag may appear in the context.
    pub cardinality: Cardinality,
    /// The context the substructure opens for its own children.
    pub child_context: &'static str,
}

/// The context of the dataset root (level 0 lines).
pub const ROOT: &str = "DATASET";

/// The opaque context assigned to structures the grammar does not know,
/// such as the subtrees of declared extension tags.
pub const OPAQUE: &str = "";

use Cardinality::{One, OneOrMany, ZeroOrMany, ZeroOrOne};

/// The structural grammar: (context, tag, cardinality, child context).
///
/// Shared record substructures (REFN, UID, EXID, NOTE, SNOTE, OBJE,
/// CHAN, CREA) are spelled out per record kind; the table is data, not
/// code, and reads like the specification's structure lists.
#[rustfmt::skip]
static RULES: &[(&str, &str, Cardinality, &str)] = &[
    // Dataset root
    (ROOT, "HEAD",  One,        "HEAD"),
    (ROOT, "TRLR",  One,        "TRLR"),
    (ROOT, "INDI",  ZeroOrMany, "INDI"),
    (ROOT, "FAM",   ZeroOrMany, "FAM"),
    (ROOT, "SUBM",  ZeroOrMany, "SUBM"),
    (ROOT, "OBJE",  ZeroOrMany, "OBJE-RECORD"),
    (ROOT, "SNOTE", ZeroOrMany, "SNOTE-RECORD"),
    (ROOT, "SOUR",  ZeroOrMany, "SOUR-RECORD"),
    (ROOT, "REPO",  ZeroOrMany, "REPO-RECORD"),

    // Header
    ("HEAD", "GEDC",  One,        "GEDC"),
    ("HEAD", "SCHMA", ZeroOrOne,  "SCHMA"),
    ("HEAD", "SOUR",  ZeroOrOne,  "HEAD-SOUR"),
    ("HEAD", "DEST",  ZeroOrOne,  "TEXT"),
    ("HEAD", "DATE",  ZeroOrOne,  "DATE-EXACT"),
    ("HEAD", "SUBM",  ZeroOrOne,  "POINTER"),
    ("HEAD", "COPR",  ZeroOrOne,  "TEXT"),
    ("HEAD", "LANG",  ZeroOrOne,  "TEXT"),
    ("HEAD", "PLAC",  ZeroOrOne,  "HEAD-PLAC"),
    ("HEAD", "NOTE",  ZeroOrMany, "NOTE"),
    ("HEAD", "SNOTE", ZeroOrMany, "POINTER"),

    ("GEDC",  "VERS", One,        "TEXT"),
    ("SCHMA", "TAG",  ZeroOrMany, "TEXT"),

    ("HEAD-SOUR", "VERS", ZeroOrOne, "TEXT"),
    ("HEAD-SOUR", "NAME", ZeroOrOne, "TEXT"),
    ("HEAD-SOUR", "CORP", ZeroOrOne, "CORP"),
    ("HEAD-SOUR", "DATA", ZeroOrOne, "HEAD-SOUR-DATA"),

    ("HEAD-SOUR-DATA", "DATE", ZeroOrOne, "DATE-EXACT"),
    ("HEAD-SOUR-DATA", "COPR", ZeroOrOne, "TEXT"),

    ("HEAD-PLAC", "FORM", One, "TEXT"),

    // Shared structures
    ("CORP", "ADDR",  ZeroOrOne,  "ADDR"),
    ("CORP", "PHON",  ZeroOrMany, "TEXT"),
    ("CORP", "EMAIL", ZeroOrMany, "TEXT"),
    ("CORP", "FAX",   ZeroOrMany, "TEXT"),
    ("CORP", "WWW",   ZeroOrMany, "TEXT"),

    ("ADDR", "ADR1", ZeroOrOne, "TEXT"),
    ("ADDR", "ADR2", ZeroOrOne, "TEXT"),
    ("ADDR", "ADR3", ZeroOrOne, "TEXT"),
    ("ADDR", "CITY", ZeroOrOne, "TEXT"),
    ("ADDR", "STAE", ZeroOrOne, "TEXT"),
    ("ADDR", "POST", ZeroOrOne, "TEXT"),
    ("ADDR", "CTRY", ZeroOrOne, "TEXT"),

    ("DATE-EXACT", "TIME", ZeroOrOne, "TEXT"),

    ("NOTE", "MIME", ZeroOrOne, "TEXT"),
    ("NOTE", "LANG", ZeroOrOne, "TEXT"),

    ("REFN", "TYPE", ZeroOrOne, "TEXT"),
    ("EXID", "TYPE", ZeroOrOne, "TEXT"),

    ("CHAN", "DATE",  One,        "DATE-EXACT"),
    ("CHAN", "NOTE",  ZeroOrMany, "NOTE"),
    ("CHAN", "SNOTE", ZeroOrMany, "POINTER"),
    ("CREA", "DATE",  One,        "DATE-EXACT"),

    ("OBJE-LINK", "CROP", ZeroOrOne, "CROP"),
    ("OBJE-LINK", "TITL", ZeroOrOne, "TEXT"),

    ("CROP", "TOP",    ZeroOrOne, "TEXT"),
    ("CROP", "LEFT",   ZeroOrOne, "TEXT"),
    ("CROP", "HEIGHT", ZeroOrOne, "TEXT"),
    ("CROP", "WIDTH",  ZeroOrOne, "TEXT"),

    ("PERSONAL-NAME", "TYPE", ZeroOrOne, "TEXT"),
    ("PERSONAL-NAME", "GIVN", ZeroOrOne, "TEXT"),
    ("PERSONAL-NAME", "SURN", ZeroOrOne, "TEXT"),
    ("PERSONAL-NAME", "NICK", ZeroOrOne, "TEXT"),

    ("NOTE-TRAN", "MIME", ZeroOrOne, "TEXT"),
    ("NOTE-TRAN", "LANG", ZeroOrOne, "TEXT"),

    // Individual record
    ("INDI", "NAME",  ZeroOrMany, "PERSONAL-NAME"),
    ("INDI", "SEX",   ZeroOrOne,  "TEXT"),
    ("INDI", "FAMC",  ZeroOrMany, "POINTER"),
    ("INDI", "FAMS",  ZeroOrMany, "POINTER"),
    ("INDI", "REFN",  ZeroOrMany, "REFN"),
    ("INDI", "UID",   ZeroOrMany, "TEXT"),
    ("INDI", "EXID",  ZeroOrMany, "EXID"),
    ("INDI", "NOTE",  ZeroOrMany, "NOTE"),
    ("INDI", "SNOTE", ZeroOrMany, "POINTER"),
    ("INDI", "OBJE",  ZeroOrMany, "OBJE-LINK"),
    ("INDI", "CHAN",  ZeroOrOne,  "CHAN"),
    ("INDI", "CREA",  ZeroOrOne,  "CREA"),

    // Family record
    ("FAM", "HUSB",  ZeroOrOne,  "POINTER"),
    ("FAM", "WIFE",  ZeroOrOne,  "POINTER"),
    ("FAM", "CHIL",  ZeroOrMany, "POINTER"),
    ("FAM", "REFN",  ZeroOrMany, "REFN"),
    ("FAM", "UID",   ZeroOrMany, "TEXT"),
    ("FAM", "EXID",  ZeroOrMany, "EXID"),
    ("FAM", "NOTE",  ZeroOrMany, "NOTE"),
    ("FAM", "SNOTE", ZeroOrMany, "POINTER"),
    ("FAM", "OBJE",  ZeroOrMany, "OBJE-LINK"),
    ("FAM", "CHAN",  ZeroOrOne,  "CHAN"),
    ("FAM", "CREA",  ZeroOrOne,  "CREA"),

    // Submitter record
    ("SUBM", "NAME",  One,        "TEXT"),
    ("SUBM", "ADDR",  ZeroOrOne,  "ADDR"),
    ("SUBM", "PHON",  ZeroOrMany, "TEXT"),
    ("SUBM", "EMAIL", ZeroOrMany, "TEXT"),
    ("SUBM", "FAX",   ZeroOrMany, "TEXT"),
    ("SUBM", "WWW",   ZeroOrMany, "TEXT"),
    ("SUBM", "LANG",  ZeroOrMany, "TEXT"),
    ("SUBM", "OBJE",  ZeroOrMany, "OBJE-LINK"),
    ("SUBM", "REFN",  ZeroOrMany, "REFN"),
    ("SUBM", "UID",   ZeroOrMany, "TEXT"),
    ("SUBM", "EXID",  ZeroOrMany, "EXID"),
    ("SUBM", "NOTE",  ZeroOrMany, "NOTE"),
    ("SUBM", "SNOTE", ZeroOrMany, "POINTER"),
    ("SUBM", "CHAN",  ZeroOrOne,  "CHAN"),
    ("SUBM", "CREA",  ZeroOrOne,  "CREA"),

    // Multimedia record
    ("OBJE-RECORD", "FILE", OneOrMany,  "FILE"),
    ("OBJE-RECORD", "REFN", ZeroOrMany, "REFN"),
    ("OBJE-RECORD", "UID",  ZeroOrMany, "TEXT"),
    ("OBJE-RECORD", "EXID", ZeroOrMany, "EXID"),
    ("OBJE-RECORD", "NOTE", ZeroOrMany, "NOTE"),
    ("OBJE-RECORD", "SNOTE", ZeroOrMany, "POINTER"),
    ("OBJE-RECORD", "CHAN", ZeroOrOne,  "CHAN"),
    ("OBJE-RECORD", "CREA", ZeroOrOne,  "CREA"),

    ("FILE", "FORM", One,       "FORM"),
    ("FILE", "TITL", ZeroOrOne, "TEXT"),
    ("FORM", "MEDI", ZeroOrOne, "TEXT"),

    // Shared note record
    ("SNOTE-RECORD", "MIME", ZeroOrOne,  "TEXT"),
    ("SNOTE-RECORD", "LANG", ZeroOrOne,  "TEXT"),
    ("SNOTE-RECORD", "TRAN", ZeroOrMany, "NOTE-TRAN"),
    ("SNOTE-RECORD", "REFN", ZeroOrMany, "REFN"),
    ("SNOTE-RECORD", "UID",  ZeroOrMany, "TEXT"),
    ("SNOTE-RECORD", "EXID", ZeroOrMany, "EXID"),
    ("SNOTE-RECORD", "CHAN", ZeroOrOne,  "CHAN"),
    ("SNOTE-RECORD", "CREA", ZeroOrOne,  "CREA"),

    // Source record
    ("SOUR-RECORD", "AUTH",  ZeroOrOne,  "TEXT"),
    ("SOUR-RECORD", "TITL",  ZeroOrOne,  "TEXT"),
    ("SOUR-RECORD", "ABBR",  ZeroOrOne,  "TEXT"),
    ("SOUR-RECORD", "PUBL",  ZeroOrOne,  "TEXT"),
    ("SOUR-RECORD", "TEXT",  ZeroOrOne,  "NOTE"),
    ("SOUR-RECORD", "REPO",  ZeroOrMany, "POINTER"),
    ("SOUR-RECORD", "REFN",  ZeroOrMany, "REFN"),
    ("SOUR-RECORD", "UID",   ZeroOrMany, "TEXT"),
    ("SOUR-RECORD", "EXID",  ZeroOrMany, "EXID"),
    ("SOUR-RECORD", "NOTE",  ZeroOrMany, "NOTE"),
    ("SOUR-RECORD", "SNOTE", ZeroOrMany, "POINTER"),
    ("SOUR-RECORD", "OBJE",  ZeroOrMany, "OBJE-LINK"),
    ("SOUR-RECORD", "CHAN",  ZeroOrOne,  "CHAN"),
    ("SOUR-RECORD", "CREA",  ZeroOrOne,  "CREA"),

    // Repository record
    ("REPO-RECORD", "NAME",  One,        "TEXT"),
    ("REPO-RECORD", "ADDR",  ZeroOrOne,  "ADDR"),
    ("REPO-RECORD", "PHON",  ZeroOrMany, "TEXT"),
    ("REPO-RECORD", "EMAIL", ZeroOrMany, "TEXT"),
    ("REPO-RECORD", "FAX",   ZeroOrMany, "TEXT"),
    ("REPO-RECORD", "WWW",   ZeroOrMany, "TEXT"),
    ("REPO-RECORD", "REFN",  ZeroOrMany, "REFN"),
    ("REPO-RECORD", "UID",   ZeroOrMany, "TEXT"),
    ("REPO-RECORD", "EXID",  ZeroOrMany, "EXID"),
    ("REPO-RECORD", "NOTE",  ZeroOrMany, "NOTE"),
    ("REPO-RECORD", "SNOTE", ZeroOrMany, "POINTER"),
    ("REPO-RECORD", "CHAN",  ZeroOrOne,  "CHAN"),
    ("REPO-RECORD", "CREA",  ZeroOrOne,  "CREA"),
];

/// Contexts whose opening line carries continuable text.
#[rustfmt::skip]
static CONTINUABLE: &[&str] = &[
    "TEXT", "NOTE", "NOTE-TRAN", "SNOTE-RECORD", "ADDR", "CORP",
    "HEAD-SOUR", "HEAD-SOUR-DATA", "PERSONAL-NAME", "FILE", "FORM",
    "REFN", "EXID",
];

/// Whether a structure opening this context may carry `CONT` lines.
///
/// Declared extension structures (the opaque context) keep their
/// payloads verbatim, continuations included. Pointer-valued and
/// payload-less structures cannot be continued.
pub fn admits_cont(context: &str) -> bool {
    context == OPAQUE || CONTINUABLE.contains(&context)
}

/// Look up the rule for a tag within a context.
pub fn lookup(context: &str, tag: &str) -> Option<Rule> {
    RULES
        .iter()
        .find(|&&(ctx, t, _, _)| ctx == context && t == tag)
        .map(|&(_, _, cardinality, child_context)| Rule {
            cardinality,
            child_context,
        })
}

/// Iterate the required substructure tags of a context.
pub fn required_children(context: &str) -> impl Iterator<Item = (&'static str, Cardinality)> + '_ {
    RULES
        .iter()
        .filter(move |&&(ctx, _, cardinality, _)| ctx == context && cardinality.required())
        .map(|&(_, tag, cardinality, _)| (tag, cardinality))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Cardinality tests ====================

    #[test]
    fn test_cardinality_required() {
        assert!(!Cardinality::ZeroOrOne.required());
        assert!(Cardinality::One.required());
        assert!(!Cardinality::ZeroOrMany.required());
        assert!(Cardinality::OneOrMany.required());
    }

    #[test]
    fn test_cardinality_repeatable() {
        assert!(!Cardinality::ZeroOrOne.repeatable());
        assert!(!Cardinality::One.repeatable());
        assert!(Cardinality::ZeroOrMany.repeatable());
        assert!(Cardinality::OneOrMany.repeatable());
    }

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::ZeroOrOne.to_string(), "{0:1}");
        assert_eq!(Cardinality::One.to_string(), "{1:1}");
        assert_eq!(Cardinality::ZeroOrMany.to_string(), "{0:M}");
        assert_eq!(Cardinality::OneOrMany.to_string(), "{1:M}");
    }

    // ==================== Lookup tests ====================

    #[test]
    fn test_lookup_root_head() {
        let rule = lookup(ROOT, "HEAD").unwrap();
        assert_eq!(rule.cardinality, Cardinality::One);
        assert_eq!(rule.child_context, "HEAD");
    }

    #[test]
    fn test_lookup_head_gedc_vers() {
        let gedc = lookup("HEAD", "GEDC").unwrap();
        assert_eq!(gedc.cardinality, Cardinality::One);
        let vers = lookup(gedc.child_context, "VERS").unwrap();
        assert_eq!(vers.cardinality, Cardinality::One);
    }

    #[test]
    fn test_lookup_position_sensitive_sour() {
        // HEAD.SOUR (producer identity) and the SOUR record are distinct.
        let head_sour = lookup("HEAD", "SOUR").unwrap();
        let record_sour = lookup(ROOT, "SOUR").unwrap();
        assert_eq!(head_sour.child_context, "HEAD-SOUR");
        assert_eq!(record_sour.child_context, "SOUR-RECORD");
    }

    #[test]
    fn test_lookup_shared_addr() {
        // ADDR is defined once and reachable from CORP, SUBM, and REPO.
        for parent in ["CORP", "SUBM", "REPO-RECORD"] {
            let rule = lookup(parent, "ADDR").unwrap();
            assert_eq!(rule.child_context, "ADDR");
        }
        assert!(lookup("ADDR", "CITY").is_some());
    }

    #[test]
    fn test_lookup_unknown_tag() {
        assert!(lookup("HEAD", "XYZZ").is_none());
        assert!(lookup(ROOT, "GEDC").is_none());
    }

    #[test]
    fn test_lookup_leaf_context_has_no_children() {
        assert!(lookup("TEXT", "ANYT").is_none());
        assert!(lookup("POINTER", "NOTE").is_none());
        assert!(lookup(OPAQUE, "NOTE").is_none());
    }

    #[test]
    fn test_obje_record_requires_file() {
        let rule = lookup(ROOT, "OBJE").unwrap();
        let file = lookup(rule.child_context, "FILE").unwrap();
        assert_eq!(file.cardinality, Cardinality::OneOrMany);
    }

    // ==================== admits_cont tests ====================

    #[test]
    fn test_text_payloads_are_continuable() {
        assert!(admits_cont("TEXT"));
        assert!(admits_cont("NOTE"));
        assert!(admits_cont("SNOTE-RECORD"));
        assert!(admits_cont(OPAQUE));
    }

    #[test]
    fn test_pointer_and_structural_contexts_are_not_continuable() {
        assert!(!admits_cont("POINTER"));
        assert!(!admits_cont("INDI"));
        assert!(!admits_cont("GEDC"));
        assert!(!admits_cont("DATE-EXACT"));
        assert!(!admits_cont(ROOT));
    }

    // ==================== required_children tests ====================

    #[test]
    fn test_required_children_of_gedc() {
        let required: Vec<_> = required_children("GEDC").collect();
        assert_eq!(required, vec![("VERS", Cardinality::One)]);
    }

    #[test]
    fn test_required_children_of_root() {
        let required: Vec<_> = required_children(ROOT).map(|(t, _)| t).collect();
        assert_eq!(required, vec!["HEAD", "TRLR"]);
    }

    #[test]
    fn test_required_children_of_head() {
        let required: Vec<_> = required_children("HEAD").map(|(t, _)| t).collect();
        assert_eq!(required, vec!["GEDC"]);
    }

    #[test]
    fn test_required_children_of_text_is_empty() {
        assert_eq!(required_children("TEXT").count(), 0);
    }
}
