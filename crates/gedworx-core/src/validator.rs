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

//! Structural validator for GEDCOM 7.
//!
//! Consumes the token sequence while maintaining a stack of open
//! structures keyed by level, and enforces:
//!
//! - the level-nesting rule (a line's level is at most parent + 1),
//! - cardinality against the grammar table, counted per parent instance,
//! - the document shape (one HEAD first, one TRLR last).
//!
//! The output is a forest of [`LineNode`] trees, one per level-0 line,
//! in document order. The first violation aborts validation.

use crate::error::{GedError, GedResult};
use crate::grammar;
use crate::limits::Limits;
use crate::tokenizer::GedcomLine;
use std::collections::BTreeMap;

/// A validated line with its resolved substructures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNode {
    /// The raw line token.
    pub line: GedcomLine,
    /// The grammar context this line opens for its children
    /// ([`grammar::OPAQUE`] for structures the grammar does not know).
    pub context: &'static str,
    /// Substructures in document order.
    pub children: Vec<LineNode>,
}

impl LineNode {
    /// Find the first child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&LineNode> {
        self.children.iter().find(|c| c.line.tag == tag)
    }

    /// Iterate children with the given tag.
    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a LineNode> {
        self.children.iter().filter(move |c| c.line.tag == tag)
    }
}

struct Frame {
    node: LineNode,
    counts: BTreeMap<String, usize>,
}

/// Validate a token sequence into a forest of level-0 trees.
pub fn validate<I>(tokens: I, limits: &Limits) -> GedResult<Vec<LineNode>>
where
    I: IntoIterator<Item = GedResult<GedcomLine>>,
{
    let mut roots: Vec<LineNode> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut head_seen = false;
    let mut trailer_seen = false;
    let mut last_line = 0;

    for token in tokens {
        let line = token?;
        last_line = line.line_num;

        if line.level as usize > limits.max_depth {
            return Err(GedError::security(
                format!(
                    "nesting level {} exceeds limit {}",
                    line.level, limits.max_depth
                ),
                line.line_num,
            ));
        }
        if trailer_seen {
            return Err(GedError::cardinality(
                "content after the TRLR record",
                line.line_num,
            ));
        }

        if line.level == 0 {
            close_frames(&mut stack, &mut roots, 0)?;

            if !head_seen && line.tag != "HEAD" {
                return Err(GedError::cardinality(
                    format!("document must begin with HEAD, found {}", line.tag),
                    line.line_num,
                ));
            }
            if roots.len() >= limits.max_records {
                return Err(GedError::security(
                    format!("record count exceeds limit {}", limits.max_records),
                    line.line_num,
                ));
            }

            let context = apply_rule(grammar::ROOT, &line, &mut root_counts)?;
            head_seen |= line.tag == "HEAD";
            trailer_seen |= line.tag == "TRLR";
            stack.push(Frame {
                node: LineNode {
                    line,
                    context,
                    children: Vec::new(),
                },
                counts: BTreeMap::new(),
            });
        } else {
            close_frames(&mut stack, &mut roots, line.level)?;

            let parent = match stack.last_mut() {
                Some(frame) if frame.node.line.level + 1 == line.level => frame,
                Some(frame) => {
                    return Err(GedError::nesting(
                        format!(
                            "level {} line has no open parent; deepest open level is {}",
                            line.level, frame.node.line.level
                        ),
                        line.line_num,
                    ));
                }
                None => {
                    return Err(GedError::nesting(
                        format!("level {} line appears outside any record", line.level),
                        line.line_num,
                    ));
                }
            };

            // CONT extends the parent payload and may repeat freely; the
            // document builder folds it, the grammar table does not list
            // it. It is only valid directly under a line whose payload is
            // continuable text.
            let context = if line.tag == "CONT" {
                if parent.node.line.tag == "CONT" {
                    return Err(GedError::cardinality(
                        "CONT cannot extend another CONT line",
                        line.line_num,
                    ));
                }
                if !grammar::admits_cont(parent.node.context) {
                    return Err(GedError::cardinality(
                        format!(
                            "CONT cannot extend {}; its payload is not continuable text",
                            parent.node.line.tag
                        ),
                        line.line_num,
                    ));
                }
                grammar::OPAQUE
            } else {
                apply_rule(parent.node.context, &line, &mut parent.counts)?
            };

            stack.push(Frame {
                node: LineNode {
                    line,
                    context,
                    children: Vec::new(),
                },
                counts: BTreeMap::new(),
            });
        }
    }

    close_frames(&mut stack, &mut roots, 0)?;

    if !head_seen {
        return Err(GedError::cardinality("missing HEAD record", 1));
    }
    if !trailer_seen {
        return Err(GedError::cardinality(
            "missing TRLR record",
            last_line.max(1),
        ));
    }

    Ok(roots)
}

/// Consult the grammar for a (context, tag) pair and count the occurrence.
///
/// Unknown pairs pass through with the opaque context; the document
/// builder decides between declared extension data and `UnknownTagError`.
fn apply_rule(
    context: &'static str,
    line: &GedcomLine,
    counts: &mut BTreeMap<String, usize>,
) -> GedResult<&'static str> {
    match grammar::lookup(context, &line.tag) {
        Some(rule) => {
            let count = counts.entry(line.tag.clone()).or_insert(0);
            *count += 1;
            if *count > 1 && !rule.cardinality.repeatable() {
                return Err(GedError::cardinality(
                    format!(
                        "{} appears more than once under {}; {} allows at most one",
                        line.tag,
                        context_name(context),
                        rule.cardinality
                    ),
                    line.line_num,
                ));
            }
            Ok(rule.child_context)
        }
        None => Ok(grammar::OPAQUE),
    }
}

/// Pop every frame at `level` or deeper, checking required substructures
/// as each structure closes, and attach closed nodes to their parents.
fn close_frames(stack: &mut Vec<Frame>, roots: &mut Vec<LineNode>, level: u32) -> GedResult<()> {
    while stack.last().map_or(false, |top| top.node.line.level >= level) {
        if let Some(frame) = stack.pop() {
            check_required(&frame)?;
            match stack.last_mut() {
                Some(parent) => parent.node.children.push(frame.node),
                None => roots.push(frame.node),
            }
        }
    }
    Ok(())
}

fn check_required(frame: &Frame) -> GedResult<()> {
    for (tag, cardinality) in grammar::required_children(frame.node.context) {
        if frame.counts.get(tag).copied().unwrap_or(0) == 0 {
            return Err(GedError::cardinality(
                format!(
                    "missing required {} {} under {}",
                    tag,
                    cardinality,
                    context_name(frame.node.context)
                ),
                frame.node.line.line_num,
            )
            .with_context(format!("in {} started at line {}", frame.node.line.tag, frame.node.line.line_num)));
        }
    }
    Ok(())
}

fn context_name(context: &'static str) -> &'static str {
    if context == grammar::ROOT {
        "the dataset root"
    } else {
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GedErrorKind;
    use crate::tokenizer::tokenize;

    fn validate_text(text: &str) -> GedResult<Vec<LineNode>> {
        validate(tokenize(text), &Limits::default())
    }

    // ==================== Tree building tests ====================

    #[test]
    fn test_minimal_document() {
        let roots = validate_text("0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR\n").unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].line.tag, "HEAD");
        assert_eq!(roots[1].line.tag, "TRLR");
        let gedc = roots[0].child("GEDC").unwrap();
        assert_eq!(gedc.child("VERS").unwrap().line.value.as_deref(), Some("7.0"));
    }

    #[test]
    fn test_children_in_document_order() {
        let roots = validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n1 DEST any\n1 COPR none\n0 TRLR\n",
        )
        .unwrap();
        let tags: Vec<_> = roots[0].children.iter().map(|c| c.line.tag.as_str()).collect();
        assert_eq!(tags, vec!["GEDC", "DEST", "COPR"]);
    }

    #[test]
    fn test_sibling_structures_close_correctly() {
        let roots = validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 NAME John\n1 SEX M\n0 TRLR\n",
        )
        .unwrap();
        assert_eq!(roots.len(), 3);
        assert_eq!(roots[1].children.len(), 2);
    }

    #[test]
    fn test_context_assignment() {
        let roots = validate_text("0 HEAD\n1 GEDC\n2 VERS 7.0\n1 SOUR GW\n0 TRLR\n").unwrap();
        assert_eq!(roots[0].context, "HEAD");
        assert_eq!(roots[0].child("SOUR").unwrap().context, "HEAD-SOUR");
    }

    #[test]
    fn test_unknown_tag_passes_with_opaque_context() {
        let roots = validate_text("0 HEAD\n1 GEDC\n2 VERS 7.0\n1 _EXT x\n0 TRLR\n").unwrap();
        assert_eq!(roots[0].child("_EXT").unwrap().context, grammar::OPAQUE);
    }

    #[test]
    fn test_cont_passes_through() {
        let roots =
            validate_text("0 HEAD\n1 GEDC\n2 VERS 7.0\n1 NOTE a\n2 CONT b\n2 CONT c\n0 TRLR\n")
                .unwrap();
        let note = roots[0].child("NOTE").unwrap();
        assert_eq!(note.children_tagged("CONT").count(), 2);
    }

    #[test]
    fn test_cont_under_cont_rejected() {
        // Continuations are siblings of each other, never nested.
        let err = validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n1 NOTE a\n2 CONT b\n3 CONT c\n0 TRLR\n",
        )
        .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert_eq!(err.line, 6);
        assert!(err.message.contains("CONT"));
    }

    #[test]
    fn test_cont_under_payload_less_line_rejected() {
        let err = validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 CONT x\n0 TRLR\n",
        )
        .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert_eq!(err.line, 5);
        assert!(err.message.contains("INDI"));
    }

    #[test]
    fn test_cont_under_pointer_rejected() {
        let err = validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @F1@ FAM\n1 HUSB @VOID@\n2 CONT x\n0 TRLR\n",
        )
        .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert!(err.message.contains("HUSB"));
    }

    #[test]
    fn test_cont_extends_record_payload() {
        // The SNOTE record line itself carries the note text.
        let roots = validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @N1@ SNOTE a\n1 CONT b\n0 TRLR\n",
        )
        .unwrap();
        assert_eq!(roots[1].children_tagged("CONT").count(), 1);
    }

    // ==================== Nesting tests ====================

    #[test]
    fn test_level_jump_rejected() {
        let err = validate_text("0 HEAD\n2 VERS 7.0\n0 TRLR\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Nesting);
        assert_eq!(err.line, 2);
        assert!(err.message.contains("level 2"));
    }

    #[test]
    fn test_level_without_record_rejected() {
        let err = validate_text("1 GEDC\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Nesting);
    }

    #[test]
    fn test_level_decrease_reopens_parent() {
        // 2 -> 1 closes the level-2 structure and its level-1 parent.
        let roots = validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n1 SUBM @U1@\n0 TRLR\n",
        )
        .unwrap();
        assert_eq!(roots[0].children.len(), 2);
    }

    // ==================== Cardinality tests ====================

    #[test]
    fn test_duplicate_gedc_rejected() {
        let err =
            validate_text("0 HEAD\n1 GEDC\n2 VERS 7.0\n1 GEDC\n2 VERS 7.0\n0 TRLR\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert!(err.message.contains("GEDC"));
        assert!(err.message.contains("{1:1}"));
    }

    #[test]
    fn test_missing_vers_rejected() {
        let err = validate_text("0 HEAD\n1 GEDC\n0 TRLR\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert!(err.message.contains("VERS"));
        assert!(err.message.contains("GEDC"));
    }

    #[test]
    fn test_missing_gedc_rejected() {
        let err = validate_text("0 HEAD\n0 TRLR\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert!(err.message.contains("GEDC"));
    }

    #[test]
    fn test_obje_record_without_file_rejected() {
        let err = validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @M1@ OBJE\n0 TRLR\n",
        )
        .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert!(err.message.contains("FILE"));
    }

    #[test]
    fn test_duplicate_sex_rejected() {
        let err = validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 SEX M\n1 SEX F\n0 TRLR\n",
        )
        .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
    }

    #[test]
    fn test_repeatable_tag_allowed() {
        assert!(validate_text(
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 NAME A\n1 NAME B\n0 TRLR\n",
        )
        .is_ok());
    }

    // ==================== Document shape tests ====================

    #[test]
    fn test_head_must_be_first() {
        let err = validate_text("0 @I1@ INDI\n0 TRLR\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert!(err.message.contains("HEAD"));
    }

    #[test]
    fn test_duplicate_head_rejected() {
        let err = validate_text("0 HEAD\n1 GEDC\n2 VERS 7.0\n0 HEAD\n0 TRLR\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
    }

    #[test]
    fn test_missing_trailer_rejected() {
        let err = validate_text("0 HEAD\n1 GEDC\n2 VERS 7.0\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert!(err.message.contains("TRLR"));
    }

    #[test]
    fn test_content_after_trailer_rejected() {
        let err =
            validate_text("0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR\n0 @I1@ INDI\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert!(err.message.contains("TRLR"));
    }

    #[test]
    fn test_empty_token_stream_rejected() {
        let err = validate(std::iter::empty(), &Limits::default()).unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Cardinality);
        assert!(err.message.contains("HEAD"));
    }

    // ==================== Limit tests ====================

    #[test]
    fn test_depth_limit() {
        let limits = Limits {
            max_depth: 1,
            ..Limits::default()
        };
        let err = validate(
            tokenize("0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR\n"),
            &limits,
        )
        .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Security);
    }

    #[test]
    fn test_record_count_limit() {
        let limits = Limits {
            max_records: 2,
            ..Limits::default()
        };
        let err = validate(
            tokenize("0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n0 @I2@ INDI\n0 TRLR\n"),
            &limits,
        )
        .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Security);
    }

    // ==================== Error propagation tests ====================

    #[test]
    fn test_tokenizer_error_propagates() {
        let err = validate_text("0 HEAD\nbogus\n0 TRLR\n").unwrap_err();
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
    }
}
