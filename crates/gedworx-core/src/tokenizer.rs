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

//! Line tokenizer for GEDCOM 7.
//!
//! Splits the (BOM-stripped, already charset-validated) text into a lazy
//! sequence of [`GedcomLine`] tokens. Each physical line follows the
//! grammar `Level [@XREF@] Tag [payload]` with single-space separators.
//!
//! Tokenization is context-free and pure: `CONT` continuation lines are
//! surfaced as ordinary tokens, and re-tokenizing the same text yields
//! the same sequence.

use crate::error::{GedError, GedResult};
use crate::limits::Limits;
use memchr::memchr;

/// One logical GEDCOM line in raw token form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomLine {
    /// Physical line number (1-based).
    pub line_num: usize,
    /// Nesting level.
    pub level: u32,
    /// Cross-reference id being defined, without the `@` delimiters.
    pub xref: Option<String>,
    /// The tag token (e.g., HEAD, GEDC, VERS).
    pub tag: String,
    /// Line value, trimmed of the single leading space separator.
    pub value: Option<String>,
}

/// Lazy tokenizer over GEDCOM text.
///
/// The sequence is finite and restartable: construct a new `Tokenizer`
/// over the same text to tokenize again from the start. After the first
/// error the iterator is fused.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    line_num: usize,
    max_line_length: usize,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer with default limits.
    pub fn new(text: &'a str) -> Self {
        Self::with_limits(text, &Limits::default())
    }

    /// Create a tokenizer with explicit limits.
    pub fn with_limits(text: &'a str, limits: &Limits) -> Self {
        Self {
            text,
            pos: 0,
            line_num: 0,
            max_line_length: limits.max_line_length,
            done: false,
        }
    }

    /// Take the next physical line, handling LF and CRLF terminators.
    fn next_raw_line(&mut self) -> Option<GedResult<&'a str>> {
        if self.pos >= self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];
        let (mut line, consumed) = match memchr(b'\n', rest.as_bytes()) {
            Some(nl) => (&rest[..nl], nl + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        self.line_num += 1;
        if let Some(stripped) = line.strip_suffix('\r') {
            line = stripped;
        }
        if line.len() > self.max_line_length {
            return Some(Err(GedError::security(
                format!(
                    "line too long: exceeds limit of {} bytes",
                    self.max_line_length
                ),
                self.line_num,
            )));
        }
        // A bare CR anywhere else is not a valid terminator.
        if line.contains('\r') {
            return Some(Err(GedError::malformed_line(
                "bare CR (U+000D) is not a valid line terminator",
                self.line_num,
            )));
        }
        Some(Ok(line))
    }

    fn parse_line(&self, line: &str) -> GedResult<GedcomLine> {
        let line_num = self.line_num;
        if line.is_empty() {
            return Err(GedError::malformed_line("empty line", line_num));
        }

        // Level: a non-negative integer without leading zeros.
        let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return Err(GedError::malformed_line(
                format!("expected level at start of line, found {:?}", first_token(line)),
                line_num,
            ));
        }
        if digits > 1 && line.starts_with('0') {
            return Err(GedError::malformed_line(
                "level must not have leading zeros",
                line_num,
            ));
        }
        let level: u32 = line[..digits].parse().map_err(|_| {
            GedError::malformed_line(format!("invalid level {:?}", &line[..digits]), line_num)
        })?;

        let mut rest = &line[digits..];
        if !rest.starts_with(' ') {
            return Err(GedError::malformed_line(
                "expected a single space after the level",
                line_num,
            ));
        }
        rest = &rest[1..];

        // Optional cross-reference id: @XREF@ followed by a space.
        let mut xref = None;
        if let Some(after_at) = rest.strip_prefix('@') {
            let close = after_at.find('@').ok_or_else(|| {
                GedError::malformed_line("unterminated cross-reference id", line_num)
            })?;
            let id = &after_at[..close];
            if id.is_empty() || !id.bytes().all(is_xref_char) {
                return Err(GedError::malformed_line(
                    format!("invalid cross-reference id @{}@", id),
                    line_num,
                ));
            }
            xref = Some(id.to_string());
            rest = &after_at[close + 1..];
            if !rest.starts_with(' ') {
                return Err(GedError::malformed_line(
                    "expected a single space after the cross-reference id",
                    line_num,
                ));
            }
            rest = &rest[1..];
        }

        // Tag token.
        let tag_len = rest.len() - rest.trim_start_matches(|c: char| is_tag_char(c)).len();
        if tag_len == 0 {
            return Err(GedError::malformed_line("missing tag", line_num));
        }
        let tag = rest[..tag_len].to_string();
        rest = &rest[tag_len..];

        // Payload: everything after exactly one space separator.
        let value = match rest.strip_prefix(' ') {
            Some("") => None,
            Some(payload) => Some(payload.to_string()),
            None if rest.is_empty() => None,
            None => {
                return Err(GedError::malformed_line(
                    format!("unexpected character {:?} after tag {}", first_token(rest), tag),
                    line_num,
                ));
            }
        };

        Ok(GedcomLine {
            line_num,
            level,
            xref,
            tag,
            value,
        })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = GedResult<GedcomLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let raw = match self.next_raw_line()? {
            Ok(line) => line,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        let parsed = self.parse_line(raw);
        if parsed.is_err() {
            self.done = true;
        }
        Some(parsed)
    }
}

/// Tokenize GEDCOM text with default limits.
pub fn tokenize(text: &str) -> Tokenizer<'_> {
    Tokenizer::new(text)
}

fn is_xref_char(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_'
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'
}

fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GedErrorKind;

    fn all(text: &str) -> Vec<GedcomLine> {
        tokenize(text).collect::<GedResult<Vec<_>>>().unwrap()
    }

    fn first_err(text: &str) -> GedError {
        tokenize(text)
            .collect::<GedResult<Vec<_>>>()
            .unwrap_err()
    }

    // ==================== Basic tokenization tests ====================

    #[test]
    fn test_tokenize_minimal_document() {
        let lines = all("0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR\n");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].level, 0);
        assert_eq!(lines[0].tag, "HEAD");
        assert_eq!(lines[2].level, 2);
        assert_eq!(lines[2].tag, "VERS");
        assert_eq!(lines[2].value.as_deref(), Some("7.0"));
        assert_eq!(lines[3].tag, "TRLR");
        assert_eq!(lines[3].value, None);
    }

    #[test]
    fn test_tokenize_line_numbers() {
        let lines = all("0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR\n");
        let nums: Vec<_> = lines.iter().map(|l| l.line_num).collect();
        assert_eq!(nums, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_tokenize_trailing_newline_no_phantom_line() {
        assert_eq!(all("0 HEAD\n0 TRLR\n").len(), 2);
        assert_eq!(all("0 HEAD\n0 TRLR").len(), 2);
    }

    #[test]
    fn test_tokenize_crlf() {
        let lines = all("0 HEAD\r\n0 TRLR\r\n");
        assert_eq!(lines[0].tag, "HEAD");
        assert_eq!(lines[1].tag, "TRLR");
    }

    #[test]
    fn test_tokenize_xref_definition() {
        let lines = all("0 @I1@ INDI\n");
        assert_eq!(lines[0].xref.as_deref(), Some("I1"));
        assert_eq!(lines[0].tag, "INDI");
    }

    #[test]
    fn test_tokenize_payload_preserves_extra_spaces() {
        // Only the single separator space is trimmed.
        let lines = all("1 NOTE  two leading spaces\n");
        assert_eq!(lines[0].value.as_deref(), Some(" two leading spaces"));
    }

    #[test]
    fn test_tokenize_pointer_payload() {
        let lines = all("1 SUBM @U1@\n");
        assert_eq!(lines[0].value.as_deref(), Some("@U1@"));
        assert_eq!(lines[0].xref, None);
    }

    #[test]
    fn test_tokenize_extension_tag() {
        let lines = all("1 _LOC somewhere\n");
        assert_eq!(lines[0].tag, "_LOC");
    }

    #[test]
    fn test_tokenize_restartable() {
        let text = "0 HEAD\n0 TRLR\n";
        let a = all(text);
        let b = all(text);
        assert_eq!(a, b);
    }

    // ==================== Malformed line tests ====================

    #[test]
    fn test_empty_line_rejected() {
        let err = first_err("0 HEAD\n\n0 TRLR\n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_missing_level_rejected() {
        let err = first_err("HEAD\n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
        assert!(err.message.contains("level"));
    }

    #[test]
    fn test_negative_level_rejected() {
        let err = first_err("-1 HEAD\n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
    }

    #[test]
    fn test_leading_zero_level_rejected() {
        let err = first_err("01 GEDC\n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
        assert!(err.message.contains("leading zeros"));
    }

    #[test]
    fn test_missing_tag_rejected() {
        let err = first_err("0\n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
    }

    #[test]
    fn test_missing_tag_after_xref_rejected() {
        let err = first_err("0 @I1@ \n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
        assert!(err.message.contains("missing tag"));
    }

    #[test]
    fn test_unterminated_xref_rejected() {
        let err = first_err("0 @I1 INDI\n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
    }

    #[test]
    fn test_lowercase_xref_rejected() {
        let err = first_err("0 @i1@ INDI\n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
    }

    #[test]
    fn test_lowercase_tag_rejected() {
        let err = first_err("0 head\n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
    }

    #[test]
    fn test_bare_cr_rejected() {
        let err = first_err("0 HEAD\r0 TRLR\n");
        assert_eq!(err.kind, GedErrorKind::MalformedLine);
    }

    #[test]
    fn test_tokenizer_fuses_after_error() {
        let mut tok = tokenize("bogus\n0 HEAD\n");
        assert!(tok.next().unwrap().is_err());
        assert!(tok.next().is_none());
    }

    // ==================== Limit tests ====================

    #[test]
    fn test_line_length_limit() {
        let limits = Limits {
            max_line_length: 10,
            ..Limits::default()
        };
        let text = "1 NOTE aaaaaaaaaaaaaaaa\n";
        let err = Tokenizer::with_limits(text, &limits)
            .collect::<GedResult<Vec<_>>>()
            .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Security);
    }
}
