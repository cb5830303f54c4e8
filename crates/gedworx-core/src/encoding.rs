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

//! Encoding guard: BOM, UTF-8, and character-set validation.
//!
//! GEDCOM 7 accepts exactly one encoding: UTF-8 with a byte-order mark.
//! The banned code points follow the ABNF in the specification:
//!
//! ```text
//! banned = %x00-08 / %x0B-0C / %x0E-1F ; C0 other than LF CR and Tab
//!        / %x7F                        ; DEL
//!        / %x80-9F                     ; C1
//!        / %xD800-DFFF                 ; Surrogates
//! ```
//!
//! Surrogates cannot be expressed in well-formed UTF-8, so they are
//! covered by UTF-8 validation. The whole buffer is validated up front;
//! reported offsets are absolute byte offsets into the input buffer.

use crate::error::{GedError, GedResult};

/// The UTF-8 byte-order mark (EF BB BF).
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Check whether the buffer begins with the UTF-8 byte-order mark.
///
/// A buffer shorter than 3 bytes has no BOM.
pub fn has_utf8_bom(input: &[u8]) -> bool {
    input.len() >= 3 && input[..3] == UTF8_BOM
}

/// Validate encoding and character set, returning the text after the BOM.
///
/// Fails with `EncodingError` when the BOM is missing or the buffer is
/// not valid UTF-8, and with `CharacterSetError` when a banned code
/// point occurs anywhere in the buffer.
pub fn check_encoding(input: &[u8]) -> GedResult<&str> {
    if !has_utf8_bom(input) {
        return Err(GedError::encoding(
            "missing or invalid BOM; GEDCOM v7 requires UTF-8 with BOM",
            1,
        ));
    }

    let text = std::str::from_utf8(input).map_err(|e| {
        let offset = e.valid_up_to();
        GedError::encoding(
            format!("invalid UTF-8 sequence at byte offset {}", offset),
            line_at(input, offset),
        )
        .with_offset(offset)
    })?;

    // Offsets from char_indices are absolute because the BOM is decoded
    // along with the rest of the buffer (U+FEFF itself is not banned).
    let mut line = 1;
    for (offset, c) in text.char_indices() {
        if c == '\n' {
            line += 1;
        } else if is_banned(c) {
            return Err(GedError::character_set(
                format!("banned code point U+{:04X} at byte offset {}", c as u32, offset),
                line,
            )
            .with_offset(offset));
        }
    }

    Ok(&text[UTF8_BOM.len()..])
}

/// Whether a code point is banned by the GEDCOM 7 character set.
fn is_banned(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'..='\u{9F}')
}

fn line_at(input: &[u8], offset: usize) -> usize {
    input[..offset.min(input.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
