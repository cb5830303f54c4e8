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

//! Validate command - GEDCOM 7 conformance checking

use super::read_file;
use crate::error::CliError;
use colored::Colorize;
use gedworx_core::{parse, RecordKind};

/// Validate a GEDCOM 7 file.
///
/// Parses the file through the full pipeline and reports the outcome.
/// A conformant file prints a summary with the specification version
/// and record counts; the first violation is reported with its line.
///
/// # Errors
///
/// Returns `Err` if:
/// - The file cannot be read or exceeds the size limit
/// - Any pipeline phase rejects the file
pub fn validate(file: &str) -> Result<(), CliError> {
    let bytes = read_file(file)?;

    match parse(&bytes) {
        Ok(dataset) => {
            println!("{} {}", "✓".green().bold(), file);
            println!("  Version: {}", dataset.header.gedcom.version);
            println!("  Records: {}", dataset.records.len());
            for kind in RecordKind::all() {
                let count = dataset.count_of_kind(kind);
                if count > 0 {
                    println!("    {}: {}", kind.tag(), count);
                }
            }
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            Err(CliError::Parse(e))
        }
    }
}
