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

//! Inspect command - dataset summary and JSON dump

use super::read_file;
use crate::error::CliError;
use gedworx_core::{parse, Dataset, Record};

/// Inspect a GEDCOM 7 file.
///
/// With `json` set, the complete typed dataset is printed as pretty
/// JSON. Otherwise a human-readable summary of the header and records
/// is printed.
pub fn inspect(file: &str, json: bool) -> Result<(), CliError> {
    let bytes = read_file(file)?;
    let dataset = parse(&bytes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
        return Ok(());
    }

    print_summary(file, &dataset);
    Ok(())
}

fn print_summary(file: &str, dataset: &Dataset) {
    let header = &dataset.header;
    println!("{}", file);
    println!("  Version: {}", header.gedcom.version);
    if let Some(source) = &header.source {
        match &source.name {
            Some(name) => println!("  Source: {} ({})", name, source.id),
            None => println!("  Source: {}", source.id),
        }
    }
    if let Some(date) = &header.date {
        println!("  Date: {}", date);
    }
    if let Some(language) = &header.language {
        println!("  Language: {}", language);
    }
    if let Some(schema) = &header.schema {
        println!("  Extension tags: {}", schema.tags.len());
        for tag in &schema.tags {
            println!("    {} -> {}", tag.tag, tag.uri);
        }
    }

    println!("  Records: {}", dataset.records.len());
    for record in &dataset.records {
        println!("    @{}@ {} {}", record.xref(), record.kind().tag(), describe(record));
    }
}

/// A one-line description of a record for the summary listing.
fn describe(record: &Record) -> String {
    match record {
        Record::Individual(indi) => indi
            .names
            .first()
            .map(|n| n.value.clone())
            .unwrap_or_default(),
        Record::Family(fam) => format!("{} children", fam.children.len()),
        Record::Submitter(subm) => subm.name.clone(),
        Record::Multimedia(obje) => format!("{} files", obje.files.len()),
        Record::SharedNote(snote) => truncate(&snote.text, 40),
        Record::Source(sour) => sour.title.clone().unwrap_or_default(),
        Record::Repository(repo) => repo.name.clone(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{}...", cut)
    }
}
