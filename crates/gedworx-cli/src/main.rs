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

//! GEDWORX command line interface

use clap::Parser;
use gedworx_cli::cli::Commands;
use std::process::ExitCode;

/// GEDWORX - GEDCOM 7 toolkit
///
/// A command-line interface for working with GEDCOM 7 files: validation
/// against the structural grammar and dataset inspection.
///
/// # Examples
///
/// ```bash
/// # Validate a GEDCOM file
/// gedworx validate family.ged
///
/// # Summarize a dataset
/// gedworx inspect family.ged
///
/// # Dump the typed model as JSON
/// gedworx inspect family.ged --json
/// ```
#[derive(Parser)]
#[command(name = "gedworx")]
#[command(author, version, about = "GEDWORX - GEDCOM 7 toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
