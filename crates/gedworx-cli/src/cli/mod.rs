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

//! CLI command definitions and argument parsing.

use crate::commands;
use clap::Subcommand;

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a GEDCOM 7 file
    ///
    /// Parses the file through the full pipeline: encoding, line syntax,
    /// structural grammar, and cross-reference resolution. Exits non-zero
    /// on the first violation.
    Validate {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Inspect a GEDCOM 7 file
    ///
    /// Parses the file and prints a summary of the header and the record
    /// counts, or the complete typed model as JSON.
    Inspect {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Dump the typed dataset as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command with the provided arguments.
    pub fn execute(self) -> Result<(), String> {
        let result = match self {
            Commands::Validate { file } => commands::validate(&file),
            Commands::Inspect { file, json } => commands::inspect(&file, json),
        };
        result.map_err(|e| e.to_string())
    }
}
