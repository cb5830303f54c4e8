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

//! GEDWORX CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **validate**: parse a GEDCOM 7 file and report conformance
//! - **inspect**: summarize a dataset, or dump the typed model as JSON
//!
//! # Examples
//!
//! ```no_run
//! use gedworx_cli::commands::validate;
//!
//! # fn main() -> Result<(), gedworx_cli::error::CliError> {
//! validate("family.ged")?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
