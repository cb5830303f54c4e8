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

//! Integration tests for the gedworx binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Test helper to create a gedworx command
fn gedworx_cmd() -> Command {
    Command::cargo_bin("gedworx").expect("Failed to find gedworx binary")
}

/// Write a GEDCOM file (BOM included) into a temp dir and return its path.
fn write_ged(dir: &tempfile::TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, format!("\u{FEFF}{}", body)).expect("Failed to write test file");
    path.to_str().unwrap().to_string()
}

const MINIMAL: &str = "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR\n";

const FAMILY: &str = concat!(
    "0 HEAD\n",
    "1 GEDC\n",
    "2 VERS 7.0\n",
    "0 @I1@ INDI\n",
    "1 NAME Ann /Lee/\n",
    "1 FAMS @F1@\n",
    "0 @F1@ FAM\n",
    "1 WIFE @I1@\n",
    "0 TRLR\n",
);

// ==================== validate tests ====================

#[test]
fn test_validate_minimal() {
    let dir = tempdir().unwrap();
    let path = write_ged(&dir, "minimal.ged", MINIMAL);

    gedworx_cmd()
        .args(["validate", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Version: 7.0"))
        .stdout(predicate::str::contains("Records: 0"));
}

#[test]
fn test_validate_family_counts() {
    let dir = tempdir().unwrap();
    let path = write_ged(&dir, "family.ged", FAMILY);

    gedworx_cmd()
        .args(["validate", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("INDI: 1"))
        .stdout(predicate::str::contains("FAM: 1"));
}

#[test]
fn test_validate_missing_bom_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nobom.ged");
    fs::write(&path, MINIMAL).unwrap();

    gedworx_cmd()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EncodingError"));
}

#[test]
fn test_validate_reports_line_number() {
    let dir = tempdir().unwrap();
    let path = write_ged(
        &dir,
        "broken.ged",
        "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n2 NAME Ann\n0 TRLR\n",
    );

    gedworx_cmd()
        .args(["validate", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NestingError at line 5"));
}

#[test]
fn test_validate_unresolved_pointer_fails() {
    let dir = tempdir().unwrap();
    let path = write_ged(
        &dir,
        "dangling.ged",
        "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @F1@ FAM\n1 HUSB @I9@\n0 TRLR\n",
    );

    gedworx_cmd()
        .args(["validate", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnresolvedReferenceError"));
}

#[test]
fn test_validate_missing_file_fails() {
    gedworx_cmd()
        .args(["validate", "/nonexistent/family.ged"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

// ==================== inspect tests ====================

#[test]
fn test_inspect_summary() {
    let dir = tempdir().unwrap();
    let path = write_ged(&dir, "family.ged", FAMILY);

    gedworx_cmd()
        .args(["inspect", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("@I1@ INDI Ann /Lee/"))
        .stdout(predicate::str::contains("@F1@ FAM"));
}

#[test]
fn test_inspect_json() {
    let dir = tempdir().unwrap();
    let path = write_ged(&dir, "family.ged", FAMILY);

    let output = gedworx_cmd()
        .args(["inspect", &path, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["header"]["gedcom"]["version"], "7.0");
    assert_eq!(value["records"].as_array().unwrap().len(), 2);
}

#[test]
fn test_inspect_invalid_file_fails() {
    let dir = tempdir().unwrap();
    let path = write_ged(&dir, "bad.ged", "0 HEAD\n0 TRLR\n");

    gedworx_cmd()
        .args(["inspect", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CardinalityError"));
}
