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

//! Exact dates and times.
//!
//! `DateExact` is the fully-known Gregorian date used for timestamps
//! (`HEAD.DATE`, `CHAN.DATE`, `CREA.DATE`): `day month year` with a
//! three-letter uppercase month abbreviation, e.g. `27 MAR 2022`. It is
//! parsed from that constrained grammar, never from free-form text.

use crate::error::{GedError, GedResult};
use std::fmt;

/// A Gregorian calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Parse the three-letter uppercase abbreviation.
    pub fn from_abbreviation(s: &str) -> Option<Self> {
        Some(match s {
            "JAN" => Self::Jan,
            "FEB" => Self::Feb,
            "MAR" => Self::Mar,
            "APR" => Self::Apr,
            "MAY" => Self::May,
            "JUN" => Self::Jun,
            "JUL" => Self::Jul,
            "AUG" => Self::Aug,
            "SEP" => Self::Sep,
            "OCT" => Self::Oct,
            "NOV" => Self::Nov,
            "DEC" => Self::Dec,
            _ => return None,
        })
    }

    /// The three-letter uppercase abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Jan => "JAN",
            Self::Feb => "FEB",
            Self::Mar => "MAR",
            Self::Apr => "APR",
            Self::May => "MAY",
            Self::Jun => "JUN",
            Self::Jul => "JUL",
            Self::Aug => "AUG",
            Self::Sep => "SEP",
            Self::Oct => "OCT",
            Self::Nov => "NOV",
            Self::Dec => "DEC",
        }
    }

    fn max_day(self) -> u8 {
        match self {
            Self::Jan | Self::Mar | Self::May | Self::Jul | Self::Aug | Self::Oct | Self::Dec => 31,
            Self::Apr | Self::Jun | Self::Sep | Self::Nov => 30,
            // Leap-year awareness is not needed to reject structurally
            // impossible dates.
            Self::Feb => 29,
        }
    }
}

/// A time of day, from the `HH:MM[:SS[.fff]]` grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: Option<u8>,
    pub fraction: Option<String>,
}

impl Time {
    /// Parse a time payload.
    pub fn parse(s: &str, line: usize) -> GedResult<Self> {
        let bad = || GedError::malformed_line(format!("invalid time {:?}", s), line);

        let mut parts = s.splitn(3, ':');
        let hour: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let minute: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let (second, fraction) = match parts.next() {
            Some(rest) => {
                let (sec, frac) = match rest.split_once('.') {
                    Some((sec, frac)) => (sec, Some(frac)),
                    None => (rest, None),
                };
                let second: u8 = sec.parse().map_err(|_| bad())?;
                if let Some(frac) = frac {
                    if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(bad());
                    }
                }
                (Some(second), frac.map(str::to_string))
            }
            None => (None, None),
        };

        if hour > 23 || minute > 59 || second.map_or(false, |s| s > 59) {
            return Err(bad());
        }

        Ok(Self {
            hour,
            minute,
            second,
            fraction,
        })
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)?;
        if let Some(second) = self.second {
            write!(f, ":{:02}", second)?;
            if let Some(fraction) = &self.fraction {
                write!(f, ".{}", fraction)?;
            }
        }
        Ok(())
    }
}

/// A fully-specified calendar date, optionally with a time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DateExact {
    pub day: u8,
    pub month: Month,
    pub year: u16,
    /// From the TIME substructure, when present.
    pub time: Option<Time>,
}

impl DateExact {
    /// Parse a `day month year` payload, e.g. `27 MAR 2022`.
    pub fn parse(s: &str, line: usize) -> GedResult<Self> {
        let bad = || GedError::malformed_line(format!("invalid exact date {:?}", s), line);

        let mut parts = s.split(' ');
        let day: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let month = parts
            .next()
            .and_then(Month::from_abbreviation)
            .ok_or_else(bad)?;
        let year: u16 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        if parts.next().is_some() {
            return Err(bad());
        }
        if day == 0 || day > month.max_day() {
            return Err(bad());
        }

        Ok(Self {
            day,
            month,
            year,
            time: None,
        })
    }

    /// Attach a time of day.
    pub fn with_time(mut self, time: Time) -> Self {
        self.time = Some(time);
        self
    }
}

impl fmt::Display for DateExact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month.abbreviation(), self.year)
    }
}
