//! Attendance and shift status codes
//!
//! Statuses are stored as canonical single-letter codes. Legacy long
//! spellings ("Present", "Overtime", ...) are accepted on input and
//! normalized here, at the parse boundary, so no other layer carries
//! alias handling.

use serde::{Serialize, Serializer};

/// Per-day attendance status
///
/// A day absent from the map is "blank" and has no status at all; that
/// state is represented by map-key absence, never by a variant here.
/// Unrecognized codes survive as [`AttendanceStatus::Other`] and render
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Overtime,
    Leave,
    Holiday,
    Other(String),
}

impl AttendanceStatus {
    /// Parse a status code, normalizing legacy aliases
    ///
    /// Returns `None` for empty/whitespace input (= blank).
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        Some(match code {
            "P" | "Present" => Self::Present,
            "A" | "Absent" => Self::Absent,
            "OT" | "Overtime" => Self::Overtime,
            "L" | "Leave" => Self::Leave,
            "H" | "Holiday" => Self::Holiday,
            other => Self::Other(other.to_string()),
        })
    }

    /// Canonical code as stored and rendered
    pub fn code(&self) -> &str {
        match self {
            Self::Present => "P",
            Self::Absent => "A",
            Self::Overtime => "OT",
            Self::Leave => "L",
            Self::Holiday => "H",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Counts toward the attendance on-duty total
    pub fn counts_on_duty(&self) -> bool {
        matches!(self, Self::Present)
    }

    /// Counts toward the overtime total
    pub fn counts_overtime(&self) -> bool {
        matches!(self, Self::Overtime)
    }

    /// A shift may be assigned only on Present/Overtime days
    pub fn allows_shift(&self) -> bool {
        matches!(self, Self::Present | Self::Overtime)
    }
}

impl Serialize for AttendanceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Day/Night shift assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftCode {
    Day,
    Night,
}

impl ShiftCode {
    /// Parse a shift code; `None` for empty input (= no assignment)
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim() {
            "D" | "Day" => Some(Self::Day),
            "N" | "Night" => Some(Self::Night),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Day => "D",
            Self::Night => "N",
        }
    }
}

impl Serialize for ShiftCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
