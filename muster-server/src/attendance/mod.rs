//! Attendance domain
//!
//! - [`status`] - status/shift codes and legacy alias normalization
//! - [`day_map`] - sparse day-of-month maps and derived totals
//! - [`designation`] - job-title sort ranking
//! - [`engine`] - merge, cascade and derivation over the record stores

pub mod day_map;
pub mod designation;
pub mod engine;
pub mod status;

pub use day_map::{DayMap, ShiftMap};
pub use designation::{UNRANKED, designation_rank};
pub use engine::AttendanceEngine;
pub use status::{AttendanceStatus, ShiftCode};
