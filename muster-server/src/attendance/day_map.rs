//! Sparse day-of-month maps
//!
//! Attendance and shift data are stored per (employee, month, year) as a
//! sparse map from day-of-month to a status code, serialized as JSON with
//! decimal string keys: `{"1":"P","15":"OT"}`. Key absence means blank,
//! which is a distinct state from any explicit value.
//!
//! Decoding is tolerant: a payload that fails to parse yields an empty
//! map and a warning, never a request failure. A single corrupt record
//! must not block reads or exports of the rest of the roster.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::warn;

use super::status::{AttendanceStatus, ShiftCode};

fn decode_raw(raw: &str) -> BTreeMap<u8, String> {
    let parsed: BTreeMap<String, String> = match serde_json::from_str(raw) {
        Ok(map) => map,
        Err(e) => {
            warn!(error = %e, "Corrupt day-map payload, treating as empty");
            return BTreeMap::new();
        }
    };

    let mut days = BTreeMap::new();
    for (key, value) in parsed {
        let Ok(day) = key.parse::<u8>() else {
            warn!(key = %key, "Dropping non-numeric day-map key");
            continue;
        };
        if !(1..=31).contains(&day) {
            warn!(day, "Dropping out-of-range day-map key");
            continue;
        }
        days.insert(day, value);
    }
    days
}

fn encode_raw<'a>(entries: impl Iterator<Item = (u8, &'a str)>) -> String {
    let map: BTreeMap<String, &str> = entries.map(|(d, c)| (d.to_string(), c)).collect();
    serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string())
}

/// Sparse attendance map: day-of-month -> status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayMap {
    days: BTreeMap<u8, AttendanceStatus>,
}

impl DayMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the stored JSON shape, normalizing legacy aliases and
    /// dropping blank values (an explicit `""` is the same as no key)
    pub fn from_json(raw: &str) -> Self {
        let mut days = BTreeMap::new();
        for (day, value) in decode_raw(raw) {
            if let Some(status) = AttendanceStatus::parse(&value) {
                days.insert(day, status);
            }
        }
        Self { days }
    }

    /// Encode to the stored JSON shape (string keys, canonical codes)
    pub fn to_json(&self) -> String {
        encode_raw(self.days.iter().map(|(d, s)| (*d, s.code())))
    }

    pub fn get(&self, day: u8) -> Option<&AttendanceStatus> {
        self.days.get(&day)
    }

    pub fn set(&mut self, day: u8, status: AttendanceStatus) {
        self.days.insert(day, status);
    }

    /// Remove a day entirely; a cleared day is indistinguishable from one
    /// never touched
    pub fn clear(&mut self, day: u8) {
        self.days.remove(&day);
    }

    pub fn contains(&self, day: u8) -> bool {
        self.days.contains_key(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &AttendanceStatus)> {
        self.days.iter().map(|(d, s)| (*d, s))
    }

    /// Days marked Present
    pub fn present_days(&self) -> i64 {
        self.days.values().filter(|s| s.counts_on_duty()).count() as i64
    }

    /// Days marked Overtime
    pub fn ot_days(&self) -> i64 {
        self.days.values().filter(|s| s.counts_overtime()).count() as i64
    }
}

impl Serialize for DayMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.days.iter().map(|(d, s)| (d.to_string(), s.code())))
    }
}

/// Sparse shift map: day-of-month -> Day/Night
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftMap {
    days: BTreeMap<u8, ShiftCode>,
}

impl ShiftMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> Self {
        let mut days = BTreeMap::new();
        for (day, value) in decode_raw(raw) {
            if let Some(code) = ShiftCode::parse(&value) {
                days.insert(day, code);
            }
        }
        Self { days }
    }

    pub fn to_json(&self) -> String {
        encode_raw(self.days.iter().map(|(d, c)| (*d, c.code())))
    }

    pub fn get(&self, day: u8) -> Option<ShiftCode> {
        self.days.get(&day).copied()
    }

    pub fn set(&mut self, day: u8, code: ShiftCode) {
        self.days.insert(day, code);
    }

    pub fn clear(&mut self, day: u8) {
        self.days.remove(&day);
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days with any shift assigned, the shift table's on-duty metric
    pub fn assigned_days(&self) -> i64 {
        self.days.len() as i64
    }
}

impl Serialize for ShiftMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.days.iter().map(|(d, c)| (d.to_string(), c.code())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_legacy_shape() {
        let map = DayMap::from_json(r#"{"1":"P","2":"P","3":"OT","4":"A"}"#);
        assert_eq!(map.len(), 4);
        assert_eq!(map.get(3), Some(&AttendanceStatus::Overtime));
        assert_eq!(map.to_json(), r#"{"1":"P","2":"P","3":"OT","4":"A"}"#);
    }

    #[test]
    fn test_aliases_normalized_on_decode() {
        let map = DayMap::from_json(r#"{"5":"Present","6":"Overtime"}"#);
        assert_eq!(map.get(5), Some(&AttendanceStatus::Present));
        assert_eq!(map.get(6), Some(&AttendanceStatus::Overtime));
        assert_eq!(map.to_json(), r#"{"5":"P","6":"OT"}"#);
    }

    #[test]
    fn test_corrupt_payload_yields_empty_map() {
        assert!(DayMap::from_json("not json at all").is_empty());
        assert!(DayMap::from_json(r#"{"1": 42}"#).is_empty());
        assert!(DayMap::from_json("[1,2,3]").is_empty());
        assert!(ShiftMap::from_json("{broken").is_empty());
    }

    #[test]
    fn test_bad_keys_dropped() {
        let map = DayMap::from_json(r#"{"0":"P","32":"P","abc":"P","15":"P"}"#);
        assert_eq!(map.len(), 1);
        assert!(map.contains(15));
    }

    #[test]
    fn test_blank_values_dropped() {
        let map = DayMap::from_json(r#"{"1":"","2":"P"}"#);
        assert_eq!(map.len(), 1);
        assert!(!map.contains(1));
    }

    #[test]
    fn test_clear_is_key_removal() {
        let mut map = DayMap::from_json(r#"{"15":"P"}"#);
        map.clear(15);
        assert!(!map.contains(15));
        assert_eq!(map.to_json(), "{}");
        // clearing an already-blank day is a no-op
        map.clear(15);
        assert_eq!(map.to_json(), "{}");
    }

    #[test]
    fn test_derived_counts() {
        let map = DayMap::from_json(r#"{"1":"P","2":"P","3":"OT","4":"A","5":"L"}"#);
        assert_eq!(map.present_days(), 2);
        assert_eq!(map.ot_days(), 1);

        let shifts = ShiftMap::from_json(r#"{"1":"D","2":"N","3":"D"}"#);
        assert_eq!(shifts.assigned_days(), 3);
    }
}
