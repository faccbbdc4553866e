//! Designation ordering
//!
//! Employee listings sort by job title using a fixed rank table; the rank
//! is denormalized onto the employee row so list queries can
//! `ORDER BY designation_order, name` without recomputing.

/// Rank for designations outside the fixed table (sorts last)
pub const UNRANKED: i64 = 999;

/// Sort rank for a designation
///
/// Pure and total: every input gets a rank, unknown/missing titles get
/// [`UNRANKED`]. Ties are broken by employee name at query time.
pub fn designation_rank(designation: Option<&str>) -> i64 {
    match designation.map(str::trim) {
        Some("Rig I/C") => 1,
        Some("Shift I/C") => 2,
        Some("Asst Shift I/C") => 3,
        Some("Top Man") => 4,
        Some("Rig Man") => 5,
        _ => UNRANKED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_designations() {
        assert_eq!(designation_rank(Some("Rig I/C")), 1);
        assert_eq!(designation_rank(Some("Shift I/C")), 2);
        assert_eq!(designation_rank(Some("Asst Shift I/C")), 3);
        assert_eq!(designation_rank(Some("Top Man")), 4);
        assert_eq!(designation_rank(Some("Rig Man")), 5);
    }

    #[test]
    fn test_unknown_designations_sort_last() {
        assert_eq!(designation_rank(None), UNRANKED);
        assert_eq!(designation_rank(Some("")), UNRANKED);
        assert_eq!(designation_rank(Some("Welder")), UNRANKED);
        assert_eq!(designation_rank(Some("rig i/c")), UNRANKED);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(designation_rank(Some("  Top Man  ")), 4);
    }
}
