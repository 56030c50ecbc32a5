//! Interpretation of upstream seat status strings.
//!
//! The reservation system reports availability as free text such as
//! `"AVAILABLE-0012"`, `"RAC 5"`, `"GNWL 10/WL 4"` or `"NOT AVAILABLE"`.
//! [`is_bookable`] reduces that to a yes/no verdict.

/// Markers for waitlisted statuses.
const WAITLIST_MARKERS: [&str; 6] = ["WL", "GNWL", "RLWL", "PQWL", "TQWL", "CKWL"];

/// Marker preceding a seat count, as in `"AVAILABLE-12"`.
const COUNT_MARKER: &str = "AVAILABLE-";

/// Decide whether a raw status means a ticket can be bought now.
///
/// Checks run in a fixed order and the first match wins:
/// 1. empty → not bookable
/// 2. `NOT AVAILABLE` / `NOT_AVAILABLE` → not bookable
/// 3. `AVAILABLE` without `NOT` → bookable, unless a seat count follows
///    `AVAILABLE-` and that count is zero or negative
/// 4. `CNF` / `CONFIRM` → bookable
/// 5. `RAC` → bookable
/// 6. waitlist markers → not bookable
/// 7. anything else → not bookable
///
/// # Examples
///
/// ```
/// use seat_hop_server::availability::is_bookable;
///
/// assert!(is_bookable("AVAILABLE-12"));
/// assert!(!is_bookable("AVAILABLE-0"));
/// assert!(!is_bookable("not available"));
/// assert!(is_bookable("RAC 5"));
/// assert!(!is_bookable("GNWL 10"));
/// ```
pub fn is_bookable(raw: &str) -> bool {
    let status = raw.trim().to_uppercase();

    if status.is_empty() {
        return false;
    }

    if status.contains("NOT AVAILABLE") || status.contains("NOT_AVAILABLE") {
        return false;
    }

    if status.contains("AVAILABLE") && !status.contains("NOT") {
        return seat_count(&status).is_none_or(|count| count > 0);
    }

    if status.contains("CNF") || status.contains("CONFIRM") {
        return true;
    }

    if status.contains("RAC") {
        return true;
    }

    if WAITLIST_MARKERS.iter().any(|marker| status.contains(marker)) {
        return false;
    }

    false
}

/// Seat count following the first `AVAILABLE-` marker, if it parses.
fn seat_count(status: &str) -> Option<i64> {
    let (_, rest) = status.split_once(COUNT_MARKER)?;
    rest.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_cases() {
        assert!(is_bookable("AVAILABLE-12"));
        assert!(!is_bookable("AVAILABLE-0"));
        assert!(!is_bookable("NOT AVAILABLE"));
        assert!(is_bookable("RAC 5"));
        assert!(!is_bookable("GNWL 10"));
        assert!(!is_bookable(""));
    }

    #[test]
    fn blank_is_not_bookable() {
        assert!(!is_bookable("   "));
        assert!(!is_bookable("\t\n"));
    }

    #[test]
    fn not_available_variants() {
        assert!(!is_bookable("not available"));
        assert!(!is_bookable("NOT_AVAILABLE"));
        assert!(!is_bookable("Train Not Available"));
        // "NOT" anywhere disqualifies the generic AVAILABLE match
        assert!(!is_bookable("AVAILABLE NOT"));
    }

    #[test]
    fn available_with_counts() {
        assert!(is_bookable("AVAILABLE"));
        assert!(is_bookable("available-0045"));
        assert!(is_bookable("CURR_AVBL AVAILABLE-3 seats"));
        assert!(!is_bookable("AVAILABLE-00"));
        assert!(!is_bookable("AVAILABLE--2"));
    }

    #[test]
    fn unparseable_count_is_bookable() {
        assert!(is_bookable("AVAILABLE-"));
        assert!(is_bookable("AVAILABLE-MANY"));
        assert!(is_bookable("AVAILABLE-12,"));
    }

    #[test]
    fn confirmed_and_rac() {
        assert!(is_bookable("CNF"));
        assert!(is_bookable("CNF/B2/34"));
        assert!(is_bookable("Confirmed"));
        assert!(is_bookable("RAC12/RAC5"));
    }

    #[test]
    fn waitlists_are_not_bookable() {
        for status in ["WL 3", "RLWL 12", "PQWL4", "TQWL 1", "CKWL 8", "GNWL12/WL4"] {
            assert!(!is_bookable(status), "{status} should not be bookable");
        }
    }

    #[test]
    fn rac_beats_waitlist_marker() {
        // Already classified bookable by RAC before waitlist detection runs
        assert!(is_bookable("RLWL 3/RAC 2"));
    }

    #[test]
    fn unknown_is_not_bookable() {
        assert!(!is_bookable("REGRET"));
        assert!(!is_bookable("TRAIN DEPARTED"));
        assert!(!is_bookable("NO_DATA"));
    }
}
