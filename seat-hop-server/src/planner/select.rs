//! Choosing the plan among enumerated paths.

use crate::domain::Path;

/// Pick the path with the fewest bookings.
///
/// Among equally short paths the first one enumerated wins. `None` means
/// there is no plan at all, which is not the same as a plan with zero
/// bookings (paths are never empty).
pub fn select_plan(paths: Vec<Path>) -> Option<Path> {
    paths.into_iter().min_by_key(Path::len)
}
