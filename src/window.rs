use chrono::{DateTime, Duration, Utc};

/// Default look-back window in hours.
///
/// The watcher keeps no state between runs, so the window is the only
/// notion of "since last time": schedule runs at most this many hours
/// apart or events fall through the gap, and expect repeats if runs
/// land closer together than the window.
pub const DEFAULT_LOOKBACK_HOURS: i64 = 2;

/// Compute the cutoff instant for this run.
///
/// Called once at startup; every detector compares timestamps against
/// the same instant. Only items strictly after the boundary count as new.
pub fn lookback_boundary(hours: i64) -> DateTime<Utc> {
    Utc::now() - Duration::hours(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_in_the_past() {
        let boundary = lookback_boundary(2);
        assert!(boundary < Utc::now());
    }

    #[test]
    fn test_boundary_matches_offset() {
        let boundary = lookback_boundary(2);
        let offset = Utc::now() - boundary;
        // Allow a little slack for test execution time
        assert!(offset >= Duration::hours(2));
        assert!(offset < Duration::hours(2) + Duration::seconds(5));
    }

    #[test]
    fn test_larger_window_means_earlier_boundary() {
        assert!(lookback_boundary(4) < lookback_boundary(1));
    }
}
