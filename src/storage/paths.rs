//! Data-file naming shared by the exported artifacts.

use chrono::{DateTime, Utc};

/// Per-run file name, e.g. `marker_assignments_20240304_101500.csv`, so
/// repeated runs never clobber an earlier trial's files.
pub fn timestamped_name(prefix: &str, extension: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.{}", prefix, now.format("%Y%m%d_%H%M%S"), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn name_carries_the_run_stamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 10, 15, 0).unwrap();
        assert_eq!(
            timestamped_name("marker_assignments", "csv", now),
            "marker_assignments_20240304_101500.csv"
        );
    }
}
