//! Per-marker visibility bookkeeping over a live detection stream.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};

use crate::ground_truth::MarkerId;

/// A contiguous time range during which one marker stayed on screen.
/// `end` is `None` while the marker is still visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityInterval {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

/// Tracks when each marker entered and left the frame across one session.
///
/// Pure in-memory state with an injected clock: every timestamp arrives as an
/// argument. The caller feeds each processed frame through [`on_frame`] from
/// a single capture loop (the tracker is not internally synchronized) and
/// takes the interval map back with [`close`]. Nothing is persisted.
///
/// [`on_frame`]: VisibilityTracker::on_frame
/// [`close`]: VisibilityTracker::close
#[derive(Debug)]
pub struct VisibilityTracker {
    intervals: BTreeMap<MarkerId, Vec<VisibilityInterval>>,
    visible: HashSet<MarkerId>,
}

impl VisibilityTracker {
    /// Seed the tracker with the trial's marker ids so markers that never
    /// show up still report an empty interval list.
    pub fn new(marker_ids: impl IntoIterator<Item = MarkerId>) -> Self {
        let intervals = marker_ids.into_iter().map(|id| (id, Vec::new())).collect();
        Self {
            intervals,
            visible: HashSet::new(),
        }
    }

    /// Record one frame's detections.
    ///
    /// A marker entering the frame opens an interval at `timestamp`; a marker
    /// leaving closes its open interval. Repeats in the same state are no-ops
    /// (flicker debouncing is the caller's job). Any subset of markers,
    /// including none, is a valid frame. Ids outside the seeded range are
    /// tracked from first sight.
    pub fn on_frame(&mut self, detections: &HashSet<MarkerId>, timestamp: DateTime<Utc>) {
        for &id in detections {
            if self.visible.insert(id) {
                self.intervals
                    .entry(id)
                    .or_default()
                    .push(VisibilityInterval {
                        start: timestamp,
                        end: None,
                    });
            }
        }

        let departed: Vec<MarkerId> = self
            .visible
            .iter()
            .copied()
            .filter(|id| !detections.contains(id))
            .collect();
        for id in departed {
            self.visible.remove(&id);
            self.close_open_interval(id, timestamp);
        }
    }

    /// End the session: markers still visible get their open interval closed
    /// at `final_timestamp`. Consumes the tracker; the returned map is its
    /// only output.
    pub fn close(
        mut self,
        final_timestamp: DateTime<Utc>,
    ) -> BTreeMap<MarkerId, Vec<VisibilityInterval>> {
        let still_visible: Vec<MarkerId> = self.visible.drain().collect();
        for id in still_visible {
            self.close_open_interval(id, final_timestamp);
        }
        self.intervals
    }

    fn close_open_interval(&mut self, id: MarkerId, timestamp: DateTime<Utc>) {
        let open = self
            .intervals
            .get_mut(&id)
            .and_then(|list| list.last_mut())
            .filter(|interval| interval.end.is_none());
        // A visible marker always has an open interval; anything else is a
        // bug in this state machine, not a stream condition.
        debug_assert!(open.is_some(), "closing an interval that was never opened");
        if let Some(interval) = open {
            interval.end = Some(timestamp);
        }
    }
}
