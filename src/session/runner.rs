//! The live capture loop: pull a frame, feed the tracker, repeat.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::{BTreeMap, HashSet};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::ground_truth::MarkerId;
use crate::tracking::{VisibilityInterval, VisibilityTracker};

/// One processed frame's worth of detector output.
#[derive(Debug, Clone)]
pub struct DetectionFrame {
    pub detections: HashSet<MarkerId>,
    pub timestamp: DateTime<Utc>,
}

/// Seam to the capture/detection collaborator. Yields frames until the feed
/// ends (`Ok(None)`). How markers are found is entirely the source's
/// business.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<DetectionFrame>>;
}

/// What one live session leaves behind. The interval map lives only in this
/// value and dies with it.
#[derive(Debug)]
pub struct SessionReport {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub frames_processed: u64,
    pub intervals: BTreeMap<MarkerId, Vec<VisibilityInterval>>,
}

/// Run the session as a bounded blocking cycle: acquire one frame, run the
/// tracker bookkeeping, then acquire the next. Stops when the source is
/// exhausted, a frame read fails, or `cancel` fires (the operator quit).
/// The tracker is closed at the last frame's timestamp on the way out.
pub fn run_session<S: FrameSource>(
    source: &mut S,
    mut tracker: VisibilityTracker,
    cancel: &CancellationToken,
) -> SessionReport {
    let session_id = Uuid::new_v4().to_string();
    let started_at = Utc::now();
    let mut last_timestamp = started_at;
    let mut frames_processed: u64 = 0;

    info!("session {session_id} started");

    while !cancel.is_cancelled() {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(err) => {
                warn!("frame acquisition failed, ending session {session_id}: {err:?}");
                break;
            }
        };

        tracker.on_frame(&frame.detections, frame.timestamp);
        last_timestamp = frame.timestamp;
        frames_processed += 1;
    }

    let intervals = tracker.close(last_timestamp);
    info!("session {session_id} closed after {frames_processed} frames");

    SessionReport {
        session_id,
        started_at,
        ended_at: last_timestamp,
        frames_processed,
        intervals,
    }
}
