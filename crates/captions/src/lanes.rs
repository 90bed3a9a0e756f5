//! Display lanes for overlapping cues.
//!
//! Cues are placed first-fit: the lowest lane whose last cue has already
//! ended. When every lane is busy the cue joins the lane that frees up
//! earliest, so overlap is shown instead of growing the lane count.

use reelcut_project_model::{Cue, Frame};

/// Lanes shown when the configured count is out of range.
pub const DEFAULT_LANE_COUNT: usize = 3;

/// Upper bound on display lanes.
pub const MAX_LANE_COUNT: usize = 8;

/// A cue and the lane it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneAssignment<'a> {
    pub cue: &'a Cue,
    pub lane: usize,
}

/// Assign every cue a lane in `[0, lane_count)`.
///
/// Output is ordered by start (then end), independent of input order.
pub fn pack_lanes(cues: &[Cue], lane_count: usize) -> Vec<LaneAssignment<'_>> {
    let lane_count = if (1..=MAX_LANE_COUNT).contains(&lane_count) {
        lane_count
    } else {
        DEFAULT_LANE_COUNT
    };

    let mut ordered: Vec<&Cue> = cues.iter().collect();
    ordered.sort_by_key(|c| (c.start, c.end));

    let mut lane_ends: Vec<Option<Frame>> = vec![None; lane_count];
    ordered
        .into_iter()
        .map(|cue| {
            let lane = lane_ends
                .iter()
                .position(|end| end.map_or(true, |e| cue.start >= e))
                .unwrap_or_else(|| earliest_lane(&lane_ends));
            let end = lane_ends[lane].map_or(cue.end, |e| e.max(cue.end));
            lane_ends[lane] = Some(end);
            LaneAssignment { cue, lane }
        })
        .collect()
}

fn earliest_lane(lane_ends: &[Option<Frame>]) -> usize {
    lane_ends
        .iter()
        .enumerate()
        .min_by_key(|(_, end)| end.unwrap_or(0))
        .map_or(0, |(idx, _)| idx)
}

/// Number of lanes actually used by a packing.
pub fn lanes_used(assignments: &[LaneAssignment<'_>]) -> usize {
    assignments.iter().map(|a| a.lane + 1).max().unwrap_or(0)
}
