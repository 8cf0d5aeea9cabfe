//! Greedy lane packing for stacked track display.
//!
//! Intervals are sorted by end coordinate (stable), then each lane is filled
//! by a single scan that takes every still-unplaced interval starting strictly
//! after the end of the previous one taken. Lanes are opened until nothing is
//! left. An interval starting exactly where the previous one ended does not
//! share its lane.

use crate::error::{Result, TrackError};
use crate::feature::Interval;
use log::{debug, warn};

/// Parameters for one lane-assignment pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneConfig {
    /// Distance below the window start where each fresh lane begins. Intervals
    /// starting at or before `region_start - floor_offset` can never be placed.
    pub floor_offset: i64,
    /// Legacy cap on the number of lanes. `None` keeps opening lanes until
    /// every interval is placed.
    pub max_lanes: Option<usize>,
}

impl LaneConfig {
    pub fn new(floor_offset: i64) -> Self {
        Self {
            floor_offset,
            max_lanes: None,
        }
    }

    pub fn with_max_lanes(mut self, max_lanes: usize) -> Self {
        self.max_lanes = Some(max_lanes);
        self
    }
}

/// Lane per interval, indexed by position in the slice given to
/// [`assign_lanes`]. Lanes are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment {
    lanes: Vec<usize>,
    lane_count: usize,
}

impl LaneAssignment {
    pub fn lane_of(&self, index: usize) -> Option<usize> {
        self.lanes.get(index).copied()
    }

    pub fn lanes(&self) -> &[usize] {
        &self.lanes
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

/// Assign every interval a lane so that intervals sharing a lane never overlap.
///
/// Fails with [`TrackError::LaneBudgetExceeded`] if `config.max_lanes` runs out,
/// or if a lane pass places nothing, which only happens when the remaining
/// intervals all start at or below the lane floor.
pub fn assign_lanes(
    intervals: &[Interval],
    region_start: i64,
    config: LaneConfig,
) -> Result<LaneAssignment> {
    let total = intervals.len();
    let floor = region_start - config.floor_offset;

    // sort_by_key is stable: equal ends keep their input order
    let mut unplaced: Vec<usize> = (0..total).collect();
    unplaced.sort_by_key(|&i| intervals[i].end);

    let mut lanes = vec![0usize; total];
    let mut lane_count = 0;

    while !unplaced.is_empty() {
        if config.max_lanes.is_some_and(|max| lane_count >= max) {
            return Err(TrackError::LaneBudgetExceeded {
                lanes: lane_count,
                unplaced: unplaced.len(),
                total,
            });
        }

        let lane = lane_count + 1;
        let before = unplaced.len();
        let mut last_lane_end = floor;
        unplaced.retain(|&i| {
            let interval = &intervals[i];
            if interval.start > last_lane_end {
                lanes[i] = lane;
                last_lane_end = interval.end;
                false
            } else {
                true
            }
        });

        if unplaced.len() == before {
            warn!(
                "{} intervals start at or before the lane floor {floor}",
                unplaced.len()
            );
            return Err(TrackError::LaneBudgetExceeded {
                lanes: lane_count,
                unplaced: unplaced.len(),
                total,
            });
        }
        lane_count = lane;
    }

    debug!("packed {total} intervals into {lane_count} lanes");
    Ok(LaneAssignment { lanes, lane_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn iv(start: i64, end: i64) -> Interval {
        Interval::new("chr1", start, end)
    }

    fn assert_lanes_disjoint(intervals: &[Interval], assignment: &LaneAssignment) {
        for a in 0..intervals.len() {
            for b in (a + 1)..intervals.len() {
                if assignment.lane_of(a) == assignment.lane_of(b) {
                    assert!(
                        !intervals[a].overlaps(&intervals[b]),
                        "{:?} and {:?} share lane {:?}",
                        intervals[a],
                        intervals[b],
                        assignment.lane_of(a)
                    );
                }
            }
        }
    }

    #[test]
    fn test_worked_example() {
        let intervals = [iv(100, 200), iv(150, 250), iv(300, 400)];
        let assignment = assign_lanes(&intervals, 0, LaneConfig::new(0)).unwrap();
        assert_eq!(assignment.lanes(), &[1, 2, 1]);
        assert_eq!(assignment.lane_count(), 2);
    }

    #[test]
    fn test_sorts_by_end_not_input_order() {
        let intervals = [iv(300, 400), iv(150, 250), iv(100, 200)];
        let assignment = assign_lanes(&intervals, 0, LaneConfig::new(0)).unwrap();
        assert_eq!(assignment.lanes(), &[1, 2, 1]);
    }

    #[test]
    fn test_touching_intervals_use_separate_lanes() {
        let intervals = [iv(100, 200), iv(200, 300)];
        let assignment = assign_lanes(&intervals, 0, LaneConfig::new(0)).unwrap();
        assert_eq!(assignment.lanes(), &[1, 2]);
    }

    #[test]
    fn test_disjoint_intervals_share_first_lane() {
        let intervals = [iv(500, 600), iv(10, 20), iv(30, 40), iv(41, 50)];
        let assignment = assign_lanes(&intervals, 0, LaneConfig::new(0)).unwrap();
        assert_eq!(assignment.lanes(), &[1, 1, 1, 1]);
        assert_eq!(assignment.lane_count(), 1);
    }

    #[test]
    fn test_equal_ends_keep_input_order() {
        // Both end at 200; whichever comes first in the input takes lane 1
        let intervals = [iv(150, 200), iv(120, 200)];
        let assignment = assign_lanes(&intervals, 0, LaneConfig::new(0)).unwrap();
        assert_eq!(assignment.lanes(), &[1, 2]);

        let swapped = [iv(120, 200), iv(150, 200)];
        let assignment = assign_lanes(&swapped, 0, LaneConfig::new(0)).unwrap();
        assert_eq!(assignment.lanes(), &[1, 2]);
    }

    #[test]
    fn test_empty_input() {
        let assignment = assign_lanes(&[], 1000, LaneConfig::new(0)).unwrap();
        assert!(assignment.is_empty());
        assert_eq!(assignment.lane_count(), 0);
    }

    #[test]
    fn test_single_interval_gets_a_lane() {
        let assignment = assign_lanes(&[iv(1500, 1600)], 1000, LaneConfig::new(0)).unwrap();
        assert_eq!(assignment.lanes(), &[1]);
    }

    #[test]
    fn test_dense_stack_is_fully_placed() {
        // Every interval overlaps every other: one lane each, well past N-1 passes
        let intervals: Vec<Interval> = (0..50).map(|i| iv(1000 + i, 5000 + i)).collect();
        let assignment = assign_lanes(&intervals, 1000, LaneConfig::new(100_000)).unwrap();
        assert_eq!(assignment.lane_count(), 50);
        let mut seen = assignment.lanes().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (1..=50).collect::<Vec<_>>());
    }

    #[test]
    fn test_interval_below_floor_fails_loudly() {
        // Starts before the window with a zero floor offset: never eligible
        let intervals = [iv(900, 1100), iv(1200, 1300)];
        let err = assign_lanes(&intervals, 1000, LaneConfig::new(0)).unwrap_err();
        match err {
            TrackError::LaneBudgetExceeded { lanes, unplaced, total } => {
                assert_eq!(lanes, 1);
                assert_eq!(unplaced, 1);
                assert_eq!(total, 2);
            }
            other => panic!("unexpected error: {other}"),
        }

        // A larger floor offset makes it placeable
        let assignment = assign_lanes(&intervals, 1000, LaneConfig::new(100_000)).unwrap();
        assert_eq!(assignment.lanes(), &[1, 1]);
    }

    #[test]
    fn test_legacy_lane_budget() {
        let intervals = [iv(100, 300), iv(150, 350), iv(200, 400)];
        let err = assign_lanes(&intervals, 0, LaneConfig::new(0).with_max_lanes(2)).unwrap_err();
        assert!(matches!(
            err,
            TrackError::LaneBudgetExceeded { lanes: 2, unplaced: 1, total: 3 }
        ));

        let assignment = assign_lanes(&intervals, 0, LaneConfig::new(0).with_max_lanes(3)).unwrap();
        assert_eq!(assignment.lane_count(), 3);
    }

    #[test]
    fn test_random_layouts_are_disjoint_total_and_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let n = rng.gen_range(0..60);
            let intervals: Vec<Interval> = (0..n)
                .map(|_| {
                    let start = rng.gen_range(1_000..5_000);
                    let len = rng.gen_range(0..800);
                    iv(start, start + len)
                })
                .collect();

            let config = LaneConfig::new(1_000);
            let first = assign_lanes(&intervals, 1_000, config).unwrap();
            let second = assign_lanes(&intervals, 1_000, config).unwrap();
            assert_eq!(first, second);

            assert_eq!(first.len(), intervals.len());
            assert!(first.lanes().iter().all(|&l| (1..=first.lane_count()).contains(&l)));
            assert_lanes_disjoint(&intervals, &first);
        }
    }
}
