//! Gap grouping, overlap detection and lane assignment.
//!
//! Segments sharing a corridor, orientation and side form a bucket. Inside a
//! bucket every segment is an interval on its own axis; overlapping
//! intervals are swept into groups and each group is colored first-fit.
//! First-fit over intervals sorted by start uses exactly as many lanes as
//! the largest set of mutually overlapping intervals.
//!
//! Sort key everywhere: interval start, then source coordinate, then arrow
//! index. It is total, so the result does not depend on insertion order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use studyline_protocol::GapKey;

use super::segments::{ArrowSegment, Orientation, Side};

pub type BucketKey = (GapKey, Orientation, Side);

fn by_start(a: &ArrowSegment, b: &ArrowSegment) -> Ordering {
    a.interval()
        .start
        .total_cmp(&b.interval().start)
        .then_with(|| a.source_coord.total_cmp(&b.source_coord))
        .then_with(|| a.arrow.cmp(&b.arrow))
}

/// Buckets segment indices by corridor, orientation and side.
pub fn group_by_gap(segments: &[ArrowSegment]) -> BTreeMap<BucketKey, Vec<usize>> {
    let mut buckets: BTreeMap<BucketKey, Vec<usize>> = BTreeMap::new();
    for (idx, segment) in segments.iter().enumerate() {
        buckets
            .entry((segment.gap, segment.orientation, segment.side))
            .or_default()
            .push(idx);
    }
    buckets
}

/// Splits one bucket into groups of transitively overlapping intervals.
///
/// A new group starts when an interval begins strictly after the running
/// group's furthest end, so touching intervals share a group.
pub fn overlap_groups(segments: &[ArrowSegment], members: &[usize]) -> Vec<Vec<usize>> {
    let mut sorted = members.to_vec();
    sorted.sort_by(|&a, &b| by_start(&segments[a], &segments[b]));

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut group_end = f64::NEG_INFINITY;
    for idx in sorted {
        let interval = segments[idx].interval();
        match groups.last_mut() {
            Some(group) if interval.start <= group_end => {
                group.push(idx);
                group_end = group_end.max(interval.end);
            }
            _ => {
                groups.push(vec![idx]);
                group_end = interval.end;
            }
        }
    }
    groups
}

/// First-fit coloring of one overlap group. Returns `(segment, lane)` pairs.
///
/// A lane is reusable once its last interval ends strictly before the next
/// one starts.
pub fn assign_lanes(segments: &[ArrowSegment], group: &[usize]) -> Vec<(usize, usize)> {
    let mut sorted = group.to_vec();
    sorted.sort_by(|&a, &b| by_start(&segments[a], &segments[b]));

    let mut lane_ends: Vec<f64> = Vec::new();
    let mut out = Vec::with_capacity(sorted.len());
    for idx in sorted {
        let interval = segments[idx].interval();
        let lane = match lane_ends.iter().position(|&end| end < interval.start) {
            Some(lane) => {
                lane_ends[lane] = interval.end;
                lane
            }
            None => {
                lane_ends.push(interval.end);
                lane_ends.len() - 1
            }
        };
        out.push((idx, lane));
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneAllocation {
    /// Lane of every segment, indexed like the input.
    pub lanes: Vec<usize>,
    /// Number of lanes each bucket needed.
    pub lane_counts: BTreeMap<BucketKey, usize>,
}

impl LaneAllocation {
    /// Lanes used in one bucket, zero if nothing ran there.
    pub fn count(&self, gap: GapKey, orientation: Orientation, side: Side) -> usize {
        self.lane_counts
            .get(&(gap, orientation, side))
            .copied()
            .unwrap_or(0)
    }
}

/// Runs grouping, detection and assignment over all segments.
pub fn allocate(segments: &[ArrowSegment]) -> LaneAllocation {
    let mut lanes = vec![0usize; segments.len()];
    let mut lane_counts = BTreeMap::new();
    for (key, members) in group_by_gap(segments) {
        let mut used = 0usize;
        for group in overlap_groups(segments, &members) {
            for (idx, lane) in assign_lanes(segments, &group) {
                lanes[idx] = lane;
                used = used.max(lane + 1);
            }
        }
        lane_counts.insert(key, used);
    }
    LaneAllocation { lanes, lane_counts }
}
