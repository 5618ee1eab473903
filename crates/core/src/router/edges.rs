//! Prerequisite edges and the bars they are anchored to.

use std::collections::{HashMap, HashSet};

use studyline_protocol::{BarGeometry, CourseId, PrerequisiteKind};

use crate::model::{Course, CourseIndex};

/// A prerequisite relation: `source` must precede `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrowEdge {
    pub source: CourseId,
    pub target: CourseId,
    pub kind: PrerequisiteKind,
}

/// An edge with the indices of the bars it leaves and enters.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchoredEdge {
    pub edge: ArrowEdge,
    pub source_bar: usize,
    pub target_bar: usize,
}

/// Builds the edge list from the courses' prerequisite references.
///
/// Edges come out in course order, completion prerequisites before
/// participation ones. References to unknown courses and to the course
/// itself are dropped; repeated edges are kept once. Returns the edges and
/// the number dropped.
pub fn derive_edges(courses: &[Course]) -> (Vec<ArrowEdge>, usize) {
    let index = CourseIndex::new(courses);
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    let mut dropped = 0usize;

    for course in courses {
        for (kind, reference) in course.prerequisites() {
            let Some(source) = index.resolve(reference) else {
                tracing::warn!(
                    course = %course.id,
                    reference,
                    ?kind,
                    "dropping prerequisite on unknown course"
                );
                dropped += 1;
                continue;
            };
            if source.id == course.id {
                tracing::warn!(course = %course.id, ?kind, "dropping self-referencing prerequisite");
                dropped += 1;
                continue;
            }
            let edge = ArrowEdge {
                source: source.id.clone(),
                target: course.id.clone(),
                kind,
            };
            if seen.insert(edge.clone()) {
                edges.push(edge);
            }
        }
    }

    (edges, dropped)
}

/// Chronological key of a bar: year, then period order.
fn chrono_key(bar: &BarGeometry) -> (u32, usize) {
    (bar.year, bar.ordinal)
}

/// Anchors each edge at the source course's last bar and the target
/// course's first bar. Edges whose courses have no bars are dropped.
pub fn anchor_edges(edges: &[ArrowEdge], bars: &[BarGeometry]) -> (Vec<AnchoredEdge>, usize) {
    let mut first: HashMap<&CourseId, usize> = HashMap::new();
    let mut last: HashMap<&CourseId, usize> = HashMap::new();
    for (idx, bar) in bars.iter().enumerate() {
        let key = chrono_key(bar);
        first
            .entry(&bar.course_id)
            .and_modify(|cur| {
                if key < chrono_key(&bars[*cur]) {
                    *cur = idx;
                }
            })
            .or_insert(idx);
        last.entry(&bar.course_id)
            .and_modify(|cur| {
                if key > chrono_key(&bars[*cur]) {
                    *cur = idx;
                }
            })
            .or_insert(idx);
    }

    let mut anchored = Vec::with_capacity(edges.len());
    let mut dropped = 0usize;
    for edge in edges {
        match (last.get(&edge.source), first.get(&edge.target)) {
            (Some(&source_bar), Some(&target_bar)) => anchored.push(AnchoredEdge {
                edge: edge.clone(),
                source_bar,
                target_bar,
            }),
            _ => {
                tracing::warn!(
                    from = %edge.source,
                    to = %edge.target,
                    "dropping prerequisite whose course has no bars"
                );
                dropped += 1;
            }
        }
    }
    (anchored, dropped)
}
