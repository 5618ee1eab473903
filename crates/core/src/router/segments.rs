//! Segment extraction: the lane-relevant pieces of every route.
//!
//! Each route contributes one horizontal trunk and two verticals, one in the
//! column right of its source and one in the column left of its target. The
//! short stubs into the bars themselves never share a corridor with another
//! arrow's stub at the same height, so they are not extracted.

use studyline_protocol::{GapKey, Span};

use super::classify::{Corridors, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Sub-column of a corridor a segment runs in. Verticals near the source
/// side never conflict with verticals near the target side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Start,
    Trunk,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowSegment {
    /// Index of the route this segment belongs to.
    pub arrow: usize,
    pub orientation: Orientation,
    pub side: Side,
    pub gap: GapKey,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Tie-break for equal interval starts: the source anchor's y.
    pub source_coord: f64,
}

impl ArrowSegment {
    /// Extent along the segment's own axis, the axis lanes are separated on.
    pub fn interval(&self) -> Span {
        match self.orientation {
            Orientation::Horizontal => Span::between(self.x1, self.x2),
            Orientation::Vertical => Span::between(self.y1, self.y2),
        }
    }
}

/// Trunks at the top of their corridor, spanning the full width of their
/// start and end columns. Verticals later sit anywhere inside those columns,
/// so the extent covers every final trunk.
pub fn trunk_segments(routes: &[Route], corridors: &Corridors) -> Vec<ArrowSegment> {
    routes
        .iter()
        .enumerate()
        .map(|(arrow, route)| {
            let y = corridors.trunk_span(route.class).start;
            let extent = corridors.trunk_extent(route);
            ArrowSegment {
                arrow,
                orientation: Orientation::Horizontal,
                side: Side::Trunk,
                gap: route.class.trunk_gap(),
                x1: extent.start,
                y1: y,
                x2: extent.end,
                y2: y,
                source_coord: route.source.center_y(),
            }
        })
        .collect()
}

/// Verticals from the source anchor down (or up) to the trunk, and from the
/// trunk to the target anchor. `trunk_ys` holds each route's resolved trunk
/// height, so the y extents are exact.
pub fn column_segments(
    routes: &[Route],
    corridors: &Corridors,
    trunk_ys: &[f64],
) -> Vec<ArrowSegment> {
    let mut out = Vec::with_capacity(routes.len() * 2);
    for (arrow, (route, &trunk_y)) in routes.iter().zip(trunk_ys).enumerate() {
        let source_y = route.source.center_y();
        let target_y = route.target.center_y();
        let start_x = corridors.column(route.start_boundary).start;
        let end_x = corridors.column(route.end_boundary).end;
        out.push(ArrowSegment {
            arrow,
            orientation: Orientation::Vertical,
            side: Side::Start,
            gap: route.start_gap(),
            x1: start_x,
            y1: source_y,
            x2: start_x,
            y2: trunk_y,
            source_coord: source_y,
        });
        out.push(ArrowSegment {
            arrow,
            orientation: Orientation::Vertical,
            side: Side::End,
            gap: route.end_gap(),
            x1: end_x,
            y1: trunk_y,
            x2: end_x,
            y2: target_y,
            source_coord: source_y,
        });
    }
    out
}
