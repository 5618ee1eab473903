//! Arrow router: orthogonal, lane-separated prerequisite arrows.
//!
//! ```text
//!   edges ─▶ classify ─▶ trunk segments ─▶ group ─▶ detect ─▶ assign ─┐
//!                                                                      │ trunk y
//!            path ◀─ assign ◀─ detect ◀─ group ◀─ column segments ◀────┘
//! ```
//!
//! Trunks are assigned first so the vertical segments can be extracted with
//! their exact y extents.

pub mod classify;
pub mod edges;
pub mod lanes;
pub mod path;
pub mod segments;

use studyline_protocol::{ArrowGeometry, ArrowLanes, BarGeometry, GapKey, Marker, YearBand};

use crate::config::{LayerVisibility, LayoutConfig};
use crate::grid::TimeGrid;
use crate::model::Course;

pub use classify::{Corridors, Route, RouteClass};
pub use edges::{AnchoredEdge, ArrowEdge, anchor_edges, derive_edges};
pub use lanes::LaneAllocation;
pub use segments::{ArrowSegment, Orientation, Side};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutedArrows {
    pub arrows: Vec<ArrowGeometry>,
    pub dropped_edges: usize,
}

/// Derives, anchors and routes every visible prerequisite arrow.
pub fn route_arrows(
    courses: &[Course],
    bars: &[BarGeometry],
    bands: &[YearBand],
    grid: &TimeGrid,
    config: &LayoutConfig,
    layers: &LayerVisibility,
) -> RoutedArrows {
    let (edges, unknown) = derive_edges(courses);
    let visible: Vec<ArrowEdge> = edges.into_iter().filter(|e| layers.shows(e.kind)).collect();
    let (anchored, unanchored) = anchor_edges(&visible, bars);

    RoutedArrows {
        arrows: route_anchored(&anchored, bars, bands, grid, config),
        dropped_edges: unknown + unanchored,
    }
}

/// Routes already anchored edges. Output order follows `anchored`.
pub fn route_anchored(
    anchored: &[AnchoredEdge],
    bars: &[BarGeometry],
    bands: &[YearBand],
    grid: &TimeGrid,
    config: &LayoutConfig,
) -> Vec<ArrowGeometry> {
    if anchored.is_empty() {
        return Vec::new();
    }

    let routes = classify::classify_all(anchored, bars);
    let corridors = Corridors::new(grid, bands, config);

    let trunks = segments::trunk_segments(&routes, &corridors);
    let trunk_lanes = lanes::allocate(&trunks);
    let trunk_ys: Vec<f64> = routes
        .iter()
        .zip(&trunk_lanes.lanes)
        .map(|(route, &lane)| {
            let gap = route.class.trunk_gap();
            let used = trunk_lanes.count(gap, Orientation::Horizontal, Side::Trunk);
            path::trunk_y(route, &corridors, lane, used, config)
        })
        .collect();

    let columns = segments::column_segments(&routes, &corridors, &trunk_ys);
    let column_lanes = lanes::allocate(&columns);

    tracing::debug!(
        arrows = routes.len(),
        trunk_corridors = trunk_lanes.lane_counts.len(),
        max_trunk_lanes = trunk_lanes.lane_counts.values().max().copied().unwrap_or(0),
        max_column_lanes = column_lanes.lane_counts.values().max().copied().unwrap_or(0),
        "routed arrows"
    );

    routes
        .iter()
        .enumerate()
        .map(|(idx, route)| {
            let edge = &anchored[route.edge].edge;
            let lanes = ArrowLanes {
                start: column_lanes.lanes[2 * idx],
                trunk: trunk_lanes.lanes[idx],
                end: column_lanes.lanes[2 * idx + 1],
                start_gap: route.start_gap(),
                trunk_gap: route.class.trunk_gap(),
                end_gap: route.end_gap(),
            };
            let start_x = path::start_x(
                route,
                &corridors,
                lanes.start,
                column_load(&column_lanes, lanes.start_gap),
                config,
            );
            let end_x = path::end_x(
                route,
                &corridors,
                lanes.end,
                column_load(&column_lanes, lanes.end_gap),
                config,
            );
            let points = path::build_points(route, start_x, trunk_ys[idx], end_x);

            ArrowGeometry {
                source: edge.source.clone(),
                target: edge.target.clone(),
                kind: edge.kind,
                path: path::round_corners(&points, config.corner_radius),
                points,
                lanes,
                style: edge.kind.style(),
                marker: Marker::ArrowHead,
            }
        })
        .collect()
}

fn column_load(allocation: &LaneAllocation, column: GapKey) -> path::ColumnLoad {
    path::ColumnLoad {
        start: allocation.count(column, Orientation::Vertical, Side::Start),
        end: allocation.count(column, Orientation::Vertical, Side::End),
    }
}
