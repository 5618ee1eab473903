//! Path construction: turns lanes into point lists and rounded path commands.

use studyline_protocol::{PathCommand, Point, Span};

use crate::config::LayoutConfig;

use super::classify::{Corridors, Route};

const EPS: f64 = 1e-9;

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Lane step for `lanes` lanes sharing `extent`: the configured spacing,
/// squeezed so every lane stays strictly inside the extent.
pub fn fitted_spacing(extent: Span, lanes: usize, spacing: f64) -> f64 {
    if extent.is_empty() {
        return 0.0;
    }
    spacing.min(extent.len() / (lanes + 1) as f64)
}

/// Vertical lanes using one column, by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnLoad {
    pub start: usize,
    pub end: usize,
}

impl ColumnLoad {
    /// Start lanes fill the column from the left, end lanes from the right.
    /// Both share one step so the two sides never meet.
    fn step(self, column: Span, config: &LayoutConfig) -> (f64, f64) {
        let step = fitted_spacing(column, self.start + self.end, config.lane_spacing);
        (config.stub_length.min(step), step)
    }
}

/// Trunk height of `lane` out of `lanes`: lanes stack downwards from the top
/// of the trunk's corridor, lane 0 one step below it.
pub fn trunk_y(
    route: &Route,
    corridors: &Corridors,
    lane: usize,
    lanes: usize,
    config: &LayoutConfig,
) -> f64 {
    let span = corridors.trunk_span(route.class);
    span.start + (lane + 1) as f64 * fitted_spacing(span, lanes, config.lane_spacing)
}

/// x of the source-side vertical, counted from the column's left edge.
pub fn start_x(
    route: &Route,
    corridors: &Corridors,
    lane: usize,
    load: ColumnLoad,
    config: &LayoutConfig,
) -> f64 {
    let column = corridors.column(route.start_boundary);
    let (pad, step) = load.step(column, config);
    column.start + pad + lane as f64 * step
}

/// x of the target-side vertical, counted from the column's right edge.
pub fn end_x(
    route: &Route,
    corridors: &Corridors,
    lane: usize,
    load: ColumnLoad,
    config: &LayoutConfig,
) -> f64 {
    let column = corridors.column(route.end_boundary);
    let (pad, step) = load.step(column, config);
    column.end - pad - lane as f64 * step
}

/// Orthogonal polyline: stub out of the source, down the start column, along
/// the trunk, down the end column and into the target.
///
/// The verticals never sit left of the source's right edge or right of the
/// target's left edge, even where overlapping periods collapse a column.
pub fn build_points(route: &Route, start_x: f64, trunk_y: f64, end_x: f64) -> Vec<Point> {
    let source = route.source.right_anchor();
    let target = route.target.left_anchor();
    let start_x = start_x.max(source.x);
    let end_x = end_x.min(target.x);
    let points = vec![
        source,
        Point::new(start_x, source.y),
        Point::new(start_x, trunk_y),
        Point::new(end_x, trunk_y),
        Point::new(end_x, target.y),
        target,
    ];
    terminate_at(simplify(points), target)
}

/// Drops repeated points and middle points of straight runs.
pub fn simplify(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out
            .last()
            .is_some_and(|last| same(last.x, p.x) && same(last.y, p.y))
        {
            continue;
        }
        if out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            let straight_h = same(a.y, b.y) && same(b.y, p.y) && between(a.x, b.x, p.x);
            let straight_v = same(a.x, b.x) && same(b.x, p.x) && between(a.y, b.y, p.y);
            if straight_h || straight_v {
                out.pop();
            }
        }
        out.push(p);
    }
    out
}

/// Whether `mid` lies on the closed range from `a` to `c`.
fn between(a: f64, mid: f64, c: f64) -> bool {
    (a.min(c) - EPS..=a.max(c) + EPS).contains(&mid)
}

/// Makes the path end exactly on `target`.
///
/// A path ending short of (or past) the target has its last horizontal
/// segment at the target's height stretched to the target instead of
/// growing a backward leg. Without such a segment the path is joined
/// orthogonally.
pub fn terminate_at(mut points: Vec<Point>, target: Point) -> Vec<Point> {
    let Some(last) = points.last_mut() else {
        return vec![target];
    };
    if same(last.x, target.x) && same(last.y, target.y) {
        *last = target;
        return points;
    }

    let stretch = (1..points.len())
        .rev()
        .find(|&i| same(points[i - 1].y, target.y) && same(points[i].y, target.y));
    if let Some(i) = stretch {
        points.truncate(i + 1);
        points[i] = target;
        return simplify(points);
    }

    let corner_x = points.last().map_or(target.x, |p| p.x);
    points.push(Point::new(corner_x, target.y));
    points.push(target);
    simplify(points)
}

fn toward(from: Point, to: Point, distance: f64) -> Point {
    let len = (to.x - from.x).hypot(to.y - from.y);
    if len < EPS {
        return from;
    }
    let (ux, uy) = ((to.x - from.x) / len, (to.y - from.y) / len);
    Point::new(from.x + ux * distance, from.y + uy * distance)
}

/// Replaces every corner with a quadratic curve.
///
/// Both segments at a corner are shortened by `radius`, limited to half of
/// the shorter one so neighbouring curves never overlap.
pub fn round_corners(points: &[Point], radius: f64) -> Vec<PathCommand> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut commands = Vec::with_capacity(points.len() * 2);
    commands.push(PathCommand::MoveTo(first));

    for window in points.windows(3) {
        let (a, b, c) = (window[0], window[1], window[2]);
        let in_len = (b.x - a.x).hypot(b.y - a.y);
        let out_len = (c.x - b.x).hypot(c.y - b.y);
        let r = radius.min(in_len / 2.0).min(out_len / 2.0).max(0.0);
        if r < EPS {
            commands.push(PathCommand::LineTo(b));
            continue;
        }
        commands.push(PathCommand::LineTo(toward(b, a, r)));
        commands.push(PathCommand::QuadTo {
            control: b,
            to: toward(b, c, r),
        });
    }

    if let Some(&last) = points.last()
        && points.len() > 1
    {
        commands.push(PathCommand::LineTo(last));
    }
    commands
}
