use serde::{Deserialize, Serialize};

use crate::course_id::CourseId;
use crate::style::{Marker, PrerequisiteKind, StyleClass};
use crate::types::{Point, Rect};

/// One course bar inside a year x period cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub course_id: CourseId,
    pub year: u32,
    pub period_id: u32,
    /// Position of the period in chronological order (0-based).
    pub ordinal: usize,
    pub rect: Rect,
    /// Credits of the slot as given, not floored.
    pub credits: f64,
    /// Set on every bar that continues a connector run; only the first bar
    /// of a run carries the course label.
    pub label_suppressed: bool,
    pub style: StyleClass,
}

/// Fill geometry joining two bars of one course in consecutive periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorGeometry {
    pub course_id: CourseId,
    pub year: u32,
    pub from_period: u32,
    pub to_period: u32,
    /// Closed polygon, clockwise from the top-left corner.
    pub fill: Vec<Point>,
    /// Top and bottom border lines. The vertical edges are shared with the
    /// bars and are left out.
    pub borders: [[Point; 2]; 2],
    pub style: StyleClass,
    pub border_style: StyleClass,
}

/// Routing corridor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GapKey {
    /// Vertical slot at a column boundary. Boundary `b` lies left of period
    /// column `b`; the first and last boundaries are the outer gutters.
    Column { boundary: usize },
    /// Space between period `after` and `after + 1` inside one year.
    Period { year: u32, after: usize },
    /// Space between year `after` and `after + 1`. `after == 0` is the
    /// gutter above the first year.
    Year { after: u32 },
}

/// Lanes an arrow was given in each corridor it passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowLanes {
    pub start: usize,
    pub trunk: usize,
    pub end: usize,
    pub start_gap: GapKey,
    pub trunk_gap: GapKey,
    pub end_gap: GapKey,
}

/// A drawing instruction for an arrow path with rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
}

/// A routed prerequisite arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowGeometry {
    pub source: CourseId,
    pub target: CourseId,
    pub kind: PrerequisiteKind,
    /// Orthogonal polyline, source edge first, target edge last.
    pub points: Vec<Point>,
    /// `points` with corners replaced by quadratic curves.
    pub path: Vec<PathCommand>,
    pub lanes: ArrowLanes,
    pub style: StyleClass,
    pub marker: Marker,
}

impl ArrowGeometry {
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Vertical extent reserved for one academic year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearBand {
    pub year: u32,
    pub y_offset: f64,
    pub height: f64,
    /// Sum of the year's credits as given, not floored.
    pub total_credits: f64,
}

impl YearBand {
    pub fn bottom(&self) -> f64 {
        self.y_offset + self.height
    }
}

/// Credit sums of one year x period cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellTotals {
    pub year: u32,
    pub period_id: u32,
    pub ordinal: usize,
    pub bar_count: usize,
    /// Credits as given. Use this for anything shown as a number.
    pub credits: f64,
    /// Pixel height of the stack, floored credits plus gaps.
    pub stacked_height: f64,
}

/// Elements dropped during a pass because they referenced something unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub dropped_slots: usize,
    pub dropped_edges: usize,
}

/// Everything one layout pass produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanLayout {
    pub bars: Vec<BarGeometry>,
    pub connectors: Vec<ConnectorGeometry>,
    pub arrows: Vec<ArrowGeometry>,
    pub bands: Vec<YearBand>,
    pub cells: Vec<CellTotals>,
    /// y of the bottom edge of the last band, top margin included.
    pub content_height: f64,
    /// The frozen viewport height, grown to fit the content if needed.
    pub viewport_height: f64,
    pub px_per_credit: f64,
    pub diagnostics: Diagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_serializes_with_snake_case_kinds() {
        let arrow = ArrowGeometry {
            source: "A".into(),
            target: "B".into(),
            kind: PrerequisiteKind::Participation,
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            path: vec![
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(10.0, 0.0)),
            ],
            lanes: ArrowLanes {
                start: 0,
                trunk: 0,
                end: 0,
                start_gap: GapKey::Column { boundary: 1 },
                trunk_gap: GapKey::Period { year: 1, after: 0 },
                end_gap: GapKey::Column { boundary: 1 },
            },
            style: PrerequisiteKind::Participation.style(),
            marker: Marker::ArrowHead,
        };
        let json = serde_json::to_string(&arrow).unwrap_or_default();
        assert!(json.contains("\"participation\""));
        assert!(json.contains("ArrowParticipation"));
        assert_eq!(arrow.end(), Some(Point::new(10.0, 0.0)));
    }
}
