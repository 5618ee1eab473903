pub mod course_id;
pub mod geometry;
pub mod style;
pub mod types;

pub use course_id::CourseId;
pub use geometry::{
    ArrowGeometry, ArrowLanes, BarGeometry, CellTotals, ConnectorGeometry, Diagnostics, GapKey,
    PathCommand, PlanLayout, YearBand,
};
pub use style::{Marker, PrerequisiteKind, StyleClass};
pub use types::{Point, Rect, Span};
