//! Route classification and the corridor geometry routes run through.

use studyline_protocol::{BarGeometry, GapKey, Rect, Span, YearBand};

use crate::config::LayoutConfig;
use crate::grid::TimeGrid;

use super::edges::AnchoredEdge;

/// Which corridor carries an edge's horizontal trunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Same year, target period directly after the source period.
    InterPeriod { year: u32, after: usize },
    /// Everything else. The trunk runs in the corridor directly above the
    /// target's year.
    InterYear { after: u32 },
}

impl RouteClass {
    pub fn trunk_gap(self) -> GapKey {
        match self {
            Self::InterPeriod { year, after } => GapKey::Period { year, after },
            Self::InterYear { after } => GapKey::Year { after },
        }
    }
}

/// An anchored edge with everything the later stages need from the bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub edge: usize,
    pub class: RouteClass,
    pub source: Rect,
    pub target: Rect,
    pub source_year: u32,
    pub target_year: u32,
    /// Column boundary right of the source bar.
    pub start_boundary: usize,
    /// Column boundary left of the target bar.
    pub end_boundary: usize,
}

impl Route {
    pub fn start_gap(&self) -> GapKey {
        GapKey::Column {
            boundary: self.start_boundary,
        }
    }

    pub fn end_gap(&self) -> GapKey {
        GapKey::Column {
            boundary: self.end_boundary,
        }
    }
}

pub fn classify(source: &BarGeometry, target: &BarGeometry) -> RouteClass {
    if source.year == target.year && target.ordinal == source.ordinal + 1 {
        RouteClass::InterPeriod {
            year: source.year,
            after: source.ordinal,
        }
    } else {
        RouteClass::InterYear {
            after: target.year.saturating_sub(1),
        }
    }
}

pub fn classify_all(anchored: &[AnchoredEdge], bars: &[BarGeometry]) -> Vec<Route> {
    anchored
        .iter()
        .enumerate()
        .map(|(edge, a)| {
            let (source, target) = (&bars[a.source_bar], &bars[a.target_bar]);
            Route {
                edge,
                class: classify(source, target),
                source: source.rect,
                target: target.rect,
                source_year: source.year,
                target_year: target.year,
                start_boundary: source.ordinal + 1,
                end_boundary: target.ordinal,
            }
        })
        .collect()
}

/// Pixel extents of every routing corridor.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridors {
    /// x extent of each column boundary, `len() == columns + 1`.
    columns: Vec<Span>,
    /// y extent of the corridor above each year, index `after`.
    years: Vec<Span>,
    bands: Vec<YearBand>,
}

impl Corridors {
    pub fn new(grid: &TimeGrid, bands: &[YearBand], config: &LayoutConfig) -> Self {
        let bars: Vec<Span> = (0..grid.len())
            .filter_map(|o| grid.bar_span(o, config.column_inset, config.min_extent))
            .collect();
        let n = bars.len();

        let mut columns = Vec::with_capacity(n + 1);
        for boundary in 0..=n {
            let left = match boundary {
                0 => bars.first().map_or(grid.left(), |s| s.start) - config.outer_gutter,
                b => bars[b - 1].end,
            };
            let right = if boundary == n {
                bars.last().map_or(grid.right(), |s| s.end) + config.outer_gutter
            } else {
                bars[boundary].start
            };
            // Overlapping periods leave no room; collapse instead of inverting.
            columns.push(Span {
                start: left,
                end: right.max(left),
            });
        }

        let mut years = Vec::with_capacity(bands.len());
        for (idx, band) in bands.iter().enumerate() {
            let top = match idx {
                0 => band.y_offset - config.outer_gutter,
                i => bands[i - 1].bottom(),
            };
            years.push(Span {
                start: top,
                end: band.y_offset.max(top),
            });
        }

        Self {
            columns,
            years,
            bands: bands.to_vec(),
        }
    }

    pub fn column(&self, boundary: usize) -> Span {
        self.columns
            .get(boundary)
            .or(self.columns.last())
            .copied()
            .unwrap_or(Span {
                start: 0.0,
                end: 0.0,
            })
    }

    /// Corridor between year `after` and `after + 1`.
    pub fn year_gap(&self, after: u32) -> Span {
        self.years
            .get(after as usize)
            .or(self.years.last())
            .copied()
            .unwrap_or(Span {
                start: 0.0,
                end: 0.0,
            })
    }

    pub fn band(&self, year: u32) -> Option<&YearBand> {
        self.bands.iter().find(|b| b.year == year)
    }

    /// Vertical extent a trunk's lanes must stay inside: the year band for
    /// inter-period trunks, which run inside a single column, and the gap
    /// above the target year otherwise.
    pub fn trunk_span(&self, class: RouteClass) -> Span {
        match class {
            RouteClass::InterPeriod { year, .. } => self.band(year).map_or(
                Span {
                    start: 0.0,
                    end: 0.0,
                },
                |b| Span::between(b.y_offset, b.bottom()),
            ),
            RouteClass::InterYear { after } => self.year_gap(after),
        }
    }

    /// Horizontal extent a trunk may occupy: both of its columns and
    /// everything between them.
    pub fn trunk_extent(&self, route: &Route) -> Span {
        self.column(route.start_boundary)
            .union(&self.column(route.end_boundary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::quarters;
    use studyline_protocol::{CourseId, StyleClass};

    fn bar(year: u32, ordinal: usize) -> BarGeometry {
        BarGeometry {
            course_id: CourseId::new("X"),
            year,
            period_id: ordinal as u32 + 1,
            ordinal,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            credits: 5.0,
            label_suppressed: false,
            style: StyleClass::CourseBar,
        }
    }

    #[test]
    fn classifies_adjacent_periods_as_inter_period() {
        assert_eq!(
            classify(&bar(1, 1), &bar(1, 2)),
            RouteClass::InterPeriod { year: 1, after: 1 }
        );
        assert_eq!(
            classify(&bar(1, 0), &bar(1, 2)),
            RouteClass::InterYear { after: 0 }
        );
        assert_eq!(
            classify(&bar(1, 3), &bar(2, 0)),
            RouteClass::InterYear { after: 1 }
        );
        // Backwards references still route, over the target year.
        assert_eq!(
            classify(&bar(3, 1), &bar(2, 2)),
            RouteClass::InterYear { after: 1 }
        );
    }

    #[test]
    fn corridors_fill_the_space_between_columns_and_years() {
        let config = LayoutConfig::default();
        let grid = TimeGrid::new(&quarters(), config.margin_left, config.grid_width)
            .unwrap_or_else(|_| unreachable!());
        let bands = vec![
            YearBand {
                year: 1,
                y_offset: 32.0,
                height: 100.0,
                total_credits: 0.0,
            },
            YearBand {
                year: 2,
                y_offset: 160.0,
                height: 100.0,
                total_credits: 0.0,
            },
        ];
        let corridors = Corridors::new(&grid, &bands, &config);

        let first = grid.bar_span(0, config.column_inset, config.min_extent);
        let second = grid.bar_span(1, config.column_inset, config.min_extent);
        let between = corridors.column(1);
        assert_eq!(Some(between.start), first.map(|s| s.end));
        assert_eq!(Some(between.end), second.map(|s| s.start));
        assert_eq!(corridors.column(0).len(), config.outer_gutter);
        assert!((corridors.column(4).len() - config.outer_gutter).abs() < 1e-9);

        assert_eq!(corridors.year_gap(0), Span::between(8.0, 32.0));
        assert_eq!(corridors.year_gap(1), Span::between(132.0, 160.0));
        assert_eq!(
            corridors.trunk_span(RouteClass::InterPeriod { year: 2, after: 0 }),
            Span::between(160.0, 260.0)
        );
        assert_eq!(
            corridors.trunk_span(RouteClass::InterYear { after: 1 }),
            Span::between(132.0, 160.0)
        );
    }
}
