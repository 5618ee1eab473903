//! Time grid: projects calendar instants of one academic cycle onto the x axis.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use studyline_protocol::Span;

use crate::error::GridError;
use crate::model::PeriodDefinition;

/// Pixel positions of a period's milestones, for caller-side tick placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodMilestones {
    pub start: f64,
    pub lecture_end: f64,
    pub end: f64,
    pub exam: Span,
    pub re_exam: Span,
}

/// Linear projection of `[first.start, latest instant]` onto
/// `[left, left + width]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    periods: Vec<PeriodDefinition>,
    origin: NaiveDate,
    domain_days: f64,
    left: f64,
    width: f64,
}

impl TimeGrid {
    /// Validates the period table and builds the projection.
    ///
    /// Periods must be given in chronological order with strictly increasing
    /// start dates; anything else is a configuration error.
    pub fn new(periods: &[PeriodDefinition], left: f64, width: f64) -> Result<Self, GridError> {
        if !width.is_finite() || width <= 0.0 || !left.is_finite() {
            return Err(GridError::DegenerateWidth(width));
        }
        let Some(first) = periods.first() else {
            return Err(GridError::Empty);
        };

        let mut seen = HashSet::with_capacity(periods.len());
        for period in periods {
            if !seen.insert(period.id) {
                return Err(GridError::DuplicatePeriod { id: period.id });
            }
            if period.start >= period.end {
                return Err(GridError::InvertedPeriod {
                    id: period.id,
                    start: period.start,
                    end: period.end,
                });
            }
        }
        for pair in periods.windows(2) {
            if pair[1].start <= pair[0].start {
                return Err(GridError::NotChronological {
                    previous: pair[0].id,
                    next: pair[1].id,
                });
            }
        }

        let origin = first.start;
        let last = periods
            .iter()
            .map(PeriodDefinition::last_instant)
            .max()
            .unwrap_or(first.end);
        // start < end holds for every period, so the domain is at least a day.
        let domain_days = (last - origin).num_days().max(1) as f64;

        Ok(Self {
            periods: periods.to_vec(),
            origin,
            domain_days,
            left,
            width,
        })
    }

    /// x coordinate of an instant. Strictly increasing in `instant`.
    pub fn pixel(&self, instant: NaiveDate) -> f64 {
        let days = (instant - self.origin).num_days() as f64;
        self.left + days / self.domain_days * self.width
    }

    /// Like [`TimeGrid::pixel`] but clamped to the projected domain.
    pub fn pixel_clamped(&self, instant: NaiveDate) -> f64 {
        self.pixel(instant).clamp(self.left, self.right())
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn periods(&self) -> &[PeriodDefinition] {
        &self.periods
    }

    /// Chronological position of a period id.
    pub fn ordinal(&self, period_id: u32) -> Option<usize> {
        self.periods.iter().position(|p| p.id == period_id)
    }

    pub fn period_id(&self, ordinal: usize) -> Option<u32> {
        self.periods.get(ordinal).map(|p| p.id)
    }

    /// Projected study range (`start .. end`) of the period at `ordinal`.
    pub fn column(&self, ordinal: usize) -> Option<Span> {
        let period = self.periods.get(ordinal)?;
        Some(Span::between(self.pixel(period.start), self.pixel(period.end)))
    }

    /// Horizontal extent of the bars drawn in column `ordinal`: the column
    /// inset on both sides, never narrower than `min_extent`.
    pub fn bar_span(&self, ordinal: usize, inset: f64, min_extent: f64) -> Option<Span> {
        let column = self.column(ordinal)?;
        let start = column.start + inset;
        let end = column.end - inset;
        if end - start >= min_extent {
            return Some(Span { start, end });
        }
        let mid = (column.start + column.end) / 2.0;
        Some(Span {
            start: mid - min_extent / 2.0,
            end: mid + min_extent / 2.0,
        })
    }

    pub fn milestones(&self, period_id: u32) -> Option<PeriodMilestones> {
        let period = self.periods.get(self.ordinal(period_id)?)?;
        Some(PeriodMilestones {
            start: self.pixel(period.start),
            lecture_end: self.pixel(period.lecture_end),
            end: self.pixel(period.end),
            exam: Span::between(self.pixel(period.exam_start), self.pixel(period.exam_end)),
            re_exam: Span::between(
                self.pixel(period.re_exam_start),
                self.pixel(period.re_exam_end),
            ),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    /// Four quarters of the 2024/25 cycle, each followed by two exam weeks.
    pub(crate) fn quarters() -> Vec<PeriodDefinition> {
        let bounds = [
            (date(2024, 9, 2), date(2024, 11, 1)),
            (date(2024, 11, 11), date(2025, 1, 31)),
            (date(2025, 2, 10), date(2025, 4, 11)),
            (date(2025, 4, 21), date(2025, 6, 27)),
        ];
        bounds
            .iter()
            .enumerate()
            .map(|(idx, &(start, end))| PeriodDefinition {
                id: idx as u32 + 1,
                start,
                end,
                lecture_end: end - chrono::Duration::days(14),
                exam_start: end - chrono::Duration::days(13),
                exam_end: end,
                re_exam_start: end + chrono::Duration::days(21),
                re_exam_end: end + chrono::Duration::days(28),
            })
            .collect()
    }

    #[test]
    fn projection_spans_the_whole_cycle() {
        let periods = quarters();
        let grid = TimeGrid::new(&periods, 50.0, 1000.0).unwrap_or_else(|_| unreachable!());
        assert_eq!(grid.pixel(periods[0].start), 50.0);
        assert_eq!(grid.pixel(periods[3].re_exam_end), 1050.0);
        assert_eq!(grid.ordinal(3), Some(2));
        assert_eq!(grid.period_id(0), Some(1));
    }

    #[test]
    fn clamped_projection_stays_on_the_axis() {
        let periods = quarters();
        let grid = TimeGrid::new(&periods, 50.0, 1000.0).unwrap_or_else(|_| unreachable!());
        let before = periods[0].start - chrono::Duration::days(30);
        let after = periods[3].re_exam_end + chrono::Duration::days(30);
        assert!(grid.pixel(before) < 50.0);
        assert_eq!(grid.pixel_clamped(before), 50.0);
        assert_eq!(grid.pixel_clamped(after), 1050.0);
        assert_eq!(grid.pixel_clamped(periods[2].start), grid.pixel(periods[2].start));
    }

    #[test]
    fn projection_is_strictly_monotonic() {
        let periods = quarters();
        let grid = TimeGrid::new(&periods, 0.0, 800.0).unwrap_or_else(|_| unreachable!());
        let mut day = periods[0].start;
        let mut prev = f64::NEG_INFINITY;
        while day <= periods[3].re_exam_end {
            let x = grid.pixel(day);
            assert!(x > prev);
            prev = x;
            day += chrono::Duration::days(1);
        }
    }

    #[test]
    fn columns_do_not_overlap() {
        let grid = TimeGrid::new(&quarters(), 0.0, 800.0).unwrap_or_else(|_| unreachable!());
        for ordinal in 1..grid.len() {
            let prev = grid.bar_span(ordinal - 1, 10.0, 1.0);
            let next = grid.bar_span(ordinal, 10.0, 1.0);
            assert!(matches!((prev, next), (Some(a), Some(b)) if a.end < b.start));
        }
    }

    #[test]
    fn rejects_unordered_periods() {
        let mut periods = quarters();
        periods.swap(1, 2);
        assert_eq!(
            TimeGrid::new(&periods, 0.0, 800.0),
            Err(GridError::NotChronological {
                previous: 3,
                next: 2
            })
        );
    }

    #[test]
    fn rejects_inverted_duplicate_and_empty() {
        let mut periods = quarters();
        periods[2].end = periods[2].start;
        assert!(matches!(
            TimeGrid::new(&periods, 0.0, 800.0),
            Err(GridError::InvertedPeriod { id: 3, .. })
        ));

        let mut periods = quarters();
        periods[1].id = 1;
        assert_eq!(
            TimeGrid::new(&periods, 0.0, 800.0),
            Err(GridError::DuplicatePeriod { id: 1 })
        );

        assert_eq!(TimeGrid::new(&[], 0.0, 800.0), Err(GridError::Empty));
        assert_eq!(
            TimeGrid::new(&quarters(), 0.0, 0.0),
            Err(GridError::DegenerateWidth(0.0))
        );
    }

    #[test]
    fn narrow_columns_clamp_to_min_extent() {
        let grid = TimeGrid::new(&quarters(), 0.0, 800.0).unwrap_or_else(|_| unreachable!());
        let span = grid.bar_span(0, 500.0, 2.0).unwrap_or(Span::between(0.0, 0.0));
        assert!((span.len() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn milestones_follow_period_dates() {
        let grid = TimeGrid::new(&quarters(), 0.0, 800.0).unwrap_or_else(|_| unreachable!());
        let m = grid.milestones(2).unwrap_or_else(|| unreachable!());
        assert!(m.start < m.lecture_end && m.lecture_end < m.end);
        assert!(m.exam.end <= m.re_exam.start);
        assert!(grid.milestones(9).is_none());
    }
}
