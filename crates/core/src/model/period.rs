use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One academic sub-term with its study, exam and re-exam date ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDefinition {
    /// Ordinal id as used by course slots (e.g. 1..=4).
    pub id: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub lecture_end: NaiveDate,
    pub exam_start: NaiveDate,
    pub exam_end: NaiveDate,
    pub re_exam_start: NaiveDate,
    pub re_exam_end: NaiveDate,
}

impl PeriodDefinition {
    /// Latest instant this period occupies on the time axis.
    pub fn last_instant(&self) -> NaiveDate {
        [
            self.end,
            self.lecture_end,
            self.exam_end,
            self.re_exam_end,
        ]
        .into_iter()
        .max()
        .unwrap_or(self.end)
    }
}
