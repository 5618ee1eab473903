use chrono::NaiveDate;
use thiserror::Error;

/// The period table cannot be projected onto a time axis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("no periods defined")]
    Empty,
    #[error("period {id} is defined more than once")]
    DuplicatePeriod { id: u32 },
    #[error("period {id} does not start before it ends ({start} .. {end})")]
    InvertedPeriod {
        id: u32,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("period {next} does not start after period {previous}")]
    NotChronological { previous: u32, next: u32 },
    #[error("grid width must be a positive finite number, got {0}")]
    DegenerateWidth(f64),
}

/// Fatal errors of a layout pass. Reference errors never end up here; they
/// are dropped, logged and counted in the layout diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("period table: {0}")]
    Grid(#[from] GridError),
}
