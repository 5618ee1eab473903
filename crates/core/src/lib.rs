pub mod baseline;
pub mod config;
pub mod connectors;
pub mod error;
pub mod grid;
pub mod model;
pub mod pipeline;
pub mod router;
pub mod stack;
pub mod svg;

pub use baseline::LayoutBaseline;
pub use config::{LayerVisibility, LayoutConfig};
pub use error::{GridError, LayoutError};
pub use grid::TimeGrid;
pub use model::{Course, CreditSlot, PeriodDefinition, StudyPlan};
pub use pipeline::{LayoutSession, layout_plan};
