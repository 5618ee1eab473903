pub mod course;
pub mod period;
pub mod plan;

pub use course::{Course, CourseCreditSlot, CreditSlot};
pub use period::PeriodDefinition;
pub use plan::{CourseIndex, StudyPlan};
