use serde::{Deserialize, Serialize};
use studyline_protocol::{CourseId, PrerequisiteKind};

/// Credits a course books in one period of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditSlot {
    /// Academic year, starting at 1.
    pub year: u32,
    /// Period id as defined by the period table.
    pub period: u32,
    pub credits: f64,
}

/// A course as handed over by the data-loading side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Short course code. Prerequisites may reference a course by code
    /// instead of id.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    pub slots: Vec<CreditSlot>,
    #[serde(default)]
    pub completion_prereqs: Vec<String>,
    #[serde(default)]
    pub participation_prereqs: Vec<String>,
}

impl Course {
    pub fn new(id: &str) -> Self {
        Self {
            id: CourseId::new(id),
            code: None,
            name: String::new(),
            slots: Vec::new(),
            completion_prereqs: Vec::new(),
            participation_prereqs: Vec::new(),
        }
    }

    pub fn with_slot(mut self, year: u32, period: u32, credits: f64) -> Self {
        self.slots.push(CreditSlot {
            year,
            period,
            credits,
        });
        self
    }

    pub fn requires(mut self, kind: PrerequisiteKind, reference: &str) -> Self {
        match kind {
            PrerequisiteKind::Completion => self.completion_prereqs.push(reference.to_string()),
            PrerequisiteKind::Participation => {
                self.participation_prereqs.push(reference.to_string());
            }
        }
        self
    }

    /// Prerequisite references of both kinds, completion first.
    pub fn prerequisites(&self) -> impl Iterator<Item = (PrerequisiteKind, &str)> {
        self.completion_prereqs
            .iter()
            .map(|r| (PrerequisiteKind::Completion, r.as_str()))
            .chain(
                self.participation_prereqs
                    .iter()
                    .map(|r| (PrerequisiteKind::Participation, r.as_str())),
            )
    }
}

/// A slot flattened together with its owning course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCreditSlot {
    pub course_id: CourseId,
    pub year: u32,
    pub period: u32,
    pub credits: f64,
}
