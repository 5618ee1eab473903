use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::course::{Course, CourseCreditSlot};
use super::period::PeriodDefinition;

/// The complete input of a layout pass: the period table and the courses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub periods: Vec<PeriodDefinition>,
    pub courses: Vec<Course>,
}

impl StudyPlan {
    pub fn new(periods: Vec<PeriodDefinition>, courses: Vec<Course>) -> Self {
        Self { periods, courses }
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// All credit slots in first-seen order: courses in input order, slots
    /// in the order each course lists them.
    pub fn credit_slots(&self) -> Vec<CourseCreditSlot> {
        self.courses
            .iter()
            .flat_map(|course| {
                course.slots.iter().map(|slot| CourseCreditSlot {
                    course_id: course.id.clone(),
                    year: slot.year,
                    period: slot.period,
                    credits: slot.credits,
                })
            })
            .collect()
    }

    /// Highest year any course books credits in.
    pub fn year_count(&self) -> u32 {
        self.courses
            .iter()
            .flat_map(|c| c.slots.iter().map(|s| s.year))
            .max()
            .unwrap_or(0)
    }

    pub fn references(&self) -> CourseIndex<'_> {
        CourseIndex::new(&self.courses)
    }
}

/// Resolves prerequisite references to courses, by id first and by code
/// second.
#[derive(Debug)]
pub struct CourseIndex<'a> {
    by_id: HashMap<&'a str, &'a Course>,
    by_code: HashMap<&'a str, &'a Course>,
}

impl<'a> CourseIndex<'a> {
    pub fn new(courses: &'a [Course]) -> Self {
        let mut by_id = HashMap::with_capacity(courses.len());
        let mut by_code = HashMap::new();
        for course in courses.iter().filter(|c| !c.id.is_blank()) {
            by_id.entry(course.id.as_str()).or_insert(course);
            if let Some(code) = course.code.as_deref().map(str::trim)
                && !code.is_empty()
            {
                by_code.entry(code).or_insert(course);
            }
        }
        Self { by_id, by_code }
    }

    pub fn resolve(&self, reference: &str) -> Option<&'a Course> {
        let reference = reference.trim();
        self.by_id
            .get(reference)
            .or_else(|| self.by_code.get(reference))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_id_then_code() {
        let mut algebra = Course::new("c-1");
        algebra.code = Some("ALG".into());
        let mut other = Course::new("ALG");
        other.name = "id collides with a code".into();
        let courses = vec![algebra, other];
        let index = CourseIndex::new(&courses);

        assert_eq!(index.resolve("c-1").map(|c| c.id.as_str()), Some("c-1"));
        // An id match wins over a code match.
        assert_eq!(index.resolve(" ALG ").map(|c| c.id.as_str()), Some("ALG"));
        assert!(index.resolve("missing").is_none());
    }

    #[test]
    fn blank_ids_and_codes_never_resolve() {
        let mut unnamed = Course::new("  ");
        unnamed.code = Some(" ".into());
        let courses = vec![unnamed, Course::new("A")];
        let index = CourseIndex::new(&courses);
        assert!(index.resolve("").is_none());
        assert!(index.resolve(" ").is_none());
        assert!(index.resolve("A").is_some());
    }

    #[test]
    fn flattens_slots_in_first_seen_order() {
        let plan = StudyPlan::new(
            Vec::new(),
            vec![
                Course::new("B").with_slot(1, 2, 5.0).with_slot(1, 1, 5.0),
                Course::new("A").with_slot(2, 1, 7.5),
            ],
        );
        let order: Vec<_> = plan
            .credit_slots()
            .iter()
            .map(|s| (s.course_id.to_string(), s.period))
            .collect();
        assert_eq!(
            order,
            vec![("B".to_string(), 2), ("B".to_string(), 1), ("A".to_string(), 1)]
        );
        assert_eq!(plan.year_count(), 2);
    }
}
