//! Projection of the in-memory career into the shape the frontend paints
//! from. Every derived flag is recomputed from scratch on each call, so the
//! frontend never reads state back out of its own widgets.

use serde::Serialize;

use crate::model::Career;
use crate::prereq;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    pub course_id: String,
    pub name: String,
    /// Display name of the prerequisite, empty when there is none.
    pub prerequisite: String,
    pub completed: bool,
    pub prerequisite_pending: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterView {
    pub number: u32,
    /// At least one course and all of them completed. An empty semester is
    /// never shown as complete.
    pub completed: bool,
    pub courses: Vec<CourseView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerView {
    pub career_name: String,
    pub semesters: Vec<SemesterView>,
}

pub fn render(career: &Career) -> CareerView {
    CareerView {
        career_name: career.name.clone(),
        semesters: career
            .semesters
            .iter()
            .map(|semester| SemesterView {
                number: semester.number,
                completed: !semester.courses.is_empty()
                    && semester.courses.iter().all(|c| c.completed),
                courses: semester
                    .courses
                    .iter()
                    .map(|course| CourseView {
                        course_id: course.id.clone(),
                        name: course.name.clone(),
                        prerequisite: career.prerequisite_display(course),
                        completed: course.completed,
                        prerequisite_pending: prereq::pending_prerequisite(career, course),
                    })
                    .collect(),
            })
            .collect(),
    }
}
