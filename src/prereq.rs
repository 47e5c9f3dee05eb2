//! Completion-order rules, as pure predicates over the whole course set.
//! Semester boundaries play no part here, and only one hop is ever checked:
//! completing A with prerequisite B looks at B's flag, never at B's own
//! prerequisite chain.

use crate::model::{Career, Course, PrereqRef};

/// Whether a course may be marked completed: no prerequisite, or the
/// prerequisite is itself completed. Unresolved links fall back to matching
/// some other course by name, the way the legacy data behaved; if no such
/// course exists the link is never satisfiable until the course is re-edited.
pub fn can_complete(career: &Career, course: &Course) -> bool {
    match &course.prereq {
        None => true,
        Some(PrereqRef::Course(id)) => {
            career.course(id).map(|c| c.completed).unwrap_or(false)
        }
        Some(PrereqRef::Unresolved(name)) => career
            .courses()
            .any(|c| c.id != course.id && c.name == *name && c.completed),
    }
}

/// Whether a completed course may be unmarked: nothing completed may still
/// depend on it, whether through an id link or an unresolved name match.
pub fn can_uncomplete(career: &Career, course: &Course) -> bool {
    !career.courses().any(|other| {
        other.completed
            && match &other.prereq {
                None => false,
                Some(PrereqRef::Course(id)) => *id == course.id,
                Some(PrereqRef::Unresolved(name)) => {
                    *name == course.name && other.id != course.id
                }
            }
    })
}

/// Visual flag only, never blocks an action: the course wants a prerequisite
/// that is not yet satisfied.
pub fn pending_prerequisite(career: &Career, course: &Course) -> bool {
    course.prereq.is_some() && !course.completed && !can_complete(career, course)
}
