use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A prerequisite link as held in memory.
///
/// Links are stored by course id so that renaming a course never breaks the
/// courses that depend on it. `Unresolved` carries a prerequisite name from a
/// persisted blob that matched no course at hydration time; it is matched by
/// name at check time, which is how the legacy data behaved.
#[derive(Debug, Clone, PartialEq)]
pub enum PrereqRef {
    Course(String),
    Unresolved(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub prereq: Option<PrereqRef>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Semester {
    /// 1-based, matches position in the grid.
    pub number: u32,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Career {
    pub name: String,
    pub semesters: Vec<Semester>,
}

// Persisted blob shape. This must stay exactly as the original tool wrote it
// (including the `ramos` key) so previously saved curricula keep loading.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerBlob {
    pub career_name: String,
    pub semesters: Vec<SemesterBlob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterBlob {
    pub number: u32,
    pub ramos: Vec<CourseBlob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseBlob {
    pub name: String,
    pub prerequisite: String,
    pub is_completed: bool,
}

impl Career {
    pub fn new(name: impl Into<String>, semester_count: u32) -> Self {
        Self {
            name: name.into(),
            semesters: (1..=semester_count)
                .map(|number| Semester {
                    number,
                    courses: Vec::new(),
                })
                .collect(),
        }
    }

    /// All courses in grid order (semester by semester, top to bottom).
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.semesters.iter().flat_map(|s| s.courses.iter())
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses().find(|c| c.id == id)
    }

    fn course_mut(&mut self, id: &str) -> Option<&mut Course> {
        self.semesters
            .iter_mut()
            .flat_map(|s| s.courses.iter_mut())
            .find(|c| c.id == id)
    }

    /// Semester number the course lives in.
    pub fn semester_of(&self, id: &str) -> Option<u32> {
        self.semesters
            .iter()
            .find(|s| s.courses.iter().any(|c| c.id == id))
            .map(|s| s.number)
    }

    /// Candidate prerequisites for a course in `semester_number`: every course
    /// in a strictly earlier semester, in grid order.
    pub fn earlier_courses(&self, semester_number: u32) -> Vec<&Course> {
        self.semesters
            .iter()
            .filter(|s| s.number < semester_number)
            .flat_map(|s| s.courses.iter())
            .collect()
    }

    /// Appends a course with no prerequisite and returns its id, or `None`
    /// when no such semester exists. Name validation is the caller's job.
    pub fn add_course(&mut self, semester_number: u32, name: &str) -> Option<String> {
        let semester = self
            .semesters
            .iter_mut()
            .find(|s| s.number == semester_number)?;
        let id = Uuid::new_v4().to_string();
        semester.courses.push(Course {
            id: id.clone(),
            name: name.to_string(),
            prereq: None,
            completed: false,
        });
        Some(id)
    }

    /// Removes a course and clears the prerequisite link of every course that
    /// pointed at it, so no in-memory link ever dangles.
    pub fn remove_course(&mut self, id: &str) -> bool {
        let mut removed = false;
        for semester in &mut self.semesters {
            let before = semester.courses.len();
            semester.courses.retain(|c| c.id != id);
            removed |= semester.courses.len() != before;
        }
        if removed {
            for semester in &mut self.semesters {
                for course in &mut semester.courses {
                    if matches!(&course.prereq, Some(PrereqRef::Course(target)) if target == id) {
                        course.prereq = None;
                    }
                }
            }
        }
        removed
    }

    pub fn rename_course(&mut self, id: &str, name: &str) -> bool {
        match self.course_mut(id) {
            Some(course) => {
                course.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Re-targets (or clears) a course's prerequisite link. The target must
    /// already exist; handlers validate that before calling.
    pub fn set_prerequisite(&mut self, id: &str, target: Option<String>) -> bool {
        match self.course_mut(id) {
            Some(course) => {
                course.prereq = target.map(PrereqRef::Course);
                true
            }
            None => false,
        }
    }

    /// Sets the completed flag directly. Whether the transition is allowed is
    /// decided by the caller via the prereq predicates, not here.
    pub fn set_completed(&mut self, id: &str, value: bool) -> bool {
        match self.course_mut(id) {
            Some(course) => {
                course.completed = value;
                true
            }
            None => false,
        }
    }

    /// Display name for a course's prerequisite: the linked course's current
    /// name, the carried-over name for unresolved links, or empty for none.
    pub fn prerequisite_display(&self, course: &Course) -> String {
        match &course.prereq {
            None => String::new(),
            Some(PrereqRef::Unresolved(name)) => name.clone(),
            Some(PrereqRef::Course(id)) => self
                .course(id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }

    pub fn serialize(&self) -> CareerBlob {
        CareerBlob {
            career_name: self.name.clone(),
            semesters: self
                .semesters
                .iter()
                .map(|semester| SemesterBlob {
                    number: semester.number,
                    ramos: semester
                        .courses
                        .iter()
                        .map(|course| CourseBlob {
                            name: course.name.clone(),
                            prerequisite: self.prerequisite_display(course),
                            is_completed: course.completed,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Rebuilds a career from the persisted shape. Prerequisite names resolve
    /// to id links against the first course with that name in grid order,
    /// skipping the course itself; names that match nothing are kept as
    /// unresolved links and written back verbatim on serialize.
    pub fn hydrate(blob: &CareerBlob) -> Self {
        let mut career = Self {
            name: blob.career_name.clone(),
            semesters: blob
                .semesters
                .iter()
                .map(|semester| Semester {
                    number: semester.number,
                    courses: semester
                        .ramos
                        .iter()
                        .map(|ramo| Course {
                            id: Uuid::new_v4().to_string(),
                            name: ramo.name.clone(),
                            prereq: None,
                            completed: ramo.is_completed,
                        })
                        .collect(),
                })
                .collect(),
        };

        // Second pass: link by name now that every course has an id.
        let mut links: Vec<(String, PrereqRef)> = Vec::new();
        for (semester, ramos) in career.semesters.iter().zip(blob.semesters.iter()) {
            for (course, ramo) in semester.courses.iter().zip(ramos.ramos.iter()) {
                if ramo.prerequisite.is_empty() {
                    continue;
                }
                let target = career
                    .courses()
                    .find(|c| c.id != course.id && c.name == ramo.prerequisite);
                let prereq = match target {
                    Some(t) => PrereqRef::Course(t.id.clone()),
                    None => PrereqRef::Unresolved(ramo.prerequisite.clone()),
                };
                links.push((course.id.clone(), prereq));
            }
        }
        for (id, prereq) in links {
            if let Some(course) = career.course_mut(&id) {
                course.prereq = Some(prereq);
            }
        }
        career
    }
}
