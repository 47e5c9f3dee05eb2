use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::Career;
use crate::{prereq, store, view};
use rusqlite::Connection;
use serde_json::json;

fn open_curriculum(
    state: &mut AppState,
) -> Result<(&Connection, &mut Career), (&'static str, &'static str)> {
    let AppState { db, career, .. } = state;
    let Some(conn) = db.as_ref() else {
        return Err(("no_workspace", "select a workspace first"));
    };
    let Some(career) = career.as_mut() else {
        return Err(("no_curriculum", "create a curriculum first"));
    };
    Ok((conn, career))
}

/// Writes the career back to the store. On failure the pre-mutation snapshot
/// is restored so the action is either fully applied or not at all.
fn persist(
    conn: &Connection,
    career: &mut Career,
    snapshot: Career,
    req_id: &str,
) -> Result<(), serde_json::Value> {
    if let Err(e) = store::save_career(conn, career) {
        *career = snapshot;
        return Err(err(req_id, "store_write_failed", e.to_string(), None));
    }
    Ok(())
}

fn param_course_id(req: &Request) -> Result<String, serde_json::Value> {
    match req.params.get("courseId").and_then(|v| v.as_str()) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(err(&req.id, "bad_params", "missing courseId", None)),
    }
}

fn handle_courses_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (conn, career) = match open_curriculum(state) {
        Ok(v) => v,
        Err((code, msg)) => return err(&req.id, code, msg, None),
    };

    let semester = match req
        .params
        .get("semester")
        .and_then(|v| v.as_u64())
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
    {
        Some(n) => n,
        None => {
            return err(
                &req.id,
                "bad_params",
                "semester must be a positive integer",
                None,
            )
        }
    };
    let name = match req.params.get("name").and_then(|v| v.as_str()) {
        Some(v) => v.trim().to_string(),
        None => return err(&req.id, "bad_params", "missing name", None),
    };
    if name.is_empty() {
        return err(&req.id, "bad_params", "name must not be empty", None);
    }

    let snapshot = career.clone();
    let Some(course_id) = career.add_course(semester, &name) else {
        return err(
            &req.id,
            "bad_params",
            format!("no semester {semester} in this curriculum"),
            None,
        );
    };
    if let Err(resp) = persist(conn, career, snapshot, &req.id) {
        return resp;
    }

    ok(
        &req.id,
        json!({ "courseId": course_id, "view": view::render(career) }),
    )
}

fn handle_toggle_complete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (conn, career) = match open_curriculum(state) {
        Ok(v) => v,
        Err((code, msg)) => return err(&req.id, code, msg, None),
    };
    let course_id = match param_course_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let next = {
        let Some(course) = career.course(&course_id) else {
            return err(&req.id, "not_found", "course not found", None);
        };
        if course.completed {
            if !prereq::can_uncomplete(career, course) {
                return err(
                    &req.id,
                    "completed_dependents",
                    "unmark the completed courses that depend on this one first",
                    None,
                );
            }
            false
        } else {
            if !prereq::can_complete(career, course) {
                return err(
                    &req.id,
                    "prerequisite_unmet",
                    "complete its prerequisite first",
                    None,
                );
            }
            true
        }
    };

    let snapshot = career.clone();
    career.set_completed(&course_id, next);
    if let Err(resp) = persist(conn, career, snapshot, &req.id) {
        return resp;
    }

    ok(
        &req.id,
        json!({ "completed": next, "view": view::render(career) }),
    )
}

fn handle_prerequisite_options(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (_, career) = match open_curriculum(state) {
        Ok(v) => v,
        Err((code, msg)) => return err(&req.id, code, msg, None),
    };
    let course_id = match param_course_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(semester) = career.semester_of(&course_id) else {
        return err(&req.id, "not_found", "course not found", None);
    };

    // Only strictly earlier semesters are offered, like the original edit
    // surface; the model itself does not enforce the ordering.
    let options: Vec<serde_json::Value> = career
        .earlier_courses(semester)
        .into_iter()
        .map(|c| json!({ "courseId": c.id, "name": c.name }))
        .collect();

    ok(&req.id, json!({ "options": options }))
}

fn handle_courses_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (conn, career) = match open_curriculum(state) {
        Ok(v) => v,
        Err((code, msg)) => return err(&req.id, code, msg, None),
    };
    let course_id = match param_course_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if career.course(&course_id).is_none() {
        return err(&req.id, "not_found", "course not found", None);
    }

    let new_name = match req.params.get("name") {
        None => None,
        Some(v) => {
            let Some(s) = v.as_str() else {
                return err(&req.id, "bad_params", "name must be a string", None);
            };
            let s = s.trim();
            if s.is_empty() {
                return err(&req.id, "bad_params", "name must not be empty", None);
            }
            Some(s.to_string())
        }
    };

    // Absent key leaves the link alone; null or "" clears it. A target may
    // live in any semester (the options list scopes, the model does not).
    let new_prereq: Option<Option<String>> = match req.params.get("prerequisiteId") {
        None => None,
        Some(v) if v.is_null() => Some(None),
        Some(v) => {
            let Some(s) = v.as_str() else {
                return err(
                    &req.id,
                    "bad_params",
                    "prerequisiteId must be a string or null",
                    None,
                );
            };
            if s.is_empty() {
                Some(None)
            } else if s == course_id {
                return err(
                    &req.id,
                    "bad_params",
                    "a course cannot be its own prerequisite",
                    None,
                );
            } else if career.course(s).is_none() {
                return err(&req.id, "not_found", "prerequisite course not found", None);
            } else {
                Some(Some(s.to_string()))
            }
        }
    };

    let snapshot = career.clone();
    if let Some(name) = &new_name {
        career.rename_course(&course_id, name);
    }
    if let Some(target) = new_prereq {
        career.set_prerequisite(&course_id, target);
    }
    if let Err(resp) = persist(conn, career, snapshot, &req.id) {
        return resp;
    }

    ok(&req.id, json!({ "view": view::render(career) }))
}

fn handle_courses_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (conn, career) = match open_curriculum(state) {
        Ok(v) => v,
        Err((code, msg)) => return err(&req.id, code, msg, None),
    };
    let course_id = match param_course_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    // Destructive and irreversible, so the frontend must pass the user's
    // confirmation through explicitly. Declining has zero side effects.
    if req.params.get("confirm").and_then(|v| v.as_bool()) != Some(true) {
        return err(
            &req.id,
            "confirm_required",
            "deletion must be explicitly confirmed",
            None,
        );
    }
    if career.course(&course_id).is_none() {
        return err(&req.id, "not_found", "course not found", None);
    }

    let snapshot = career.clone();
    career.remove_course(&course_id);
    if let Err(resp) = persist(conn, career, snapshot, &req.id) {
        return resp;
    }

    ok(&req.id, json!({ "view": view::render(career) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "courses.add" => Some(handle_courses_add(state, req)),
        "courses.toggleComplete" => Some(handle_toggle_complete(state, req)),
        "courses.prerequisiteOptions" => Some(handle_prerequisite_options(state, req)),
        "courses.update" => Some(handle_courses_update(state, req)),
        "courses.delete" => Some(handle_courses_delete(state, req)),
        _ => None,
    }
}
