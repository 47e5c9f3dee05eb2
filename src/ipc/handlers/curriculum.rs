use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::Career;
use crate::{store, view};
use serde_json::json;

/// Shown when the setup form leaves the career name blank.
const DEFAULT_CAREER_NAME: &str = "Untitled career";

fn handle_curriculum_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    if state.career.is_some() {
        // The career is created once and mutated in place; re-running setup
        // would silently drop the existing grid.
        return err(
            &req.id,
            "curriculum_exists",
            "a curriculum already exists in this workspace",
            None,
        );
    }

    let semester_count = match req
        .params
        .get("semesterCount")
        .and_then(|v| v.as_i64())
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
    {
        Some(n) => n,
        None => {
            return err(
                &req.id,
                "bad_params",
                "semesterCount must be a positive integer",
                None,
            )
        }
    };

    let career_name = req
        .params
        .get("careerName")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_CAREER_NAME);

    let career = Career::new(career_name, semester_count);
    if let Err(e) = store::save_career(conn, &career) {
        return err(&req.id, "store_write_failed", e.to_string(), None);
    }

    tracing::info!(career = career_name, semesters = semester_count, "curriculum created");
    let rendered = view::render(&career);
    state.career = Some(career);
    ok(&req.id, json!({ "view": rendered }))
}

fn handle_curriculum_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.db.is_none() {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    }
    match state.career.as_ref() {
        Some(career) => ok(
            &req.id,
            json!({ "exists": true, "view": view::render(career) }),
        ),
        None => ok(&req.id, json!({ "exists": false })),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "curriculum.create" => Some(handle_curriculum_create(state, req)),
        "curriculum.get" => Some(handle_curriculum_get(state, req)),
        _ => None,
    }
}
