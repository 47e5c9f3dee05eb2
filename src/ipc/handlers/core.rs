use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store;
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    let conn = match store::open_store(&path) {
        Ok(conn) => conn,
        Err(e) => return err(&req.id, "store_open_failed", format!("{e:?}"), None),
    };

    // Hydrate whatever curriculum the workspace already holds; an absent or
    // unreadable blob just means the frontend shows the setup flow.
    let career = match store::load_career(&conn) {
        Ok(career) => career,
        Err(e) => return err(&req.id, "store_read_failed", format!("{e:?}"), None),
    };

    let has_curriculum = career.is_some();
    state.workspace = Some(path.clone());
    state.db = Some(conn);
    state.career = career;

    tracing::info!(path = %path.display(), has_curriculum, "workspace selected");
    ok(
        &req.id,
        json!({
            "workspacePath": path.to_string_lossy(),
            "hasCurriculum": has_curriculum
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        _ => None,
    }
}
