use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

use crate::model::Career;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    /// The hydrated curriculum. `None` until a workspace with a saved
    /// curriculum is selected or `curriculum.create` runs.
    pub career: Option<Career>,
}
