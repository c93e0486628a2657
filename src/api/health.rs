use axum::response::Json;
use serde_json::{Value, json};

pub const LIVENESS: &str = "Moodic backend is running";

pub async fn index() -> &'static str {
    LIVENESS
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
