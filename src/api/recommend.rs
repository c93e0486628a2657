use axum::{Extension, Json, extract::rejection::JsonRejection};
use serde_json::Value;

use crate::{
    error::ApiError,
    info, recommend as proxy,
    server::AppState,
    types::{RecommendRequest, RecommendResponse},
};

/// Translates the posted mood selection and proxies it to Spotify.
///
/// Validation runs before any upstream call: a missing token or an empty
/// mood list is answered with `400` straight away.
pub async fn recommend(
    Extension(state): Extension<AppState>,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::Rejected {
        error: "Invalid request body".to_string(),
        details: Value::String(rejection.body_text()),
    })?;

    let query = request.validate()?;
    let mode = state.config.recommend_mode;
    info!("Recommending ({}) for moods {:?}", mode, query.moods);

    let response = proxy::recommend(&state.spotify, &state.config, mode, &query).await?;
    info!("Returning {} results", response.len());
    Ok(Json(response))
}
