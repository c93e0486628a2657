use axum::{
    Extension,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{error::ApiError, info, server::AppState, spotify};

/// Answers `302 Found` pointing at the Spotify authorization page.
pub async fn login(Extension(state): Extension<AppState>) -> Result<Response, ApiError> {
    let url = spotify::auth::authorize_url(&state.config)?;
    info!("Redirecting to Spotify authorization");
    Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response())
}
