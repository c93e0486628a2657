use axum::{
    Extension, Json,
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use reqwest::Url;
use serde_json::Value;

use crate::{
    config::CallbackMode,
    error::ApiError,
    server::AppState,
    spotify::{self, auth::TokenGrant},
    success,
    types::{CallbackParams, CallbackResponse},
    warning,
};

/// Completes the authorization-code flow.
///
/// In JSON mode the upstream token response is returned under `token_data`,
/// together with the user's profile when it can be fetched. In redirect
/// mode the user agent is sent to the frontend with `?token=` appended.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> Result<Response, ApiError> {
    if let Some(error) = params.error {
        warning!("Authorization denied: {}", error);
        return Err(ApiError::Rejected {
            error: "Authorization denied".to_string(),
            details: Value::String(error),
        });
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Err(ApiError::BadRequest(
            "Missing authorization code".to_string(),
        ));
    };

    let TokenGrant {
        access_token,
        token_data,
    } = spotify::auth::exchange_code(&state.spotify, &state.config, &code).await?;
    success!("Token exchange succeeded");

    match state.config.callback_mode {
        CallbackMode::Json => {
            let user_profile =
                match spotify::auth::user_profile(&state.spotify, &state.config, &access_token)
                    .await
                {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        warning!("Could not fetch user profile: {}", e);
                        None
                    }
                };

            Ok(Json(CallbackResponse {
                token_data,
                user_profile,
            })
            .into_response())
        }
        CallbackMode::Redirect => {
            let frontend = state.config.frontend_url.as_deref().ok_or_else(|| {
                ApiError::Internal("redirect callback without a frontend URL".to_string())
            })?;
            let mut url = Url::parse(frontend)
                .map_err(|e| ApiError::Internal(format!("invalid frontend URL: {e}")))?;
            url.query_pairs_mut().append_pair("token", &access_token);

            Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response())
        }
    }
}
