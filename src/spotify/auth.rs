use reqwest::Url;
use serde_json::Value;

use crate::{config::Config, error::ApiError, spotify::SpotifyClient, utils, warning};

/// Builds the authorization URL the user agent is redirected to.
///
/// The URL carries `client_id`, `response_type=code`, `redirect_uri` and
/// `scope`, URL-encoded.
///
/// # Errors
///
/// Fails only if the configured authorization endpoint is not a valid URL,
/// which `Config::validate` already rejects at startup.
pub fn authorize_url(config: &Config) -> Result<Url, ApiError> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
        ],
    )
    .map_err(|e| ApiError::Internal(format!("invalid authorization URL: {e}")))
}

/// A successful token exchange.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: String,
    /// The upstream token response as-is.
    pub token_data: Value,
}

/// Exchanges an authorization code for a token at the accounts service.
///
/// A response without a string `access_token`, or with a non-success
/// status, becomes [`ApiError::Rejected`] carrying the upstream body
/// verbatim under `details`.
pub async fn exchange_code(
    client: &SpotifyClient,
    config: &Config,
    code: &str,
) -> Result<TokenGrant, ApiError> {
    let response = client
        .http()
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = utils::body_to_value(&response.text().await?);

    let token = access_token(&body).map(str::to_string);
    match token {
        Some(access_token) if status.is_success() => Ok(TokenGrant {
            access_token,
            token_data: body,
        }),
        _ => {
            warning!("Token exchange failed with {}", status);
            Err(ApiError::Rejected {
                error: "Failed to obtain access token".to_string(),
                details: body,
            })
        }
    }
}

/// The `access_token` of a token response, if present and non-empty.
pub fn access_token(token_data: &Value) -> Option<&str> {
    token_data["access_token"]
        .as_str()
        .filter(|token| !token.is_empty())
}

/// Fetches the current user's profile (`GET /me`).
pub async fn user_profile(
    client: &SpotifyClient,
    config: &Config,
    token: &str,
) -> Result<Value, ApiError> {
    client
        .get_json(&config.api_endpoint("me"), token, &[] as &[(&str, &str)])
        .await
}
