use std::{any::Any, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Json, Router,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};

use crate::{Res, api, config::Config, info, spotify::SpotifyClient, warning};

/// Immutable state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spotify: SpotifyClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let spotify = SpotifyClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            spotify,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/recommend", post(api::recommend))
        .layer(Extension(state))
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let (listener, app) = bind_api_server(config).await?;
    run_api_server(listener, app).await
}

/// Binds the listener and builds the router without serving yet.
pub async fn bind_api_server(config: Config) -> Res<(TcpListener, Router)> {
    let addr = SocketAddr::from_str(&config.server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", config.server_addr, e))?;
    let mode = config.recommend_mode;
    let app = build_router(AppState::new(config)?);

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{} (recommend mode: {})", addr, mode);
    Ok((listener, app))
}

pub async fn run_api_server(listener: TcpListener, app: Router) -> Res<()> {
    axum::serve(listener, app).await?;
    Ok(())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(AnyOrigin).allow_headers(AnyOrigin);

    let origin = config
        .frontend_url
        .as_deref()
        .and_then(|url| reqwest::Url::parse(url).ok())
        .map(|url| url.origin().ascii_serialization())
        .and_then(|origin| HeaderValue::from_str(&origin).ok());

    match origin {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(AnyOrigin),
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    warning!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
