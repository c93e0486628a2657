use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use moodic::{
    config::{CallbackMode, Config, RecommendMode},
    server::{AppState, build_router},
};
use reqwest::Url;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_string_contains, header as header_is, method, path, query_param},
};

fn test_config(server: &MockServer) -> Config {
    let mut config = Config::new("client-123", "secret-456", "http://127.0.0.1:5000/callback");
    config.auth_url = format!("{}/authorize", server.uri());
    config.token_url = format!("{}/api/token", server.uri());
    config.api_url = format!("{}/v1", server.uri());
    config
}

fn app(config: Config) -> Router {
    let config = config.validate().expect("valid test config");
    build_router(AppState::new(config).expect("http client"))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn location(response: &axum::response::Response) -> Url {
    let value = response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap();
    Url::parse(value).expect("absolute redirect target")
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

async fn forbid_upstream(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

fn three_tracks() -> Value {
    json!({
        "tracks": {
            "items": [
                {
                    "id": "t1",
                    "name": "Sunny Side",
                    "artists": [{ "name": "The Brights" }],
                    "preview_url": "https://p.scdn.co/mp3-preview/t1",
                    "album": { "images": [{ "url": "https://i.scdn.co/image/t1" }] }
                },
                {
                    "id": "t2",
                    "name": "Quiet Hours",
                    "artists": [{ "name": "Low Tide" }],
                    "preview_url": null,
                    "album": { "images": [{ "url": "https://i.scdn.co/image/t2" }] }
                },
                {
                    "id": "t3",
                    "name": "Bare Walls",
                    "artists": [{ "name": "Plain" }],
                    "preview_url": "https://p.scdn.co/mp3-preview/t3",
                    "album": { "images": [] }
                }
            ]
        }
    })
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn test_index_is_alive() {
    let server = MockServer::start().await;
    let response = app(test_config(&server)).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Moodic backend is running");
}

#[tokio::test]
async fn test_health_reports_version() {
    let server = MockServer::start().await;
    let response = app(test_config(&server)).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_redirects_to_authorization() {
    let server = MockServer::start().await;
    let config = test_config(&server);
    let response = app(config.clone()).oneshot(get("/login")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let target = location(&response);
    assert_eq!(target.path(), "/authorize");
    assert_eq!(query_value(&target, "client_id").as_deref(), Some("client-123"));
    assert_eq!(query_value(&target, "response_type").as_deref(), Some("code"));
    assert_eq!(
        query_value(&target, "redirect_uri").as_deref(),
        Some("http://127.0.0.1:5000/callback")
    );
    assert_eq!(
        query_value(&target, "scope").as_deref(),
        Some("user-read-private user-read-email")
    );
}

// =============================================================================
// Callback
// =============================================================================

#[tokio::test]
async fn test_callback_returns_token_and_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc"))
        .and(body_string_contains("client_secret=secret-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header_is("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "Listener"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(test_config(&server))
        .oneshot(get("/callback?code=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["token_data"]["access_token"], "tok-1");
    assert_eq!(body["user_profile"]["display_name"], "Listener");
}

#[tokio::test]
async fn test_callback_omits_profile_when_it_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-1" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let response = app(test_config(&server))
        .oneshot(get("/callback?code=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["token_data"]["access_token"], "tok-1");
    assert!(body.get("user_profile").is_none());
}

#[tokio::test]
async fn test_callback_without_access_token_echoes_upstream() {
    let server = MockServer::start().await;
    let upstream = json!({
        "error": "invalid_grant",
        "error_description": "Invalid authorization code"
    });
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(upstream.clone()))
        .mount(&server)
        .await;

    let response = app(test_config(&server))
        .oneshot(get("/callback?code=expired"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Failed to obtain access token");
    assert_eq!(body["details"], upstream);
}

#[tokio::test]
async fn test_callback_success_status_without_token_is_still_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })))
        .mount(&server)
        .await;

    let response = app(test_config(&server))
        .oneshot(get("/callback?code=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["details"], json!({ "token_type": "Bearer" }));
}

#[tokio::test]
async fn test_callback_without_code_never_calls_upstream() {
    let server = MockServer::start().await;
    forbid_upstream(&server).await;

    let response = app(test_config(&server))
        .oneshot(get("/callback"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Missing authorization code");
}

#[tokio::test]
async fn test_callback_reports_denied_consent() {
    let server = MockServer::start().await;
    forbid_upstream(&server).await;

    let response = app(test_config(&server))
        .oneshot(get("/callback?error=access_denied"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Authorization denied");
    assert_eq!(body["details"], "access_denied");
}

#[tokio::test]
async fn test_callback_redirect_mode_hands_token_to_frontend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok 2" })))
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.callback_mode = CallbackMode::Redirect;
    config.frontend_url = Some("http://localhost:3000/player".to_string());

    let response = app(config).oneshot(get("/callback?code=abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let target = location(&response);
    assert_eq!(target.host_str(), Some("localhost"));
    assert_eq!(target.path(), "/player");
    assert_eq!(query_value(&target, "token").as_deref(), Some("tok 2"));
}

#[tokio::test]
async fn test_callback_exchange_timeout_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.upstream_timeout = Duration::from_millis(300);

    let response = app(config).oneshot(get("/callback?code=abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Spotify API request timed out");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_callback_unreachable_token_endpoint_is_bad_gateway() {
    let server = MockServer::start().await;
    let mut config = test_config(&server);
    // nothing listens on the discard port
    config.token_url = "http://127.0.0.1:9/api/token".to_string();

    let response = app(config).oneshot(get("/callback?code=abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Spotify API unreachable");
}

// =============================================================================
// Recommend: validation
// =============================================================================

#[tokio::test]
async fn test_recommend_without_moods_is_rejected() {
    let server = MockServer::start().await;
    forbid_upstream(&server).await;
    let app = app(test_config(&server));

    for body in [
        json!({ "token": "tok" }),
        json!({ "token": "tok", "moods": [] }),
        json!({ "token": "tok", "moods": ["", "  "] }),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/recommend", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "Missing token or moods");
    }
}

#[tokio::test]
async fn test_recommend_without_token_is_rejected() {
    let server = MockServer::start().await;
    forbid_upstream(&server).await;
    let app = app(test_config(&server));

    for body in [
        json!({ "moods": ["happy"] }),
        json!({ "token": "", "moods": ["happy"] }),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/recommend", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "Missing token or moods");
    }
}

#[tokio::test]
async fn test_recommend_with_invalid_json_is_rejected() {
    let server = MockServer::start().await;
    forbid_upstream(&server).await;

    let request = Request::builder()
        .method("POST")
        .uri("/recommend")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(test_config(&server)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Invalid request body");
}

// =============================================================================
// Recommend: search mode
// =============================================================================

#[tokio::test]
async fn test_search_mode_filters_unplayable_tracks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "happy upbeat"))
        .and(query_param("type", "track"))
        .and(header_is("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_tracks()))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(test_config(&server))
        .oneshot(post_json(
            "/recommend",
            json!({ "token": "tok", "moods": ["Happy"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let tracks = body["tracks"].as_array().expect("tracks array");
    assert_eq!(tracks.len(), 2);
    for track in tracks {
        for field in ["name", "artist", "preview_url", "image"] {
            assert!(track[field].is_string(), "{field} missing in {track}");
        }
    }
    assert_eq!(tracks[1]["name"], "Bare Walls");
    assert_eq!(tracks[1]["image"], "");
}

#[tokio::test]
async fn test_search_mode_queries_each_mood_and_dedupes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "happy upbeat hindi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_tracks()))
        .expect(1)
        .mount(&server)
        .await;
    // raw label text for an unknown mood
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "nostalgic hindi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_tracks()))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(test_config(&server))
        .oneshot(post_json(
            "/recommend",
            json!({ "token": "tok", "moods": ["happy", "nostalgic"], "language": "Hindi" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["tracks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_upstream_failure_surfaces_status_and_body() {
    let server = MockServer::start().await;
    let upstream = json!({ "error": { "status": 401, "message": "The access token expired" } });
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(upstream.clone()))
        .mount(&server)
        .await;

    let response = app(test_config(&server))
        .oneshot(post_json(
            "/recommend",
            json!({ "token": "stale", "moods": ["sad"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], 401);
    assert_eq!(body["details"], upstream);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_search_timeout_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(three_tracks())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.upstream_timeout = Duration::from_millis(300);

    let response = app(config)
        .oneshot(post_json(
            "/recommend",
            json!({ "token": "tok", "moods": ["happy"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Spotify API request timed out");
}

// =============================================================================
// Recommend: recommendations mode
// =============================================================================

#[tokio::test]
async fn test_recommendations_mode_sends_seeds_and_bounds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .and(query_param("seed_genres", "pop,happy,dance"))
        .and(query_param("min_valence", "0.6"))
        .and(query_param("min_energy", "0.5"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": three_tracks()["tracks"]["items"].clone()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.recommend_mode = RecommendMode::Recommendations;
    config.filter_unplayable = false;

    let response = app(config)
        .oneshot(post_json(
            "/recommend",
            json!({ "token": "tok", "moods": ["happy"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let tracks = body["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 3);
    assert!(tracks[1]["preview_url"].is_null());
}

#[tokio::test]
async fn test_recommendations_mode_unknown_moods_skip_upstream() {
    let server = MockServer::start().await;
    forbid_upstream(&server).await;

    let mut config = test_config(&server);
    config.recommend_mode = RecommendMode::Recommendations;

    let response = app(config)
        .oneshot(post_json(
            "/recommend",
            json!({ "token": "tok", "moods": ["nostalgic", "sleepy"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({ "tracks": [] }));
}

#[tokio::test]
async fn test_recommendations_mode_language_alone_skips_upstream() {
    let server = MockServer::start().await;
    forbid_upstream(&server).await;

    let mut config = test_config(&server);
    config.recommend_mode = RecommendMode::Recommendations;

    let response = app(config)
        .oneshot(post_json(
            "/recommend",
            json!({ "token": "tok", "moods": ["nostalgic"], "language": "hindi" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({ "tracks": [] }));
}

// =============================================================================
// Recommend: playlists mode
// =============================================================================

#[tokio::test]
async fn test_playlists_mode_skips_null_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("type", "playlist"))
        .and(query_param("q", "calm chill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playlists": {
                "items": [
                    null,
                    {
                        "id": "p1",
                        "name": "Slow Mornings",
                        "images": [{ "url": "https://i/p1" }],
                        "owner": { "display_name": "spotify" },
                        "external_urls": { "spotify": "https://open.spotify.com/playlist/p1" }
                    },
                    { "id": "p2" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.recommend_mode = RecommendMode::Playlists;

    let response = app(config)
        .oneshot(post_json(
            "/recommend",
            json!({ "token": "tok", "moods": ["chill"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "playlists": [{
                "name": "Slow Mornings",
                "image": "https://i/p1",
                "spotify_url": "https://open.spotify.com/playlist/p1",
                "owner": "spotify"
            }]
        })
    );
}
