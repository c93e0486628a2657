use crate::{
    config::Config, error::ApiError, mood::FeatureBounds, spotify::SpotifyClient, types::Track,
    utils,
};

/// Fetches recommendations for the given genre seeds, constrained by the
/// audio-feature bounds (`min_*`/`max_*` query parameters).
///
/// The caller must supply at least one seed; the endpoint rejects requests
/// without one.
pub async fn get_recommendations(
    client: &SpotifyClient,
    config: &Config,
    token: &str,
    seeds: &[String],
    bounds: &FeatureBounds,
    limit: usize,
) -> Result<Vec<Track>, ApiError> {
    let mut query = vec![
        ("seed_genres".to_string(), seeds.join(",")),
        ("limit".to_string(), limit.to_string()),
    ];
    query.extend(bounds.query_pairs());

    let body = client
        .get_json(&config.api_endpoint("recommendations"), token, &query)
        .await?;

    Ok(utils::decode_items(&body, "/tracks"))
}
