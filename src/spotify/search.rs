use crate::{
    config::Config,
    error::ApiError,
    spotify::SpotifyClient,
    types::{Playlist, Track},
    utils,
};

/// Searches the catalog for tracks matching a free-text query.
///
/// Items that fail to decode are skipped; see [`utils::decode_items`].
pub async fn search_tracks(
    client: &SpotifyClient,
    config: &Config,
    token: &str,
    query: &str,
    limit: usize,
) -> Result<Vec<Track>, ApiError> {
    let limit = limit.to_string();
    let body = client
        .get_json(
            &config.api_endpoint("search"),
            token,
            &[("q", query), ("type", "track"), ("limit", limit.as_str())],
        )
        .await?;

    Ok(utils::decode_items(&body, "/tracks/items"))
}

/// Searches the catalog for playlists matching a free-text query.
///
/// Spotify pads playlist results with `null` entries; those are skipped
/// along with any malformed items.
pub async fn search_playlists(
    client: &SpotifyClient,
    config: &Config,
    token: &str,
    query: &str,
    limit: usize,
) -> Result<Vec<Playlist>, ApiError> {
    let limit = limit.to_string();
    let body = client
        .get_json(
            &config.api_endpoint("search"),
            token,
            &[("q", query), ("type", "playlist"), ("limit", limit.as_str())],
        )
        .await?;

    Ok(utils::decode_items(&body, "/playlists/items"))
}
