//! Mood proxy: validates a mood selection, translates it with the
//! deployment's [`RecommendMode`], queries Spotify and shapes the result.

use futures::future::try_join_all;

use crate::{
    config::{Config, RecommendMode},
    error::ApiError,
    info, mood,
    spotify::{SpotifyClient, recommendations, search},
    types::{MoodQuery, RecommendRequest, RecommendResponse},
    utils,
};

pub const MISSING_FIELDS: &str = "Missing token or moods";

impl RecommendRequest {
    /// Checks that a token and at least one non-blank mood are present.
    ///
    /// Blank moods are dropped, and a blank language counts as absent.
    pub fn validate(self) -> Result<MoodQuery, ApiError> {
        let token = self
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let moods: Vec<String> = self
            .moods
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        match token {
            Some(token) if !moods.is_empty() => Ok(MoodQuery {
                token,
                moods,
                language: self
                    .language
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty()),
            }),
            _ => Err(ApiError::BadRequest(MISSING_FIELDS.to_string())),
        }
    }
}

/// Runs the proxy policy `mode` for a validated mood selection.
pub async fn recommend(
    client: &SpotifyClient,
    config: &Config,
    mode: RecommendMode,
    query: &MoodQuery,
) -> Result<RecommendResponse, ApiError> {
    let language = query.language.as_deref();

    let response = match mode {
        RecommendMode::Search => {
            let queries = mood::search_queries(&query.moods, language);
            let groups = try_join_all(queries.iter().map(|q| {
                search::search_tracks(client, config, &query.token, q, config.result_limit)
            }))
            .await?;

            let mut tracks = utils::interleave(groups);
            utils::remove_duplicate_tracks(&mut tracks);
            RecommendResponse::Tracks {
                tracks: utils::shape_tracks(tracks, config.filter_unplayable, config.result_limit),
            }
        }
        RecommendMode::Recommendations => {
            let seeds = mood::seed_genres(&query.moods, language);
            if seeds.is_empty() {
                info!("No known moods in {:?}, skipping Spotify", query.moods);
                return Ok(RecommendResponse::Tracks { tracks: Vec::new() });
            }
            let bounds = mood::feature_bounds(&query.moods);

            let mut tracks = recommendations::get_recommendations(
                client,
                config,
                &query.token,
                &seeds,
                &bounds,
                config.result_limit,
            )
            .await?;
            utils::remove_duplicate_tracks(&mut tracks);
            RecommendResponse::Tracks {
                tracks: utils::shape_tracks(tracks, config.filter_unplayable, config.result_limit),
            }
        }
        RecommendMode::Playlists => {
            let queries = mood::search_queries(&query.moods, language);
            let groups = try_join_all(queries.iter().map(|q| {
                search::search_playlists(client, config, &query.token, q, config.result_limit)
            }))
            .await?;

            let mut playlists = utils::interleave(groups);
            utils::remove_duplicate_playlists(&mut playlists);
            RecommendResponse::Playlists {
                playlists: utils::shape_playlists(playlists, config.result_limit),
            }
        }
    };

    Ok(response)
}
