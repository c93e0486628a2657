use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::{Config, RecommendMode},
    error, recommend as proxy,
    spotify::SpotifyClient,
    success,
    types::{PlaylistTableRow, RecommendRequest, RecommendResponse, TrackTableRow},
    warning,
};

/// Runs the mood proxy once with a token obtained elsewhere (e.g. from
/// `/callback`) and prints the records as a table.
pub async fn recommend(
    config: Config,
    token: String,
    moods: Vec<String>,
    language: Option<String>,
    mode: Option<RecommendMode>,
) {
    let query = match (RecommendRequest {
        token: Some(token),
        moods: Some(moods),
        language,
    })
    .validate()
    {
        Ok(q) => q,
        Err(e) => error!("{}", e),
    };

    let client = match SpotifyClient::new(&config) {
        Ok(c) => c,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };
    let mode = mode.unwrap_or(config.recommend_mode);

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Asking Spotify ({mode})..."));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = proxy::recommend(&client, &config, mode, &query).await;
    pb.finish_and_clear();

    match result {
        Ok(response) if response.is_empty() => warning!("No results for {:?}", query.moods),
        Ok(RecommendResponse::Tracks { tracks }) => {
            let count = tracks.len();
            let rows: Vec<TrackTableRow> = tracks
                .into_iter()
                .map(|t| TrackTableRow {
                    name: t.name,
                    artist: t.artist,
                    preview: t.preview_url.unwrap_or_else(|| "-".to_string()),
                })
                .collect();
            println!("{}", Table::new(rows));
            success!("Found {} tracks", count);
        }
        Ok(RecommendResponse::Playlists { playlists }) => {
            let count = playlists.len();
            let rows: Vec<PlaylistTableRow> = playlists
                .into_iter()
                .map(|p| PlaylistTableRow {
                    name: p.name,
                    owner: p.owner,
                    url: p.spotify_url,
                })
                .collect();
            println!("{}", Table::new(rows));
            success!("Found {} playlists", count);
        }
        Err(e) => error!("Recommendation failed. Err: {}", e),
    }
}
