use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// Body accepted by `POST /recommend`.
///
/// Fields are optional here so that missing values reach the handler's own
/// validation instead of a deserializer rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub moods: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<String>,
}

/// A validated mood selection, ready for translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodQuery {
    pub token: String,
    pub moods: Vec<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendResponse {
    Tracks { tracks: Vec<TrackRecord> },
    Playlists { playlists: Vec<PlaylistRecord> },
}

impl RecommendResponse {
    pub fn len(&self) -> usize {
        match self {
            RecommendResponse::Tracks { tracks } => tracks.len(),
            RecommendResponse::Playlists { playlists } => playlists.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub name: String,
    pub artist: String,
    pub preview_url: Option<String>,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub name: String,
    pub image: String,
    pub spotify_url: String,
    pub owner: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Body returned by `/callback` in JSON mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackResponse {
    pub token_data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<Value>,
}

// Spotify Web API payloads. Only the fields the relay reads are declared.

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    pub preview_url: Option<String>,
    pub album: Option<TrackAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub id: Option<String>,
    pub name: String,
    // Spotify sends `null` for playlists without artwork
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    pub owner: Option<PlaylistOwner>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistOwner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Tabled)]
pub struct MoodTableRow {
    pub mood: String,
    pub genres: String,
    pub features: String,
    pub search: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artist: String,
    pub preview: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub owner: String,
    pub url: String,
}
