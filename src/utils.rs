use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    info,
    types::{Playlist, PlaylistRecord, Track, TrackRecord},
    warning,
};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Decodes the items found at `pointer` (e.g. `/tracks/items`), skipping
/// `null` entries and entries of an unexpected shape.
///
/// A missing or non-array pointer target yields no items.
pub fn decode_items<T: DeserializeOwned>(body: &Value, pointer: &str) -> Vec<T> {
    let items = match body.pointer(pointer) {
        Some(Value::Array(items)) => items,
        Some(other) if !other.is_null() => {
            warning!("Spotify response has a non-list value at {}", pointer);
            return Vec::new();
        }
        _ => {
            info!("Spotify response has no items at {}", pointer);
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            if item.is_null() {
                return None;
            }
            match serde_json::from_value::<T>(item.clone()) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    warning!("Skipping malformed item {} at {}: {}", i, pointer, e);
                    None
                }
            }
        })
        .collect()
}

/// Merges result groups round-robin, so every group contributes its first
/// item before any contributes a second.
pub fn interleave<T>(groups: Vec<Vec<T>>) -> Vec<T> {
    let total = groups.iter().map(Vec::len).sum();
    let mut iters: Vec<_> = groups.into_iter().map(Vec::into_iter).collect();
    let mut merged = Vec::with_capacity(total);

    while merged.len() < total {
        for it in iters.iter_mut() {
            if let Some(item) = it.next() {
                merged.push(item);
            }
        }
    }
    merged
}

pub fn remove_duplicate_tracks(tracks: &mut Vec<Track>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| match &track.id {
        Some(id) => seen_ids.insert(id.clone()),
        None => true,
    });
}

pub fn remove_duplicate_playlists(playlists: &mut Vec<Playlist>) {
    let mut seen_ids = HashSet::new();
    playlists.retain(|playlist| match &playlist.id {
        Some(id) => seen_ids.insert(id.clone()),
        None => true,
    });
}

pub fn to_track_record(track: Track) -> TrackRecord {
    let image = track
        .album
        .and_then(|album| album.images.into_iter().next())
        .map(|image| image.url)
        .unwrap_or_default();
    let artist = track
        .artists
        .into_iter()
        .next()
        .map(|artist| artist.name)
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    TrackRecord {
        name: track.name,
        artist,
        preview_url: track.preview_url,
        image,
    }
}

pub fn to_playlist_record(playlist: Playlist) -> PlaylistRecord {
    PlaylistRecord {
        name: playlist.name,
        image: playlist
            .images
            .and_then(|images| images.into_iter().next())
            .map(|image| image.url)
            .unwrap_or_default(),
        spotify_url: playlist
            .external_urls
            .and_then(|urls| urls.spotify)
            .unwrap_or_default(),
        owner: playlist
            .owner
            .and_then(|owner| owner.display_name)
            .unwrap_or_default(),
    }
}

/// Projects tracks onto records, optionally dropping those without a
/// preview URL, and caps the list at `limit`.
pub fn shape_tracks(tracks: Vec<Track>, filter_unplayable: bool, limit: usize) -> Vec<TrackRecord> {
    tracks
        .into_iter()
        .filter(|track| {
            !filter_unplayable
                || track
                    .preview_url
                    .as_deref()
                    .is_some_and(|url| !url.is_empty())
        })
        .take(limit)
        .map(to_track_record)
        .collect()
}

pub fn shape_playlists(playlists: Vec<Playlist>, limit: usize) -> Vec<PlaylistRecord> {
    playlists
        .into_iter()
        .take(limit)
        .map(to_playlist_record)
        .collect()
}

/// Reads an upstream body as JSON, falling back to the raw text as a JSON
/// string so nothing the upstream said is lost.
pub fn body_to_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
