//! Mood and language vocabularies and their translation into Spotify query
//! parameters.
//!
//! Every known [`Mood`] carries three static renditions: genre seeds for the
//! recommendations endpoint, audio-feature bounds, and free-text search
//! terms. Labels outside the vocabulary translate to nothing, except in
//! search queries where the raw label text is used.

use std::{collections::BTreeMap, collections::HashSet, fmt};

/// Maximum number of seeds the recommendations endpoint accepts.
pub const MAX_SEED_GENRES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Calm,
    Romantic,
    Angry,
    Focused,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Calm,
        Mood::Romantic,
        Mood::Angry,
        Mood::Focused,
    ];

    /// Matches a label case-insensitively, including a few aliases.
    pub fn from_label(label: &str) -> Option<Mood> {
        match label.trim().to_lowercase().as_str() {
            "happy" | "joyful" | "cheerful" => Some(Mood::Happy),
            "sad" | "melancholic" | "melancholy" => Some(Mood::Sad),
            "energetic" | "hype" | "workout" => Some(Mood::Energetic),
            "calm" | "chill" | "relaxed" => Some(Mood::Calm),
            "romantic" | "love" => Some(Mood::Romantic),
            "angry" | "intense" => Some(Mood::Angry),
            "focused" | "focus" | "study" => Some(Mood::Focused),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "energetic",
            Mood::Calm => "calm",
            Mood::Romantic => "romantic",
            Mood::Angry => "angry",
            Mood::Focused => "focused",
        }
    }

    /// Spotify seed genres, most characteristic first.
    pub fn genres(self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &["pop", "happy", "dance"],
            Mood::Sad => &["sad", "acoustic", "piano"],
            Mood::Energetic => &["edm", "work-out", "rock"],
            Mood::Calm => &["chill", "ambient", "acoustic"],
            Mood::Romantic => &["romance", "r-n-b", "soul"],
            Mood::Angry => &["metal", "hard-rock", "punk"],
            Mood::Focused => &["study", "classical", "ambient"],
        }
    }

    pub fn bounds(self) -> &'static [(Bound, Feature, f32)] {
        use Bound::{Max, Min};
        use Feature::*;

        match self {
            Mood::Happy => &[(Min, Valence, 0.6), (Min, Energy, 0.5)],
            Mood::Sad => &[(Max, Valence, 0.4), (Max, Energy, 0.5)],
            Mood::Energetic => &[(Min, Energy, 0.75), (Min, Danceability, 0.6)],
            Mood::Calm => &[(Max, Energy, 0.4), (Min, Acousticness, 0.5)],
            Mood::Romantic => &[(Min, Valence, 0.4), (Max, Energy, 0.6)],
            Mood::Angry => &[(Max, Valence, 0.4), (Min, Energy, 0.8)],
            Mood::Focused => &[(Max, Energy, 0.5), (Min, Instrumentalness, 0.5)],
        }
    }

    pub fn search_terms(self) -> &'static str {
        match self {
            Mood::Happy => "happy upbeat",
            Mood::Sad => "sad melancholy",
            Mood::Energetic => "energetic workout",
            Mood::Calm => "calm chill",
            Mood::Romantic => "romantic love songs",
            Mood::Angry => "angry intense",
            Mood::Focused => "focus study",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
    Spanish,
    Korean,
    Japanese,
    French,
    German,
    Portuguese,
}

impl Language {
    /// Matches a language name or its ISO 639-1 code.
    pub fn from_label(label: &str) -> Option<Language> {
        match label.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Language::English),
            "hindi" | "hi" => Some(Language::Hindi),
            "spanish" | "es" => Some(Language::Spanish),
            "korean" | "ko" => Some(Language::Korean),
            "japanese" | "ja" => Some(Language::Japanese),
            "french" | "fr" => Some(Language::French),
            "german" | "de" => Some(Language::German),
            "portuguese" | "pt" => Some(Language::Portuguese),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Spanish => "spanish",
            Language::Korean => "korean",
            Language::Japanese => "japanese",
            Language::French => "french",
            Language::German => "german",
            Language::Portuguese => "portuguese",
        }
    }

    /// Seed genre standing in for the language, where Spotify has one.
    pub fn genre(self) -> Option<&'static str> {
        match self {
            Language::English => None,
            Language::Hindi => Some("indian"),
            Language::Spanish => Some("spanish"),
            Language::Korean => Some("k-pop"),
            Language::Japanese => Some("j-pop"),
            Language::French => Some("french"),
            Language::German => Some("german"),
            Language::Portuguese => Some("brazil"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bound {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Feature {
    Acousticness,
    Danceability,
    Energy,
    Instrumentalness,
    Valence,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::Acousticness => "acousticness",
            Feature::Danceability => "danceability",
            Feature::Energy => "energy",
            Feature::Instrumentalness => "instrumentalness",
            Feature::Valence => "valence",
        }
    }
}

/// Audio-feature bounds combined across moods, tightest bound per key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureBounds {
    bounds: BTreeMap<(Bound, Feature), f32>,
}

impl FeatureBounds {
    /// Adds a bound, keeping the tighter one when the key already exists:
    /// the larger `min_*` and the smaller `max_*`.
    pub fn tighten(&mut self, bound: Bound, feature: Feature, value: f32) {
        self.bounds
            .entry((bound, feature))
            .and_modify(|current| {
                *current = match bound {
                    Bound::Min => current.max(value),
                    Bound::Max => current.min(value),
                }
            })
            .or_insert(value);
    }

    pub fn get(&self, bound: Bound, feature: Feature) -> Option<f32> {
        self.bounds.get(&(bound, feature)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Query parameters such as `("min_valence", "0.6")`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.bounds
            .iter()
            .map(|((bound, feature), value)| {
                let prefix = match bound {
                    Bound::Min => "min",
                    Bound::Max => "max",
                };
                (format!("{prefix}_{}", feature.name()), value.to_string())
            })
            .collect()
    }
}

/// Union of the genre seeds for the given labels.
///
/// The language seed comes first, followed by the moods' genres taken
/// round-robin so each mood is represented before any contributes a second
/// genre. The result is deduplicated and holds at most
/// [`MAX_SEED_GENRES`] entries. Unknown labels contribute nothing, and a
/// language seed is only added alongside at least one known mood.
pub fn seed_genres(moods: &[String], language: Option<&str>) -> Vec<String> {
    let known = known_moods(moods);
    if known.is_empty() {
        return Vec::new();
    }

    let mut seeds: Vec<String> = Vec::new();
    let push = |genre: &str, seeds: &mut Vec<String>| {
        if seeds.len() < MAX_SEED_GENRES && !seeds.iter().any(|s| s == genre) {
            seeds.push(genre.to_string());
        }
    };

    if let Some(genre) = language.and_then(Language::from_label).and_then(Language::genre) {
        push(genre, &mut seeds);
    }

    let depth = known.iter().map(|m| m.genres().len()).max().unwrap_or(0);
    for i in 0..depth {
        for mood in &known {
            if let Some(genre) = mood.genres().get(i) {
                push(genre, &mut seeds);
            }
        }
    }

    seeds
}

/// Audio-feature bounds of all known labels, combined by tightest bound.
pub fn feature_bounds(moods: &[String]) -> FeatureBounds {
    let mut bounds = FeatureBounds::default();
    for mood in known_moods(moods) {
        for &(bound, feature, value) in mood.bounds() {
            bounds.tighten(bound, feature, value);
        }
    }
    bounds
}

/// One free-text search query per distinct mood label.
///
/// Known moods use their search terms, unknown labels their raw text. A
/// language, when given, is appended to every query. Blank labels are
/// ignored and duplicate queries collapse.
pub fn search_queries(moods: &[String], language: Option<&str>) -> Vec<String> {
    let language = language
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| match Language::from_label(l) {
            Some(known) => known.label().to_string(),
            None => l.to_lowercase(),
        });

    let mut seen = HashSet::new();
    moods
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .map(|label| {
            let terms = match Mood::from_label(label) {
                Some(mood) => mood.search_terms().to_string(),
                None => label.to_string(),
            };
            match &language {
                Some(language) => format!("{terms} {language}"),
                None => terms,
            }
        })
        .filter(|query| seen.insert(query.to_lowercase()))
        .collect()
}

fn known_moods(labels: &[String]) -> Vec<Mood> {
    let mut moods: Vec<Mood> = Vec::new();
    for mood in labels.iter().filter_map(|l| Mood::from_label(l)) {
        if !moods.contains(&mood) {
            moods.push(mood);
        }
    }
    moods
}
