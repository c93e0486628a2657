use tabled::Table;

use crate::{
    mood::{self, Bound, Feature, Mood},
    types::MoodTableRow,
};

/// Prints every known mood with its genres, feature bounds and search terms.
pub fn moods() {
    let rows: Vec<MoodTableRow> = Mood::ALL
        .into_iter()
        .map(|m| MoodTableRow {
            mood: m.label().to_string(),
            genres: m.genres().join(","),
            features: m
                .bounds()
                .iter()
                .map(|&(bound, feature, value)| format_bound(bound, feature, value))
                .collect::<Vec<_>>()
                .join(" "),
            search: m.search_terms().to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Prints the seeds, bounds and search queries a selection translates to.
pub fn translate(moods: Vec<String>, language: Option<String>) {
    let language = language.as_deref();
    let seeds = mood::seed_genres(&moods, language);
    let bounds = mood::feature_bounds(&moods);
    let queries = mood::search_queries(&moods, language);

    println!("seed_genres: {}", display_list(&seeds));
    let pairs: Vec<String> = bounds
        .query_pairs()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    println!("features:    {}", display_list(&pairs));
    println!("queries:     {}", display_list(&queries));
}

fn format_bound(bound: Bound, feature: Feature, value: f32) -> String {
    let op = match bound {
        Bound::Min => ">=",
        Bound::Max => "<=",
    };
    format!("{}{}{}", feature.name(), op, value)
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
