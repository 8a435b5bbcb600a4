//! Bytes of code per language over a user's repositories, and the handful
//! of languages the languages card lists.
use std::{cmp::Reverse, collections::BTreeMap};

use log::{debug, warn};
use serde::Deserialize;

use super::card_error::{CardError, Result};
use crate::models::graphql::{first_failure, GraphQlError, GraphQlFailure};

/// Languages listed on the card.
pub const LANGS_COUNT: usize = 6;
/// Colour of a language nobody has a colour for.
pub const FALLBACK_COLOR: &str = "#858585";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("C", "#555555"),
    ("C++", "#f34b7d"),
    ("C#", "#178600"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("Swift", "#F05138"),
    ("Kotlin", "#A97BFF"),
    ("Dart", "#00B4AB"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("Vue", "#41b883"),
    ("Shell", "#89e051"),
    ("Objective-C", "#438eff"),
    ("Scala", "#c22d40"),
];

/// Colour from the built-in table.
#[must_use]
pub fn known_color(language: &str) -> Option<&'static str> {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
}

/// Byte totals per language, plus the colour the API reported for languages
/// missing from the built-in table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageStats {
    bytes: BTreeMap<String, u64>,
    reported_colors: BTreeMap<String, String>,
}

impl LanguageStats {
    /// Adds `size` bytes of `language`. The first colour reported for a
    /// language sticks.
    pub fn add(&mut self, language: &str, size: u64, color: Option<&str>) {
        let total = self.bytes.entry(language.to_owned()).or_insert(0);
        *total = total.saturating_add(size);
        if let Some(color) = color {
            self.reported_colors
                .entry(language.to_owned())
                .or_insert_with(|| color.to_owned());
        }
    }

    #[must_use]
    pub fn bytes(&self, language: &str) -> u64 {
        self.bytes.get(language).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.bytes.values().fold(0, |sum, b| sum.saturating_add(*b))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Table colour first, then the reported one, then [`FALLBACK_COLOR`].
    #[must_use]
    pub fn color(&self, language: &str) -> &str {
        known_color(language)
            .or_else(|| self.reported_colors.get(language).map(String::as_str))
            .unwrap_or(FALLBACK_COLOR)
    }
}

/// One row of the languages card.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageItem {
    pub name: String,
    pub bytes: u64,
    /// Fraction of all bytes, between 0 and 1.
    pub share: f64,
    pub color: String,
}

impl LanguageItem {
    /// Share as a percentage with one decimal, e.g. `"42.5"`.
    #[must_use]
    pub fn percentage(&self) -> String {
        format!("{:.1}", self.share * 100.0)
    }
}

/// The [`LANGS_COUNT`] largest languages by bytes, largest first. Ties keep
/// alphabetical order. Empty when no bytes were counted.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn prepare_language_data(stats: &LanguageStats) -> Vec<LanguageItem> {
    let total = stats.total();
    if total == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(&String, u64)> = stats.bytes.iter().map(|(n, b)| (n, *b)).collect();
    ranked.sort_by_key(|(_, bytes)| Reverse(*bytes));
    ranked
        .into_iter()
        .take(LANGS_COUNT)
        .map(|(name, bytes)| LanguageItem {
            name: name.clone(),
            bytes,
            share: bytes as f64 / total as f64,
            color: stats.color(name).to_owned(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LanguagesInput {
    Totals(BTreeMap<String, u64>),
    Response(LanguagesResponse),
}

#[derive(Debug, Deserialize)]
struct LanguagesResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct User {
    repositories: Option<Repositories>,
}

#[derive(Debug, Deserialize)]
struct Repositories {
    #[serde(default)]
    nodes: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    languages: Option<Languages>,
}

#[derive(Debug, Deserialize)]
struct Languages {
    #[serde(default)]
    edges: Vec<LanguageEdge>,
}

#[derive(Debug, Deserialize)]
struct LanguageEdge {
    size: u64,
    node: LanguageNode,
}

#[derive(Debug, Deserialize)]
struct LanguageNode {
    name: String,
    color: Option<String>,
}

/// Parses either a plain `{ "language": bytes }` object or the GraphQL
/// answer listing each repository's languages by size.
///
/// # Errors
///
/// Returns [`CardError::UserNotFound`] for a `NOT_FOUND` response error,
/// [`CardError::InvalidLanguages`] for any other response error and
/// [`CardError::Json`] for JSON matching neither shape.
pub fn parse_languages(json: &str) -> Result<LanguageStats> {
    let mut stats = LanguageStats::default();
    match serde_json::from_str(json)? {
        LanguagesInput::Totals(totals) => {
            debug!("Reading {} language totals", totals.len());
            for (language, bytes) in totals {
                stats.add(&language, bytes, None);
            }
        }
        LanguagesInput::Response(response) => {
            match first_failure(&response.errors, "error fetching languages") {
                Some(GraphQlFailure::NotFound) => return Err(CardError::UserNotFound),
                Some(GraphQlFailure::Message(message)) => {
                    return Err(CardError::invalid_languages(message))
                }
                None => {}
            }
            let Some(repositories) = response
                .data
                .and_then(|d| d.user)
                .and_then(|u| u.repositories)
            else {
                warn!("Language response has no repositories");
                return Ok(stats);
            };
            debug!("Summing languages over {} repositories", repositories.nodes.len());
            for edge in repositories
                .nodes
                .into_iter()
                .filter_map(|repo| repo.languages)
                .flat_map(|languages| languages.edges)
            {
                stats.add(&edge.node.name, edge.size, edge.node.color.as_deref());
            }
        }
    }
    Ok(stats)
}
