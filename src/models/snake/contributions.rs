//! Contribution calendar records and the JSON shapes they arrive in.
use log::{debug, warn};
use serde::Deserialize;

use super::snake_error::{Result, SnakeError};
use crate::models::graphql::{first_failure, GraphQlError, GraphQlFailure};

/// One day of the contribution calendar.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ContributionDay {
    /// Week index, oldest first.
    pub x: usize,
    /// Weekday, 0 is Sunday.
    pub y: usize,
    pub date: String,
    pub count: u32,
    pub level: u8,
}

impl ContributionDay {
    #[must_use]
    pub fn new(x: usize, y: usize, date: &str, count: u32, level: u8) -> Self {
        Self {
            x,
            y,
            date: date.to_owned(),
            count,
            level,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    weeks: Vec<Week>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Week {
    contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDay {
    contribution_count: u32,
    contribution_level: String,
    date: String,
    weekday: usize,
}

/// Maps the calendar's quartile names onto levels 0..=4.
#[must_use]
pub fn level_from_quartile(name: &str) -> u8 {
    match name {
        "FOURTH_QUARTILE" => 4,
        "THIRD_QUARTILE" => 3,
        "SECOND_QUARTILE" => 2,
        "FIRST_QUARTILE" => 1,
        _ => 0,
    }
}

/// Parses contribution days from either a flat array of [`ContributionDay`]
/// or a raw GraphQL contribution calendar response.
///
/// # Errors
///
/// Returns [`SnakeError::Json`] for JSON matching neither shape and
/// [`SnakeError::InvalidContributions`] when the response carries errors.
pub fn parse_contributions(json: &str) -> Result<Vec<ContributionDay>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        debug!("Reading contributions as a flat day list");
        return Ok(serde_json::from_value(value)?);
    }
    let response: GraphQlResponse = serde_json::from_value(value)?;
    if let Some(failure) = first_failure(&response.errors, "error fetching contributions") {
        return Err(SnakeError::invalid_contributions(match failure {
            GraphQlFailure::NotFound => "user not found".to_owned(),
            GraphQlFailure::Message(message) => message,
        }));
    }
    let Some(user) = response.data.and_then(|d| d.user) else {
        warn!("Contribution response has no user data");
        return Ok(Vec::new());
    };
    let days = user
        .contributions_collection
        .contribution_calendar
        .weeks
        .into_iter()
        .enumerate()
        .flat_map(|(x, week)| {
            week.contribution_days.into_iter().map(move |day| ContributionDay {
                x,
                y: day.weekday,
                level: level_from_quartile(&day.contribution_level),
                count: day.contribution_count,
                date: day.date,
            })
        })
        .collect();
    Ok(days)
}
