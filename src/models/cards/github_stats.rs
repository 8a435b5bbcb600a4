//! Account totals for the stats card.
//!
//! The totals come either precomputed or as the two REST answers the card
//! is normally built from: `users/{login}` and `users/{login}/repos`. From the
//! REST answers stars and forks are summed over the repositories while
//! commits, pull requests and issues are estimated from the number of public
//! repositories.
use log::{debug, warn};
use serde::Deserialize;

use super::card_error::{CardError, Result};

/// Commits credited per public repository.
pub const COMMITS_PER_REPO: u64 = 15;

/// Totals shown on the stats card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubStats {
    pub total_stars: u64,
    pub total_commits: u64,
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    pub total_issues: u64,
    /// Forks among the user's own repositories.
    pub contributed_to: u64,
}

/// The part of a REST user the estimates need.
#[derive(Debug, Deserialize)]
struct RestUser {
    login: Option<String>,
    public_repos: u64,
}

#[derive(Debug, Deserialize)]
struct RestRepo {
    #[serde(default)]
    stargazers_count: Option<u64>,
    #[serde(default)]
    fork: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatsInput {
    Rest {
        user: RestUser,
        #[serde(default)]
        repos: serde_json::Value,
    },
    Totals(GitHubStats),
    Failure {
        message: String,
    },
}

impl GitHubStats {
    fn estimate(user: &RestUser, repos: &[RestRepo]) -> Self {
        let public_repos = user.public_repos;
        Self {
            total_stars: repos
                .iter()
                .map(|repo| repo.stargazers_count.unwrap_or(0))
                .sum(),
            total_commits: public_repos.saturating_mul(COMMITS_PER_REPO),
            total_prs: public_repos.saturating_mul(4) / 5,
            total_issues: public_repos / 2,
            contributed_to: u64::try_from(repos.iter().filter(|repo| repo.fork).count())
                .unwrap_or(u64::MAX),
        }
    }
}

/// Stats together with the login they were read for, when the input names one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsReport {
    pub login: Option<String>,
    pub stats: GitHubStats,
}

/// Parses either precomputed totals (`totalStars`, `totalCommits`,
/// `totalPRs`, `totalIssues`, `contributedTo`) or a `{ "user": .., "repos": .. }`
/// bundle of REST answers.
///
/// A `repos` value that is not a list counts as no repositories.
///
/// # Errors
///
/// Returns [`CardError::UserNotFound`] for a REST "Not Found" answer,
/// [`CardError::InvalidStats`] for any other REST error message and
/// [`CardError::Json`] for JSON matching none of the shapes.
pub fn parse_stats(json: &str) -> Result<StatsReport> {
    match serde_json::from_str(json)? {
        StatsInput::Rest { user, repos } => {
            let repos: Vec<RestRepo> = if repos.is_array() {
                serde_json::from_value(repos)?
            } else {
                warn!("Repository list missing, counting no stars or forks");
                Vec::new()
            };
            debug!(
                "Estimating stats from {} public repos and {} listed repos",
                user.public_repos,
                repos.len()
            );
            Ok(StatsReport {
                stats: GitHubStats::estimate(&user, &repos),
                login: user.login,
            })
        }
        StatsInput::Totals(stats) => Ok(StatsReport { login: None, stats }),
        StatsInput::Failure { message } if message == "Not Found" => Err(CardError::UserNotFound),
        StatsInput::Failure { message } => Err(CardError::invalid_stats(message)),
    }
}
