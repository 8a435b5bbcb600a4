//! Account statistics and language totals shown on the profile cards.
pub mod card_error;
pub mod github_stats;
pub mod languages;
