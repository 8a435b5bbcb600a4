//! Renders account totals as a stats card.
//!
//! The card is an SVG wrapping an XHTML panel: an optional title with the
//! login, then one row per total with an icon, a label and the grouped value.
use log::debug;

use crate::{
    models::cards::github_stats::GitHubStats,
    view::View,
    views::svg::escape_text,
};

const CARD_WIDTH: u32 = 450;
const CARD_HEIGHT: u32 = 350;
/// Height once the title row is left out.
const CARD_HEIGHT_UNTITLED: u32 = 300;

/// Colours of one stats card theme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsTheme {
    pub name: &'static str,
    pub bg: &'static str,
    pub border: &'static str,
    /// Title and values.
    pub title: &'static str,
    /// Labels.
    pub text: &'static str,
}

impl StatsTheme {
    pub const LIGHT: StatsTheme = StatsTheme {
        name: "light",
        bg: "#ffffff",
        border: "#d0d7de",
        title: "#0969da",
        text: "#24292f",
    };

    pub const DARK: StatsTheme = StatsTheme {
        name: "dark",
        bg: "#0d1117",
        border: "#30363d",
        title: "#58a6ff",
        text: "#c9d1d9",
    };

    pub const VARIANTS: &'static [&'static StatsTheme] = &[&Self::LIGHT, &Self::DARK];

    /// Theme called `name`, or the dark one when there is none.
    #[must_use]
    pub fn by_name(name: &str) -> &'static StatsTheme {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .unwrap_or(&Self::DARK)
    }
}

/// `1234567` as `"1,234,567"`.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn stat_rows(stats: &GitHubStats) -> [(&'static str, &'static str, u64); 5] {
    [
        ("⭐", "Total Stars", stats.total_stars),
        ("📝", "Total Commits", stats.total_commits),
        ("🔀", "Total PRs", stats.total_prs),
        ("❗", "Total Issues", stats.total_issues),
        ("🤝", "Contributed to", stats.contributed_to),
    ]
}

/// Renders the stats card. Without a `username` the title row is dropped and
/// the card is shorter.
#[must_use]
pub fn render_stats_card(username: Option<&str>, stats: &GitHubStats, theme: &StatsTheme) -> String {
    let height = if username.is_some() {
        CARD_HEIGHT
    } else {
        CARD_HEIGHT_UNTITLED
    };
    let rows = stat_rows(stats);
    let mut items = String::new();
    for (i, (icon, label, value)) in rows.iter().enumerate() {
        let divider = if i + 1 < rows.len() {
            format!("border-bottom: 1px solid {};", theme.border)
        } else {
            String::new()
        };
        items.push_str(&format!(
            "<div style=\"display: flex; justify-content: space-between; align-items: center; padding: 12px 0; {divider}\">\
             <div style=\"display: flex; align-items: center; gap: 8px;\">\
             <span style=\"font-size: 16px;\">{icon}</span>\
             <span style=\"color: {text}; font-size: 14px;\">{label}:</span>\
             </div>\
             <span style=\"color: {title}; font-size: 16px; font-weight: 700;\">{value}</span>\
             </div>",
            text = theme.text,
            title = theme.title,
            value = group_thousands(*value),
        ));
    }
    let title = username
        .map(|name| {
            format!(
                "<div class=\"stats-title\"><span>📊</span><span>{}'s GitHub Stats</span></div>",
                escape_text(name)
            )
        })
        .unwrap_or_default();

    let svg = format!(
        "<svg width=\"{CARD_WIDTH}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\
         <foreignObject width=\"100%\" height=\"100%\">\
         <div xmlns=\"http://www.w3.org/1999/xhtml\" style=\"width: 100%; height: 100%;\">\
         <style>\
         * {{ margin: 0; padding: 0; box-sizing: border-box; }}\
         .stats-card {{ width: 100%; min-height: 100%; background: {bg}; border: 1px solid {border}; \
         border-radius: 12px; padding: 20px; \
         font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen', 'Ubuntu', sans-serif; \
         display: flex; flex-direction: column; }}\
         .stats-title {{ font-size: 20px; font-weight: 700; color: {title_color}; margin-bottom: 20px; \
         display: flex; align-items: center; gap: 8px; }}\
         </style>\
         <div class=\"stats-card\">{title}<div>{items}</div></div>\
         </div>\
         </foreignObject>\
         </svg>",
        bg = theme.bg,
        border = theme.border,
        title_color = theme.title,
    );
    debug!("Rendered {} stats card, {} bytes", theme.name, svg.len());
    svg
}

/// One themed stats card.
#[derive(Clone, Debug)]
pub struct StatsCardView<'a> {
    username: Option<&'a str>,
    stats: &'a GitHubStats,
    theme: &'static StatsTheme,
}

impl<'a> StatsCardView<'a> {
    #[must_use]
    pub fn new(username: Option<&'a str>, stats: &'a GitHubStats, theme: &'static StatsTheme) -> Self {
        Self {
            username,
            stats,
            theme,
        }
    }
}

impl View for StatsCardView<'_> {
    fn file_name(&self) -> String {
        format!("stats-{}.svg", self.theme.name)
    }

    fn render(&self) -> String {
        render_stats_card(self.username, self.stats, self.theme)
    }
}
