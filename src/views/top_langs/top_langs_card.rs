//! Renders the most used languages as a vertical list of progress bars.
use log::debug;

use crate::{
    models::cards::languages::LanguageItem,
    view::View,
    views::svg::escape_text,
};

const CARD_WIDTH: usize = 300;
const CARD_HEIGHT: usize = 235;
const PADDING: usize = 16;
/// Width of a full progress bar.
const CONTENT_WIDTH: f64 = 268.0;
/// Baseline of the first language name.
const FIRST_ROW_Y: usize = 55;
const ROW_HEIGHT: usize = 30;

/// Colours of one languages card theme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LangsTheme {
    pub name: &'static str,
    pub bg: &'static str,
    pub border: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    /// Unfilled part of a progress bar.
    pub progress_bg: &'static str,
}

impl LangsTheme {
    pub const LIGHT: LangsTheme = LangsTheme {
        name: "light",
        bg: "#ffffff",
        border: "#e1e4e8",
        title: "#24292e",
        text: "#586069",
        progress_bg: "#eaecef",
    };

    pub const DARK: LangsTheme = LangsTheme {
        name: "dark",
        bg: "#0d1117",
        border: "#30363d",
        title: "#c9d1d9",
        text: "#c9d1d9",
        progress_bg: "#21262d",
    };

    pub const VARIANTS: &'static [&'static LangsTheme] = &[&Self::LIGHT, &Self::DARK];

    /// Theme called `name`, or the dark one when there is none.
    #[must_use]
    pub fn by_name(name: &str) -> &'static LangsTheme {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .unwrap_or(&Self::DARK)
    }
}

/// Renders one row per language: name, percentage and a bar filled by its share.
#[must_use]
pub fn render_top_langs_card(languages: &[LanguageItem], theme: &LangsTheme) -> String {
    let mut items = String::new();
    for (i, language) in languages.iter().enumerate() {
        let y = FIRST_ROW_Y + i * ROW_HEIGHT;
        let bar_y = y + 7;
        let progress = language.share.clamp(0.0, 1.0) * CONTENT_WIDTH;
        items.push_str(&format!(
            "<text x=\"{PADDING}\" y=\"{y}\" class=\"lang-name\">{name}</text>\
             <text x=\"{right}\" y=\"{y}\" class=\"lang-name\" text-anchor=\"end\">{percentage}%</text>\
             <rect x=\"{PADDING}\" y=\"{bar_y}\" width=\"{CONTENT_WIDTH}\" height=\"8\" rx=\"4\" fill=\"{track}\"/>\
             <rect x=\"{PADDING}\" y=\"{bar_y}\" width=\"{progress:.2}\" height=\"8\" rx=\"4\" fill=\"{color}\"/>",
            name = escape_text(&language.name),
            right = CARD_WIDTH - PADDING,
            percentage = language.percentage(),
            track = theme.progress_bg,
            color = escape_text(&language.color),
        ));
    }

    let svg = format!(
        "<svg width=\"{CARD_WIDTH}\" height=\"{CARD_HEIGHT}\" viewBox=\"0 0 {CARD_WIDTH} {CARD_HEIGHT}\" \
         xmlns=\"http://www.w3.org/2000/svg\" role=\"img\">\
         <style>.title{{font-size:14px;font-weight:600;fill:{title}}} \
         .lang-name{{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Helvetica,Arial,sans-serif;font-size:12px;fill:{text}}}</style>\
         <rect width=\"100%\" height=\"100%\" fill=\"{bg}\" rx=\"12\" stroke=\"{border}\"/>\
         <text x=\"{PADDING}\" y=\"28\" class=\"title\">Most Used Languages</text>\
         <g>{items}</g>\
         </svg>",
        title = theme.title,
        text = theme.text,
        bg = theme.bg,
        border = theme.border,
    );
    debug!(
        "Rendered {} languages card with {} rows, {} bytes",
        theme.name,
        languages.len(),
        svg.len()
    );
    svg
}

/// One themed languages card.
#[derive(Clone, Debug)]
pub struct TopLangsCardView<'a> {
    languages: &'a [LanguageItem],
    theme: &'static LangsTheme,
}

impl<'a> TopLangsCardView<'a> {
    #[must_use]
    pub fn new(languages: &'a [LanguageItem], theme: &'static LangsTheme) -> Self {
        Self { languages, theme }
    }
}

impl View for TopLangsCardView<'_> {
    fn file_name(&self) -> String {
        format!("top-langs-{}.svg", self.theme.name)
    }

    fn render(&self) -> String {
        render_top_langs_card(self.languages, self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, share: f64, color: &str) -> LanguageItem {
        LanguageItem {
            name: name.to_owned(),
            bytes: 0,
            share,
            color: color.to_owned(),
        }
    }

    fn languages() -> Vec<LanguageItem> {
        vec![
            item("Rust", 0.75, "#dea584"),
            item("C++", 0.25, "#f34b7d"),
        ]
    }

    #[test]
    fn test_card_has_a_fixed_size() {
        let svg = render_top_langs_card(&languages(), &LangsTheme::DARK);
        assert!(svg.starts_with("<svg width=\"300\" height=\"235\" viewBox=\"0 0 300 235\""));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Most Used Languages"));
        assert!(svg.contains("fill=\"#0d1117\""));
    }

    #[test]
    fn test_rows_show_name_percentage_and_bar() {
        let svg = render_top_langs_card(&languages(), &LangsTheme::LIGHT);
        assert!(svg.contains("<text x=\"16\" y=\"55\" class=\"lang-name\">Rust</text>"));
        assert!(svg.contains("text-anchor=\"end\">75.0%</text>"));
        assert!(svg.contains("y=\"92\" width=\"67.00\" height=\"8\" rx=\"4\" fill=\"#f34b7d\""));
        assert!(svg.contains("width=\"201.00\" height=\"8\" rx=\"4\" fill=\"#dea584\""));
        assert_eq!(svg.matches("fill=\"#eaecef\"").count(), 2);
    }

    #[test]
    fn test_no_languages_leaves_an_empty_list() {
        let svg = render_top_langs_card(&[], &LangsTheme::DARK);
        assert!(svg.contains("<g></g>"));
    }

    #[test]
    fn test_view_names_files_by_theme() {
        let langs = languages();
        let view = TopLangsCardView::new(&langs, LangsTheme::by_name("dark"));
        assert_eq!(view.file_name(), "top-langs-dark.svg");
        assert_eq!(view.render(), render_top_langs_card(&langs, &LangsTheme::DARK));
        assert_eq!(LangsTheme::by_name("sepia"), &LangsTheme::DARK);
    }
}
