//! Colour themes for the rendered snake.

/// Colours and sizes used to draw one theme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    /// Dot colours for levels 1 to 4.
    pub color_dots: [&'static str; 4],
    pub color_empty: &'static str,
    pub color_dot_border: &'static str,
    pub color_snake: &'static str,
    pub size_cell: u32,
    pub size_dot: u32,
    pub size_dot_border_radius: u32,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        name: "light",
        color_dots: ["#9be9a8", "#40c463", "#30a14e", "#216e39"],
        color_empty: "#ebedf0",
        color_dot_border: "#1b1f230a",
        color_snake: "purple",
        size_cell: 16,
        size_dot: 12,
        size_dot_border_radius: 2,
    };

    pub const DARK: Palette = Palette {
        name: "dark",
        color_dots: ["#01311f", "#034525", "#0f6d31", "#00c647"],
        color_empty: "#161b22",
        color_dot_border: "#1b1f230a",
        color_snake: "purple",
        size_cell: 16,
        size_dot: 12,
        size_dot_border_radius: 2,
    };

    pub const VARIANTS: &'static [&'static Palette] = &[&Self::LIGHT, &Self::DARK];

    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Palette> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Fill colour of a cell at `level`; level 0 is the empty colour.
    #[must_use]
    pub fn color_for_level(&self, level: u8) -> &'static str {
        match level {
            0 => self.color_empty,
            l => self.color_dots[usize::from(l.min(4)) - 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_themes_are_found_by_name() {
        assert_eq!(Palette::by_name("dark"), Some(&Palette::DARK));
        assert_eq!(Palette::by_name(" Light "), Some(&Palette::LIGHT));
        assert_eq!(Palette::by_name("solarized"), None);
    }

    #[test]
    fn test_levels_pick_dot_colours() {
        assert_eq!(Palette::LIGHT.color_for_level(0), "#ebedf0");
        assert_eq!(Palette::LIGHT.color_for_level(1), "#9be9a8");
        assert_eq!(Palette::DARK.color_for_level(4), "#00c647");
    }
}
