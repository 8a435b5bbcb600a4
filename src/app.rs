//! Ties the pieces together: read the inputs, plan the route and write one
//! SVG per selected artifact and theme.
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    models::{
        cards::{
            card_error::CardError,
            github_stats::parse_stats,
            languages::{parse_languages, prepare_language_data},
        },
        snake::{
            contributions::parse_contributions,
            grid::{Grid, DAYS_PER_WEEK},
            route_planner::{compute_route_with, PlannerConfig, Route},
            snake_body::Snake,
            snake_error::{self, SnakeError},
        },
    },
    view::View,
    views::{
        snake::{palette::Palette, snake_svg::SnakeSvgView},
        stats::stats_card::{StatsCardView, StatsTheme},
        top_langs::top_langs_card::{LangsTheme, TopLangsCardView},
    },
};

/// Length of the snake when none is asked for.
pub const DEFAULT_SNAKE_LENGTH: usize = 4;
/// Weeks in the calendar of a demo grid.
pub const DEMO_WEEKS: usize = 53;
/// Share of active cells in a demo grid.
pub const DEMO_DENSITY: f64 = 0.35;

pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Snake(#[from] SnakeError),

    #[error(transparent)]
    Card(#[from] CardError),

    /// An artifact was selected but the input it is drawn from was not given.
    #[error("no input given for the {0} artifact")]
    MissingInput(Artifact),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Kinds of file a run can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Artifact {
    /// `snake-<theme>.svg` from the contribution calendar.
    Snake,
    /// `stats-<theme>.svg` from the account totals.
    Stats,
    /// `top-langs-<theme>.svg` from the language totals.
    TopLangs,
}

impl Artifact {
    pub const VARIANTS: &'static [Artifact] = &[Self::Snake, Self::Stats, Self::TopLangs];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Artifact::Snake => "snake",
            Artifact::Stats => "stats",
            Artifact::TopLangs => "top-langs",
        }
    }

    #[must_use]
    pub fn by_name(name: &str) -> Option<Artifact> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the grid comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum GridSource {
    /// Contribution JSON on disk.
    File(PathBuf),
    /// Random calendar from a seed.
    Demo(u64),
}

impl GridSource {
    /// Builds the grid.
    ///
    /// # Errors
    ///
    /// I/O and parse errors of the input file, or a malformed grid.
    pub fn load(&self) -> snake_error::Result<Grid> {
        match self {
            GridSource::File(path) => {
                info!("Reading contributions from {}", path.display());
                let json = fs::read_to_string(path)?;
                Grid::from_contribution_days(&parse_contributions(&json)?)
            }
            GridSource::Demo(seed) => {
                info!("Generating demo calendar from seed {seed}");
                Grid::random(
                    DEMO_WEEKS,
                    DAYS_PER_WEEK,
                    DEMO_DENSITY,
                    &mut StdRng::seed_from_u64(*seed),
                )
            }
        }
    }
}

/// Everything one generation run needs.
#[derive(Clone, Debug)]
pub struct Settings {
    /// What to write, in this order.
    pub artifacts: Vec<Artifact>,
    pub source: Option<GridSource>,
    /// Account totals or REST answers for the stats card.
    pub stats_input: Option<PathBuf>,
    /// Language totals or the GraphQL languages answer.
    pub languages_input: Option<PathBuf>,
    /// Login in the stats card title. Taken from the stats input when unset.
    pub username: Option<String>,
    pub output_dir: PathBuf,
    pub themes: Vec<&'static Palette>,
    pub snake_length: usize,
    pub step_duration_ms: u64,
    pub planner: PlannerConfig,
}

impl Settings {
    /// Whether the input `artifact` is drawn from was given.
    #[must_use]
    pub fn has_input(&self, artifact: Artifact) -> bool {
        match artifact {
            Artifact::Snake => self.source.is_some(),
            Artifact::Stats => self.stats_input.is_some(),
            Artifact::TopLangs => self.languages_input.is_some(),
        }
    }

    /// Every artifact whose input was given.
    #[must_use]
    pub fn available_artifacts(&self) -> Vec<Artifact> {
        Artifact::VARIANTS
            .iter()
            .copied()
            .filter(|a| self.has_input(*a))
            .collect()
    }
}

/// Plans the route for `grid` with a horizontal snake in the top-left corner.
///
/// # Errors
///
/// Fails with `NoInitialSnake` if the snake does not fit.
pub fn plan(grid: &Grid, snake_length: usize, config: PlannerConfig) -> snake_error::Result<Route> {
    let snake = Snake::horizontal(snake_length)?;
    compute_route_with(grid, &snake, config)
}

fn write_view(dir: &Path, view: &dyn View) -> Result<PathBuf> {
    let path = dir.join(view.file_name());
    fs::write(&path, view.render())?;
    info!("Wrote {}", path.display());
    Ok(path)
}

fn input_for(path: Option<&Path>, artifact: Artifact) -> Result<String> {
    let path = path.ok_or(GenerateError::MissingInput(artifact))?;
    info!("Reading {artifact} input from {}", path.display());
    Ok(fs::read_to_string(path)?)
}

fn generate_snake(settings: &Settings) -> Result<Vec<PathBuf>> {
    let source = settings
        .source
        .as_ref()
        .ok_or(GenerateError::MissingInput(Artifact::Snake))?;
    let grid = source.load()?;
    let route = plan(&grid, settings.snake_length, settings.planner.clone())?;
    settings
        .themes
        .iter()
        .map(|palette| {
            let view = SnakeSvgView::new(&grid, &route, *palette, settings.step_duration_ms);
            write_view(&settings.output_dir, &view)
        })
        .collect()
}

fn generate_stats(settings: &Settings) -> Result<Vec<PathBuf>> {
    let json = input_for(settings.stats_input.as_deref(), Artifact::Stats)?;
    let report = parse_stats(&json)?;
    let username = settings.username.as_deref().or(report.login.as_deref());
    if username.is_none() {
        warn!("No username known, the stats card has no title");
    }
    settings
        .themes
        .iter()
        .map(|palette| {
            let view = StatsCardView::new(username, &report.stats, StatsTheme::by_name(palette.name));
            write_view(&settings.output_dir, &view)
        })
        .collect()
}

fn generate_top_langs(settings: &Settings) -> Result<Vec<PathBuf>> {
    let json = input_for(settings.languages_input.as_deref(), Artifact::TopLangs)?;
    let languages = prepare_language_data(&parse_languages(&json)?);
    if languages.is_empty() {
        warn!("No language bytes counted, the languages card is empty");
    }
    settings
        .themes
        .iter()
        .map(|palette| {
            let view = TopLangsCardView::new(&languages, LangsTheme::by_name(palette.name));
            write_view(&settings.output_dir, &view)
        })
        .collect()
}

/// Runs a full generation and returns the written files.
///
/// # Errors
///
/// [`GenerateError::MissingInput`] before anything is written when a selected
/// artifact has no input, otherwise any error reading inputs, planning the
/// route or writing files.
pub fn generate(settings: &Settings) -> Result<Vec<PathBuf>> {
    if let Some(artifact) = settings.artifacts.iter().find(|a| !settings.has_input(**a)) {
        return Err(GenerateError::MissingInput(*artifact));
    }
    fs::create_dir_all(&settings.output_dir)?;
    let mut written = Vec::new();
    for artifact in &settings.artifacts {
        info!("Generating {artifact}");
        written.extend(match artifact {
            Artifact::Snake => generate_snake(settings)?,
            Artifact::Stats => generate_stats(settings)?,
            Artifact::TopLangs => generate_top_langs(settings)?,
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::snake::snake_svg::DEFAULT_STEP_DURATION_MS;

    const STATS: &str = r#"{
        "user": { "login": "octocat", "public_repos": 10 },
        "repos": [{ "stargazers_count": 2500, "fork": false }]
    }"#;

    const LANGUAGES: &str = r#"{ "Rust": 3000, "Go": 1000 }"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("contrib-snake-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn settings(source: GridSource, output_dir: PathBuf) -> Settings {
        Settings {
            artifacts: vec![Artifact::Snake],
            source: Some(source),
            stats_input: None,
            languages_input: None,
            username: None,
            output_dir,
            themes: Palette::VARIANTS.to_vec(),
            snake_length: DEFAULT_SNAKE_LENGTH,
            step_duration_ms: DEFAULT_STEP_DURATION_MS,
            planner: PlannerConfig::default(),
        }
    }

    /// Settings reading the card inputs from files written into `dir`.
    fn card_settings(dir: &Path) -> Settings {
        fs::create_dir_all(dir).unwrap();
        let stats = dir.join("stats.json");
        let languages = dir.join("languages.json");
        fs::write(&stats, STATS).unwrap();
        fs::write(&languages, LANGUAGES).unwrap();
        let mut run = settings(GridSource::Demo(3), dir.join("out"));
        run.stats_input = Some(stats);
        run.languages_input = Some(languages);
        run
    }

    #[test]
    fn test_demo_run_writes_both_themes() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = scratch_dir("demo");
        let written = generate(&settings(GridSource::Demo(5), dir.join("out"))).unwrap();
        assert_eq!(
            written,
            vec![dir.join("out/snake-light.svg"), dir.join("out/snake-dark.svg")]
        );
        for path in &written {
            let svg = fs::read_to_string(path).unwrap();
            assert!(svg.starts_with("<svg"));
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_contribution_file_is_read() {
        let dir = scratch_dir("file");
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("days.json");
        fs::write(
            &input,
            r#"[{ "x": 0, "y": 3, "date": "2024-01-10", "count": 2, "level": 1 },
                { "x": 6, "y": 6, "date": "2024-02-24", "count": 9, "level": 4 }]"#,
        )
        .unwrap();
        let grid = GridSource::File(input.clone()).load().unwrap();
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.cells_by_level().len(), 2);

        let mut run = settings(GridSource::File(input), dir.clone());
        run.themes = vec![&Palette::DARK];
        let written = generate(&run).unwrap();
        assert_eq!(written, vec![dir.join("snake-dark.svg")]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_every_artifact_is_written_per_theme() {
        let dir = scratch_dir("all");
        let mut run = card_settings(&dir);
        run.artifacts = Artifact::VARIANTS.to_vec();
        let written = generate(&run).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "snake-light.svg",
                "snake-dark.svg",
                "stats-light.svg",
                "stats-dark.svg",
                "top-langs-light.svg",
                "top-langs-dark.svg",
            ]
        );

        let stats = fs::read_to_string(dir.join("out/stats-dark.svg")).unwrap();
        assert!(stats.contains("octocat's GitHub Stats"));
        assert!(stats.contains(">2,500</span>"));
        assert!(stats.contains("background: #0d1117"));

        let langs = fs::read_to_string(dir.join("out/top-langs-light.svg")).unwrap();
        assert!(langs.contains(">Rust</text>"));
        assert!(langs.contains(">75.0%</text>"));
        assert!(langs.contains("fill=\"#ffffff\""));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_username_overrides_the_stats_login() {
        let dir = scratch_dir("username");
        let mut run = card_settings(&dir);
        run.artifacts = vec![Artifact::Stats];
        run.username = Some("hubot".to_owned());
        run.themes = vec![&Palette::LIGHT];
        let written = generate(&run).unwrap();
        assert_eq!(written, vec![dir.join("out/stats-light.svg")]);
        let svg = fs::read_to_string(&written[0]).unwrap();
        assert!(svg.contains("hubot's GitHub Stats"));
        assert!(!svg.contains("octocat"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_selected_artifact_without_input_writes_nothing() {
        let dir = scratch_dir("missing");
        let mut run = settings(GridSource::Demo(1), dir.join("out"));
        run.artifacts = vec![Artifact::Snake, Artifact::TopLangs];
        assert!(matches!(
            generate(&run),
            Err(GenerateError::MissingInput(Artifact::TopLangs))
        ));
        assert!(!dir.join("out").exists());
    }

    #[test]
    fn test_card_input_errors_surface() {
        let dir = scratch_dir("not-found");
        let mut run = card_settings(&dir);
        fs::write(run.stats_input.as_ref().unwrap(), r#"{ "message": "Not Found" }"#).unwrap();
        run.artifacts = vec![Artifact::Stats];
        assert!(matches!(
            generate(&run),
            Err(GenerateError::Card(CardError::UserNotFound))
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_available_artifacts_follow_the_inputs() {
        let dir = scratch_dir("available");
        let mut run = settings(GridSource::Demo(1), dir.clone());
        assert_eq!(run.available_artifacts(), vec![Artifact::Snake]);
        run.source = None;
        run.languages_input = Some(dir.join("languages.json"));
        assert_eq!(run.available_artifacts(), vec![Artifact::TopLangs]);
        run.stats_input = Some(dir.join("stats.json"));
        assert_eq!(
            run.available_artifacts(),
            vec![Artifact::Stats, Artifact::TopLangs]
        );
    }

    #[test]
    fn test_artifacts_are_found_by_name() {
        assert_eq!(Artifact::by_name("snake"), Some(Artifact::Snake));
        assert_eq!(Artifact::by_name(" Top-Langs "), Some(Artifact::TopLangs));
        assert_eq!(Artifact::by_name("badges"), None);
        assert_eq!(Artifact::Stats.to_string(), "stats");
        assert_eq!(
            GenerateError::MissingInput(Artifact::TopLangs).to_string(),
            "no input given for the top-langs artifact"
        );
    }

    #[test]
    fn test_missing_input_is_an_io_error() {
        let source = GridSource::File(PathBuf::from("/definitely/not/here.json"));
        assert!(matches!(source.load(), Err(SnakeError::Io(_))));
    }

    #[test]
    fn test_oversized_snake_is_rejected() {
        let grid = Grid::empty(3, 7).unwrap();
        assert!(matches!(
            plan(&grid, 4, PlannerConfig::default()),
            Err(SnakeError::NoInitialSnake(_))
        ));
        assert!(matches!(
            plan(&grid, 0, PlannerConfig::default()),
            Err(SnakeError::NoInitialSnake(_))
        ));
    }

    #[test]
    fn test_demo_grids_depend_only_on_the_seed() {
        assert_eq!(
            GridSource::Demo(11).load().unwrap(),
            GridSource::Demo(11).load().unwrap()
        );
        assert_ne!(
            GridSource::Demo(11).load().unwrap(),
            GridSource::Demo(12).load().unwrap()
        );
    }
}
