use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use contrib_snake::{
    app::{generate, Artifact, GridSource, Settings, DEFAULT_SNAKE_LENGTH},
    models::snake::{path_finder::DEFAULT_MAX_EXPANSIONS, route_planner::PlannerConfig},
    views::snake::{palette::Palette, snake_svg::DEFAULT_STEP_DURATION_MS},
};
use log::debug;

/// Render the snake eating a contribution calendar as animated SVGs, along
/// with the stats and most used languages cards.
#[derive(Parser, Debug)]
#[command(name = "contrib-snake", version)]
struct Args {
    /// Comma separated artifacts to write: snake, stats, top-langs.
    /// Defaults to every artifact whose input is given
    #[arg(long, value_delimiter = ',')]
    types: Option<Vec<String>>,

    /// Contribution JSON: a list of days or a GraphQL calendar response
    #[arg(long, conflicts_with = "demo_seed")]
    input: Option<PathBuf>,

    /// Use a random calendar generated from this seed instead of a file
    #[arg(long)]
    demo_seed: Option<u64>,

    /// Account totals, or the REST user and repository answers, for the stats card
    #[arg(long)]
    stats_input: Option<PathBuf>,

    /// Language byte totals, or the GraphQL repository languages answer
    #[arg(long)]
    languages_input: Option<PathBuf>,

    /// Login shown in the stats card title
    #[arg(long)]
    username: Option<String>,

    /// Directory the SVGs are written to
    #[arg(long, default_value = "dist")]
    output_dir: PathBuf,

    /// Comma separated themes to render
    #[arg(long, value_delimiter = ',', default_value = "light,dark")]
    themes: Vec<String>,

    /// Number of cells of the snake
    #[arg(long, default_value_t = DEFAULT_SNAKE_LENGTH)]
    snake_length: usize,

    /// Milliseconds spent on each pose
    #[arg(long, default_value_t = DEFAULT_STEP_DURATION_MS)]
    step_ms: u64,

    /// Cap on poses expanded by one path search
    #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
    max_expansions: usize,

    /// Do not route the snake back to its start
    #[arg(long)]
    no_loop: bool,
}

fn settings_from(args: Args) -> anyhow::Result<Settings> {
    let source = match (args.input, args.demo_seed) {
        (Some(path), _) => Some(GridSource::File(path)),
        (None, Some(seed)) => Some(GridSource::Demo(seed)),
        (None, None) => None,
    };
    let themes = args
        .themes
        .iter()
        .map(|name| Palette::by_name(name).with_context(|| format!("unknown theme '{name}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut settings = Settings {
        artifacts: Vec::new(),
        source,
        stats_input: args.stats_input,
        languages_input: args.languages_input,
        username: args.username,
        output_dir: args.output_dir,
        themes,
        snake_length: args.snake_length,
        step_duration_ms: args.step_ms,
        planner: PlannerConfig {
            max_expansions: args.max_expansions,
            close_loop: !args.no_loop,
        },
    };
    settings.artifacts = match args.types {
        Some(names) => names
            .iter()
            .map(|name| Artifact::by_name(name).with_context(|| format!("unknown type '{name}'")))
            .collect::<anyhow::Result<Vec<_>>>()?,
        None => settings.available_artifacts(),
    };
    if settings.artifacts.is_empty() {
        bail!("nothing to generate: pass --input, --demo-seed, --stats-input or --languages-input");
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "contrib_snake=info");
    }
    env_logger::init();
    let settings = settings_from(Args::parse())?;
    debug!("Settings: {settings:#?}");
    let written = generate(&settings).context("generating artifacts")?;
    println!("Wrote {} file(s) to {}", written.len(), settings.output_dir.display());
    Ok(())
}
