//! Highlight reel planner binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_cli::{load_report, resolve_video_duration, write_output};
use reel_models::OrderingMode;
use reel_planner::{HighlightPlanner, NoRandom, PlannerConfig, RandomSource, RngSource};

#[derive(Parser, Debug)]
#[command(name = "reel-plan")]
#[command(about = "Plan a highlight reel from detector output", long_about = None)]
#[command(version)]
struct Args {
    /// Detection report (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Source video to probe for its duration
    #[arg(long)]
    video: Option<PathBuf>,

    /// Video duration in seconds, skips probing
    #[arg(long)]
    duration: Option<f64>,

    /// Seed for reproducible jitter and rank swaps
    #[arg(long, conflicts_with = "no_random")]
    seed: Option<u64>,

    /// Disable jitter and rank swaps entirely
    #[arg(long)]
    no_random: bool,

    /// Segment order: chronological, importance or dramatic
    #[arg(long)]
    ordering: Option<OrderingMode>,

    /// Write the plan here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Planning failed: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    for directive in ["reel_planner=info", "reel_cli=info", "reel_media=info"] {
        if let Ok(d) = directive.parse() {
            env_filter = env_filter.add_directive(d);
        }
    }

    // stdout carries the plan, logs go to stderr
    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true),
            )
            .with(env_filter)
            .init();
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = PlannerConfig::from_env().context("invalid planner environment")?;
    if let Some(ordering) = args.ordering {
        config.ordering = ordering;
    }

    let planner = HighlightPlanner::new(config).context("invalid planner configuration")?;
    info!("Planner config: {:?}", planner.config());

    let report = load_report(&args.input)?;
    let duration = resolve_video_duration(args.duration, &report, args.video.as_deref()).await;

    let mut rng: Box<dyn RandomSource> = if args.no_random {
        Box::new(NoRandom)
    } else if let Some(seed) = args.seed {
        Box::new(RngSource::seeded(seed))
    } else {
        Box::new(RngSource::thread())
    };

    let output = planner.plan(&report, &duration, rng.as_mut());

    info!(
        segments = output.plan.highlight_count,
        total_duration = output.plan.total_duration,
        ending_added = output.summary.ending_added,
        "Plan ready"
    );

    write_output(&output, args.output.as_deref(), args.pretty)
}
