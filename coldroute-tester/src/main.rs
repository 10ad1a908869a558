mod logic;
mod util;

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use coldroute_game::Difficulty;
use logic::{
    DisruptionPlan, JourneyRequest, JourneySummary, TesterAssets, aggregate, run_journey,
};
use util::parse_seeds;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    /// Weather +10, traffic +20
    Easy,
    /// Weather +15, traffic +30
    Medium,
    /// Weather +20, traffic +40
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "coldroute-tester", version = "0.1.0")]
#[command(about = "Simulated cold-chain journeys over the Coldroute network with random disruptions")]
struct Args {
    /// Network map JSON (defaults to the bundled ten-city map)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Engine tuning JSON (search depth, path limits, edge mutation, magnitudes)
    #[arg(long)]
    engine_config: Option<PathBuf>,

    /// Starting city
    #[arg(long, default_value = "Delhi")]
    source: String,

    /// Destination city
    #[arg(long, default_value = "Chennai")]
    destination: String,

    /// Cargo item from the catalog
    #[arg(long, default_value = "Milk")]
    item: String,

    /// Override the catalog shelf life
    #[arg(long, allow_negative_numbers = true)]
    shelf_life: Option<i32>,

    /// Units carried
    #[arg(long)]
    quantity: Option<u32>,

    /// Disruption severity
    #[arg(long, value_enum, default_value_t = DifficultyArg::Medium)]
    difficulty: DifficultyArg,

    /// Chance per turn that an edge on the remaining route is disrupted
    #[arg(long, default_value_t = 0.3)]
    disruption_chance: f32,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Journeys per seed; iteration i uses seed + i
    #[arg(long, default_value_t = 1)]
    iterations: u64,

    /// Search depth override
    #[arg(long)]
    depth: Option<u32>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output (turn-by-turn status in the console report)
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// List catalog items and exit
    #[arg(long)]
    list_items: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let assets = TesterAssets::load(args.map.as_deref(), args.engine_config.as_deref())?
        .with_search_depth(args.depth)?;

    if maybe_list_items(&args, &assets)? {
        return Ok(());
    }

    ensure!(
        (0.0..=1.0).contains(&args.disruption_chance),
        "--disruption-chance must be within 0.0..=1.0, got {}",
        args.disruption_chance
    );
    let seeds = parse_seeds(&args.seeds)?;
    ensure!(!seeds.is_empty(), "no seeds given");

    if args.report == "console" {
        announce_banner();
    }

    let start_time = Instant::now();
    let journeys = run_journeys(&args, &assets, &seeds)?;
    write_reports(&args, &journeys, start_time)
}

fn maybe_list_items(args: &Args, assets: &TesterAssets) -> Result<bool> {
    if !args.list_items {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available items:")?;
    for item in &assets.catalog.items {
        writeln!(
            output_target.writer(),
            "  {:12} - shelf life {}",
            item.name,
            item.shelf_life
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🚚 Coldroute Journey Tester".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

fn run_journeys(args: &Args, assets: &TesterAssets, seeds: &[u64]) -> Result<Vec<JourneySummary>> {
    let request = JourneyRequest {
        source: args.source.clone(),
        destination: args.destination.clone(),
        item: args.item.clone(),
        shelf_life: args.shelf_life,
        quantity: args.quantity,
    };
    let disruptions = DisruptionPlan {
        chance: args.disruption_chance,
        difficulty: args.difficulty.into(),
    };

    let mut journeys = Vec::new();
    for &seed in seeds {
        for iteration in 0..args.iterations.max(1) {
            let run_seed = seed.wrapping_add(iteration);
            let summary = run_journey(assets, &request, disruptions, run_seed)
                .with_context(|| format!("journey failed for seed {run_seed}"))?;
            log::debug!(
                "seed {run_seed}: {:?} at {} after {} turns",
                summary.status,
                summary.final_location,
                summary.turns
            );
            journeys.push(summary);
        }
    }
    Ok(journeys)
}

fn write_reports(args: &Args, journeys: &[JourneySummary], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    let totals = aggregate(journeys);

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, journeys, &totals)?,
        "markdown" => {
            logic::reports::generate_markdown_report(&mut output_target, journeys, &totals)?;
        }
        _ => {
            logic::reports::generate_console_report(
                &mut output_target,
                journeys,
                &totals,
                args.verbose,
                start_time.elapsed(),
            )?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
