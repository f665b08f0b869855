use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use dune_detector::batch::{run_batch, RunParams};
use dune_detector::config::load_params;
use dune_detector::profile::{read_segment_csvs, Profile, ProfileKey};
use dune_detector::report::{CsvDirSink, TableSink};
use dune_detector::types::Detection;
use dune_detector::{DetectorParams, DuneDetector};

#[derive(Parser, Debug)]
#[command(author, version, about = "Beach profile landmark detection and morphometrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect landmarks across all profiles and write the result tables
    Run(RunArgs),
    /// Render one profile in the terminal with its detected landmarks
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Directory of per-segment CSV files
    input: PathBuf,

    /// Output directory for the result tables
    #[arg(short, long, default_value = "tables")]
    output: PathBuf,

    /// Region id tagged onto every profile of the run
    #[arg(long, default_value_t = 29)]
    region: u16,

    /// Override the lateral profile-spacing estimate
    #[arg(long)]
    spacing: Option<f64>,

    /// JSON file overriding detector/filter parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Directory of per-segment CSV files
    input: PathBuf,

    /// Segment of the profile to inspect
    #[arg(long)]
    segment: u16,

    /// Line id of the profile to inspect
    #[arg(long)]
    line: u32,

    /// Region id tagged onto every profile of the run
    #[arg(long, default_value_t = 29)]
    region: u16,

    /// Chart width in characters
    #[arg(long, default_value_t = 90)]
    width: usize,

    /// Chart height in rows
    #[arg(long, default_value_t = 20)]
    height: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let mut params = match &args.config {
        Some(path) => load_params(path).map_err(|e| anyhow!(e))?,
        None => RunParams::default(),
    };
    if args.spacing.is_some() {
        params.spacing = args.spacing;
    }

    let store = read_segment_csvs(&args.input, args.region)
        .with_context(|| format!("loading profiles from {}", args.input.display()))?;
    info!("loaded {} profiles", store.len());

    let output = run_batch(&store, &params);

    let mut sink = CsvDirSink::new(&args.output)?;
    sink.write_all(&output.tables())?;
    info!("wrote tables to {}", args.output.display());

    if let Some(path) = &args.summary {
        let json = serde_json::to_string_pretty(&output.summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing summary {}", path.display()))?;
    }

    let s = &output.summary;
    println!(
        "{} profiles, {} complete ({} shore / {} crest / {} toe / {} heel failures), \
         {} rows retained after filtering",
        s.profiles_total,
        s.features_complete,
        s.failures.shore,
        s.failures.crest,
        s.failures.toe,
        s.failures.heel,
        s.rows_retained
    );
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let store = read_segment_csvs(&args.input, args.region)
        .with_context(|| format!("loading profiles from {}", args.input.display()))?;
    let key = ProfileKey {
        region: args.region,
        segment: args.segment,
        line: args.line,
    };
    let profile = store
        .get(key)
        .ok_or_else(|| anyhow!("no profile {} in store", key))?;

    let detector = DuneDetector::new(DetectorParams::default());
    let detection = detector.detect(profile);

    println!("profile {} ({} samples)", key, profile.len());
    println!("{}", render_profile(profile, &detection, args.width, args.height));
    match &detection {
        Detection::Complete(fs) => {
            for (tag, name, lm) in [
                ("S", "shore", fs.shore),
                ("T", "toe", fs.toe),
                ("C", "crest", fs.crest),
                ("H", "heel", fs.heel),
            ] {
                println!("  {} {:<6} x={:>9.2}  y={:>8.2}", tag, name, lm.x, lm.y);
            }
        }
        Detection::Failed(kind) => {
            println!("  no {} found; landmark chain aborted", kind.name());
        }
    }
    Ok(())
}

/// Renders the profile as a character grid: `*` for samples, `-` for the
/// zero-elevation datum, landmark letters on top.
fn render_profile(profile: &Profile, detection: &Detection, width: usize, height: usize) -> String {
    let samples = profile.samples();
    if samples.is_empty() {
        return "(empty profile)".to_string();
    }
    let width = width.max(2);
    let height = height.max(2);

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (0.0f64, 0.0f64);
    for s in samples {
        min_x = min_x.min(s.x);
        max_x = max_x.max(s.x);
        min_y = min_y.min(s.y);
        max_y = max_y.max(s.y);
    }
    let span_x = (max_x - min_x).max(f64::EPSILON);
    let span_y = (max_y - min_y).max(f64::EPSILON);
    let col = |x: f64| (((x - min_x) / span_x) * (width - 1) as f64).round() as usize;
    let row = |y: f64| (height - 1) - (((y - min_y) / span_y) * (height - 1) as f64).round() as usize;

    let mut canvas = vec![vec![' '; width]; height];
    for c in &mut canvas[row(0.0)] {
        *c = '-';
    }
    for s in samples {
        canvas[row(s.y)][col(s.x)] = '*';
    }
    if let Detection::Complete(fs) = detection {
        for (tag, lm) in [('S', fs.shore), ('T', fs.toe), ('C', fs.crest), ('H', fs.heel)] {
            canvas[row(lm.y)][col(lm.x)] = tag;
        }
    }

    let mut out = String::new();
    for (r, line) in canvas.iter().enumerate() {
        let label = if r == 0 {
            format!("{:>8.2} ", max_y)
        } else if r == height - 1 {
            format!("{:>8.2} ", min_y)
        } else {
            " ".repeat(9)
        };
        out.push_str(&label);
        out.extend(line.iter());
        out.push('\n');
    }
    out.push_str(&format!("{:>9}{:.1} .. {:.1} m\n", "x: ", min_x, max_x));
    out
}
