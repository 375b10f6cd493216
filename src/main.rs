use clap::Parser;
use log::warn;
use std::path::PathBuf;

use tapevision::pipeline::load_frame;
use tapevision::{FrameSummary, Pipeline, PipelineConfig};

#[derive(Parser)]
#[command(name = "tapevision")]
#[command(about = "Locate and pair retro-reflective tape targets in camera frames")]
struct Cli {
    /// Frames to process, in order
    #[arg(value_name = "IMAGE", required = true)]
    images: Vec<PathBuf>,

    /// JSON file with threshold settings (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only trace outermost borders
    #[arg(long)]
    external_only: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print one JSON object per frame instead of text
    #[arg(long)]
    json: bool,
}

fn print_summary(path: &std::path::Path, summary: &FrameSummary) {
    println!("\n=== Frame {}: {} ===", summary.frame, path.display());
    println!("# of tapes: {}", summary.tapes.len());

    for (i, tape) in summary.tapes.iter().enumerate() {
        println!(
            "  Tape#: {}, Center at: {},{} Angle: {} Area: {:.1}",
            i + 1,
            tape.center.0,
            tape.center.1,
            tape.angle.floor(),
            tape.area
        );
    }

    for (i, group) in summary.groups.iter().enumerate() {
        let (a, b) = group.members;
        println!(
            "  Group {}: tapes {} + {}, center {},{}, areas {:.1} / {:.1}",
            i + 1,
            a + 1,
            b + 1,
            group.center.0,
            group.center.1,
            summary.tapes[a].area,
            summary.tapes[b].area
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if args.external_only {
        config.external_only = true;
    }

    let mut pipeline = Pipeline::new(config)?;
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    let mut failed = 0;
    for path in &args.images {
        let frame = match load_frame(path) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Skipping {}: {:#}", path.display(), e);
                failed += 1;
                continue;
            }
        };

        match pipeline.process(&frame) {
            Ok(summary) if args.json => println!("{}", serde_json::to_string(&summary)?),
            Ok(summary) => print_summary(path, &summary),
            Err(e) => {
                warn!("Frame {} skipped: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        warn!("{} of {} frames skipped", failed, args.images.len());
    }

    Ok(())
}
