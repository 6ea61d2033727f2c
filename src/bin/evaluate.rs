//! Evaluate a branch predictor against one or more recorded traces.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use bpsim::*;

fn parse_kind(s: &str) -> Result<PredictorKind, String> {
    s.parse().map_err(|e: BuildError| e.to_string())
}

#[derive(Parser)]
#[command(version, about = "Simulate branch predictors against recorded traces")]
struct Cli {
    /// Predictor to evaluate: Gshare, Bimodal, or Tournament
    #[arg(value_parser = parse_kind)]
    predictor: PredictorKind,

    /// Number of entries in each prediction table (a power of two)
    #[arg(short = 's', long, default_value_t = 1024)]
    table_size: usize,

    /// Also evaluate the stateless baseline predictors
    #[arg(long)]
    baselines: bool,

    /// Number of worst-behaved branches to list per trace
    #[arg(long, default_value_t = 4)]
    worst: usize,

    /// Trace files to replay
    #[arg(required = true)]
    traces: Vec<PathBuf>,
}

fn evaluate_baseline(
    p: &mut impl BranchPredictor,
    path: &Path,
) -> Result<(), TraceError> {
    let reader = TraceReader::open(path)?;
    let stats = replay(p, reader);
    println!("  {:20} {}", p.name(), stats.summary());
    Ok(())
}

fn evaluate_trace(args: &Cli, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let reader = TraceReader::open(path)?;
    println!(
        "[*] {}, {} records declared",
        path.display(),
        reader.declared_records()
    );

    let mut predictor = args.predictor.build(args.table_size)?;
    let stats = replay(&mut predictor, reader);
    println!("  {:20} {}", predictor.name(), stats.summary());

    if args.baselines {
        evaluate_baseline(&mut TakenPredictor, path)?;
        evaluate_baseline(&mut NotTakenPredictor, path)?;
        evaluate_baseline(&mut RandomPredictor, path)?;
    }

    println!("      Unique branches: {}", stats.num_unique_branches());
    if args.worst > 0 && stats.branches > 0 {
        println!("      Most mispredicted branches:");
        for (pc, data) in stats.most_mispredicted(args.worst) {
            println!(
                "        {:08x} {:8}/{:8} ({:.4})",
                pc,
                data.misses,
                data.occ,
                data.mispredict_rate()
            );
        }
    }
    println!();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();

    for path in &args.traces {
        if let Err(e) = evaluate_trace(&args, path) {
            eprintln!("error: {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
