use dice_sums::report::{render_histogram, render_table, save_report, Report};
use dice_sums::simulation::{convergence_sweep, DiceSumExperiment, DEFAULT_SWEEP_SIZES};
use dice_sums::types::TrialCount;
use dice_sums::{env_config, Result};

const USAGE: &str =
    "Usage: dice-simulate [--trials N] [--seed S] [--output FILE] [--parallel] [--histogram] [--sweep]";

struct Args {
    trials: TrialCount,
    seed: u64,
    output: Option<String>,
    parallel: bool,
    histogram: bool,
    sweep: bool,
}

fn exit_with(err: impl std::fmt::Display) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut trials = env_config::trials().unwrap_or_else(|e| exit_with(format!("DICE_TRIALS: {e}")));
    let mut seed = env_config::seed().unwrap_or_else(|e| exit_with(format!("DICE_SEED: {e}")));
    let mut output: Option<String> = None;
    let mut parallel = false;
    let mut histogram = false;
    let mut sweep = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--trials" => {
                i += 1;
                if i < args.len() {
                    trials = args[i].parse().unwrap_or_else(|e| exit_with(e));
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = env_config::parse_seed(&args[i]).unwrap_or_else(|e| exit_with(e));
                }
            }
            "--output" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].clone());
                }
            }
            "--parallel" => {
                parallel = true;
            }
            "--histogram" => {
                histogram = true;
            }
            "--sweep" => {
                sweep = true;
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!();
                println!("Options:");
                println!("  --trials N     Number of two-dice rolls (default: $DICE_TRIALS or 100000)");
                println!("  --seed S       RNG seed (default: $DICE_SEED or 42)");
                println!("  --output FILE  Also write the report as JSON to FILE");
                println!("  --parallel     Roll chunks across the rayon pool");
                println!("  --histogram    Print an ASCII bar chart of the empirical distribution");
                println!("  --sweep        Print mean |difference| for N = 100, 10000, 1000000");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                exit_with(USAGE);
            }
        }
        i += 1;
    }

    Args {
        trials,
        seed,
        output,
        parallel,
        histogram,
        sweep,
    }
}

fn run(args: Args) -> Result<()> {
    let experiment = DiceSumExperiment::new(args.trials).with_seed(args.seed);
    let outcome = if args.parallel {
        experiment.execute_parallel()?
    } else {
        experiment.execute()?
    };
    let report = Report::new(&outcome, Some(args.seed));

    println!("Dice sums ({} trials, seed {})", args.trials, args.seed);
    println!();
    print!("{}", render_table(&report));
    if args.histogram {
        println!();
        print!("{}", render_histogram(&report));
    }

    if args.sweep {
        println!();
        println!("{:>9} | Mean |diff| | Max |diff|", "Trials");
        for point in convergence_sweep(&DEFAULT_SWEEP_SIZES, 10, args.seed)? {
            println!(
                "{:>9} | {:>10.4}% | {:>9.4}%",
                point.trials,
                point.mean_abs_difference * 100.0,
                point.max_abs_difference * 100.0
            );
        }
    }

    if let Some(path) = args.output {
        save_report(&report, &path)?;
        tracing::info!(path = %path, "report written");
    }
    Ok(())
}

fn main() {
    env_config::init_logging();
    let args = parse_args();
    if args.parallel || args.sweep {
        env_config::init_rayon_threads();
    }
    if let Err(e) = run(args) {
        exit_with(e);
    }
}
