use std::{fs::File, io::BufWriter, path::PathBuf, time::Instant};

use clap::Parser;
use lander_ga::{init, App, Error};
use log::info;

#[derive(Parser, Debug)]
#[command(version, about = "Evolves a landing sequence for a Mars lander scenario")]
struct Args {
    /// Scenario JSON file
    #[arg(long)]
    sim: PathBuf,

    /// Solver settings JSON file
    #[arg(long)]
    settings: PathBuf,

    /// Overrides the seed from the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// Writes the winning trajectory as JSON
    #[arg(long)]
    trajectory_out: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let scenario = init::json::parse_scenario(&args.sim)?;
    let mut settings = init::json::parse_settings(&args.settings)?;
    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }
    let mut app = App::try_new(scenario, settings)?;

    let now = Instant::now();
    let solution = app.run()?;
    let elapsed = now.elapsed();

    println!(
        "Run ended with {:?} after {} generations, score: {:.4} time: {elapsed:?} seed: {}",
        solution.outcome,
        app.algorithm().generations(),
        solution.score().unwrap_or(f64::NAN),
        app.seed()
    );
    println!("{}", solution.history.pretty_to_string());

    if let Some(path) = args.trajectory_out {
        let file = File::create(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), &solution.history)?;
        info!("Trajectory written to {}", path.display());
    }
    Ok(())
}
