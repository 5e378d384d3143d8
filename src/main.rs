use dustsim::{Scenario, ScenarioConfig};
use dustsim::run_2d;
use dustsim::bench_advance;

use clap::Parser;
use anyhow::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Setup YAML under `scenarios/`; the documented defaults apply when absent
    #[arg(short)]
    file_name: Option<String>,

    /// Time the physics update instead of running the viewer
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_advance();
        return Ok(());
    }

    let scenario_cfg = match &args.file_name {
        Some(name) => load_scenario_from_yaml(name)?,
        None => ScenarioConfig::default(),
    };

    let scenario = Scenario::build_scenario(scenario_cfg);
    run_2d(scenario);

    Ok(())
}
