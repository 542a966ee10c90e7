use std::path::PathBuf;
use std::time::Instant;
use clap::Parser;
use eyre::{Context, Result};
use serde::Serialize;
use tracecache::cache::CacheTrait;
use tracecache::config::{Mapping, Organization, SimulationConfig};
use tracecache::io::get_reader;
use tracecache::simulator::Simulator;
use tracecache::stats::SimulationResult;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = String::from("Trace driven L1 cache simulator"), version)]
struct Args {
    /// Total cache size in bytes, a multiple of 64
    #[arg(required_unless_present = "config")]
    cache_size: Option<u64>,

    /// Cache mapping: dm or fa
    #[arg(required_unless_present = "config")]
    mapping: Option<Mapping>,

    /// Cache organization: uc or sc
    #[arg(required_unless_present = "config")]
    organization: Option<Organization>,

    /// Read the configuration from a JSON file instead of the positional arguments
    #[arg(long, conflicts_with_all = ["cache_size", "mapping", "organization"])]
    config: Option<PathBuf>,

    /// The memory trace to replay
    #[arg(short, long, default_value = "mem_trace1.txt")]
    trace: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Also print instruction and data statistics separately
    #[arg(short, long)]
    breakdown: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a SimulationConfig,
    result: &'a SimulationResult,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        if let Some(path) = &self.config {
            return SimulationConfig::from_json_file(path).wrap_err("Couldn't load the cache configuration");
        }
        match (self.cache_size, self.mapping, self.organization) {
            (Some(cache_size), Some(mapping), Some(organization)) => {
                Ok(SimulationConfig::new(cache_size, mapping, organization))
            }
            _ => Err(eyre::eyre!("cache size, mapping and organization are all required")),
        }
    }
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    let default_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let config = args.simulation_config()?;
    let mut simulator = Simulator::new(&config).wrap_err("Couldn't build the cache")?;
    tracing::debug!(trace = %args.trace.display(), "opening trace");
    let trace_reader = get_reader(&args.trace).wrap_err("Unable to open the trace file")?;
    let result = simulator.simulate(trace_reader).wrap_err("Simulation aborted")?;

    if args.json {
        let report = JsonReport { config: &config, result };
        println!("{}", serde_json::to_string_pretty(&report).wrap_err("Couldn't serialise the output")?);
    } else {
        print!("{}", result.report());
    }
    if args.breakdown {
        println!("\n{}", result.breakdown());
    }
    if args.performance {
        let simulation_time = simulator.get_execution_time();
        let total_time = start.elapsed();
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    if args.debug {
        println!("Parsed input configuration: {config:?}");
        for (name, bank) in simulator.system().banks() {
            let layout = bank.layout();
            println!(
                "{name} bank: {} blocks, offset/index/tag bits {}/{}/{}",
                bank.capacity(),
                layout.offset_bits,
                layout.index_bits,
                layout.tag_bits
            );
        }
        let formatted = simulator
            .get_uninitialised_line_counts()
            .iter()
            .map(|(name, count)| format!("{name}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Uninitialised cache lines by bank: ({formatted})");
    }
    Ok(())
}
