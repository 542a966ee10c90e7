mod tests;

use crate::config::{Mapping, Organization, SimulationConfig};
use crate::error::SimError;
use crate::simulator::Simulator;
use crate::stats::SimulationResult;

/// Installs a subscriber so simulator logging shows up with `--nocapture`
pub fn init() {
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .unwrap_or_default();
}

/// Runs a textual trace through a fresh simulator
pub fn run(cache_size: u64, mapping: Mapping, organization: Organization, trace: &str) -> Result<SimulationResult, SimError> {
    init();
    let config = SimulationConfig::new(cache_size, mapping, organization);
    let mut simulator = Simulator::new(&config)?;
    Ok(simulator.simulate(trace.as_bytes())?.clone())
}
