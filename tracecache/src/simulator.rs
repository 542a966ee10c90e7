use std::io::BufRead;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};
use crate::cache::CacheTrait;
use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::stats::SimulationResult;
use crate::system::CacheSystem;
use crate::trace::{AccessRecord, TraceReader};

/// The simulator feeds a trace through a cache system and collects the results.
///
/// Each simulator is one run: the banks start empty and only fill from the records it is given.
/// Build a fresh one to replay a trace from a cold cache
pub struct Simulator {
    config: SimulationConfig,
    system: CacheSystem,
    result: SimulationResult,
    simulation_time: Duration,
}

impl Simulator {

    /// Creates a new simulator for a given configuration
    ///
    /// # Arguments
    ///
    /// * `config`: The cache configuration, validated here before any bank is allocated
    ///
    /// returns: Result<Simulator, SimError>
    pub fn new(config: &SimulationConfig) -> Result<Self, SimError> {
        let system = CacheSystem::new(config)?;
        for (name, bank) in system.banks() {
            debug!(bank = name, blocks = bank.capacity(), layout = ?bank.layout(), "allocated cache bank");
        }
        Ok(Self {
            config: *config,
            system,
            result: SimulationResult::default(),
            simulation_time: Duration::new(0, 0),
        })
    }

    /// Simulates a single access, returning true on a hit
    pub fn access(&mut self, record: &AccessRecord) -> bool {
        let hit = self.system.process(record);
        trace!(kind = ?record.kind, address = format_args!("{:#010x}", record.address), hit);
        self.result.record(record.kind, hit);
        hit
    }

    /// Simulates every record until the end of the input
    ///
    /// The first error stops the run and is returned; the counters are only handed out once the
    /// whole sequence has been processed
    ///
    /// # Arguments
    ///
    /// * `records`: The access records in trace order
    ///
    /// returns: Result<&SimulationResult, SimError>
    pub fn simulate_records<I>(&mut self, records: I) -> Result<&SimulationResult, SimError>
    where
        I: IntoIterator<Item = Result<AccessRecord, SimError>>,
    {
        let start = Instant::now();
        let outcome = records.into_iter().try_for_each(|record| {
            self.access(&record?);
            Ok::<(), SimError>(())
        });
        self.simulation_time += start.elapsed();
        outcome?;
        info!(
            accesses = self.result.total.accesses,
            hits = self.result.total.hits,
            elapsed = ?self.simulation_time,
            "finished simulation"
        );
        Ok(&self.result)
    }

    /// Simulates a textual trace read from `reader`
    pub fn simulate<R: BufRead>(&mut self, reader: R) -> Result<&SimulationResult, SimError> {
        debug!(config = ?self.config, "simulating trace");
        self.simulate_records(TraceReader::new(reader))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn system(&self) -> &CacheSystem {
        &self.system
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    /// Gets the number of never filled slots for each bank
    pub fn get_uninitialised_line_counts(&self) -> Vec<(&'static str, u64)> {
        self.system
            .banks()
            .into_iter()
            .map(|(name, bank)| (name, bank.get_uninitialised_line_count() as u64))
            .collect()
    }
}
