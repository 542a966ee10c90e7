use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::trace::AccessKind;

/// Access and hit counters. Both only ever increase during a run
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub struct Statistics {
    pub accesses: u64,
    pub hits: u64,
}

impl Statistics {
    /// Counts one access, and one hit if `hit`
    pub fn record(&mut self, hit: bool) {
        self.accesses += 1;
        self.hits += hit as u64;
    }

    pub fn misses(&self) -> u64 {
        self.accesses - self.hits
    }

    /// Hits over accesses. NaN when nothing has been accessed, so callers printing it should check
    /// `accesses` first
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.accesses as f64
    }
}

/// Prints the statistics in the fixed report format: accesses, hits, then the hit rate to four
/// decimal places
///
/// # Examples
///
/// ```
/// use tracecache::stats::Statistics;
/// let stats = Statistics { accesses: 4, hits: 1 };
/// assert_eq!(stats.to_string(), "Accesses: 4\nHits:     1\nHit Rate: 0.2500\n");
/// ```
impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hit_rate = if self.accesses == 0 { 0.0 } else { self.hit_rate() };
        writeln!(f, "Accesses: {}", self.accesses)?;
        writeln!(f, "Hits:     {}", self.hits)?;
        writeln!(f, "Hit Rate: {hit_rate:.4}")
    }
}

/// The result of a simulation, the overall counters plus a breakdown by access kind. Can be
/// serialised for JSON output
#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SimulationResult {
    pub total: Statistics,
    pub instruction: Statistics,
    pub data: Statistics,
}

impl SimulationResult {
    pub fn record(&mut self, kind: AccessKind, hit: bool) {
        self.total.record(hit);
        match kind {
            AccessKind::Instruction => self.instruction.record(hit),
            AccessKind::Data => self.data.record(hit),
        }
    }

    /// Writes the compatibility report
    pub fn report(&self) -> String {
        format!("\nCache Statistics\n-----------------\n\n{}", self.total)
    }

    /// Writes the per kind breakdown, including misses
    pub fn breakdown(&self) -> String {
        [("Instruction", &self.instruction), ("Data", &self.data), ("Total", &self.total)]
            .iter()
            .map(|(name, s)| format!("{name:<12} accesses: {:>10}, hits: {:>10}, misses: {:>10}", s.accesses, s.hits, s.misses()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
