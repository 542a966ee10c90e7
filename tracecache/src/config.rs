use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::address::{BitLayout, BLOCK_SIZE};
use crate::error::SimError;

/// A configuration for one simulation run. Immutable once validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Total cache capacity in bytes, shared between the banks under split organization
    pub cache_size: u64,
    pub mapping: Mapping,
    pub organization: Organization,
}

/// The mapping of every bank - direct or fully associative (with FIFO replacement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mapping {
    #[serde(alias = "dm", alias = "direct")]
    DirectMapped,
    #[serde(alias = "fa", alias = "full")]
    FullyAssociative,
}

/// Whether instruction and data accesses share one bank or have one each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Organization {
    #[serde(alias = "uc", alias = "unified")]
    Unified,
    #[serde(alias = "sc", alias = "split")]
    Split,
}

impl SimulationConfig {
    pub fn new(cache_size: u64, mapping: Mapping, organization: Organization) -> Self {
        Self {
            cache_size,
            mapping,
            organization,
        }
    }

    /// Reads a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SimError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SimError::configuration(format!("couldn't parse {}: {e}", path.display())))
    }

    /// Total number of blocks across every bank
    pub fn total_blocks(&self) -> u64 {
        self.cache_size / BLOCK_SIZE as u64
    }

    /// Checks the configuration and returns the number of blocks in each bank
    ///
    /// The cache size must be a positive multiple of the block size, and every bank must end up
    /// with a power of two number of blocks. Split caches halve the block count, which has to be
    /// even; it is never rounded down
    pub fn validate(&self) -> Result<u32, SimError> {
        if self.cache_size == 0 || self.cache_size % BLOCK_SIZE as u64 != 0 {
            return Err(SimError::configuration(format!(
                "cache size must be a positive multiple of {BLOCK_SIZE} bytes, got {}",
                self.cache_size
            )));
        }
        let total_blocks = self.total_blocks();
        let bank_blocks = match self.organization {
            Organization::Unified => total_blocks,
            Organization::Split if total_blocks % 2 == 0 => total_blocks / 2,
            Organization::Split => {
                return Err(SimError::configuration(format!(
                    "a split cache needs an even number of blocks to share between its banks, got {total_blocks}"
                )));
            }
        };
        if !bank_blocks.is_power_of_two() {
            return Err(SimError::configuration(format!(
                "each bank needs a power of two number of blocks, got {bank_blocks}"
            )));
        }
        let bank_blocks = u32::try_from(bank_blocks)
            .map_err(|_| SimError::configuration(format!("{bank_blocks} blocks is too many for a 32-bit address space")))?;
        BitLayout::new(bank_blocks)?;
        Ok(bank_blocks)
    }
}

impl FromStr for Mapping {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dm" | "direct" => Ok(Mapping::DirectMapped),
            "fa" | "full" => Ok(Mapping::FullyAssociative),
            other => Err(SimError::configuration(format!("unknown cache mapping {other:?}, expected dm or fa"))),
        }
    }
}

impl FromStr for Organization {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uc" | "unified" => Ok(Organization::Unified),
            "sc" | "split" => Ok(Organization::Split),
            other => Err(SimError::configuration(format!(
                "unknown cache organization {other:?}, expected uc or sc"
            ))),
        }
    }
}

impl Display for Mapping {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mapping::DirectMapped => "dm",
            Mapping::FullyAssociative => "fa",
        })
    }
}

impl Display for Organization {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Organization::Unified => "uc",
            Organization::Split => "sc",
        })
    }
}
