use crate::cache::{CacheTrait, GenericBank};
use crate::config::{Organization, SimulationConfig};
use crate::error::SimError;
use crate::trace::{AccessKind, AccessRecord};

/// The banks that make up the cache, fixed when the system is built
pub enum CacheSystem {
    /// One bank for every access
    Unified(GenericBank),
    /// One bank per access kind, each with half the blocks. The banks share nothing, including
    /// their FIFO cursors
    Split {
        instruction: GenericBank,
        data: GenericBank,
    },
}

impl CacheSystem {
    /// Validates the configuration and allocates the banks
    pub fn new(config: &SimulationConfig) -> Result<Self, SimError> {
        let bank_blocks = config.validate()?;
        Ok(match config.organization {
            Organization::Unified => CacheSystem::Unified(GenericBank::new(config.mapping, bank_blocks)?),
            Organization::Split => CacheSystem::Split {
                instruction: GenericBank::new(config.mapping, bank_blocks)?,
                data: GenericBank::new(config.mapping, bank_blocks)?,
            },
        })
    }

    /// The bank an access of this kind is routed to
    pub fn bank_for(&self, kind: AccessKind) -> &GenericBank {
        match (self, kind) {
            (CacheSystem::Unified(bank), _) => bank,
            (CacheSystem::Split { instruction, .. }, AccessKind::Instruction) => instruction,
            (CacheSystem::Split { data, .. }, AccessKind::Data) => data,
        }
    }

    fn bank_for_mut(&mut self, kind: AccessKind) -> &mut GenericBank {
        match (self, kind) {
            (CacheSystem::Unified(bank), _) => bank,
            (CacheSystem::Split { instruction, .. }, AccessKind::Instruction) => instruction,
            (CacheSystem::Split { data, .. }, AccessKind::Data) => data,
        }
    }

    /// Routes an access to its bank, decoding the address with that bank's layout. Returns true on
    /// a hit
    pub fn process(&mut self, record: &AccessRecord) -> bool {
        self.bank_for_mut(record.kind).read_and_update_line(record.address)
    }

    /// Every bank with a name, in a fixed order
    pub fn banks(&self) -> Vec<(&'static str, &GenericBank)> {
        match self {
            CacheSystem::Unified(bank) => vec![("unified", bank)],
            CacheSystem::Split { instruction, data } => vec![("instruction", instruction), ("data", data)],
        }
    }
}
