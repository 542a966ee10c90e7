use std::error::Error;
use crate::cache::CacheTrait;
use crate::config::Mapping::{DirectMapped, FullyAssociative};
use crate::config::Organization::{Split, Unified};
use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::simulator::Simulator;
use crate::trace::{AccessKind, AccessRecord};
use super::run;

/// A deterministic pseudo random trace mixing both kinds over a small address range, so it has a
/// decent share of hits and evictions
fn mixed_trace(len: usize) -> String {
    let mut state: u32 = 0x2545_f491;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let kind = if state & 0x100 == 0 { 'I' } else { 'D' };
            format!("{kind} {:x}\n", (state >> 12) & 0x3fff)
        })
        .collect()
}

#[test]
fn direct_mapped_distinct_indices_miss() -> Result<(), Box<dyn Error>> {
    // 0x0 and 0x80 share index 0 with different tags, 0x40 is index 1
    let result = run(128, DirectMapped, Unified, "D 0\nD 40\nD 80\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (3, 0));
    Ok(())
}

#[test]
fn direct_mapped_resident_block_hits() -> Result<(), Box<dyn Error>> {
    let result = run(128, DirectMapped, Unified, "D 0\nD 0\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (2, 1));
    // 0x40 goes to the other slot and leaves 0x0 alone
    let result = run(128, DirectMapped, Unified, "D 0\nD 40\nD 0\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (3, 1));
    Ok(())
}

#[test]
fn direct_mapped_same_block_different_offsets_hit() -> Result<(), Box<dyn Error>> {
    let result = run(128, DirectMapped, Unified, "I 100\nI 104\nI 13f\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (3, 2));
    Ok(())
}

#[test]
fn direct_mapped_conflicts_thrash() -> Result<(), Box<dyn Error>> {
    let result = run(128, DirectMapped, Unified, "D 0\nD 80\nD 0\nD 80\nD 0\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (5, 0));
    Ok(())
}

#[test]
fn fully_associative_evicts_first_inserted() -> Result<(), Box<dyn Error>> {
    // Two blocks, three distinct tags: 0x80 evicts 0x0
    let result = run(128, FullyAssociative, Unified, "D 0\nD 40\nD 80\nD 0\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (4, 0));
    let result = run(128, FullyAssociative, Unified, "D 0\nD 40\nD 80\nD 80\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (4, 1));
    // The second tag survives the first eviction
    let result = run(128, FullyAssociative, Unified, "D 0\nD 40\nD 80\nD 40\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (4, 1));
    Ok(())
}

#[test]
fn fully_associative_has_no_index_conflicts() -> Result<(), Box<dyn Error>> {
    // Thrashes a direct mapped cache of the same size
    let result = run(128, FullyAssociative, Unified, "D 0\nD 80\nD 0\nD 80\nD 0\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (5, 3));
    Ok(())
}

#[test]
fn fifo_ignores_hits_when_evicting() -> Result<(), Box<dyn Error>> {
    // 0x0 is hit just before the bank overflows, but it was still inserted first
    let result = run(256, FullyAssociative, Unified, "D 0\nD 40\nD 80\nD c0\nD 0\nD 100\nD 0\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (7, 1));
    Ok(())
}

#[test]
fn split_banks_are_independent() -> Result<(), Box<dyn Error>> {
    for mapping in [DirectMapped, FullyAssociative] {
        let result = run(256, mapping, Split, "D 0\nI 0\n")?;
        assert_eq!((result.total.accesses, result.total.hits), (2, 0));
        let result = run(256, mapping, Split, "D 0\nI 0\nD 0\nI 0\n")?;
        assert_eq!((result.total.accesses, result.total.hits), (4, 2));
        assert_eq!((result.instruction.accesses, result.instruction.hits), (2, 1));
        assert_eq!((result.data.accesses, result.data.hits), (2, 1));
        // The same accesses share a unified bank
        let result = run(256, mapping, Unified, "D 0\nI 0\n")?;
        assert_eq!((result.total.accesses, result.total.hits), (2, 1));
    }
    Ok(())
}

#[test]
fn split_banks_have_separate_fifo_cursors() -> Result<(), Box<dyn Error>> {
    // Two slots per bank. Overflowing the data bank once must not move the instruction cursor
    let trace = "I 0\nI 40\nD 0\nD 40\nD 80\nI 80\nI 40\n";
    let result = run(256, FullyAssociative, Split, trace)?;
    assert_eq!(result.instruction.hits, 1);
    assert_eq!(result.data.hits, 0);
    Ok(())
}

#[test]
fn address_zero_is_an_access() -> Result<(), Box<dyn Error>> {
    let result = run(128, DirectMapped, Unified, "I 0\nD 40\nI 0\n")?;
    assert_eq!((result.total.accesses, result.total.hits), (3, 1));
    Ok(())
}

#[test]
fn every_record_counts_once() -> Result<(), Box<dyn Error>> {
    let trace = mixed_trace(5_000);
    for mapping in [DirectMapped, FullyAssociative] {
        for organization in [Unified, Split] {
            for size in [128, 512, 4096] {
                let result = run(size, mapping, organization, &trace)?;
                assert_eq!(result.total.accesses, 5_000);
                assert!(result.total.hits <= result.total.accesses);
                assert_eq!(result.instruction.accesses + result.data.accesses, result.total.accesses);
                assert_eq!(result.instruction.hits + result.data.hits, result.total.hits);
            }
        }
    }
    Ok(())
}

#[test]
fn fresh_simulators_give_identical_results() -> Result<(), Box<dyn Error>> {
    let trace = mixed_trace(2_000);
    for mapping in [DirectMapped, FullyAssociative] {
        for organization in [Unified, Split] {
            let first = run(1024, mapping, organization, &trace)?;
            let second = run(1024, mapping, organization, &trace)?;
            assert_eq!(first, second);
        }
    }
    Ok(())
}

#[test]
fn fifo_loop_hits_only_when_it_fits() -> Result<(), Box<dyn Error>> {
    // A loop over eight blocks: never fits four slots, always fits eight
    let trace: String = (0..4).flat_map(|_| (0..8u32).map(|b| format!("D {:x}\n", b * 64))).collect();
    let small = run(256, FullyAssociative, Unified, &trace)?;
    let large = run(512, FullyAssociative, Unified, &trace)?;
    assert_eq!(small.total.hits, 0);
    assert_eq!(large.total.hits, 24);
    Ok(())
}

#[test]
fn malformed_record_aborts_the_run() {
    let config = SimulationConfig::new(128, DirectMapped, Unified);
    let mut simulator = Simulator::new(&config).unwrap();
    let error = simulator.simulate("D 0\nX 40\nD 0\n".as_bytes()).unwrap_err();
    match error {
        SimError::MalformedRecord { line, content, .. } => {
            assert_eq!(line, 2);
            assert_eq!(content, "X 40");
        }
        other => panic!("expected a malformed record, got {other}"),
    }
}

#[test]
fn invalid_configuration_builds_nothing() {
    let config = SimulationConfig::new(192, DirectMapped, Unified);
    assert!(matches!(Simulator::new(&config), Err(SimError::Configuration(_))));
}

#[test]
fn access_routes_by_kind() -> Result<(), Box<dyn Error>> {
    let config = SimulationConfig::new(256, DirectMapped, Split);
    let mut simulator = Simulator::new(&config)?;
    assert!(!simulator.access(&AccessRecord::new(AccessKind::Instruction, 0x40)));
    assert!(simulator.access(&AccessRecord::new(AccessKind::Instruction, 0x40)));
    assert!(!simulator.access(&AccessRecord::new(AccessKind::Data, 0x40)));
    let counts = simulator.get_uninitialised_line_counts();
    assert_eq!(counts, vec![("instruction", 1), ("data", 1)]);
    let data_bank = simulator.system().bank_for(AccessKind::Data);
    assert_eq!(data_bank.capacity(), 2);
    assert_eq!(data_bank.layout().index_bits, 1);
    Ok(())
}
