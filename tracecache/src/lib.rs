//! # TraceCache
//!
//! TraceCache is a library for trace-driven simulation of a single level cache
//!
//! It models banks of 64 byte blocks under direct mapping or full associativity with FIFO
//! replacement, arranged either as one unified bank or as split instruction and data banks, and
//! provides a simulator which replays `<I|D> <hex address>` traces through them
//!
//! While small, it keeps the mapping policy pluggable so the bank code is shared by both mappings

/// Splitting addresses into tag, index and offset
pub mod address;

/// Contains the implementation of a cache bank, and a utility enum for the provided mappings
pub mod cache;

/// Contains the simulation configuration, which can be parsed from CLI tokens or JSON
pub mod config;

/// The error type shared by the whole library
pub mod error;

/// Opening trace files
pub mod io;

/// Contains the provided replacement policies, with a trait for implementing custom ones
pub mod replacement_policies;

/// Contains the simulator used to replay a trace through a cache system
pub mod simulator;

/// Hit and access counters
pub mod stats;

/// Routing accesses to unified or split banks
pub mod system;

/// Contains the trace record types and the line reader
pub mod trace;

#[cfg(test)]
mod test;
