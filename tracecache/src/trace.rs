use std::io::BufRead;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::error::SimError;

lazy_static! {
    // `%c %x`: the kind token, whitespace, then hex digits with an optional 0x
    static ref RECORD_PATTERN: Regex = Regex::new(r"^(?P<kind>\S+)\s+(?:0[xX])?(?P<address>[0-9a-fA-F]+)$").unwrap();
}

/// Whether an access fetched an instruction or touched data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    Instruction,
    Data,
}

/// One line of the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    pub address: u32,
    pub kind: AccessKind,
}

impl AccessRecord {
    pub fn new(kind: AccessKind, address: u32) -> Self {
        Self { address, kind }
    }
}

/// Parses a single trace line
///
/// Returns `Ok(None)` for a blank line, which carries no access. The error is the reason the line
/// was rejected; the reader adds the line number
///
/// # Arguments
///
/// * `line`: The line, without its terminator
///
/// returns: Result<Option<AccessRecord>, String>
///
/// # Examples
///
/// ```
/// use tracecache::trace::{parse_line, AccessKind, AccessRecord};
/// assert_eq!(parse_line("I 4002a0"), Ok(Some(AccessRecord::new(AccessKind::Instruction, 0x4002a0))));
/// assert_eq!(parse_line("D 0"), Ok(Some(AccessRecord::new(AccessKind::Data, 0))));
/// assert_eq!(parse_line("   "), Ok(None));
/// assert!(parse_line("X 10").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Option<AccessRecord>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let captures = RECORD_PATTERN
        .captures(line)
        .ok_or_else(|| "expected an access type followed by a hexadecimal address".to_string())?;
    let kind = match &captures["kind"] {
        "I" => AccessKind::Instruction,
        "D" => AccessKind::Data,
        other => return Err(format!("unknown access type {other:?}, expected I or D")),
    };
    let address = u32::from_str_radix(&captures["address"], 16)
        .map_err(|e| format!("address {:?} is not a 32-bit value: {e}", &captures["address"]))?;
    Ok(Some(AccessRecord::new(kind, address)))
}

/// Reads access records from a trace, one per line
///
/// The iterator yields `Some(Ok(record))` for each access, `Some(Err(..))` for the first line that
/// can't be parsed, and `None` at the end of the input. It stops after an error, the simulator
/// doesn't skip bad records. Any address, 0 included, is a record
pub struct TraceReader<R: BufRead> {
    reader: R,
    buffer: String,
    line: usize,
    finished: bool,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: 0,
            finished: false,
        }
    }

    /// The number of lines read so far
    pub fn line_number(&self) -> usize {
        self.line
    }

    fn fail(&mut self, error: SimError) -> Option<Result<AccessRecord, SimError>> {
        self.finished = true;
        Some(Err(error))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessRecord, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => self.finished = true,
                Ok(_) => {
                    self.line += 1;
                    match parse_line(&self.buffer) {
                        Ok(Some(record)) => return Some(Ok(record)),
                        Ok(None) => continue,
                        Err(reason) => {
                            let error = SimError::MalformedRecord {
                                line: self.line,
                                content: self.buffer.trim_end().to_string(),
                                reason,
                            };
                            return self.fail(error);
                        }
                    }
                }
                Err(e) => {
                    let error = SimError::io("trace", e);
                    return self.fail(error);
                }
            }
        }
        None
    }
}
