use std::fs::File;
use std::io::BufRead;
use std::path::Path;
use crate::error::SimError;
use crate::trace::TraceReader;

/// Opens a trace file for sequential reading
pub fn get_reader(path: impl AsRef<Path>) -> Result<impl BufRead, SimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SimError::io(path, e))?;
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        // Trace lines are short, a few pages of them per read
        const BUFFER_SIZE: usize = 16 * 4096;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    // Memory map the file on unix systems, it is read exactly once from front to back
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        // The map is read only and private to this process. Truncating the file underneath it is
        // the caller's problem, as it is for any mmap
        unsafe {
            let m = Mmap::map(&file).map_err(|e| SimError::io(path, e))?;
            m.advise(Advice::Sequential).map_err(|e| SimError::io(path, e))?;
            Ok(Cursor::new(m))
        }
    }
}

/// Opens a trace file and wraps it in a record reader
pub fn open_trace(path: impl AsRef<Path>) -> Result<TraceReader<impl BufRead>, SimError> {
    Ok(TraceReader::new(get_reader(path)?))
}
