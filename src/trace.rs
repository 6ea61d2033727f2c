//! Reading recorded branch traces.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::branch::{Outcome, TraceRecord};

/// Errors raised while opening a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}

/// A streaming reader for binary branch traces.
///
/// A trace starts with a 32-bit big-endian record count, followed by one
/// fixed-width record per branch: a 4-byte big-endian program counter and a
/// single outcome byte (zero means not-taken, anything else means taken).
///
/// The leading count is informational: records are consumed until the stream
/// runs short, and a partial trailing record is discarded.
pub struct TraceReader<R> {
    stream: R,

    /// Record count declared by the trace header
    declared: u32,

    /// Number of complete records read so far
    consumed: usize,
}

impl TraceReader<BufReader<File>> {
    /// Open a trace file and consume its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: Read> TraceReader<R> {
    /// Wrap a byte stream and consume its header.
    ///
    /// A stream too short to hold the 4-byte header is an error here;
    /// truncation after the header is treated as end-of-trace instead.
    pub fn new(mut stream: R) -> Result<Self, TraceError> {
        let mut header = [0u8; 4];
        stream.read_exact(&mut header)?;
        Ok(Self {
            stream,
            declared: u32::from_be_bytes(header),
            consumed: 0,
        })
    }

    /// Number of records the trace header claims to contain.
    pub fn declared_records(&self) -> u32 {
        self.declared
    }
}

impl<R: Read> Iterator for TraceReader<R> {
    type Item = TraceRecord;

    fn next(&mut self) -> Option<TraceRecord> {
        let mut pc = [0u8; 4];
        let mut flag = [0u8; 1];
        if self.stream.read_exact(&mut pc).is_err()
            || self.stream.read_exact(&mut flag).is_err()
        {
            debug!("trace ended after {} records", self.consumed);
            return None;
        }
        self.consumed += 1;
        Some(TraceRecord::new(
            u32::from_be_bytes(pc),
            Outcome::from(flag[0] != 0),
        ))
    }
}
