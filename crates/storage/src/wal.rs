// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log for durable storage
//!
//! One JSON line per entry. Each entry carries a CRC32 of its operation so
//! torn or corrupted lines are detected on read. Every append is fsync'd
//! before returning.
//!
//! Several processes may share one log. The log itself does no locking:
//! callers serialize appends (see `LotStore`) and call [`Wal::read_new`] to
//! pick up entries written by others since the last read.

use crate::operation::Operation;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single entry in the write-ahead log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalEntry {
    /// Monotonically increasing sequence number
    pub sequence: u64,
    /// Microseconds since Unix epoch
    pub timestamp_micros: u64,
    /// Identifies the process that wrote the entry
    pub writer_id: String,
    /// The operation being recorded
    pub operation: Operation,
    /// CRC32 checksum of serialized operation
    pub checksum: u32,
}

impl WalEntry {
    /// Create a new WAL entry with computed checksum
    pub fn new(sequence: u64, writer_id: &str, operation: Operation) -> Self {
        let checksum = Self::calculate_checksum(&operation);
        let timestamp_micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0);

        Self {
            sequence,
            timestamp_micros,
            writer_id: writer_id.to_string(),
            operation,
            checksum,
        }
    }

    fn calculate_checksum(operation: &Operation) -> u32 {
        // Operation only holds strings, numbers and timestamps, so it always serializes
        let json = serde_json::to_string(operation).unwrap_or_default();
        crc32fast::hash(json.as_bytes())
    }

    /// Verify the checksum matches the operation
    pub fn verify(&self) -> bool {
        self.checksum == Self::calculate_checksum(&self.operation)
    }

    pub fn to_line(&self) -> Result<String, WalError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_line(line: &str) -> Result<Self, WalError> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Where reading stopped short of the end of the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalCorruption {
    /// Byte offset of the first unreadable line
    pub offset: u64,
    pub reason: String,
}

/// Entries read by [`Wal::read_new`]
#[derive(Debug, Default)]
pub struct WalRead {
    pub entries: Vec<WalEntry>,
    /// Set when a torn, unparsable, or checksum-failing line was found
    pub corruption: Option<WalCorruption>,
}

/// Write-ahead log for durable operation storage
pub struct Wal {
    path: PathBuf,
    file: File,
    writer_id: String,
    next_sequence: u64,
    /// Bytes of the file already read and applied
    offset: u64,
}

impl Wal {
    /// Open or create a WAL at the given path
    ///
    /// Nothing is read yet; call [`Wal::read_new`] to load existing entries.
    pub fn open(path: &Path, writer_id: &str) -> Result<Self, WalError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            writer_id: writer_id.to_string(),
            next_sequence: 0,
            offset: 0,
        })
    }

    /// Read every complete, valid entry appended since the last read
    ///
    /// Stops at the first torn or corrupted line and reports it. The offset
    /// only advances past valid lines, so a later call will retry from there.
    pub fn read_new(&mut self) -> Result<WalRead, WalError> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.offset))?;
        let mut reader = BufReader::new(file);

        let mut read = WalRead::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf)?;
            if n == 0 {
                break;
            }
            if buf.last() != Some(&b'\n') {
                read.corruption = Some(WalCorruption {
                    offset: self.offset,
                    reason: "truncated entry".to_string(),
                });
                break;
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    read.corruption = Some(WalCorruption {
                        offset: self.offset,
                        reason: format!("invalid UTF-8: {e}"),
                    });
                    break;
                }
            };
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                self.offset += n as u64;
                continue;
            }
            let entry = match WalEntry::from_line(trimmed) {
                Ok(entry) if entry.verify() => entry,
                Ok(entry) => {
                    read.corruption = Some(WalCorruption {
                        offset: self.offset,
                        reason: format!("checksum mismatch at sequence {}", entry.sequence),
                    });
                    break;
                }
                Err(e) => {
                    read.corruption = Some(WalCorruption {
                        offset: self.offset,
                        reason: e.to_string(),
                    });
                    break;
                }
            };
            self.offset += n as u64;
            self.next_sequence = self.next_sequence.max(entry.sequence + 1);
            read.entries.push(entry);
        }

        Ok(read)
    }

    /// Cut the file back to the last valid entry read
    ///
    /// Only safe while no other writer can append (the caller holds the
    /// store's exclusive lock). Returns the number of bytes removed.
    pub fn truncate_to_valid(&mut self) -> Result<u64, WalError> {
        let len = self.file.metadata()?.len();
        if len <= self.offset {
            return Ok(0);
        }
        self.file.set_len(self.offset)?;
        self.file.sync_all()?;
        Ok(len - self.offset)
    }

    /// Append an operation to the log
    ///
    /// The caller must have read all existing entries first. The entry is
    /// durably persisted before this returns.
    pub fn append(&mut self, operation: Operation) -> Result<WalEntry, WalError> {
        let entry = WalEntry::new(self.next_sequence, &self.writer_id, operation);
        let mut line = entry.to_line()?;
        line.push('\n');

        let written = self
            .file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.sync_all());
        if let Err(e) = written {
            // Drop whatever reached the file so the entry is never replayed
            let _ = self.file.set_len(self.offset);
            return Err(e.into());
        }

        self.next_sequence += 1;
        self.offset += line.len() as u64;
        Ok(entry)
    }

    /// Sequence number the next append will get
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
