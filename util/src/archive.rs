//! Numerical data archiving
//!
//! An [`Archiver`] writes indexed rows of numbers into a CSV file inside the
//! session's archive directory, so that they can be plotted after the run.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use csv::{Writer, WriterBuilder};
use std::fs::{self, File};
use std::path::Path;
use thiserror::Error;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
pub struct Archiver {
    writer: Writer<File>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while archiving.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Cannot create the archive file: {0}")]
    CannotCreateFile(std::io::Error),

    #[error("Cannot write to the archive: {0}")]
    WriteError(#[from] csv::Error),

    #[error("Cannot flush the archive: {0}")]
    FlushError(std::io::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a paricular path relative to the session's
    /// archive root, creating any missing parent directories.
    pub fn from_path<P: AsRef<Path>>(session: &Session, path: P) -> Result<Self, ArchiveError> {
        Self::create(&session.arch_root.join(path))
    }

    /// Create (or truncate) the archive file at the given absolute path.
    pub fn create(path: &Path) -> Result<Self, ArchiveError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ArchiveError::CannotCreateFile)?;
        }

        let file = File::create(path).map_err(ArchiveError::CannotCreateFile)?;

        // Headers are written explicitly by `write_header` since rows are
        // plain sequences of numbers.
        let writer = WriterBuilder::new().has_headers(false).from_writer(file);

        Ok(Self { writer })
    }

    /// Write the header row of the archive.
    pub fn write_header<I, S>(&mut self, columns: I) -> Result<(), ArchiveError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer.write_record(columns)?;
        Ok(())
    }

    /// Write one row, made of the row's index followed by the given values.
    pub fn write_row(&mut self, index: usize, values: &[f64]) -> Result<(), ArchiveError> {
        self.writer.write_record(
            std::iter::once(index.to_string()).chain(values.iter().map(|v| v.to_string())),
        )?;
        Ok(())
    }

    /// Flush all buffered rows to disk.
    pub fn flush(&mut self) -> Result<(), ArchiveError> {
        self.writer.flush().map_err(ArchiveError::FlushError)
    }
}
