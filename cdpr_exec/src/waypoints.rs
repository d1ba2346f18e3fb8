//! # Waypoint files
//!
//! Trajectories are given as CSV files with one pose per row and the six
//! columns `x, y, z, rx, ry, rz`. A header row is optional, it is recognised
//! by none of its fields being a number, so a mistyped first pose is still
//! reported rather than skipped. Blank lines and lines starting with
//! `#` are ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::{fs::File, io::Read, path::Path};

// Internal
use crate::{
    cable_ctrl::ErrorKind,
    pose::{Pose6D, PoseError},
};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised while reading a waypoint file.
#[derive(Debug, thiserror::Error)]
pub enum WaypointsError {
    #[error("Cannot open the waypoint file: {0}")]
    FileOpenError(std::io::Error),

    #[error("Cannot read the waypoint file: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Line {line}, column {column}: {value:?} is not a number")]
    InvalidValue {
        line: u64,
        column: usize,
        value: String,
    },

    #[error("Line {line} is not a pose: {source}")]
    WrongShape {
        line: u64,
        #[source]
        source: PoseError,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WaypointsError {
    /// Classify the error in the same way as the pipeline errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WaypointsError::FileOpenError(_) | WaypointsError::CsvError(_) => {
                ErrorKind::Configuration
            }
            WaypointsError::InvalidValue { .. } | WaypointsError::WrongShape { .. } => {
                ErrorKind::InputShape
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Load the waypoints stored in the CSV file at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Pose6D>, WaypointsError> {
    let file = File::open(path.as_ref()).map_err(WaypointsError::FileOpenError)?;

    let waypoints = read(file)?;

    debug!(
        "Loaded {} waypoints from {:?}",
        waypoints.len(),
        path.as_ref()
    );

    Ok(waypoints)
}

/// Read waypoints from any CSV source.
pub fn read<R: Read>(reader: R) -> Result<Vec<Pose6D>, WaypointsError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut waypoints = Vec::new();

    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 1);

        if i == 0 && is_header(&record) {
            continue;
        }

        let values = record
            .iter()
            .enumerate()
            .map(|(column, field)| {
                field.parse::<f64>().map_err(|_| WaypointsError::InvalidValue {
                    line,
                    column,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let pose = Pose6D::from_slice(&values)
            .map_err(|source| WaypointsError::WrongShape { line, source })?;

        waypoints.push(pose);
    }

    Ok(waypoints)
}

fn is_header(record: &StringRecord) -> bool {
    !record.is_empty() && record.iter().all(|field| field.parse::<f64>().is_err())
}
