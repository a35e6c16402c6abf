use std::{io, path::PathBuf};

use orgtopo_core::MetricError;
use thiserror::Error;

/// Failure while writing corpus artefacts to disk.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExportError {
    /// A directory could not be created.
    #[error("failed to create directory `{path}`: {source}")]
    CreateDir {
        /// Directory being created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A path exists but is not a directory.
    #[error("`{path}` exists and is not a directory")]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },
    /// The dataset table could not be written.
    #[error("failed to write dataset `{path}`: {source}")]
    Csv {
        /// Destination file.
        path: PathBuf,
        /// Underlying CSV failure.
        #[source]
        source: csv::Error,
    },
    /// A rendered graph could not be written.
    #[error("failed to write graph `{path}`: {source}")]
    Io {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A record could not be derived from a sample.
    #[error(transparent)]
    Metric(#[from] MetricError),
}
