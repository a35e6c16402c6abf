//! Output locations and on-demand directory creation.

use std::{
    fs,
    io::ErrorKind,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::error::ExportError;

/// Extension of rendered graph documents.
pub const GRAPH_EXTENSION: &str = "dot";

/// Outcome of [`bootstrap_dir`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirStatus {
    /// The directory and any missing parents were created.
    Created,
    /// The directory was already present.
    Existing,
}

/// Creates `path` and its parents when missing.
///
/// An existing directory is not an error; it is reported with a warning.
///
/// # Errors
/// Returns [`ExportError::NotADirectory`] when `path` names a file and
/// [`ExportError::CreateDir`] when creation fails.
pub fn bootstrap_dir(path: &Path) -> Result<DirStatus, ExportError> {
    if path.is_dir() {
        warn!(path = %path.display(), "directory already exists");
        return Ok(DirStatus::Existing);
    }
    match fs::create_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), "created directory");
            Ok(DirStatus::Created)
        }
        Err(source) if source.kind() == ErrorKind::AlreadyExists => {
            Err(ExportError::NotADirectory {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(ExportError::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Where the artefacts of one corpus are written.
///
/// # Examples
/// ```
/// use std::{num::NonZeroUsize, path::Path};
/// use orgtopo_export::OutputLayout;
///
/// let layout = OutputLayout::new("data", "plots/market", "market");
/// assert_eq!(layout.dataset_path(), Path::new("data/market.csv"));
/// let third = NonZeroUsize::new(3).expect("non-zero");
/// assert_eq!(layout.graph_path(third), Path::new("plots/market/market-3.dot"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    data_dir: PathBuf,
    plot_dir: PathBuf,
    stem: String,
}

impl OutputLayout {
    /// Lays out `<data_dir>/<stem>.csv` and `<plot_dir>/<stem>-<n>.dot`.
    pub fn new(
        data_dir: impl Into<PathBuf>,
        plot_dir: impl Into<PathBuf>,
        stem: impl Into<String>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            plot_dir: plot_dir.into(),
            stem: stem.into(),
        }
    }

    /// Directory holding the dataset table.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding rendered graphs.
    #[must_use]
    pub fn plot_dir(&self) -> &Path {
        &self.plot_dir
    }

    /// File stem shared by every artefact.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Path of the dataset table.
    #[must_use]
    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.csv", self.stem))
    }

    /// Path of the rendered graph for sample `ordinal`.
    #[must_use]
    pub fn graph_path(&self, ordinal: NonZeroUsize) -> PathBuf {
        self.plot_dir
            .join(format!("{}-{ordinal}.{GRAPH_EXTENSION}", self.stem))
    }
}
