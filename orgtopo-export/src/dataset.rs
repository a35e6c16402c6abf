//! CSV dataset of per-sample metrics.

use std::{io, path::Path};

use orgtopo_core::SampleRecord;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ExportError;

/// Column names of the dataset table, in order.
pub const DATASET_HEADER: [&str; 4] = ["num", "num_classes", "num_clients", "coupling_factor"];

/// One row of the dataset table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DatasetRow {
    /// 1-based acceptance order.
    pub num: usize,
    /// Node count of the sample.
    pub num_classes: usize,
    /// Edge count of the sample.
    pub num_clients: usize,
    /// Coupling factor of the sample.
    pub coupling_factor: f64,
}

impl From<&SampleRecord> for DatasetRow {
    fn from(record: &SampleRecord) -> Self {
        Self {
            num: record.ordinal().get(),
            num_classes: record.node_count(),
            num_clients: record.edge_count(),
            coupling_factor: record.coupling_factor(),
        }
    }
}

/// Serialises `records` as CSV with a header row into `writer`.
///
/// # Errors
/// Returns the underlying [`csv::Error`] when serialisation or flushing
/// fails.
pub fn write_rows<W: io::Write>(writer: W, records: &[SampleRecord]) -> Result<(), csv::Error> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(DATASET_HEADER)?;
    for record in records {
        csv.serialize(DatasetRow::from(record))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the dataset table to `path`, replacing any previous file.
///
/// An empty `records` slice produces a header-only file.
///
/// # Errors
/// Returns [`ExportError::Csv`] when the file cannot be created or written.
///
/// # Examples
/// ```no_run
/// use orgtopo_core::{GraphFamily, SamplerBuilder};
/// use orgtopo_export::write_dataset;
///
/// let outcome = SamplerBuilder::new(GraphFamily::UniformRandomTree).build()?.run()?;
/// write_dataset("data/hierarchy.csv".as_ref(), &outcome.records()?)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "export.write_dataset",
    err,
    skip(records),
    fields(path = %path.display(), rows = records.len()),
)]
pub fn write_dataset(path: &Path, records: &[SampleRecord]) -> Result<(), ExportError> {
    let csv_error = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(|err| csv_error(csv::Error::from(err)))?;
    write_rows(io::BufWriter::new(file), records).map_err(csv_error)?;
    info!(rows = records.len(), "dataset written");
    Ok(())
}
