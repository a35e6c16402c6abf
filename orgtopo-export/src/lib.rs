//! Writers for orgtopo corpora: the CSV dataset, Graphviz documents for each
//! accepted sample, and the directories they live in.

mod dataset;
mod dot;
mod error;
mod layout;

pub use dataset::{DATASET_HEADER, DatasetRow, write_dataset, write_rows};
pub use dot::{Dot, DotLayout, DotRenderer};
pub use error::ExportError;
pub use layout::{DirStatus, GRAPH_EXTENSION, OutputLayout, bootstrap_dir};
