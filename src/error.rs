use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the component dataset.
///
/// Both variants abort the run; nothing downstream of the loader can recover
/// without a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset not found: {path}")]
    ResourceNotFound { path: PathBuf },

    #[error("Failed to parse dataset {source_name}: {details}")]
    ParseError { source_name: String, details: String },
}
