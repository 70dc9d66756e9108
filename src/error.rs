use std::path::PathBuf;

use thiserror::Error;

/// Failures the core surfaces to the host.
///
/// Only `DataFormat` is fatal to rendering: a globe built from a malformed
/// boundary set is never drawn. Lookup misses, degenerate flow layouts and
/// off-globe pointer positions are not errors and never reach this type.
#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("malformed boundary data: {0}")]
    DataFormat(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse trade records: {0}")]
    Records(#[from] csv::Error),
}

impl GlobeError {
    pub fn data_format(msg: impl Into<String>) -> Self {
        GlobeError::DataFormat(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GlobeError>;
