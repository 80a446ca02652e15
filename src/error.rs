use thiserror::Error;

/// Errors that end a dataset load attempt.
///
/// A failed load never touches the currently published dataset; callers
/// decide whether to show an empty state or keep the previous data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network or transport failure while fetching the dataset.
    #[error("failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} while fetching {url}")]
    Http { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited text could not be read at all.
    #[error("malformed delimited text: {0}")]
    Malformed(#[from] csv::Error),

    /// Parsing produced zero data rows.
    #[error("no rows were parsed from the dataset")]
    EmptyDataset,
}

impl DataError {
    /// Whether this error belongs to the transport/load family (as opposed
    /// to a problem with the content itself).
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            DataError::Transport { .. } | DataError::Http { .. } | DataError::Io(_)
        )
    }
}

pub type Result<T, E = DataError> = std::result::Result<T, E>;
