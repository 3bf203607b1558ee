//! Station index error types.

use std::path::PathBuf;

/// Errors that can occur when reading the station index document.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The document could not be opened or parsed
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// A page's content stream could not be read
    #[error("failed to read page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: lopdf::Error,
    },
}
