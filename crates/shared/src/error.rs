use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload a story backend sends alongside a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("scenario catalog is empty")]
    Empty,
    #[error("scenario {index} has a blank story")]
    BlankStory { index: usize },
    #[error("scenario {index} offers {found} choices, at least {required} are required")]
    TooFewChoices {
        index: usize,
        found: usize,
        required: usize,
    },
    #[error("failed to read scenario catalog '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed scenario catalog '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}
