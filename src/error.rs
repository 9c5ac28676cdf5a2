use std::path::{Path, PathBuf};

use serde::Serialize;

/// Errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl ScaffoldError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Recoverable conditions: the mutation is skipped and the pass continues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase", tag = "kind", content = "detail")]
pub enum SoftFailure {
    #[error("no line matches anchor `{0}`")]
    AnchorNotFound(String),

    #[error("unrecognized construct shape on line `{0}`")]
    ShapeUnrecognized(String),

    #[error("config has no `{0}` list to attach to")]
    ConfigFieldMissing(String),

    #[error("config module could not be read: {0}")]
    ConfigUnreadable(String),

    #[error("required file `{0}` is missing")]
    PrerequisiteMissing(String),
}
