use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

mod gallery;
mod layout;

pub use gallery::{GalleryModal, Interaction, ModalFrame, Tile, ViewState};
pub use layout::FormFactor;

/// Identifier of a history entry. Stored either as a number (any JSON
/// number, including negative and fractional ones) or as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId::Number(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// One investigated photo: an image reference and the class the classifier
/// predicted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: RecordId,
    pub uri: String,
    pub predicted_class: String,
}

impl PhotoRecord {
    pub fn new(
        id: impl Into<RecordId>,
        uri: impl Into<String>,
        predicted_class: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            predicted_class: predicted_class.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("failed to read history file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid history file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the photo history from a JSON array of records.
///
/// A file that does not exist yet is an empty history.
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<PhotoRecord>, HistoryError> {
    let path = path.as_ref();
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no history file at {}", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(HistoryError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let records: Vec<PhotoRecord> =
        serde_json::from_str(&raw).map_err(|source| HistoryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!("loaded {} history records from {}", records.len(), path.display());
    Ok(records)
}
