use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Front-matter block opened with '---' but never closed")]
    UnterminatedFrontMatter,
    #[error("Could not parse {path:?}")]
    ParseFile {
        path: PathBuf,
        source: Box<FolioError>,
    },
    #[error("Date could not be parsed: {0}")]
    DateParseFailure(String),
    #[error("{0} is not a valid slug")]
    InvalidSlug(String),
    #[error("{0} is not a valid content type. Valid values are 'projects', 'notes', 'artwork', 'photos'")]
    InvalidContentType(String),
    #[error("{0} is not a valid tag source. Valid values are 'projects', 'notes', 'works'")]
    InvalidTagSource(String),
    #[error("CMS fetch failed for \"{endpoint}\": {status} {reason}")]
    CmsStatus {
        endpoint: String,
        status: u16,
        reason: String,
    },
    #[error("Invalid CMS base url {0}")]
    InvalidCmsUrl(String),
    #[error("Could not create file {path:?}")]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },
}
