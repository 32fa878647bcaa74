use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Element at index {index} ({kind}) has no array form")]
    NotConvertible { index: usize, kind: &'static str },

    #[error("Invalid page: {0}")]
    InvalidPage(String),
}

pub type Result<T> = std::result::Result<T, CollectionError>;

impl From<serde_json::Error> for CollectionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
