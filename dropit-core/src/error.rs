use dropit_client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DropitError {
    #[error("Could not fetch document {file_id}: {source}")]
    DocumentFetch {
        file_id: String,
        #[source]
        source: ClientError,
    },

    #[error("Could not fetch images for document {file_id}: {source}")]
    ImageFetch {
        file_id: String,
        #[source]
        source: ClientError,
    },

    #[error("Could not fetch style {key}: {source}")]
    StyleFetch {
        key: String,
        #[source]
        source: ClientError,
    },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Failure category, independent of which remote call produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Uninitialized,
    NotFound,
    Unauthorized,
    Network,
    InvalidRequest,
    InvalidDocument,
    Other,
}

impl DropitError {
    pub fn kind(&self) -> ErrorKind {
        let source = match self {
            DropitError::InvalidDocument(_) => return ErrorKind::InvalidDocument,
            DropitError::DocumentFetch { source, .. }
            | DropitError::ImageFetch { source, .. }
            | DropitError::StyleFetch { source, .. } => source,
        };

        match source {
            ClientError::Uninitialized => ErrorKind::Uninitialized,
            ClientError::NotFound(_) => ErrorKind::NotFound,
            ClientError::Unauthorized(_) | ClientError::InvalidCredential => {
                ErrorKind::Unauthorized
            }
            ClientError::HttpError(_) => ErrorKind::Network,
            ClientError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ClientError::Decode(_) => ErrorKind::InvalidDocument,
            ClientError::AlreadyInitialized
            | ClientError::Api { .. }
            | ClientError::InvalidUrl(_) => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DropitError>;
