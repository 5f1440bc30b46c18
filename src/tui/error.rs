use thiserror::Error;

use crate::client::ClientError;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("IO/Terminal error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("API error: {0}")]
    ClientError(#[from] ClientError),

    #[error("Render error: {0}")]
    RenderError(String),
}
