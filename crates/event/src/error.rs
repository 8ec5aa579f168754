use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid request: {source}")]
    InvalidRequest {
        #[from]
        source: http::Error,
    },

    #[error("invalid event: {source}")]
    InvalidEvent {
        #[from]
        source: serde_json::Error,
    },
}
