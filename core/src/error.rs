#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("malformed response: {0}")]
    Json(String),
    #[error("malformed response: empty `{field}`")]
    EmptyField { field: &'static str },
    #[error("malformed response: `{field}` value `{id}` appears more than once")]
    DuplicateId { field: &'static str, id: String },
}

impl From<serde_json::Error> for WireError {
    fn from(err: serde_json::Error) -> Self {
        WireError::Json(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("request failed: {0}")]
    Transport(String),
    #[error(transparent)]
    Malformed(#[from] WireError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no image sets available")]
    NoData,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("no image set is ready for ranking")]
    NotReady,
    #[error("ranking covers {found} of {expected} masks")]
    IncompleteRanking { expected: usize, found: usize },
    #[error("mask `{0}` is not part of the current image set")]
    UnknownMask(String),
    #[error("mask `{0}` is ranked more than once")]
    DuplicateMask(String),
    #[error("rank {0} is duplicated or out of range")]
    InvalidRank(u32),
    #[error("image set `{0}` already has a recorded ranking")]
    AlreadyRecorded(String),
}
