use std::error::Error;
use std::fmt::{Display, Formatter};

pub type QueryResult<T> = Result<T, QueryFailure>;

/// What went wrong during a remote read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Request never produced an HTTP response.
    Transport,
    /// Backend answered with a non-2xx status.
    Status,
    /// Response body was not the expected shape.
    Malformed,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Malformed => "malformed",
        }
    }
}

/// Single failure type for every remote read.
///
/// All failures are terminal for the interaction that triggered them; the
/// kind only exists for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub kind: FailureKind,
    /// HTTP status when the backend answered.
    pub status: Option<u16>,
    pub message: String,
}

impl QueryFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            status: None,
            message: message.into(),
        }
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Status,
            status: Some(code),
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Malformed,
            status: None,
            message: message.into(),
        }
    }
}

impl Display for QueryFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(code) => write!(f, "query failed: {} - {code}", self.message),
            None => write!(f, "query failed: {}", self.message),
        }
    }
}

impl Error for QueryFailure {}

impl From<reqwest::Error> for QueryFailure {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => Self::status(status.as_u16(), value.to_string()),
            None if value.is_decode() => Self::malformed(value.to_string()),
            None => Self::transport(value.to_string()),
        }
    }
}

impl From<serde_json::Error> for QueryFailure {
    fn from(value: serde_json::Error) -> Self {
        Self::malformed(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{FailureKind, QueryFailure};

    #[test]
    fn display_appends_status_code() {
        let failure = QueryFailure::status(404, "table not found");
        assert_eq!(failure.to_string(), "query failed: table not found - 404");
        assert_eq!(failure.kind, FailureKind::Status);
    }

    #[test]
    fn transport_failure_has_no_status() {
        let failure = QueryFailure::transport("connection refused");
        assert_eq!(failure.status, None);
        assert_eq!(failure.to_string(), "query failed: connection refused");
    }

    #[test]
    fn json_errors_map_to_malformed() {
        let err = serde_json::from_str::<Vec<u8>>("{").expect_err("invalid json");
        let failure: QueryFailure = err.into();
        assert_eq!(failure.kind, FailureKind::Malformed);
    }
}
