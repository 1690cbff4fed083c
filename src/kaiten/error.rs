use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    /// Any other non-2xx status.
    Status,
    Timeout,
    Network,
    /// A 2xx response whose body did not match the expected shape.
    Decode,
}

/// Failure of a single Kaiten API call.
///
/// `status` is 0 whenever no HTTP response was received (timeout, network
/// failure) or the response could not be decoded.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: u16,
    pub path: String,
}

impl ApiError {
    pub fn from_status(status: u16, path: &str) -> Self {
        let (kind, message) = match status {
            401 => (
                ApiErrorKind::Unauthorized,
                "Authentication failed. Check KAITEN_API_TOKEN".to_string(),
            ),
            403 => (
                ApiErrorKind::Forbidden,
                "Access to the card is denied".to_string(),
            ),
            404 => (ApiErrorKind::NotFound, "Card not found".to_string()),
            other => (ApiErrorKind::Status, format!("Kaiten API error: {other}")),
        };
        Self {
            kind,
            message,
            status,
            path: path.to_string(),
        }
    }

    pub fn timeout(path: &str) -> Self {
        Self {
            kind: ApiErrorKind::Timeout,
            message: "Timed out waiting for a response from the Kaiten API".into(),
            status: 0,
            path: path.to_string(),
        }
    }

    pub fn network(path: &str, cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: format!("Network error: {cause}"),
            status: 0,
            path: path.to_string(),
        }
    }

    pub fn decode(path: &str, cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            message: format!("Failed to parse Kaiten response: {cause}"),
            status: 0,
            path: path.to_string(),
        }
    }

    pub fn from_reqwest(path: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(path)
        } else {
            Self::network(path, err)
        }
    }

    /// An invalid credential applies to every request, so batch callers
    /// abort instead of reporting it per item.
    pub fn is_fatal(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// Whether the failure belongs to the caller-visible taxonomy. Anything
    /// else is reported as an internal error without its cause.
    pub fn is_expected(&self) -> bool {
        self.kind != ApiErrorKind::Decode
    }
}
