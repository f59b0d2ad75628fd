use thiserror::Error;

/// Errors returned by [`crate::ContactsApi`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, undecodable body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    ///
    /// `message` is the `error` field of the JSON body when one was present.
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Api { status: u16, message: Option<String> },
}

impl ClientError {
    /// The error text the server sent, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            ClientError::Http(_) => None,
        }
    }
}

/// Errors from a [`crate::theme::KeyValueStore`].
#[derive(Debug, Error)]
pub enum KvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
