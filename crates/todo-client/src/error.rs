//! Client-side failure classification.
//!
//! Failures are grouped by transport outcome so callers can show one message
//! per class. Nothing is retried.

use thiserror::Error;

/// Errors returned by [`crate::TodoApi`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("server unreachable: {message}")]
    Unreachable {
        /// Transport error description.
        message: String,
    },

    /// The server refused the request with a 4xx status.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the error envelope, or the status reason.
        message: String,
    },

    /// The server failed with a 5xx status.
    #[error("server error with status {status}")]
    Server {
        /// HTTP status code.
        status: u16,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {message}")]
    Decode {
        /// Decoder error description.
        message: String,
    },

    /// The configured base URL cannot address the API.
    #[error("invalid base URL: {message}")]
    InvalidBaseUrl {
        /// Parser error description.
        message: String,
    },
}

impl ClientError {
    /// HTTP status of the failed response, when one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Server { status } => Some(*status),
            Self::Unreachable { .. } | Self::Decode { .. } | Self::InvalidBaseUrl { .. } => None,
        }
    }

    /// User-facing text for a failed `operation` such as `"add todo"`.
    ///
    /// # Examples
    /// ```
    /// use todo_client::ClientError;
    ///
    /// let err = ClientError::Server { status: 500 };
    /// assert_eq!(
    ///     err.user_message("delete todo"),
    ///     "Failed to delete todo. Server error occurred."
    /// );
    /// ```
    #[must_use]
    pub fn user_message(&self, operation: &str) -> String {
        match self {
            Self::Unreachable { .. } => {
                format!("Cannot {operation}. Server is not reachable.")
            }
            Self::Server { .. } => format!("Failed to {operation}. Server error occurred."),
            Self::Rejected { message, .. } => format!("Failed to {operation}: {message}"),
            Self::Decode { .. } | Self::InvalidBaseUrl { .. } => {
                format!("Failed to {operation}. Please try again.")
            }
        }
    }
}
