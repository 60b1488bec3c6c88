//! Request-layer errors.

use thiserror::Error;

/// Errors raised while decoding or routing a plugin request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// The server sent a request name this plugin does not implement.
    #[error("Unhandled request type: {name}")]
    UnhandledRequest {
        /// The request name as received.
        name: String,
    },

    /// The request body is not valid JSON of the expected shape.
    #[error("Invalid '{request}' request body: {reason}")]
    InvalidRequestBody {
        /// The request name.
        request: String,
        /// Decoder message.
        reason: String,
    },

    /// The body decoded, but describes an impossible stage event.
    #[error("Invalid stage event: {reason}")]
    InvalidStageEvent {
        /// What was wrong with it.
        reason: String,
    },

    /// A response body could not be encoded as JSON.
    #[error("Failed to encode response: {reason}")]
    ResponseEncoding {
        /// Encoder message.
        reason: String,
    },
}
