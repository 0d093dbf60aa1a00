//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId invalid format error (not a valid UUID format)
    #[error("ConnectionId must be a valid UUID format (got: {0})")]
    ConnectionIdInvalidFormat(String),

    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// Conversation turn without usable text
    #[error("Turn text cannot be empty")]
    TurnTextEmpty,
}

/// Errors returned by the room repository
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),
}

/// Errors raised while proxying a chat request to the upstream provider.
///
/// The message is what the HTTP caller sees, so it carries no prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The selected provider's credential is absent
    #[error("{0}")]
    Configuration(String),

    /// The upstream call failed or returned an unusable body
    #[error("{0}")]
    Upstream(String),
}
