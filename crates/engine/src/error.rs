//! Errors the engine can surface to callers.
//!
//! Every precondition failure has its own variant so the HTTP layer can map
//! it to a distinct status and clients can render a specific message
//! (e.g. "you're not friends" vs "already a member").

use thiserror::Error;

/// Failure while loading or persisting the shared document.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" not found")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} is already a member")]
    AlreadyMember(String),
    #[error("invite already processed: {0}")]
    AlreadyProcessed(String),
    #[error("duplicate pending invite for {0}")]
    DuplicateInvite(String),
    #[error("{0} is not a friend")]
    NotFriends(String),
    #[error("{0} is not a group member")]
    InvalidParticipant(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::AlreadyMember(a), Self::AlreadyMember(b)) => a == b,
            (Self::AlreadyProcessed(a), Self::AlreadyProcessed(b)) => a == b,
            (Self::DuplicateInvite(a), Self::DuplicateInvite(b)) => a == b,
            (Self::NotFriends(a), Self::NotFriends(b)) => a == b,
            (Self::InvalidParticipant(a), Self::InvalidParticipant(b)) => a == b,
            (Self::Store(a), Self::Store(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
