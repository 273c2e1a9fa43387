use std::fmt;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("product has neither a name nor a description")]
    EmptyProduct,
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

/// How a failure is presented at an outer surface (CLI payload, API body).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceErrorKind {
    BadRequest,
    ServiceUnavailable,
    Internal,
}

impl fmt::Display for InterfaceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BadRequest => "bad request",
            Self::ServiceUnavailable => "service unavailable",
            Self::Internal => "internal error",
        })
    }
}

/// An application failure tagged with the request it belongs to. `message` is
/// for logs; callers show [`InterfaceError::user_message`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}: {message} (correlation id {correlation_id})")]
pub struct InterfaceError {
    pub kind: InterfaceErrorKind,
    pub message: String,
    pub correlation_id: String,
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            InterfaceErrorKind::BadRequest => {
                "The product could not be classified as entered. Provide a name or description."
            }
            InterfaceErrorKind::ServiceUnavailable => {
                "A dependency is temporarily unavailable. Please retry shortly."
            }
            InterfaceErrorKind::Internal => "An unexpected internal error occurred.",
        }
    }
}

impl ApplicationError {
    fn interface_kind(&self) -> InterfaceErrorKind {
        match self {
            Self::Domain(DomainError::EmptyProduct) => InterfaceErrorKind::BadRequest,
            Self::Persistence(_) | Self::Integration(_) => InterfaceErrorKind::ServiceUnavailable,
            Self::Domain(DomainError::InvariantViolation(_)) | Self::Configuration(_) => {
                InterfaceErrorKind::Internal
            }
        }
    }

    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        InterfaceError {
            kind: self.interface_kind(),
            message: self.to_string(),
            correlation_id: correlation_id.into(),
        }
    }
}
