// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use serde::Serialize;

use cinebook_domain::DomainError;
use cinebook_persistence::{PersistenceError, UniqueConstraint};

use crate::credentials::CredentialPolicyError;

/// One failed validation rule, attributed to a payload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The payload field the rule applies to.
    pub field: String,
    /// A human-readable description of the violation.
    pub message: String,
}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. The server layer maps each variant to an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed (missing, invalid, or expired session).
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Login failed. Deliberately carries no detail: the response must not
    /// reveal whether the email or the password was wrong.
    InvalidCredentials,
    /// One or more input rules were violated.
    ValidationFailed {
        /// Every violated rule, attributed to its field.
        errors: Vec<FieldError>,
    },
    /// An active booking already holds the requested seat.
    SeatConflict {
        /// The contested seat number.
        seat_number: i64,
    },
    /// A registration credential is already taken.
    CredentialTaken {
        /// The credential field (`username` or `email`).
        field: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::InvalidCredentials => {
                write!(f, "Invalid email or password")
            }
            Self::ValidationFailed { errors } => {
                let messages: Vec<&str> =
                    errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "Validation failed: {}", messages.join(", "))
            }
            Self::SeatConflict { seat_number } => {
                write!(
                    f,
                    "Seat {seat_number} is already booked for this cinema, date and time"
                )
            }
            Self::CredentialTaken { field } => {
                write!(f, "{field} already exists")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Converts the full list of violated domain rules into one API error.
#[must_use]
pub fn translate_domain_errors(errors: &[DomainError]) -> ApiError {
    ApiError::ValidationFailed {
        errors: errors
            .iter()
            .map(|e| FieldError {
                field: String::from(e.field()),
                message: e.to_string(),
            })
            .collect(),
    }
}

/// Converts the full list of violated credential rules into one API error.
#[must_use]
pub fn translate_credential_errors(errors: &[CredentialPolicyError]) -> ApiError {
    ApiError::ValidationFailed {
        errors: errors
            .iter()
            .map(|e| FieldError {
                field: String::from(e.field()),
                message: e.to_string(),
            })
            .collect(),
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UniqueViolation(UniqueConstraint::Username) => {
                Self::CredentialTaken {
                    field: String::from("username"),
                }
            }
            PersistenceError::UniqueViolation(UniqueConstraint::Email) => Self::CredentialTaken {
                field: String::from("email"),
            },
            PersistenceError::BookingNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Booking"),
                message: format!("Booking with ID {id} not found"),
            },
            // ActiveSeat carries no seat number. Callers that know the seat
            // map it to SeatConflict before this conversion runs.
            _ => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}
