// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;

/// The uniqueness rules the schema enforces, as typed values.
///
/// `SQLite` reports unique violations as message strings. They are classified
/// here, once, so no caller ever has to match on error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueConstraint {
    /// `users.username` is already taken.
    Username,
    /// `users.email` is already registered.
    Email,
    /// An active booking already holds this seat for this showing.
    ActiveSeat,
}

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A schema uniqueness rule rejected the write.
    UniqueViolation(UniqueConstraint),
    /// An unrecognized unique constraint rejected the write.
    UnknownUniqueViolation(String),
    /// The requested booking was not found.
    BookingNotFound(i64),
    /// The requested user was not found.
    UserNotFound(String),
    /// The requested session was not found.
    SessionNotFound(String),
    /// A stored row could not be converted back into a domain value.
    CorruptRecord(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::UniqueViolation(UniqueConstraint::Username) => {
                write!(f, "Username already exists")
            }
            Self::UniqueViolation(UniqueConstraint::Email) => {
                write!(f, "Email already exists")
            }
            Self::UniqueViolation(UniqueConstraint::ActiveSeat) => {
                write!(f, "Seat is already booked for this showing")
            }
            Self::UnknownUniqueViolation(msg) => {
                write!(f, "Unique constraint violation: {msg}")
            }
            Self::BookingNotFound(id) => write!(f, "Booking not found: {id}"),
            Self::UserNotFound(msg) => write!(f, "User not found: {msg}"),
            Self::SessionNotFound(msg) => write!(f, "Session not found: {msg}"),
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                classify_unique_violation(info.message())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

/// Maps a `SQLite` unique-violation message to the constraint that fired.
///
/// `SQLite` reports the violated columns, as in `UNIQUE constraint failed:
/// users.username`. The only unique rule on the bookings table is the
/// active-seat index, so any bookings column in the message means that index.
fn classify_unique_violation(message: &str) -> PersistenceError {
    if message.contains("idx_bookings_active_seat") || message.contains("bookings.") {
        PersistenceError::UniqueViolation(UniqueConstraint::ActiveSeat)
    } else if message.contains("users.username") {
        PersistenceError::UniqueViolation(UniqueConstraint::Username)
    } else if message.contains("users.email") {
        PersistenceError::UniqueViolation(UniqueConstraint::Email)
    } else {
        PersistenceError::UnknownUniqueViolation(String::from(message))
    }
}
