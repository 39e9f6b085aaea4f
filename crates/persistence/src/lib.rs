// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the CineBook reservation service.
//!
//! This crate stores users, sessions, and bookings in `SQLite` via Diesel.
//! `SQLite` is the only backend: it covers development, tests (in-memory),
//! and single-node deployments (file-based with WAL).
//!
//! ## Seat uniqueness
//!
//! The invariant "one active booking per seat per showing" is enforced by a
//! partial unique index, not by application code alone. Pre-checks in the
//! API layer exist to produce friendly errors, but the index is what holds
//! under concurrent writers. Unique violations surface as
//! [`PersistenceError::UniqueViolation`] with a typed
//! [`UniqueConstraint`], so callers never parse database error text.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use cinebook_domain::{Booking, BookingStatus, NewBooking, Showing};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{SessionData, UserData};
pub use error::{PersistenceError, UniqueConstraint};
pub use queries::bookings::{BookingFilter, BookingPage};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for users, sessions, and bookings.
///
/// Holds a single `SQLite` connection. Callers that need concurrent access
/// wrap the adapter in a mutex; `SQLite` serializes writers anyway.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Users & Sessions
    // ========================================================================

    /// Creates a new user account with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UniqueViolation`] if the username or email
    /// is already taken.
    pub fn create_user(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, username, email, password, role)
    }

    /// Retrieves a user by email address (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Creates a session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token, without checking expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::users::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all expired sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::users::delete_expired_sessions(&mut self.conn)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Creates a new active booking for a user.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UniqueViolation`] with
    /// [`UniqueConstraint::ActiveSeat`] if an active booking already holds
    /// the same seat for the same showing.
    pub fn create_booking(
        &mut self,
        user_id: i64,
        new_booking: &NewBooking,
    ) -> Result<Booking, PersistenceError> {
        mutations::bookings::create_booking(&mut self.conn, user_id, new_booking)
    }

    /// Retrieves a booking owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_booking(
        &mut self,
        user_id: i64,
        booking_id: i64,
    ) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::get_booking_for_user(&mut self.conn, user_id, booking_id)
    }

    /// Retrieves one page of a user's bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_bookings(
        &mut self,
        user_id: i64,
        filter: &BookingFilter,
    ) -> Result<BookingPage, PersistenceError> {
        queries::bookings::list_bookings_for_user(&mut self.conn, user_id, filter)
    }

    /// Replaces the mutable fields of a booking.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BookingNotFound`] if this user owns no
    /// such booking, or a unique-violation error if the new seat identity is
    /// already held by an active booking.
    pub fn update_booking(
        &mut self,
        user_id: i64,
        booking_id: i64,
        fields: &NewBooking,
    ) -> Result<Booking, PersistenceError> {
        mutations::bookings::update_booking(&mut self.conn, user_id, booking_id, fields)
    }

    /// Sets the lifecycle status of a booking.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BookingNotFound`] if this user owns no
    /// such booking.
    pub fn set_booking_status(
        &mut self,
        user_id: i64,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<Booking, PersistenceError> {
        mutations::bookings::set_booking_status(&mut self.conn, user_id, booking_id, status)
    }

    /// Deletes a booking and returns it as it was stored.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BookingNotFound`] if this user owns no
    /// such booking.
    pub fn delete_booking(
        &mut self,
        user_id: i64,
        booking_id: i64,
    ) -> Result<Booking, PersistenceError> {
        mutations::bookings::delete_booking(&mut self.conn, user_id, booking_id)
    }

    /// Retrieves the seat numbers held by active bookings for one showing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn booked_seat_numbers(
        &mut self,
        showing: &Showing,
    ) -> Result<Vec<i64>, PersistenceError> {
        queries::bookings::booked_seat_numbers(&mut self.conn, showing)
    }

    /// Checks whether an active booking already holds a seat for a showing.
    ///
    /// # Arguments
    ///
    /// * `showing` - The showing identity (cinema, date, time)
    /// * `seat_number` - The seat to check
    /// * `exclude_booking_id` - A booking to ignore, for self-updates
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_active_seat_conflict(
        &mut self,
        showing: &Showing,
        seat_number: i64,
        exclude_booking_id: Option<i64>,
    ) -> Result<Option<i64>, PersistenceError> {
        queries::bookings::find_active_seat_conflict(
            &mut self.conn,
            showing,
            seat_number,
            exclude_booking_id,
        )
    }
}
