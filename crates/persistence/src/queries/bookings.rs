// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.
//!
//! Every query that reads on behalf of a user is scoped by `user_id`, so one
//! user can never observe another user's bookings. Seat-occupancy queries are
//! the exception: a seat is taken no matter who holds it.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use cinebook_domain::{Booking, BookingStatus, Showing, parse_show_date};

use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Diesel Queryable struct for booking rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingRow {
    pub booking_id: i64,
    pub user_id: i64,
    pub cinema_name: String,
    pub movie_title: Option<String>,
    pub show_date: String,
    pub booking_time: String,
    pub price: f64,
    pub stage_squares: i64,
    pub seat_number: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl BookingRow {
    /// Converts a stored row back into a domain booking.
    ///
    /// The schema cannot express the date, time, and status formats, so a row
    /// that fails to parse here means the database was modified outside this
    /// crate.
    pub(crate) fn into_domain(self) -> Result<Booking, PersistenceError> {
        let show_date = parse_show_date(&self.show_date).map_err(|e| {
            PersistenceError::CorruptRecord(format!(
                "Booking {} has unreadable show_date: {e}",
                self.booking_id
            ))
        })?;
        let booking_time = self.booking_time.parse().map_err(|e| {
            PersistenceError::CorruptRecord(format!(
                "Booking {} has unreadable booking_time: {e}",
                self.booking_id
            ))
        })?;
        let status: BookingStatus = self.status.parse().map_err(|e| {
            PersistenceError::CorruptRecord(format!(
                "Booking {} has unreadable status: {e}",
                self.booking_id
            ))
        })?;

        Ok(Booking {
            id: self.booking_id,
            cinema_name: self.cinema_name,
            movie_title: self.movie_title,
            show_date,
            booking_time,
            price: self.price,
            stage_squares: self.stage_squares,
            seat_number: self.seat_number,
            user_id: self.user_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Filters and pagination for listing a user's bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// Case-insensitive substring match on the cinema name.
    pub cinema_name: Option<String>,
    /// Exact show date (`YYYY-MM-DD`).
    pub show_date: Option<time::Date>,
    /// Exact lifecycle status.
    pub status: Option<BookingStatus>,
    /// Rows to skip.
    pub offset: i64,
    /// Rows to return.
    pub limit: i64,
}

/// One page of a user's bookings plus the unpaginated total.
#[derive(Debug, Clone)]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    pub total: i64,
}

/// Escapes LIKE metacharacters so filter input matches literally.
fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn filtered<'a>(user_id: i64, filter: &'a BookingFilter) -> bookings::BoxedQuery<'a, diesel::sqlite::Sqlite> {
    let mut query = bookings::table.filter(bookings::user_id.eq(user_id)).into_boxed();

    if let Some(cinema_name) = &filter.cinema_name {
        // SQLite LIKE is case-insensitive for ASCII, matching the
        // case-insensitive contains semantics of the list endpoint.
        query = query.filter(
            bookings::cinema_name
                .like(format!("%{}%", escape_like(cinema_name)))
                .escape('\\'),
        );
    }
    if let Some(show_date) = filter.show_date {
        query = query.filter(bookings::show_date.eq(show_date.to_string()));
    }
    if let Some(status) = filter.status {
        query = query.filter(bookings::status.eq(status.as_str()));
    }

    query
}

/// Retrieves one page of a user's bookings, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The owning user
/// * `filter` - Filters and pagination
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_bookings_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    filter: &BookingFilter,
) -> Result<BookingPage, PersistenceError> {
    debug!(user_id, "Listing bookings");

    let total: i64 = filtered(user_id, filter).count().get_result(conn)?;

    let rows: Vec<BookingRow> = filtered(user_id, filter)
        .select(BookingRow::as_select())
        .order((bookings::created_at.desc(), bookings::booking_id.desc()))
        .offset(filter.offset)
        .limit(filter.limit)
        .load(conn)?;

    let bookings: Vec<Booking> = rows
        .into_iter()
        .map(BookingRow::into_domain)
        .collect::<Result<Vec<Booking>, PersistenceError>>()?;

    Ok(BookingPage { bookings, total })
}

/// Retrieves a single booking owned by the given user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The owning user
/// * `booking_id` - The booking ID
///
/// # Errors
///
/// Returns an error if the database query fails or the row is corrupt.
/// Returns `Ok(None)` if no such booking exists for this user.
pub fn get_booking_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    debug!(user_id, booking_id, "Looking up booking");

    let result: Result<BookingRow, diesel::result::Error> = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .filter(bookings::user_id.eq(user_id))
        .select(BookingRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_domain()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the seat numbers held by active bookings for one showing.
///
/// This intentionally ignores booking ownership. Occupancy is a property of
/// the showing, not of the requesting user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `showing` - The showing identity (cinema, date, time)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn booked_seat_numbers(
    conn: &mut SqliteConnection,
    showing: &Showing,
) -> Result<Vec<i64>, PersistenceError> {
    debug!(cinema_name = %showing.cinema_name, "Loading booked seats for showing");

    let seats: Vec<i64> = bookings::table
        .filter(bookings::cinema_name.eq(&showing.cinema_name))
        .filter(bookings::show_date.eq(showing.show_date.to_string()))
        .filter(bookings::booking_time.eq(showing.booking_time.to_string()))
        .filter(bookings::status.eq(BookingStatus::Active.as_str()))
        .select(bookings::seat_number)
        .order(bookings::seat_number.asc())
        .load(conn)?;

    Ok(seats)
}

/// Checks whether an active booking already holds a seat for a showing.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `showing` - The showing identity (cinema, date, time)
/// * `seat_number` - The seat to check
/// * `exclude_booking_id` - A booking to ignore, for self-updates
///
/// # Returns
///
/// The ID of the conflicting booking, or `None` if the seat is free.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_active_seat_conflict(
    conn: &mut SqliteConnection,
    showing: &Showing,
    seat_number: i64,
    exclude_booking_id: Option<i64>,
) -> Result<Option<i64>, PersistenceError> {
    let mut query = bookings::table
        .filter(bookings::cinema_name.eq(&showing.cinema_name))
        .filter(bookings::show_date.eq(showing.show_date.to_string()))
        .filter(bookings::booking_time.eq(showing.booking_time.to_string()))
        .filter(bookings::seat_number.eq(seat_number))
        .filter(bookings::status.eq(BookingStatus::Active.as_str()))
        .into_boxed();

    if let Some(exclude) = exclude_booking_id {
        query = query.filter(bookings::booking_id.ne(exclude));
    }

    let result: Result<i64, diesel::result::Error> =
        query.select(bookings::booking_id).first(conn);

    match result {
        Ok(id) => Ok(Some(id)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
