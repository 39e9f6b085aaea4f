// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking mutations.
//!
//! Every mutation is scoped by `user_id` in its WHERE clause, so a user can
//! never modify a booking they do not own. Date, time, and status values are
//! written in their canonical textual forms, which keeps the partial unique
//! index on active seats honest.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use cinebook_domain::{Booking, BookingStatus, NewBooking};

use crate::backend;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use crate::queries::bookings::get_booking_for_user;

/// Creates a new active booking.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The owning user
/// * `new_booking` - The validated booking fields
///
/// # Errors
///
/// Returns a unique-violation error if an active booking already holds the
/// same seat for the same showing.
pub fn create_booking(
    conn: &mut SqliteConnection,
    user_id: i64,
    new_booking: &NewBooking,
) -> Result<Booking, PersistenceError> {
    info!(
        user_id,
        cinema_name = %new_booking.cinema_name,
        seat_number = new_booking.seat_number,
        "Creating booking"
    );

    diesel::insert_into(bookings::table)
        .values((
            bookings::user_id.eq(user_id),
            bookings::cinema_name.eq(&new_booking.cinema_name),
            bookings::movie_title.eq(new_booking.movie_title.as_deref()),
            bookings::show_date.eq(new_booking.show_date.to_string()),
            bookings::booking_time.eq(new_booking.booking_time.to_string()),
            bookings::price.eq(new_booking.price),
            bookings::stage_squares.eq(new_booking.stage_squares),
            bookings::seat_number.eq(new_booking.seat_number),
            bookings::status.eq(BookingStatus::Active.as_str()),
        ))
        .execute(conn)?;

    let booking_id: i64 = backend::get_last_insert_rowid(conn)?;

    info!(booking_id, "Booking created successfully");

    get_booking_for_user(conn, user_id, booking_id)?
        .ok_or(PersistenceError::BookingNotFound(booking_id))
}

/// Replaces the mutable fields of a booking and bumps `updated_at`.
///
/// The booking's status and ownership are left untouched.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The owning user
/// * `booking_id` - The booking ID
/// * `fields` - The full set of validated field values to store
///
/// # Errors
///
/// Returns `BookingNotFound` if this user owns no such booking, or a
/// unique-violation error if the new seat identity is already held.
pub fn update_booking(
    conn: &mut SqliteConnection,
    user_id: i64,
    booking_id: i64,
    fields: &NewBooking,
) -> Result<Booking, PersistenceError> {
    info!(user_id, booking_id, "Updating booking");

    let rows_affected: usize = diesel::update(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .filter(bookings::user_id.eq(user_id))
        .set((
            bookings::cinema_name.eq(&fields.cinema_name),
            bookings::movie_title.eq(fields.movie_title.as_deref()),
            bookings::show_date.eq(fields.show_date.to_string()),
            bookings::booking_time.eq(fields.booking_time.to_string()),
            bookings::price.eq(fields.price),
            bookings::stage_squares.eq(fields.stage_squares),
            bookings::seat_number.eq(fields.seat_number),
            bookings::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::BookingNotFound(booking_id));
    }

    get_booking_for_user(conn, user_id, booking_id)?
        .ok_or(PersistenceError::BookingNotFound(booking_id))
}

/// Sets the lifecycle status of a booking and bumps `updated_at`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The owning user
/// * `booking_id` - The booking ID
/// * `status` - The new status
///
/// # Errors
///
/// Returns `BookingNotFound` if this user owns no such booking.
pub fn set_booking_status(
    conn: &mut SqliteConnection,
    user_id: i64,
    booking_id: i64,
    status: BookingStatus,
) -> Result<Booking, PersistenceError> {
    info!(user_id, booking_id, status = %status, "Setting booking status");

    let rows_affected: usize = diesel::update(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .filter(bookings::user_id.eq(user_id))
        .set((
            bookings::status.eq(status.as_str()),
            bookings::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::BookingNotFound(booking_id));
    }

    get_booking_for_user(conn, user_id, booking_id)?
        .ok_or(PersistenceError::BookingNotFound(booking_id))
}

/// Deletes a booking and returns it as it was stored.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The owning user
/// * `booking_id` - The booking ID
///
/// # Errors
///
/// Returns `BookingNotFound` if this user owns no such booking.
pub fn delete_booking(
    conn: &mut SqliteConnection,
    user_id: i64,
    booking_id: i64,
) -> Result<Booking, PersistenceError> {
    debug!(user_id, booking_id, "Deleting booking");

    let booking: Booking = get_booking_for_user(conn, user_id, booking_id)?
        .ok_or(PersistenceError::BookingNotFound(booking_id))?;

    diesel::delete(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .filter(bookings::user_id.eq(user_id))
        .execute(conn)?;

    info!(booking_id, "Booking deleted");
    Ok(booking)
}
