// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle services.
//!
//! All operations act on behalf of an authenticated user and are scoped to
//! that user's bookings. The seat-conflict guard runs twice around every
//! seat-claiming write: a pre-check that produces a friendly error for the
//! common case, and the partial unique index that decides races. A unique
//! violation surfacing from the index is mapped to the same conflict error,
//! so callers cannot tell which guard fired.

use tracing::{debug, info};

use cinebook_domain::{
    Booking, BookingPatch, BookingStatus, BookingTime, NewBooking, SeatAvailability, Showing,
    compute_available_seats, parse_show_date, validate_create, validate_patch,
    validate_seat_within_capacity,
};
use cinebook_persistence::{
    BookingFilter, BookingPage, Persistence, PersistenceError, UniqueConstraint,
};

use crate::error::{ApiError, FieldError, translate_domain_errors};
use crate::request_response::{
    AvailableSeatsQuery, AvailableSeatsResponse, BookingInfo, CreateBookingRequest,
    ListBookingsQuery, ListBookingsResponse, UpdateBookingRequest,
};

/// Default page size for booking listings.
const DEFAULT_PAGE_SIZE: i64 = 10;
/// Maximum page size for booking listings.
const MAX_PAGE_SIZE: i64 = 100;
/// Maximum page number, so the offset arithmetic stays well inside i64.
const MAX_PAGE: i64 = 1_000_000;

/// Booking lifecycle service.
pub struct BookingService;

impl BookingService {
    /// Creates a new active booking for a user.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `user_id` - The authenticated user
    /// * `request` - The create request
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every violated rule, or a seat
    /// conflict if an active booking already holds the seat.
    pub fn create(
        persistence: &mut Persistence,
        user_id: i64,
        request: CreateBookingRequest,
    ) -> Result<Booking, ApiError> {
        let new_booking: NewBooking = validate_create(&request.into_draft())
            .map_err(|errors| translate_domain_errors(&errors))?;

        let showing: Showing = Showing {
            cinema_name: new_booking.cinema_name.clone(),
            show_date: new_booking.show_date,
            booking_time: new_booking.booking_time,
        };

        // Friendly pre-check. The unique index still decides races.
        if persistence
            .find_active_seat_conflict(&showing, new_booking.seat_number, None)?
            .is_some()
        {
            return Err(ApiError::SeatConflict {
                seat_number: new_booking.seat_number,
            });
        }

        let booking: Booking = persistence
            .create_booking(user_id, &new_booking)
            .map_err(|e| map_seat_conflict(e, new_booking.seat_number))?;

        info!(user_id, booking_id = booking.id, "Booking created");
        Ok(booking)
    }

    /// Retrieves a single booking owned by the user.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user owns no such booking.
    pub fn get(
        persistence: &mut Persistence,
        user_id: i64,
        booking_id: i64,
    ) -> Result<Booking, ApiError> {
        persistence
            .get_booking(user_id, booking_id)?
            .ok_or_else(|| booking_not_found(booking_id))
    }

    /// Lists the user's bookings, newest first, with filters and pagination.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a filter value cannot be parsed.
    pub fn list(
        persistence: &mut Persistence,
        user_id: i64,
        query: &ListBookingsQuery,
    ) -> Result<ListBookingsResponse, ApiError> {
        let mut errors: Vec<FieldError> = Vec::new();

        let show_date: Option<time::Date> = match &query.date {
            Some(raw) => match parse_show_date(raw) {
                Ok(date) => Some(date),
                Err(e) => {
                    errors.push(FieldError {
                        field: String::from("date"),
                        message: e.to_string(),
                    });
                    None
                }
            },
            None => None,
        };
        let status: Option<BookingStatus> = match &query.status {
            Some(raw) => match raw.parse::<BookingStatus>() {
                Ok(status) => Some(status),
                Err(e) => {
                    errors.push(FieldError {
                        field: String::from("status"),
                        message: e.to_string(),
                    });
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(ApiError::ValidationFailed { errors });
        }

        let page: i64 = query.page.unwrap_or(1).clamp(1, MAX_PAGE);
        let limit: i64 = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let filter: BookingFilter = BookingFilter {
            cinema_name: query.cinema_name.clone(),
            show_date,
            status,
            offset: (page - 1) * limit,
            limit,
        };

        let result: BookingPage = persistence.list_bookings(user_id, &filter)?;
        let total_pages: i64 = (result.total + limit - 1) / limit;

        debug!(user_id, total = result.total, page, "Listed bookings");

        Ok(ListBookingsResponse {
            bookings: result
                .bookings
                .into_iter()
                .map(BookingInfo::from)
                .collect(),
            total: result.total,
            page,
            limit,
            total_pages,
        })
    }

    /// Updates a booking the user owns.
    ///
    /// Absent fields keep their stored values. The conflict guard only runs
    /// when the patch can move the booking to a different seat-uniqueness
    /// tuple, and it ignores the booking itself, so a no-move update never
    /// conflicts with its own seat.
    ///
    /// # Errors
    ///
    /// Returns a validation error, a not-found error, or a seat conflict.
    pub fn update(
        persistence: &mut Persistence,
        user_id: i64,
        booking_id: i64,
        request: UpdateBookingRequest,
    ) -> Result<Booking, ApiError> {
        let patch: BookingPatch = validate_patch(&request.into_draft())
            .map_err(|errors| translate_domain_errors(&errors))?;

        let current: Booking = persistence
            .get_booking(user_id, booking_id)?
            .ok_or_else(|| booking_not_found(booking_id))?;

        let touches_identity: bool = patch.touches_seat_identity();
        let merged: NewBooking = merge_patch(&current, patch);

        // The cross check runs on merged values. Either side may come from
        // the stored booking rather than the patch.
        validate_seat_within_capacity(merged.seat_number, merged.stage_squares)
            .map_err(|e| translate_domain_errors(&[e]))?;

        if touches_identity {
            let showing: Showing = Showing {
                cinema_name: merged.cinema_name.clone(),
                show_date: merged.show_date,
                booking_time: merged.booking_time,
            };
            if persistence
                .find_active_seat_conflict(&showing, merged.seat_number, Some(booking_id))?
                .is_some()
            {
                return Err(ApiError::SeatConflict {
                    seat_number: merged.seat_number,
                });
            }
        }

        let booking: Booking = persistence
            .update_booking(user_id, booking_id, &merged)
            .map_err(|e| map_seat_conflict(e, merged.seat_number))?;

        info!(user_id, booking_id, "Booking updated");
        Ok(booking)
    }

    /// Cancels a booking, releasing its seat.
    ///
    /// Cancelling is idempotent: cancelling an already-cancelled booking
    /// succeeds and returns the booking unchanged.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user owns no such booking.
    pub fn cancel(
        persistence: &mut Persistence,
        user_id: i64,
        booking_id: i64,
    ) -> Result<Booking, ApiError> {
        let current: Booking = persistence
            .get_booking(user_id, booking_id)?
            .ok_or_else(|| booking_not_found(booking_id))?;

        if current.status == BookingStatus::Cancelled {
            debug!(user_id, booking_id, "Booking already cancelled");
            return Ok(current);
        }

        let booking: Booking =
            persistence.set_booking_status(user_id, booking_id, BookingStatus::Cancelled)?;

        info!(user_id, booking_id, "Booking cancelled");
        Ok(booking)
    }

    /// Deletes a booking outright and returns it as it was stored.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user owns no such booking.
    pub fn delete(
        persistence: &mut Persistence,
        user_id: i64,
        booking_id: i64,
    ) -> Result<Booking, ApiError> {
        let booking: Booking = persistence
            .delete_booking(user_id, booking_id)
            .map_err(|e| match e {
                PersistenceError::BookingNotFound(id) => booking_not_found(id),
                other => ApiError::from(other),
            })?;

        info!(user_id, booking_id, "Booking deleted");
        Ok(booking)
    }

    /// Computes the seat map for one showing.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming every missing or unparsable
    /// parameter.
    pub fn available_seats(
        persistence: &mut Persistence,
        query: &AvailableSeatsQuery,
    ) -> Result<AvailableSeatsResponse, ApiError> {
        let mut errors: Vec<FieldError> = Vec::new();

        let cinema_name: Option<&str> = query.cinema_name.as_deref();
        if cinema_name.is_none() {
            errors.push(missing_parameter("cinema_name"));
        }

        let show_date: Option<time::Date> = match query.date.as_deref() {
            Some(raw) => parse_show_date(raw).map_or_else(
                |e| {
                    errors.push(FieldError {
                        field: String::from("date"),
                        message: e.to_string(),
                    });
                    None
                },
                Some,
            ),
            None => {
                errors.push(missing_parameter("date"));
                None
            }
        };

        let booking_time: Option<BookingTime> = match query.booking_time.as_deref() {
            Some(raw) => raw.parse().map_or_else(
                |e: cinebook_domain::DomainError| {
                    errors.push(FieldError {
                        field: String::from("booking_time"),
                        message: e.to_string(),
                    });
                    None
                },
                Some,
            ),
            None => {
                errors.push(missing_parameter("booking_time"));
                None
            }
        };

        let total_seats: Option<i64> = match query.stage_squares {
            Some(seats) if seats >= 1 => Some(seats),
            Some(_) => {
                errors.push(FieldError {
                    field: String::from("stage_squares"),
                    message: String::from("Total seats must be at least 1"),
                });
                None
            }
            None => {
                errors.push(missing_parameter("stage_squares"));
                None
            }
        };

        let (Some(cinema_name), Some(show_date), Some(booking_time), Some(total_seats)) =
            (cinema_name, show_date, booking_time, total_seats)
        else {
            return Err(ApiError::ValidationFailed { errors });
        };

        let showing: Showing = Showing {
            cinema_name: String::from(cinema_name),
            show_date,
            booking_time,
        };
        let booked: Vec<i64> = persistence.booked_seat_numbers(&showing)?;
        let availability: SeatAvailability = compute_available_seats(total_seats, &booked);

        let available_count: i64 =
            i64::try_from(availability.available.len()).unwrap_or(i64::MAX);

        Ok(AvailableSeatsResponse {
            available_seats: availability.available,
            booked_seats: availability.booked,
            total_seats,
            available_count,
        })
    }
}

/// Builds the full field set to store from the current booking and a patch.
fn merge_patch(current: &Booking, patch: BookingPatch) -> NewBooking {
    NewBooking {
        cinema_name: patch
            .cinema_name
            .unwrap_or_else(|| current.cinema_name.clone()),
        movie_title: patch.movie_title.or_else(|| current.movie_title.clone()),
        show_date: patch.show_date.unwrap_or(current.show_date),
        booking_time: patch.booking_time.unwrap_or(current.booking_time),
        price: patch.price.unwrap_or(current.price),
        stage_squares: patch.stage_squares.unwrap_or(current.stage_squares),
        seat_number: patch.seat_number.unwrap_or(current.seat_number),
    }
}

fn booking_not_found(booking_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Booking"),
        message: format!("Booking with ID {booking_id} not found"),
    }
}

fn missing_parameter(field: &str) -> FieldError {
    FieldError {
        field: String::from(field),
        message: format!("Missing required parameter '{field}'"),
    }
}

/// Remaps an active-seat unique violation to the API conflict error.
fn map_seat_conflict(err: PersistenceError, seat_number: i64) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(UniqueConstraint::ActiveSeat) => {
            ApiError::SeatConflict { seat_number }
        }
        other => ApiError::from(other),
    }
}
