// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract. Dates and times cross the boundary as strings and are parsed
//! by the validation layer, never by serde.

use serde::{Deserialize, Serialize};

use cinebook_domain::{Booking, BookingDraft, BookingPatchDraft};

use crate::auth::PublicUser;

/// API request to register a new user account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    /// The requested username.
    pub username: String,
    /// The email address.
    pub email: String,
    /// The plain-text password.
    pub password: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponse {
    /// A success message.
    pub message: String,
    /// The session token for subsequent requests.
    pub token: String,
    /// The registered user, without credentials.
    pub user: PublicUser,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    /// The email address.
    pub email: String,
    /// The plain-text password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    /// A success message.
    pub message: String,
    /// The session token for subsequent requests.
    pub token: String,
    /// The authenticated user, without credentials.
    pub user: PublicUser,
}

/// API response for a successful logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponse {
    /// A success message.
    pub message: String,
}

/// API response describing the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponse {
    /// The authenticated user, without credentials.
    pub user: PublicUser,
}

/// API request to create a booking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateBookingRequest {
    /// The cinema name.
    pub cinema_name: String,
    /// Optional movie title.
    pub movie_title: Option<String>,
    /// The show date (`YYYY-MM-DD`).
    pub date: String,
    /// The show time (24-hour `HH:MM`).
    pub booking_time: String,
    /// The ticket price.
    pub price: f64,
    /// The hall capacity.
    pub stage_squares: i64,
    /// The seat to reserve.
    pub seat_number: i64,
}

impl CreateBookingRequest {
    /// Converts this request into an untrusted validation draft.
    #[must_use]
    pub fn into_draft(self) -> BookingDraft {
        BookingDraft {
            cinema_name: self.cinema_name,
            movie_title: self.movie_title,
            date: self.date,
            booking_time: self.booking_time,
            price: self.price,
            stage_squares: self.stage_squares,
            seat_number: self.seat_number,
        }
    }
}

/// API request to update a booking. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UpdateBookingRequest {
    pub cinema_name: Option<String>,
    pub movie_title: Option<String>,
    pub date: Option<String>,
    pub booking_time: Option<String>,
    pub price: Option<f64>,
    pub stage_squares: Option<i64>,
    pub seat_number: Option<i64>,
}

impl UpdateBookingRequest {
    /// Converts this request into an untrusted validation draft.
    #[must_use]
    pub fn into_draft(self) -> BookingPatchDraft {
        BookingPatchDraft {
            cinema_name: self.cinema_name,
            movie_title: self.movie_title,
            date: self.date,
            booking_time: self.booking_time,
            price: self.price,
            stage_squares: self.stage_squares,
            seat_number: self.seat_number,
        }
    }
}

/// One booking as the API exposes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingInfo {
    /// The booking's canonical identifier.
    pub booking_id: i64,
    /// The cinema name.
    pub cinema_name: String,
    /// Optional movie title.
    pub movie_title: Option<String>,
    /// The show date (`YYYY-MM-DD`).
    pub date: String,
    /// The show time (canonical `HH:MM`).
    pub booking_time: String,
    /// The ticket price.
    pub price: f64,
    /// The hall capacity.
    pub stage_squares: i64,
    /// The reserved seat.
    pub seat_number: i64,
    /// The lifecycle status (`active` or `cancelled`).
    pub status: String,
    /// When the booking was created.
    pub created_at: String,
    /// When the booking was last modified.
    pub updated_at: String,
}

impl From<Booking> for BookingInfo {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.id,
            cinema_name: booking.cinema_name,
            movie_title: booking.movie_title,
            date: booking.show_date.to_string(),
            booking_time: booking.booking_time.to_string(),
            price: booking.price,
            stage_squares: booking.stage_squares,
            seat_number: booking.seat_number,
            status: booking.status.to_string(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// API response wrapping a single booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingResponse {
    /// A success message.
    pub message: String,
    /// The booking.
    pub booking: BookingInfo,
}

/// Query parameters for listing bookings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ListBookingsQuery {
    /// Case-insensitive substring filter on the cinema name.
    pub cinema_name: Option<String>,
    /// Exact show-date filter (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// Lifecycle status filter (`active` or `cancelled`).
    pub status: Option<String>,
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size. Defaults to 10.
    pub limit: Option<i64>,
}

/// API response for a booking listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListBookingsResponse {
    /// The requested page, newest bookings first.
    pub bookings: Vec<BookingInfo>,
    /// The unpaginated total matching the filters.
    pub total: i64,
    /// The 1-based page that was returned.
    pub page: i64,
    /// The page size that was applied.
    pub limit: i64,
    /// The number of pages at this page size.
    pub total_pages: i64,
}

/// Query parameters for the seat-availability endpoint.
///
/// Every field is required by the endpoint, but optional here so that a
/// missing parameter produces this API's own validation error instead of a
/// deserialization rejection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AvailableSeatsQuery {
    /// The cinema name (exact).
    pub cinema_name: Option<String>,
    /// The show date (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// The show time (24-hour `HH:MM`).
    pub booking_time: Option<String>,
    /// The hall capacity to compute against.
    pub stage_squares: Option<i64>,
}

/// API response for the seat-availability endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableSeatsResponse {
    /// Seat numbers nobody holds, ascending.
    pub available_seats: Vec<i64>,
    /// Seat numbers with an active booking, ascending.
    pub booked_seats: Vec<i64>,
    /// The hall capacity the computation used.
    pub total_seats: i64,
    /// Convenience count of `available_seats`.
    pub available_count: i64,
}
