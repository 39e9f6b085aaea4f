// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod availability;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{SeatAvailability, compute_available_seats};
pub use error::DomainError;
pub use types::{Booking, BookingStatus, BookingTime, Showing};
pub use validation::{
    BookingDraft, BookingPatch, BookingPatchDraft, NewBooking, parse_show_date, today_utc,
    validate_create, validate_patch, validate_seat_within_capacity,
};
