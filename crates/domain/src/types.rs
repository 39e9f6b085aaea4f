// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Lifecycle status of a booking.
///
/// Only `Active` bookings count toward seat occupancy; cancelling a booking
/// releases its seat for re-booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// The booking occupies its seat.
    #[default]
    Active,
    /// The booking has been retired and no longer occupies its seat.
    Cancelled,
}

impl BookingStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(format!(
                "Unknown booking status '{s}'. Must be 'active' or 'cancelled'"
            ))),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time of day on the 24-hour clock, minute granularity.
///
/// Parsing is lenient about a missing leading zero (`9:30`), but the stored
/// and displayed form is always zero-padded `HH:MM` so that the seat
/// uniqueness tuple compares canonical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingTime {
    hour: u8,
    minute: u8,
}

impl BookingTime {
    /// Creates a booking time from hour and minute components.
    ///
    /// # Errors
    ///
    /// Returns an error if the hour exceeds 23 or the minute exceeds 59.
    pub const fn new(hour: u8, minute: u8) -> Result<Self, DomainError> {
        if hour > 23 || minute > 59 {
            return Err(DomainError::InvalidBookingTime(String::new()));
        }
        Ok(Self { hour, minute })
    }

    /// The hour component (0-23).
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// The minute component (0-59).
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for BookingTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            DomainError::InvalidBookingTime(format!(
                "Invalid time format '{s}'. Expected 24-hour HH:MM"
            ))
        };

        let (hour_str, minute_str) = s.split_once(':').ok_or_else(invalid)?;
        if hour_str.is_empty() || hour_str.len() > 2 || minute_str.len() != 2 {
            return Err(invalid());
        }

        let hour: u8 = hour_str.parse().map_err(|_| invalid())?;
        let minute: u8 = minute_str.parse().map_err(|_| invalid())?;

        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl std::fmt::Display for BookingTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// The identity of one screening instance.
///
/// The seat uniqueness scope is this showing plus a seat number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Showing {
    /// The cinema the screening takes place in.
    pub cinema_name: String,
    /// The calendar day of the screening.
    pub show_date: Date,
    /// The start time of the screening.
    pub booking_time: BookingTime,
}

/// One reserved seat for one showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Store-assigned identifier, immutable after creation.
    pub id: i64,
    /// The cinema name, trimmed, 2-100 characters.
    pub cinema_name: String,
    /// Optional movie title, trimmed, at most 200 characters.
    pub movie_title: Option<String>,
    /// The calendar day of the showing.
    pub show_date: Date,
    /// The start time of the showing.
    pub booking_time: BookingTime,
    /// Ticket price, 0-1000.
    pub price: f64,
    /// Hall capacity for this showing, 10-500.
    pub stage_squares: i64,
    /// The reserved seat, 1-`stage_squares`.
    pub seat_number: i64,
    /// The owning user. Bookings are only visible to their owner.
    pub user_id: i64,
    /// Whether the booking still occupies its seat.
    pub status: BookingStatus,
    /// Store-assigned creation timestamp.
    pub created_at: String,
    /// Store-assigned last-update timestamp.
    pub updated_at: String,
}

impl Booking {
    /// Returns the showing identity of this booking.
    #[must_use]
    pub fn showing(&self) -> Showing {
        Showing {
            cinema_name: self.cinema_name.clone(),
            show_date: self.show_date,
            booking_time: self.booking_time,
        }
    }
}

