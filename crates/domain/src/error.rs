// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
///
/// Each variant carries a human-readable message and maps to exactly one
/// payload field via [`DomainError::field`], so the API layer can report
/// every failing field at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Cinema name is missing, too short, or too long.
    InvalidCinemaName(String),
    /// Movie title exceeds the length limit.
    InvalidMovieTitle(String),
    /// Date string could not be parsed as a calendar date.
    InvalidDate(String),
    /// Date lies before the current day.
    DateInPast(String),
    /// Booking time does not match the 24-hour HH:MM format.
    InvalidBookingTime(String),
    /// Price is outside the allowed range.
    InvalidPrice(String),
    /// Hall capacity is outside the allowed range.
    InvalidStageSquares(String),
    /// Seat number is not positive.
    InvalidSeatNumber(String),
    /// Seat number exceeds the hall capacity.
    SeatExceedsCapacity {
        /// The offending seat number.
        seat_number: i64,
        /// The hall capacity it was checked against.
        stage_squares: i64,
    },
    /// Booking status string is not a known status.
    InvalidStatus(String),
}

impl DomainError {
    /// Returns the payload field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidCinemaName(_) => "cinema_name",
            Self::InvalidMovieTitle(_) => "movie_title",
            Self::InvalidDate(_) | Self::DateInPast(_) => "date",
            Self::InvalidBookingTime(_) => "booking_time",
            Self::InvalidPrice(_) => "price",
            Self::InvalidStageSquares(_) => "stage_squares",
            Self::SeatExceedsCapacity { .. } | Self::InvalidSeatNumber(_) => "seat_number",
            Self::InvalidStatus(_) => "status",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCinemaName(msg)
            | Self::InvalidMovieTitle(msg)
            | Self::InvalidDate(msg)
            | Self::DateInPast(msg)
            | Self::InvalidBookingTime(msg)
            | Self::InvalidPrice(msg)
            | Self::InvalidStageSquares(msg)
            | Self::InvalidSeatNumber(msg)
            | Self::InvalidStatus(msg) => write!(f, "{msg}"),
            Self::SeatExceedsCapacity {
                seat_number,
                stage_squares,
            } => write!(
                f,
                "Seat number {seat_number} cannot exceed total seats {stage_squares}"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
