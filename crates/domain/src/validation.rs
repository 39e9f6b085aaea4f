// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::BookingTime;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Minimum length of a trimmed cinema name.
const CINEMA_NAME_MIN: usize = 2;
/// Maximum length of a trimmed cinema name.
const CINEMA_NAME_MAX: usize = 100;
/// Maximum length of a trimmed movie title.
const MOVIE_TITLE_MAX: usize = 200;
/// Maximum ticket price.
const PRICE_MAX: f64 = 1000.0;
/// Minimum hall capacity.
const STAGE_SQUARES_MIN: i64 = 10;
/// Maximum hall capacity.
const STAGE_SQUARES_MAX: i64 = 500;

/// Raw create-booking input, exactly as the caller supplied it.
///
/// Nothing here is trusted. [`validate_create`] turns a draft into a
/// [`NewBooking`] or reports every violated rule at once.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub cinema_name: String,
    pub movie_title: Option<String>,
    pub date: String,
    pub booking_time: String,
    pub price: f64,
    pub stage_squares: i64,
    pub seat_number: i64,
}

/// Raw update-booking input. Absent fields mean "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct BookingPatchDraft {
    pub cinema_name: Option<String>,
    pub movie_title: Option<String>,
    pub date: Option<String>,
    pub booking_time: Option<String>,
    pub price: Option<f64>,
    pub stage_squares: Option<i64>,
    pub seat_number: Option<i64>,
}

/// A fully validated and normalized booking, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub cinema_name: String,
    pub movie_title: Option<String>,
    pub show_date: Date,
    pub booking_time: BookingTime,
    pub price: f64,
    pub stage_squares: i64,
    pub seat_number: i64,
}

/// A validated set of field changes for an existing booking.
///
/// The seat-versus-capacity cross check is deliberately NOT applied here,
/// because either side of it may come from the stored booking rather than
/// the patch. Callers merge first, then run
/// [`validate_seat_within_capacity`] on the merged values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub cinema_name: Option<String>,
    pub movie_title: Option<String>,
    pub show_date: Option<Date>,
    pub booking_time: Option<BookingTime>,
    pub price: Option<f64>,
    pub stage_squares: Option<i64>,
    pub seat_number: Option<i64>,
}

impl BookingPatch {
    /// Whether applying this patch can move the booking to a different
    /// seat-uniqueness tuple, which requires a fresh conflict check.
    #[must_use]
    pub const fn touches_seat_identity(&self) -> bool {
        self.cinema_name.is_some()
            || self.show_date.is_some()
            || self.booking_time.is_some()
            || self.seat_number.is_some()
    }
}

/// Returns the current calendar day in UTC.
///
/// All "not in the past" checks compare against this day, so a booking for
/// today is always accepted regardless of the time of day.
#[must_use]
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDate`] if the input does not match the
/// format or names an impossible calendar day.
pub fn parse_show_date(input: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(input, &format).map_err(|_| {
        DomainError::InvalidDate(format!(
            "Invalid date '{input}'. Expected YYYY-MM-DD"
        ))
    })
}

/// Checks a seat number against a hall capacity.
///
/// # Errors
///
/// Returns [`DomainError::SeatExceedsCapacity`] if the seat lies beyond the
/// last seat of the hall.
pub const fn validate_seat_within_capacity(
    seat_number: i64,
    stage_squares: i64,
) -> Result<(), DomainError> {
    if seat_number > stage_squares {
        return Err(DomainError::SeatExceedsCapacity {
            seat_number,
            stage_squares,
        });
    }
    Ok(())
}

fn validate_cinema_name(raw: &str) -> Result<String, DomainError> {
    let trimmed: &str = raw.trim();
    let length: usize = trimmed.chars().count();
    if length < CINEMA_NAME_MIN {
        return Err(DomainError::InvalidCinemaName(format!(
            "Cinema name must be at least {CINEMA_NAME_MIN} characters"
        )));
    }
    if length > CINEMA_NAME_MAX {
        return Err(DomainError::InvalidCinemaName(format!(
            "Cinema name cannot exceed {CINEMA_NAME_MAX} characters"
        )));
    }
    Ok(String::from(trimmed))
}

fn validate_movie_title(raw: &str) -> Result<Option<String>, DomainError> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MOVIE_TITLE_MAX {
        return Err(DomainError::InvalidMovieTitle(format!(
            "Movie title cannot exceed {MOVIE_TITLE_MAX} characters"
        )));
    }
    Ok(Some(String::from(trimmed)))
}

fn validate_show_date(raw: &str) -> Result<Date, DomainError> {
    let parsed: Date = parse_show_date(raw)?;
    if parsed < today_utc() {
        return Err(DomainError::DateInPast(String::from(
            "Booking date cannot be in the past",
        )));
    }
    Ok(parsed)
}

fn validate_booking_time(raw: &str) -> Result<BookingTime, DomainError> {
    raw.parse()
}

fn validate_price(price: f64) -> Result<f64, DomainError> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::InvalidPrice(String::from(
            "Price cannot be negative",
        )));
    }
    if price > PRICE_MAX {
        return Err(DomainError::InvalidPrice(format!(
            "Price cannot exceed {PRICE_MAX}"
        )));
    }
    Ok(price)
}

fn validate_stage_squares(stage_squares: i64) -> Result<i64, DomainError> {
    if !(STAGE_SQUARES_MIN..=STAGE_SQUARES_MAX).contains(&stage_squares) {
        return Err(DomainError::InvalidStageSquares(format!(
            "Total seats must be between {STAGE_SQUARES_MIN} and {STAGE_SQUARES_MAX}"
        )));
    }
    Ok(stage_squares)
}

fn validate_seat_number(seat_number: i64) -> Result<i64, DomainError> {
    if seat_number < 1 {
        return Err(DomainError::InvalidSeatNumber(String::from(
            "Seat number must be at least 1",
        )));
    }
    Ok(seat_number)
}

/// Validates a create-booking draft as a whole.
///
/// Every rule is checked even after an earlier one fails, so the caller can
/// report the complete list of problems in one response.
///
/// # Errors
///
/// Returns the full list of violated rules, in field order.
pub fn validate_create(draft: &BookingDraft) -> Result<NewBooking, Vec<DomainError>> {
    let mut errors: Vec<DomainError> = Vec::new();

    let cinema_name: Option<String> =
        collect(validate_cinema_name(&draft.cinema_name), &mut errors);
    let movie_title: Option<Option<String>> = match &draft.movie_title {
        Some(raw) => collect(validate_movie_title(raw), &mut errors),
        None => Some(None),
    };
    let show_date: Option<Date> = collect(validate_show_date(&draft.date), &mut errors);
    let booking_time: Option<BookingTime> =
        collect(validate_booking_time(&draft.booking_time), &mut errors);
    let price: Option<f64> = collect(validate_price(draft.price), &mut errors);
    let stage_squares: Option<i64> =
        collect(validate_stage_squares(draft.stage_squares), &mut errors);
    let seat_number: Option<i64> =
        collect(validate_seat_number(draft.seat_number), &mut errors);

    // Cross check only when both sides passed their own range checks.
    if let (Some(seat), Some(capacity)) = (seat_number, stage_squares)
        && let Err(err) = validate_seat_within_capacity(seat, capacity)
    {
        errors.push(err);
    }

    match (
        cinema_name,
        movie_title,
        show_date,
        booking_time,
        price,
        stage_squares,
        seat_number,
    ) {
        (
            Some(cinema_name),
            Some(movie_title),
            Some(show_date),
            Some(booking_time),
            Some(price),
            Some(stage_squares),
            Some(seat_number),
        ) if errors.is_empty() => Ok(NewBooking {
            cinema_name,
            movie_title,
            show_date,
            booking_time,
            price,
            stage_squares,
            seat_number,
        }),
        _ => Err(errors),
    }
}

/// Validates an update-booking draft field by field.
///
/// Absent fields pass untouched. The seat-versus-capacity cross check is
/// deferred to [`validate_seat_within_capacity`] after the caller merges the
/// patch with the stored booking.
///
/// # Errors
///
/// Returns the full list of violated rules, in field order.
pub fn validate_patch(draft: &BookingPatchDraft) -> Result<BookingPatch, Vec<DomainError>> {
    let mut errors: Vec<DomainError> = Vec::new();
    let mut patch = BookingPatch::default();

    if let Some(raw) = &draft.cinema_name {
        patch.cinema_name = collect(validate_cinema_name(raw), &mut errors);
    }
    if let Some(raw) = &draft.movie_title {
        patch.movie_title = collect(validate_movie_title(raw), &mut errors).flatten();
    }
    if let Some(raw) = &draft.date {
        patch.show_date = collect(validate_show_date(raw), &mut errors);
    }
    if let Some(raw) = &draft.booking_time {
        patch.booking_time = collect(validate_booking_time(raw), &mut errors);
    }
    if let Some(price) = draft.price {
        patch.price = collect(validate_price(price), &mut errors);
    }
    if let Some(stage_squares) = draft.stage_squares {
        patch.stage_squares = collect(validate_stage_squares(stage_squares), &mut errors);
    }
    if let Some(seat_number) = draft.seat_number {
        patch.seat_number = collect(validate_seat_number(seat_number), &mut errors);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

fn collect<T>(result: Result<T, DomainError>, errors: &mut Vec<DomainError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}
