// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Booking, BookingStatus, BookingTime, Showing, parse_show_date};

fn create_test_booking() -> Booking {
    Booking {
        id: 1,
        cinema_name: String::from("Grand Cinema"),
        movie_title: Some(String::from("Inception")),
        show_date: parse_show_date("2030-06-15").unwrap(),
        booking_time: "18:00".parse().unwrap(),
        price: 12.5,
        stage_squares: 50,
        seat_number: 7,
        user_id: 42,
        status: BookingStatus::Active,
        created_at: String::from("2026-08-30T12:00:00Z"),
        updated_at: String::from("2026-08-30T12:00:00Z"),
    }
}

#[test]
fn test_booking_time_parses_padded_form() {
    let time: BookingTime = "18:00".parse().unwrap();
    assert_eq!(time.hour(), 18);
    assert_eq!(time.minute(), 0);
}

#[test]
fn test_booking_time_parses_unpadded_hour() {
    let time: BookingTime = "9:30".parse().unwrap();
    assert_eq!(time.hour(), 9);
    assert_eq!(time.minute(), 30);
}

#[test]
fn test_booking_time_canonical_display_is_zero_padded() {
    let time: BookingTime = "9:05".parse().unwrap();
    assert_eq!(time.to_string(), "09:05");
}

#[test]
fn test_booking_time_padded_and_unpadded_forms_are_equal() {
    let padded: BookingTime = "09:30".parse().unwrap();
    let unpadded: BookingTime = "9:30".parse().unwrap();
    assert_eq!(padded, unpadded);
}

#[test]
fn test_booking_time_rejects_out_of_range_hour() {
    assert!("24:00".parse::<BookingTime>().is_err());
}

#[test]
fn test_booking_time_rejects_out_of_range_minute() {
    assert!("12:60".parse::<BookingTime>().is_err());
}

#[test]
fn test_booking_time_rejects_missing_separator() {
    assert!("1800".parse::<BookingTime>().is_err());
}

#[test]
fn test_booking_time_rejects_single_digit_minute() {
    assert!("18:5".parse::<BookingTime>().is_err());
}

#[test]
fn test_booking_time_rejects_empty_hour() {
    assert!(":30".parse::<BookingTime>().is_err());
}

#[test]
fn test_booking_status_round_trips_storage_form() {
    let active: BookingStatus = "active".parse().unwrap();
    assert_eq!(active, BookingStatus::Active);
    assert_eq!(active.as_str(), "active");

    let cancelled: BookingStatus = "cancelled".parse().unwrap();
    assert_eq!(cancelled, BookingStatus::Cancelled);
    assert_eq!(cancelled.as_str(), "cancelled");
}

#[test]
fn test_booking_status_rejects_unknown_value() {
    assert!("pending".parse::<BookingStatus>().is_err());
}

#[test]
fn test_booking_status_defaults_to_active() {
    assert_eq!(BookingStatus::default(), BookingStatus::Active);
}

#[test]
fn test_booking_showing_carries_the_uniqueness_tuple() {
    let booking: Booking = create_test_booking();
    let showing: Showing = booking.showing();

    assert_eq!(showing.cinema_name, "Grand Cinema");
    assert_eq!(showing.show_date, booking.show_date);
    assert_eq!(showing.booking_time, booking.booking_time);
}
