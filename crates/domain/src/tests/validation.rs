// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BookingDraft, BookingPatch, BookingPatchDraft, DomainError, NewBooking, parse_show_date,
    today_utc, validate_create, validate_patch, validate_seat_within_capacity,
};

fn create_test_draft() -> BookingDraft {
    BookingDraft {
        cinema_name: String::from("Grand Cinema"),
        movie_title: Some(String::from("Inception")),
        date: String::from("2030-06-15"),
        booking_time: String::from("18:00"),
        price: 12.5,
        stage_squares: 50,
        seat_number: 7,
    }
}

#[test]
fn test_validate_create_accepts_valid_draft() {
    let draft: BookingDraft = create_test_draft();
    let booking: NewBooking = validate_create(&draft).unwrap();

    assert_eq!(booking.cinema_name, "Grand Cinema");
    assert_eq!(booking.movie_title, Some(String::from("Inception")));
    assert_eq!(booking.show_date, parse_show_date("2030-06-15").unwrap());
    assert_eq!(booking.booking_time.to_string(), "18:00");
    assert!((booking.price - 12.5).abs() < f64::EPSILON);
    assert_eq!(booking.stage_squares, 50);
    assert_eq!(booking.seat_number, 7);
}

#[test]
fn test_validate_create_trims_text_fields() {
    let mut draft: BookingDraft = create_test_draft();
    draft.cinema_name = String::from("  Grand Cinema  ");
    draft.movie_title = Some(String::from("  Inception  "));

    let booking: NewBooking = validate_create(&draft).unwrap();
    assert_eq!(booking.cinema_name, "Grand Cinema");
    assert_eq!(booking.movie_title, Some(String::from("Inception")));
}

#[test]
fn test_validate_create_maps_blank_title_to_none() {
    let mut draft: BookingDraft = create_test_draft();
    draft.movie_title = Some(String::from("   "));

    let booking: NewBooking = validate_create(&draft).unwrap();
    assert_eq!(booking.movie_title, None);
}

#[test]
fn test_validate_create_accepts_todays_date() {
    let mut draft: BookingDraft = create_test_draft();
    draft.date = today_utc().to_string();

    assert!(validate_create(&draft).is_ok());
}

#[test]
fn test_validate_create_rejects_past_date() {
    let mut draft: BookingDraft = create_test_draft();
    draft.date = String::from("2020-01-01");

    let errors: Vec<DomainError> = validate_create(&draft).unwrap_err();
    assert!(matches!(errors.as_slice(), [DomainError::DateInPast(_)]));
}

#[test]
fn test_validate_create_rejects_short_cinema_name() {
    let mut draft: BookingDraft = create_test_draft();
    draft.cinema_name = String::from("A");

    let errors: Vec<DomainError> = validate_create(&draft).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [DomainError::InvalidCinemaName(_)]
    ));
}

#[test]
fn test_validate_create_rejects_overlong_title() {
    let mut draft: BookingDraft = create_test_draft();
    draft.movie_title = Some("x".repeat(201));

    let errors: Vec<DomainError> = validate_create(&draft).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [DomainError::InvalidMovieTitle(_)]
    ));
}

#[test]
fn test_validate_create_rejects_price_out_of_range() {
    let mut draft: BookingDraft = create_test_draft();
    draft.price = -1.0;
    assert!(validate_create(&draft).is_err());

    draft.price = 1000.5;
    let errors: Vec<DomainError> = validate_create(&draft).unwrap_err();
    assert!(matches!(errors.as_slice(), [DomainError::InvalidPrice(_)]));
}

#[test]
fn test_validate_create_rejects_nan_price() {
    let mut draft: BookingDraft = create_test_draft();
    draft.price = f64::NAN;

    let errors: Vec<DomainError> = validate_create(&draft).unwrap_err();
    assert!(matches!(errors.as_slice(), [DomainError::InvalidPrice(_)]));
}

#[test]
fn test_validate_create_rejects_capacity_out_of_range() {
    let mut draft: BookingDraft = create_test_draft();
    draft.stage_squares = 9;
    draft.seat_number = 1;
    assert!(validate_create(&draft).is_err());

    draft.stage_squares = 501;
    let errors: Vec<DomainError> = validate_create(&draft).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [DomainError::InvalidStageSquares(_)]
    ));
}

#[test]
fn test_validate_create_rejects_seat_beyond_capacity() {
    let mut draft: BookingDraft = create_test_draft();
    draft.seat_number = 51;

    let errors: Vec<DomainError> = validate_create(&draft).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [DomainError::SeatExceedsCapacity {
            seat_number: 51,
            stage_squares: 50
        }]
    ));
}

#[test]
fn test_validate_create_collects_every_failure() {
    let draft = BookingDraft {
        cinema_name: String::from("A"),
        movie_title: Some("x".repeat(201)),
        date: String::from("not-a-date"),
        booking_time: String::from("25:99"),
        price: -5.0,
        stage_squares: 5,
        seat_number: 0,
    };

    let errors: Vec<DomainError> = validate_create(&draft).unwrap_err();
    assert_eq!(errors.len(), 7);

    let fields: Vec<&str> = errors.iter().map(DomainError::field).collect();
    assert_eq!(
        fields,
        vec![
            "cinema_name",
            "movie_title",
            "date",
            "booking_time",
            "price",
            "stage_squares",
            "seat_number"
        ]
    );
}

#[test]
fn test_validate_create_skips_cross_check_when_capacity_invalid() {
    let mut draft: BookingDraft = create_test_draft();
    draft.stage_squares = 5;
    draft.seat_number = 7;

    // Only the capacity range failure is reported. The seat cannot be
    // checked against a capacity that is itself invalid.
    let errors: Vec<DomainError> = validate_create(&draft).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [DomainError::InvalidStageSquares(_)]
    ));
}

#[test]
fn test_validate_patch_accepts_empty_draft() {
    let patch: BookingPatch = validate_patch(&BookingPatchDraft::default()).unwrap();
    assert_eq!(patch, BookingPatch::default());
    assert!(!patch.touches_seat_identity());
}

#[test]
fn test_validate_patch_normalizes_present_fields() {
    let draft = BookingPatchDraft {
        cinema_name: Some(String::from("  New Cinema  ")),
        booking_time: Some(String::from("9:30")),
        price: Some(20.0),
        ..BookingPatchDraft::default()
    };

    let patch: BookingPatch = validate_patch(&draft).unwrap();
    assert_eq!(patch.cinema_name, Some(String::from("New Cinema")));
    assert_eq!(
        patch.booking_time.map(|time| time.to_string()),
        Some(String::from("09:30"))
    );
    assert_eq!(patch.price, Some(20.0));
    assert!(patch.touches_seat_identity());
}

#[test]
fn test_validate_patch_price_only_does_not_touch_seat_identity() {
    let draft = BookingPatchDraft {
        price: Some(15.0),
        movie_title: Some(String::from("Tenet")),
        stage_squares: Some(100),
        ..BookingPatchDraft::default()
    };

    let patch: BookingPatch = validate_patch(&draft).unwrap();
    assert!(!patch.touches_seat_identity());
}

#[test]
fn test_validate_patch_rejects_invalid_fields() {
    let draft = BookingPatchDraft {
        date: Some(String::from("2020-01-01")),
        seat_number: Some(0),
        ..BookingPatchDraft::default()
    };

    let errors: Vec<DomainError> = validate_patch(&draft).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], DomainError::DateInPast(_)));
    assert!(matches!(errors[1], DomainError::InvalidSeatNumber(_)));
}

#[test]
fn test_validate_seat_within_capacity_bounds() {
    assert!(validate_seat_within_capacity(50, 50).is_ok());
    assert!(validate_seat_within_capacity(1, 50).is_ok());
    assert!(matches!(
        validate_seat_within_capacity(51, 50),
        Err(DomainError::SeatExceedsCapacity {
            seat_number: 51,
            stage_squares: 50
        })
    ));
}
