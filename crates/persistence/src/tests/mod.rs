// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod user_tests;

use cinebook_domain::{NewBooking, parse_show_date};

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn register_test_user(persistence: &mut Persistence, username: &str) -> i64 {
    persistence
        .create_user(
            username,
            &format!("{username}@example.com"),
            "password123",
            "user",
        )
        .unwrap()
}

pub fn create_test_booking_fields(seat_number: i64) -> NewBooking {
    NewBooking {
        cinema_name: String::from("Grand Cinema"),
        movie_title: Some(String::from("Inception")),
        show_date: parse_show_date("2030-06-15").unwrap(),
        booking_time: "18:00".parse().unwrap(),
        price: 12.5,
        stage_squares: 50,
        seat_number,
    }
}
