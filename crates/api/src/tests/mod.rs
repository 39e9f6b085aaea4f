// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod auth_tests;

use cinebook_persistence::Persistence;

use crate::auth::{AuthenticationService, PublicUser};
use crate::request_response::CreateBookingRequest;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn register_test_user(persistence: &mut Persistence, username: &str) -> PublicUser {
    let (_, user) = AuthenticationService::register(
        persistence,
        username,
        &format!("{username}@example.com"),
        "password123",
    )
    .unwrap();
    user
}

pub fn create_test_request(seat_number: i64) -> CreateBookingRequest {
    CreateBookingRequest {
        cinema_name: String::from("Grand Cinema"),
        movie_title: Some(String::from("Inception")),
        date: String::from("2030-06-15"),
        booking_time: String::from("18:00"),
        price: 12.5,
        stage_squares: 50,
        seat_number,
    }
}
