// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the CineBook reservation service.
//!
//! This crate owns the API contract: request and response DTOs, the
//! credential policy, session authentication, and the booking lifecycle
//! services. It knows nothing about HTTP; the server crate maps its errors
//! to status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod bookings;
mod credentials;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, PublicUser};
pub use bookings::BookingService;
pub use credentials::{CredentialPolicy, CredentialPolicyError, Credentials};
pub use error::{ApiError, FieldError, translate_credential_errors, translate_domain_errors};
pub use request_response::{
    AvailableSeatsQuery, AvailableSeatsResponse, BookingInfo, BookingResponse,
    CreateBookingRequest, ListBookingsQuery, ListBookingsResponse, LoginRequest, LoginResponse,
    LogoutResponse, MeResponse, RegisterRequest, RegisterResponse, UpdateBookingRequest,
};
