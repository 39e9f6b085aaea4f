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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use cinebook_api::{
    ApiError, AuthenticationService, AvailableSeatsQuery, AvailableSeatsResponse, BookingInfo,
    BookingResponse, BookingService, CreateBookingRequest, FieldError, ListBookingsQuery,
    ListBookingsResponse, LoginRequest, LoginResponse, LogoutResponse, MeResponse, PublicUser,
    RegisterRequest, RegisterResponse, UpdateBookingRequest,
};
use cinebook_domain::Booking;
use cinebook_persistence::Persistence;

use crate::session::SessionUser;

mod session;

/// CineBook Server - HTTP server for the CineBook reservation system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer for users, sessions, and bookings.
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Per-field validation errors, when the failure is a validation one.
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Per-field validation errors, when the failure is a validation one.
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } | ApiError::InvalidCredentials => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
                errors: None,
            },
            ApiError::ValidationFailed { errors } => Self {
                status: StatusCode::BAD_REQUEST,
                message: String::from("Validation failed"),
                errors: Some(errors),
            },
            ApiError::SeatConflict { .. } | ApiError::CredentialTaken { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
                errors: None,
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
                errors: None,
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                    errors: None,
                }
            }
        }
    }
}

/// Handler for POST `/auth/register` endpoint.
///
/// Registers a new user account and opens its first session.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), HttpError> {
    info!(username = %req.username, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let (token, user): (String, PublicUser) =
        AuthenticationService::register(&mut persistence, &req.username, &req.email, &req.password)?;
    drop(persistence);

    info!(user_id = user.user_id, "Successfully registered user");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: String::from("User registered successfully"),
            token,
            user,
        }),
    ))
}

/// Handler for POST `/auth/login` endpoint.
///
/// Authenticates by email and password and opens a session.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!("Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let (token, user): (String, PublicUser) =
        AuthenticationService::login(&mut persistence, &req.email, &req.password)?;
    drop(persistence);

    info!(user_id = user.user_id, "Successfully logged in");

    Ok(Json(LoginResponse {
        message: String::from("Login successful"),
        token,
        user,
    }))
}

/// Handler for POST `/auth/logout` endpoint.
///
/// Deletes the session behind the presented token.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, token): SessionUser,
) -> Result<Json<LogoutResponse>, HttpError> {
    info!(user_id = user.user_id, "Handling logout request");

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(Json(LogoutResponse {
        message: String::from("Logged out successfully"),
    }))
}

/// Handler for GET `/auth/me` endpoint.
///
/// Returns the authenticated user.
async fn handle_me(SessionUser(user, _): SessionUser) -> Json<MeResponse> {
    Json(MeResponse { user })
}

/// Handler for POST `/bookings` endpoint.
///
/// Creates a new booking for the authenticated user.
async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), HttpError> {
    info!(
        user_id = user.user_id,
        cinema_name = %req.cinema_name,
        seat_number = req.seat_number,
        "Handling create booking request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let booking: Booking = BookingService::create(&mut persistence, user.user_id, req)?;
    drop(persistence);

    info!(
        user_id = user.user_id,
        booking_id = booking.id,
        "Successfully created booking"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: String::from("Booking created successfully"),
            booking: BookingInfo::from(booking),
        }),
    ))
}

/// Handler for GET `/bookings` endpoint.
///
/// Lists the authenticated user's bookings with filters and pagination.
async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    info!(user_id = user.user_id, "Handling list bookings request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListBookingsResponse =
        BookingService::list(&mut persistence, user.user_id, &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/bookings/available-seats` endpoint.
///
/// Computes the seat map for one showing.
async fn handle_available_seats(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(query): Query<AvailableSeatsQuery>,
) -> Result<Json<AvailableSeatsResponse>, HttpError> {
    info!(user_id = user.user_id, "Handling available seats request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AvailableSeatsResponse =
        BookingService::available_seats(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/bookings/{id}` endpoint.
///
/// Returns one booking the authenticated user owns.
async fn handle_get_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        booking_id, "Handling get booking request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let booking: Booking = BookingService::get(&mut persistence, user.user_id, booking_id)?;
    drop(persistence);

    Ok(Json(BookingResponse {
        message: String::from("Booking retrieved successfully"),
        booking: BookingInfo::from(booking),
    }))
}

/// Handler for PUT `/bookings/{id}` endpoint.
///
/// Updates a booking the authenticated user owns. Absent fields keep
/// their stored values.
async fn handle_update_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(booking_id): Path<i64>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        booking_id, "Handling update booking request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let booking: Booking =
        BookingService::update(&mut persistence, user.user_id, booking_id, req)?;
    drop(persistence);

    info!(
        user_id = user.user_id,
        booking_id, "Successfully updated booking"
    );

    Ok(Json(BookingResponse {
        message: String::from("Booking updated successfully"),
        booking: BookingInfo::from(booking),
    }))
}

/// Handler for POST `/bookings/{id}/cancel` endpoint.
///
/// Cancels a booking, releasing its seat. Idempotent.
async fn handle_cancel_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        booking_id, "Handling cancel booking request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let booking: Booking = BookingService::cancel(&mut persistence, user.user_id, booking_id)?;
    drop(persistence);

    info!(
        user_id = user.user_id,
        booking_id, "Successfully cancelled booking"
    );

    Ok(Json(BookingResponse {
        message: String::from("Booking cancelled successfully"),
        booking: BookingInfo::from(booking),
    }))
}

/// Handler for DELETE `/bookings/{id}` endpoint.
///
/// Deletes a booking outright and returns it as it was stored.
async fn handle_delete_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        booking_id, "Handling delete booking request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let booking: Booking = BookingService::delete(&mut persistence, user.user_id, booking_id)?;
    drop(persistence);

    info!(
        user_id = user.user_id,
        booking_id, "Successfully deleted booking"
    );

    Ok(Json(BookingResponse {
        message: String::from("Booking deleted successfully"),
        booking: BookingInfo::from(booking),
    }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(handle_register))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/me", get(handle_me))
        .route("/bookings", post(handle_create_booking))
        .route("/bookings", get(handle_list_bookings))
        .route("/bookings/available-seats", get(handle_available_seats))
        .route("/bookings/{id}", get(handle_get_booking))
        .route("/bookings/{id}", put(handle_update_booking))
        .route("/bookings/{id}", delete(handle_delete_booking))
        .route("/bookings/{id}/cancel", post(handle_cancel_booking))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing CineBook Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
