// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-based authentication services.

use serde::Serialize;
use time::{Duration, OffsetDateTime};

use cinebook_persistence::{Persistence, SessionData, UserData};

use crate::credentials::{CredentialPolicy, Credentials};
use crate::error::{ApiError, translate_credential_errors};

/// The user as the API exposes it.
///
/// Built from [`UserData`] with the password hash stripped. There is no
/// serializer for the hash anywhere in this crate, so it cannot leak into a
/// response by accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    /// The user's canonical identifier.
    pub user_id: i64,
    /// The unique username.
    pub username: String,
    /// The email address, lowercase.
    pub email: String,
    /// The role (`user` or `admin`).
    pub role: String,
    /// When the account was created.
    pub created_at: String,
}

impl From<UserData> for PublicUser {
    fn from(user: UserData) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Registers a new user account and opens its first session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The requested username
    /// * `email` - The email address
    /// * `password` - The plain-text password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `public_user`).
    ///
    /// # Errors
    ///
    /// Returns a validation error if the credentials violate policy, or a
    /// conflict error if the username or email is already taken.
    pub fn register(
        persistence: &mut Persistence,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(String, PublicUser), ApiError> {
        let credentials: Credentials = CredentialPolicy::default()
            .validate(username, email, password)
            .map_err(|errors| translate_credential_errors(&errors))?;

        let user_id: i64 = persistence.create_user(
            &credentials.username,
            &credentials.email,
            password,
            "user",
        )?;

        let user: UserData = persistence
            .get_user_by_id(user_id)?
            .ok_or_else(|| ApiError::Internal {
                message: format!("User {user_id} vanished after registration"),
            })?;

        let session_token: String = Self::open_session(persistence, user_id)?;

        tracing::info!(user_id, "User registered");
        Ok((session_token, PublicUser::from(user)))
    }

    /// Authenticates a user by email and password and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The email address
    /// * `password` - The plain-text password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `public_user`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCredentials`] for an unknown email and for
    /// a wrong password alike. The two cases are indistinguishable on
    /// purpose.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, PublicUser), ApiError> {
        let Some(user) = persistence.get_user_by_email(email)? else {
            return Err(ApiError::InvalidCredentials);
        };

        let password_matches: bool =
            bcrypt::verify(password, &user.password_hash).map_err(|e| ApiError::Internal {
                message: format!("Failed to verify password: {e}"),
            })?;
        if !password_matches {
            return Err(ApiError::InvalidCredentials);
        }

        let session_token: String = Self::open_session(persistence, user.user_id)?;

        tracing::info!(user_id = user.user_id, "User logged in");
        Ok((session_token, PublicUser::from(user)))
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<PublicUser, ApiError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| ApiError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        persistence.update_session_activity(session.session_id)?;

        Ok(PublicUser::from(user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub fn logout(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(), ApiError> {
        persistence.delete_session(session_token)?;
        Ok(())
    }

    /// Creates a session with the default expiration and returns its token.
    fn open_session(persistence: &mut Persistence, user_id: i64) -> Result<String, ApiError> {
        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to format expiration time: {e}"),
            })?;

        persistence.create_session(&session_token, user_id, &expires_at_str)?;
        Ok(session_token)
    }

    /// Generates a session token.
    ///
    /// Combines a nanosecond timestamp with 64 bits of randomness. The token
    /// is an opaque database key, not a signed credential.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }
}
