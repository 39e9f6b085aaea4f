// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for registration, login, and session validation.

use cinebook_persistence::Persistence;

use crate::auth::{AuthenticationService, PublicUser};
use crate::error::ApiError;
use crate::tests::{create_test_persistence, register_test_user};

#[test]
fn test_register_returns_token_and_public_user() {
    let mut persistence: Persistence = create_test_persistence();

    let (token, user) = AuthenticationService::register(
        &mut persistence,
        "alice",
        "Alice@Example.COM",
        "password123",
    )
    .unwrap();

    assert!(token.starts_with("session_"));
    assert!(user.user_id > 0);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, "user");
}

#[test]
fn test_register_session_is_immediately_valid() {
    let mut persistence: Persistence = create_test_persistence();

    let (token, _) = AuthenticationService::register(
        &mut persistence,
        "alice",
        "alice@example.com",
        "password123",
    )
    .unwrap();

    let user: PublicUser =
        AuthenticationService::validate_session(&mut persistence, &token).unwrap();
    assert_eq!(user.username, "alice");
}

#[test]
fn test_register_collects_every_policy_violation() {
    let mut persistence: Persistence = create_test_persistence();

    let result = AuthenticationService::register(&mut persistence, "ab", "not-an-email", "short");

    match result {
        Err(ApiError::ValidationFailed { errors }) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["username", "email", "password"]);
        }
        other => panic!("Expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn test_register_duplicate_username_conflicts() {
    let mut persistence: Persistence = create_test_persistence();
    register_test_user(&mut persistence, "alice");

    let result =
        AuthenticationService::register(&mut persistence, "alice", "other@example.com", "password123");
    assert_eq!(
        result,
        Err(ApiError::CredentialTaken {
            field: String::from("username")
        })
    );
}

#[test]
fn test_register_duplicate_email_conflicts() {
    let mut persistence: Persistence = create_test_persistence();
    register_test_user(&mut persistence, "alice");

    let result =
        AuthenticationService::register(&mut persistence, "alice2", "ALICE@example.com", "password123");
    assert_eq!(
        result,
        Err(ApiError::CredentialTaken {
            field: String::from("email")
        })
    );
}

#[test]
fn test_login_returns_token_and_user() {
    let mut persistence: Persistence = create_test_persistence();
    register_test_user(&mut persistence, "alice");

    let (token, user) =
        AuthenticationService::login(&mut persistence, "alice@example.com", "password123").unwrap();

    assert!(token.starts_with("session_"));
    assert_eq!(user.username, "alice");
}

#[test]
fn test_login_failures_are_indistinguishable() {
    let mut persistence: Persistence = create_test_persistence();
    register_test_user(&mut persistence, "alice");

    let unknown_email =
        AuthenticationService::login(&mut persistence, "nobody@example.com", "password123")
            .unwrap_err();
    let wrong_password =
        AuthenticationService::login(&mut persistence, "alice@example.com", "wrong-password")
            .unwrap_err();

    assert_eq!(unknown_email, ApiError::InvalidCredentials);
    assert_eq!(wrong_password, ApiError::InvalidCredentials);
    assert_eq!(unknown_email.to_string(), wrong_password.to_string());
}

#[test]
fn test_validate_session_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    register_test_user(&mut persistence, "alice");

    let (token, _) =
        AuthenticationService::login(&mut persistence, "alice@example.com", "password123").unwrap();

    let user: PublicUser =
        AuthenticationService::validate_session(&mut persistence, &token).unwrap();
    assert_eq!(user.username, "alice");
}

#[test]
fn test_validate_session_rejects_unknown_token() {
    let mut persistence: Persistence = create_test_persistence();

    let result = AuthenticationService::validate_session(&mut persistence, "session_0_0");
    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_validate_session_rejects_expired_token() {
    let mut persistence: Persistence = create_test_persistence();
    let user: PublicUser = register_test_user(&mut persistence, "alice");

    let expired_at: String = (time::OffsetDateTime::now_utc() - time::Duration::days(1))
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap();
    persistence
        .create_session("session_0_stale", user.user_id, &expired_at)
        .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "session_0_stale");
    match result {
        Err(ApiError::AuthenticationFailed { reason }) => {
            assert_eq!(reason, "Session expired");
        }
        other => panic!("Expected AuthenticationFailed, got {other:?}"),
    }
}

#[test]
fn test_logout_invalidates_session() {
    let mut persistence: Persistence = create_test_persistence();
    register_test_user(&mut persistence, "alice");

    let (token, _) =
        AuthenticationService::login(&mut persistence, "alice@example.com", "password123").unwrap();
    AuthenticationService::logout(&mut persistence, &token).unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, &token);
    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_login_is_case_insensitive_on_email() {
    let mut persistence: Persistence = create_test_persistence();
    register_test_user(&mut persistence, "alice");

    let result =
        AuthenticationService::login(&mut persistence, "ALICE@EXAMPLE.COM", "password123");
    assert!(result.is_ok());
}
