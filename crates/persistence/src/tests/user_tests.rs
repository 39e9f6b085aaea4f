// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for user and session persistence operations.

use crate::tests::{create_test_persistence, register_test_user};
use crate::{Persistence, PersistenceError, SessionData, UniqueConstraint, UserData};

#[test]
fn test_create_user_and_fetch_by_email() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = register_test_user(&mut persistence, "alice");
    assert!(user_id > 0);

    let user: UserData = persistence
        .get_user_by_email("alice@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(user.user_id, user_id);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, "user");
}

#[test]
fn test_email_lookup_is_case_insensitive() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .create_user("bob", "Bob@Example.COM", "password123", "user")
        .unwrap();

    // Stored lowercase, found regardless of query casing.
    let user: UserData = persistence
        .get_user_by_email("BOB@EXAMPLE.COM")
        .unwrap()
        .unwrap();
    assert_eq!(user.email, "bob@example.com");
}

#[test]
fn test_password_is_stored_hashed() {
    let mut persistence: Persistence = create_test_persistence();

    register_test_user(&mut persistence, "alice");

    let user: UserData = persistence
        .get_user_by_email("alice@example.com")
        .unwrap()
        .unwrap();
    assert_ne!(user.password_hash, "password123");
    assert!(bcrypt::verify("password123", &user.password_hash).unwrap());
    assert!(!bcrypt::verify("wrong-password", &user.password_hash).unwrap());
}

#[test]
fn test_duplicate_username_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();

    register_test_user(&mut persistence, "alice");

    let result: Result<i64, PersistenceError> =
        persistence.create_user("alice", "other@example.com", "password123", "user");
    assert_eq!(
        result,
        Err(PersistenceError::UniqueViolation(UniqueConstraint::Username))
    );
}

#[test]
fn test_duplicate_email_is_rejected_case_insensitively() {
    let mut persistence: Persistence = create_test_persistence();

    register_test_user(&mut persistence, "alice");

    let result: Result<i64, PersistenceError> =
        persistence.create_user("alice2", "ALICE@example.com", "password123", "user");
    assert_eq!(
        result,
        Err(PersistenceError::UniqueViolation(UniqueConstraint::Email))
    );
}

#[test]
fn test_get_user_by_id_unknown_returns_none() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.get_user_by_id(9999).unwrap().is_none());
}

#[test]
fn test_session_round_trip() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = register_test_user(&mut persistence, "alice");
    let session_id: i64 = persistence
        .create_session("session_token_1", user_id, "2999-01-01 00:00:00")
        .unwrap();
    assert!(session_id > 0);

    let session: SessionData = persistence
        .get_session_by_token("session_token_1")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.expires_at, "2999-01-01 00:00:00");

    persistence.delete_session("session_token_1").unwrap();
    assert!(
        persistence
            .get_session_by_token("session_token_1")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_get_session_unknown_token_returns_none() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(
        persistence
            .get_session_by_token("no_such_token")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_expired_sessions_keeps_live_ones() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = register_test_user(&mut persistence, "alice");
    persistence
        .create_session("expired_token", user_id, "2000-01-01 00:00:00")
        .unwrap();
    persistence
        .create_session("live_token", user_id, "2999-01-01 00:00:00")
        .unwrap();

    let deleted: usize = persistence.delete_expired_sessions().unwrap();
    assert_eq!(deleted, 1);

    assert!(
        persistence
            .get_session_by_token("expired_token")
            .unwrap()
            .is_none()
    );
    assert!(
        persistence
            .get_session_by_token("live_token")
            .unwrap()
            .is_some()
    );
}
