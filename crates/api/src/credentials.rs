// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential policy validation.
//!
//! This module enforces the registration requirements for usernames, email
//! addresses, and passwords.

use thiserror::Error;

/// Credential policy errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialPolicyError {
    /// Username is too short.
    #[error("Username must be at least {min_length} characters long")]
    UsernameTooShort { min_length: usize },

    /// Email address is not structurally valid.
    #[error("Please provide a valid email address")]
    InvalidEmail,

    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    PasswordTooShort { min_length: usize },
}

impl CredentialPolicyError {
    /// Returns the payload field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::UsernameTooShort { .. } => "username",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } => "password",
        }
    }
}

/// Normalized registration credentials.
///
/// The username is trimmed and the email is trimmed and lowercased. The
/// password is passed through untouched; hashing happens in persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub email: String,
}

/// Credential policy configuration.
pub struct CredentialPolicy {
    /// Minimum username length.
    pub min_username_length: usize,
    /// Minimum password length.
    pub min_password_length: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_username_length: 3,
            min_password_length: 6,
        }
    }
}

impl CredentialPolicy {
    /// Validates and normalizes registration credentials.
    ///
    /// Every rule is checked, so the caller can report the complete list of
    /// problems in one response.
    ///
    /// # Arguments
    ///
    /// * `username` - The requested username
    /// * `email` - The email address
    /// * `password` - The plain-text password
    ///
    /// # Errors
    ///
    /// Returns the full list of violated rules.
    pub fn validate(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Credentials, Vec<CredentialPolicyError>> {
        let mut errors: Vec<CredentialPolicyError> = Vec::new();

        let username: &str = username.trim();
        if username.chars().count() < self.min_username_length {
            errors.push(CredentialPolicyError::UsernameTooShort {
                min_length: self.min_username_length,
            });
        }

        let email: String = email.trim().to_lowercase();
        if !is_plausible_email(&email) {
            errors.push(CredentialPolicyError::InvalidEmail);
        }

        if password.chars().count() < self.min_password_length {
            errors.push(CredentialPolicyError::PasswordTooShort {
                min_length: self.min_password_length,
            });
        }

        if errors.is_empty() {
            Ok(Credentials {
                username: String::from(username),
                email,
            })
        } else {
            Err(errors)
        }
    }
}

/// Structural email check: one `@`, a non-empty local part, and a domain
/// with at least one dot. Real validity is only proven by delivery, so
/// anything stricter just rejects legitimate addresses.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tld)) => !head.is_empty() && tld.len() >= 2,
        None => false,
    }
}
