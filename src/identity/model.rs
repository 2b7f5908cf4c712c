use crate::config::MAX_USERNAME_LEN;
use crate::error::{AuctionError, AuctionResult};
use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

// User model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration input that passed validation. The password is still plain text.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(self) -> AuctionResult<NewUser> {
        if self.password != self.confirmation {
            return Err(AuctionError::Validation("Passwords must match.".into()));
        }
        if self.password.is_empty() {
            return Err(AuctionError::Validation("Password is required.".into()));
        }

        let username = self.username.trim().to_string();
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
            return Err(AuctionError::Validation(format!(
                "Username must be between 1 and {MAX_USERNAME_LEN} characters."
            )));
        }

        let email = self.email.trim().to_string();
        if !EmailAddress::is_valid(&email) {
            return Err(AuctionError::Validation(
                "Enter a valid email address.".into(),
            ));
        }

        Ok(NewUser {
            username,
            email,
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "hunter2".into(),
            confirmation: "hunter2".into(),
        }
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut f = form();
        f.confirmation = "hunter3".into();
        let err = f.validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords must match.");
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut f = form();
        f.email = "alice".into();
        assert!(matches!(f.validate(), Err(AuctionError::Validation(_))));
    }

    #[test]
    fn valid_form_passes() {
        let user = form().validate().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
