pub mod extractors;
pub mod flow;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::PublicUser;
use crate::validation::{non_blank, EMAIL_REGEX};

// Re-export necessary items
pub use extractors::AuthContext;
pub use flow::{signin, signup, Session};
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Represents the payload for a new user registration request.
///
/// Missing fields deserialize as empty strings so that they are reported as
/// validation errors rather than as body parse failures.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Must look like `local@domain.tld`.
    #[serde(default)]
    #[validate(regex(path = "EMAIL_REGEX", message = "Invalid email"))]
    pub email: String,
    /// At least 6 characters.
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Display name.
    #[serde(rename = "nome", default)]
    #[validate(custom = "non_blank")]
    pub name: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[serde(default)]
    #[validate(custom = "non_blank")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body of `POST /api/auth/signup`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Response body of `POST /api/auth/signin`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    /// The JWT to send as `Authorization: Bearer <token>`.
    pub token: String,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_signin_request_validation() {
        let valid = SigninRequest {
            email: "test@example.com".to_string(),
            password: "x".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing_email: SigninRequest =
            serde_json::from_str(r#"{"password": "password123"}"#).unwrap();
        assert!(missing_email.validate().is_err());

        let missing_password: SigninRequest =
            serde_json::from_str(r#"{"email": "test@example.com"}"#).unwrap();
        assert!(missing_password.validate().is_err());
    }

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            email: "test@example.com".to_string(),
            password: "123456".to_string(),
            name: "Test User".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid_email = SignupRequest {
            email: "testexample.com".to_string(),
            ..valid_signup()
        };
        assert!(invalid_email.validate().is_err());

        let short_password = SignupRequest {
            password: "12345".to_string(),
            ..valid_signup()
        };
        assert!(short_password.validate().is_err());

        let missing_name: SignupRequest =
            serde_json::from_str(r#"{"email": "test@example.com", "password": "123456"}"#)
                .unwrap();
        assert!(missing_name.validate().is_err());
    }

    fn valid_signup() -> SignupRequest {
        SignupRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            name: "Test User".to_string(),
        }
    }
}
