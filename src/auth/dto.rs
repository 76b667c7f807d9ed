use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/// Request body for user registration. Fields are optional so that missing
/// input surfaces as the documented 400, not a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Presence check for all three fields; blank counts as missing.
    pub fn into_fields(self) -> Result<(String, String, String), ApiError> {
        match (self.name, self.email, self.password) {
            (Some(name), Some(email), Some(password))
                if !name.trim().is_empty()
                    && !email.trim().is_empty()
                    && !password.is_empty() =>
            {
                Ok((name, email, password))
            }
            _ => Err(ApiError::validation("name, email and password are required")),
        }
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Generic `{"message": ...}` body for endpoints that confirm an action.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_fields_accepted_when_all_present() {
        let req = RegisterRequest {
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            password: Some("p1".into()),
        };
        let (name, email, password) = req.into_fields().expect("valid");
        assert_eq!(name, "Ada");
        assert_eq!(email, "ada@example.com");
        assert_eq!(password, "p1");
    }

    #[test]
    fn register_rejects_missing_field() {
        let req = RegisterRequest {
            name: Some("Ada".into()),
            email: None,
            password: Some("p1".into()),
        };
        let err = req.into_fields().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn register_rejects_blank_name() {
        let req = RegisterRequest {
            name: Some("   ".into()),
            email: Some("ada@example.com".into()),
            password: Some("p1".into()),
        };
        assert!(req.into_fields().is_err());
    }

    #[test]
    fn token_response_uses_access_token_key() {
        let body = TokenResponse {
            access_token: "abc".into(),
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert!(json.contains("access_token"));
    }

    #[test]
    fn message_response_serializes_message_key() {
        let body = MessageResponse {
            message: "user registered successfully".into(),
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert!(json.contains("\"message\""));
    }
}
