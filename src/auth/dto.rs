use serde::{Deserialize, Serialize};

use crate::validation::{null_as_empty, Validate, Violations};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Request body for both signup and login.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
}

impl Validate for AuthRequest {
    fn normalize(&mut self) {
        self.email = self.email.trim().to_lowercase();
    }

    fn validate(&self, v: &mut Violations) {
        v.not_empty("email", &self.email).email("email", &self.email);
        v.not_empty("password", &self.password)
            .min_length("password", &self.password, MIN_PASSWORD_LEN);
    }
}

/// Returned by a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64, // seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(mut req: AuthRequest) -> Vec<String> {
        req.normalize();
        let mut v = Violations::default();
        req.validate(&mut v);
        match v.into_result() {
            Ok(()) => vec![],
            Err(crate::error::AppError::Validation(m)) => m,
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn normalizes_email_before_checking() {
        let mut req = AuthRequest {
            email: "  Test@Testing.COM ".into(),
            password: "12345678".into(),
        };
        req.normalize();
        assert_eq!(req.email, "test@testing.com");
        assert!(messages(req).is_empty());
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let req: AuthRequest = serde_json::from_str(r#"{"email":"test@testing.com"}"#).unwrap();
        assert_eq!(
            messages(req),
            vec![
                "password should not be empty",
                "password must be longer than or equal to 8 characters",
            ]
        );
    }

    #[test]
    fn null_fields_read_as_missing() {
        let req: AuthRequest =
            serde_json::from_str(r#"{"email":null,"password":"12345678"}"#).unwrap();
        assert_eq!(messages(req), ["email should not be empty", "email must be an email"]);
    }

    #[test]
    fn rejects_short_password_and_bad_email() {
        let got = messages(AuthRequest {
            email: "invalid@mail".into(),
            password: "1234567".into(),
        });
        assert_eq!(
            got,
            vec![
                "email must be an email",
                "password must be longer than or equal to 8 characters",
            ]
        );
    }
}
