use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Reads a string field, treating an explicit `null` like a missing one.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Constraint checks for a request body.
pub trait Validate {
    /// Canonicalizes fields before `validate` runs.
    fn normalize(&mut self) {}

    fn validate(&self, v: &mut Violations);
}

/// Collected constraint failures, one human-readable message each.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn not_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.0.push(format!("{field} should not be empty"));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !is_valid_email(value) {
            self.0.push(format!("{field} must be an email"));
        }
        self
    }

    pub fn min_length(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.chars().count() < min {
            self.0
                .push(format!("{field} must be longer than or equal to {min} characters"));
        }
        self
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0))
        }
    }
}

/// `Json<T>` that also runs `T`'s [`Validate`] rules; every failure becomes a 400.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;

        value.normalize();
        let mut violations = Violations::default();
        value.validate(&mut violations);
        violations.into_result()?;

        Ok(Self(value))
    }
}

/// `Path<T>` whose parse failures answer with the JSON error body instead of plain text.
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;
        Ok(Self(value))
    }
}
