//! Request extractors that deserialize and validate in one step, so every
//! malformed input surfaces as [`AppError::Validation`] (400).

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use garde::Validate;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::error::AppError;

/// Largest page a list endpoint returns.
pub const MAX_PAGE_SIZE: i64 = 10;

/// Highest accepted page number. Keeps `offset` far from `i64` overflow.
pub const MAX_PAGE_ID: i64 = i32::MAX as i64;

fn validate<T>(value: T) -> Result<T, AppError>
where
    T: Validate,
    T::Context: Default,
{
    value
        .validate()
        .map_err(|report| AppError::Validation(report.to_string().trim().to_string()))?;
    Ok(value)
}

/// A JSON body that passed its `garde` rules.
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        validate(value).map(Self)
    }
}

/// A query string that passed its `garde` rules.
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        validate(value).map(Self)
    }
}

/// Path parameters that passed their `garde` rules.
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Validate + Send,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        validate(value).map(Self)
    }
}

/// `/{id}` path parameter of an owned resource.
#[derive(Debug, Deserialize, Validate)]
pub struct IdParams {
    #[garde(range(min = 1))]
    pub id: i64,
}

/// `?page_id=&page_size=` pagination, 1-based.
#[derive(Debug, Deserialize, Validate)]
pub struct PageParams {
    #[garde(range(min = 1, max = MAX_PAGE_ID))]
    pub page_id: i64,
    #[garde(range(min = 1, max = MAX_PAGE_SIZE))]
    pub page_size: i64,
}

impl PageParams {
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> Result<i64, AppError> {
        (self.page_id - 1)
            .checked_mul(self.page_size)
            .ok_or_else(|| AppError::Validation("page_id is out of range".to_string()))
    }
}

/// Deserializes an optional string, treating blank values as absent.
///
/// Used by PATCH bodies, where an absent field keeps its stored value.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
