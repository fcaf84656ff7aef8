/*
 * Responsibility
 * - JSON body を DTO に deserialize し、Validate を通す extractor
 * - axum 標準の Json は 415/422 を返すので、AppError (400) に揃える
 */
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::{api::dto::Validate, error::AppError};

#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|msg| AppError::bad_request("VALIDATION_FAILED", msg))?;
        Ok(Self(value))
    }
}
