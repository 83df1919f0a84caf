// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    Extension,
    extract::FromRequestParts,
    http::{Method, request::Parts},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use std::convert::Infallible;

use super::error::HttpError;

/// A caller with a valid bearer token; rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

/// The caller when a bearer token is present. A present but invalid token
/// is still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthenticatedUser>);

async fn app_state<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<HttpState, HttpError> {
    let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
        .await
        .map_err(|_| {
            HttpError::from_error(ApplicationError::infrastructure(
                "application state missing",
            ))
        })?;
    Ok(app_state)
}

async fn authenticate_bearer(
    parts: &Parts,
    app_state: &HttpState,
) -> Result<Option<AuthenticatedUser>, HttpError> {
    let Some(header) = parts.headers.typed_get::<Authorization<Bearer>>() else {
        return Ok(None);
    };
    let user = app_state
        .services
        .authenticate(header.token())
        .await
        .map_err(|err| {
            tracing::debug!(error = %err, "bearer token rejected");
            HttpError::from_error(err)
        })?;
    Ok(Some(user))
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;
        authenticate_bearer(parts, &app_state)
            .await?
            .map(Self)
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::unauthorized(
                    "missing Authorization header",
                ))
            })
    }
}

impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;
        Ok(Self(authenticate_bearer(parts, &app_state).await?))
    }
}

/// How the client expects a workflow outcome to be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Browser form post: answer with a redirect and a flash notification.
    Page,
    /// Script call: answer with a JSON payload.
    Async,
}

impl Delivery {
    pub fn from_parts(parts: &Parts) -> Self {
        let xhr = parts
            .headers
            .get("x-requested-with")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"));
        if xhr || parts.method == Method::DELETE {
            Self::Async
        } else {
            Self::Page
        }
    }
}

impl<S> FromRequestParts<S> for Delivery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
