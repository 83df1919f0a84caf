// src/presentation/http/flash.rs
//! One-shot notifications carried across a redirect in a cookie.
use axum::{
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use headers::{Cookie, HeaderMapExt};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value that stores this notification.
    pub fn to_cookie(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        format!(
            "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            URL_SAFE_NO_PAD.encode(json)
        )
    }

    /// Pending notification from the request cookies, if any decodes.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let cookie = headers.typed_get::<Cookie>()?;
        let raw = cookie.get(FLASH_COOKIE)?;
        let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// `Set-Cookie` value that drops a consumed notification.
pub fn clear_cookie() -> String {
    format!("{FLASH_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// `303 See Other` to `location` carrying `flash` for the next page view.
pub fn redirect_with(location: &str, flash: Flash) -> Response {
    (
        AppendHeaders([(SET_COOKIE, flash.to_cookie())]),
        Redirect::to(location),
    )
        .into_response()
}
