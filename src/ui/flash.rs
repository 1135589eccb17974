//! One-shot notifications carried across a redirect
//!
//! A flash is signed into a short-lived cookie on the redirect response and
//! removed by the next page that renders it.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::auth::TokenSigner;
use crate::error::Result;
use crate::web::cookies::read_cookie;

pub const FLASH_COOKIE: &str = "staffdesk_flash";

/// How long an unread flash survives
pub const FLASH_TTL_SECS: i64 = 60;

/// Notification style, mapped to a CSS class by the templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }
}

#[derive(Serialize, Deserialize)]
struct FlashClaims {
    #[serde(flatten)]
    flash: Flash,
    exp: i64,
}

/// Signed cookie value for a flash
pub fn encode_flash(signer: &TokenSigner, flash: &Flash) -> Result<String> {
    let claims = FlashClaims {
        flash: flash.clone(),
        exp: chrono::Utc::now().timestamp() + FLASH_TTL_SECS,
    };
    signer.sign(&claims)
}

/// Pending flash from the request, if present and untampered
pub fn read_flash(signer: &TokenSigner, headers: &HeaderMap) -> Option<Flash> {
    let token = read_cookie(headers, FLASH_COOKIE)?;
    signer
        .verify::<FlashClaims>(&token)
        .ok()
        .map(|claims| claims.flash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    #[test]
    fn test_flash_cookie_round_trip() {
        let signer = TokenSigner::new("flash-test-secret-0123");
        let token = encode_flash(&signer, &Flash::info("Employee deleted successfully")).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}={}", FLASH_COOKIE, token)).unwrap(),
        );

        let flash = read_flash(&signer, &headers).unwrap();
        assert_eq!(flash.level, FlashLevel::Info);
        assert_eq!(flash.message, "Employee deleted successfully");
    }

    #[test]
    fn test_forged_flash_ignored() {
        let signer = TokenSigner::new("flash-test-secret-0123");
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}=forged", FLASH_COOKIE)).unwrap(),
        );
        assert!(read_flash(&signer, &headers).is_none());
    }
}
