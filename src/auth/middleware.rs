//! Session guard for protected pages

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::SET_COOKIE, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{AuthService, Session};
use crate::web::cookies::{read_cookie, set_cookie};
use crate::web::{AppState, SharedState};

/// Name of the cookie holding the signed session token
pub const SESSION_COOKIE: &str = "staffdesk_session";

/// Where unauthenticated requests are sent
pub const LOGIN_PATH: &str = "/login";

/// Resolve the session named by the request's cookie, if it is still live
pub async fn session_from_headers(auth: &AuthService, headers: &HeaderMap) -> Option<Session> {
    let token = read_cookie(headers, SESSION_COOKIE)?;
    auth.resolve(&token).await
}

/// `Set-Cookie` value carrying a freshly signed token for `session`
pub fn session_cookie(state: &AppState, session: &Session) -> crate::error::Result<HeaderValue> {
    let token = state.auth.issue_token(session)?;
    set_cookie(
        SESSION_COOKIE,
        &token,
        state.auth.sessions().lifetime().num_seconds(),
        state.config.session.secure_cookie,
    )
}

/// Middleware requiring a live session; redirects to the login page otherwise
/// without running the wrapped handler.
///
/// The session cookie is re-signed on every request that passes, so it
/// expires after the same idle period as the server-side session.
pub async fn require_session(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Response {
    match session_from_headers(&state.auth, req.headers()).await {
        Some(session) => {
            let refreshed = session_cookie(&state, &session);
            req.extensions_mut().insert(session);
            let mut response = next.run(req).await;
            match refreshed {
                Ok(cookie) => {
                    response.headers_mut().append(SET_COOKIE, cookie);
                }
                Err(e) => tracing::warn!("Failed to refresh session cookie: {}", e),
            }
            response
        }
        None => {
            tracing::debug!("No session for {}, redirecting to login", req.uri().path());
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// Extractor for the session inserted by [`require_session`]
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}
