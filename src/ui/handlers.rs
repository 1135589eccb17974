//! Web UI handlers

use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::auth::middleware::{session_cookie, SESSION_COOKIE};
use crate::auth::{AuthError, CurrentSession, LoginRequest};
use crate::employees::EmployeeForm;
use crate::error::{Error, Result};
use crate::web::cookies::{clear_cookie, read_cookie, set_cookie};
use crate::web::SharedState;

use super::flash::{encode_flash, read_flash, Flash, FLASH_COOKIE, FLASH_TTL_SECS};

const DUPLICATE_EMAIL_MESSAGE: &str = "Email must be unique";

/// Rendered page; clears the flash cookie if one was consumed
fn page(status: StatusCode, html: String, consumed_flash: bool) -> Response {
    let mut response = (status, Html(html)).into_response();
    if consumed_flash {
        response
            .headers_mut()
            .append(SET_COOKIE, clear_cookie(FLASH_COOKIE));
    }
    response
}

/// Redirect carrying a one-shot notification for the next page
fn redirect_with_flash(state: &SharedState, to: &str, flash: Flash) -> Result<Response> {
    let token = encode_flash(&state.signer, &flash)?;
    let cookie = set_cookie(
        FLASH_COOKIE,
        &token,
        FLASH_TTL_SECS,
        state.config.session.secure_cookie,
    )?;
    let mut response = Redirect::to(to).into_response();
    response.headers_mut().append(SET_COOKIE, cookie);
    Ok(response)
}

/// Pending flash from the request, plus whether one was present
fn take_flash(state: &SharedState, headers: &HeaderMap) -> (Vec<Flash>, bool) {
    let consumed = read_cookie(headers, FLASH_COOKIE).is_some();
    let flashes = read_flash(&state.signer, headers).into_iter().collect();
    (flashes, consumed)
}

/// Health check
pub async fn health() -> &'static str {
    "ok"
}

/// Root - always sends the browser to the login page
pub async fn index() -> Redirect {
    Redirect::to("/login")
}

/// Login form
pub async fn login_page(State(state): State<SharedState>, headers: HeaderMap) -> Result<Response> {
    let (flashes, consumed) = take_flash(&state, &headers);
    let html = state.templates.login("", &flashes)?;
    Ok(page(StatusCode::OK, html, consumed))
}

/// Credential check; sets the session cookie on success
pub async fn login_submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(req): Form<LoginRequest>,
) -> Result<Response> {
    match state.auth.authenticate(&req.username, &req.password).await {
        Ok(session) => {
            // Replace any session this browser already held.
            if let Some(old) = read_cookie(&headers, SESSION_COOKIE)
                .and_then(|token| state.auth.session_id(&token))
            {
                state.auth.logout(Some(&old)).await;
            }

            let cookie = session_cookie(&state, &session)?;
            let mut response = Redirect::to("/dashboard").into_response();
            response.headers_mut().append(SET_COOKIE, cookie);
            Ok(response)
        }
        Err(AuthError::InvalidCredentials) => {
            let (mut flashes, consumed) = take_flash(&state, &headers);
            flashes.push(Flash::danger(AuthError::InvalidCredentials.to_string()));
            let html = state.templates.login(&req.username, &flashes)?;
            Ok(page(StatusCode::OK, html, consumed))
        }
        Err(AuthError::Storage(e)) => Err(e),
    }
}

/// Close the session (if any) and return to the login page
pub async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> Result<Response> {
    let session_id = read_cookie(&headers, SESSION_COOKIE).and_then(|token| state.auth.session_id(&token));
    state.auth.logout(session_id.as_deref()).await;

    let mut response = redirect_with_flash(&state, "/login", Flash::success("Logged out successfully"))?;
    response
        .headers_mut()
        .append(SET_COOKIE, clear_cookie(SESSION_COOKIE));
    Ok(response)
}

/// Employee list
pub async fn dashboard(
    State(state): State<SharedState>,
    CurrentSession(session): CurrentSession,
    headers: HeaderMap,
) -> Result<Response> {
    let employees = state.employees.list_all().await?;
    let (flashes, consumed) = take_flash(&state, &headers);
    let html = state
        .templates
        .dashboard(&session.username, &employees, &flashes)?;
    Ok(page(StatusCode::OK, html, consumed))
}

/// Blank add form
pub async fn add_page(
    State(state): State<SharedState>,
    CurrentSession(session): CurrentSession,
    headers: HeaderMap,
) -> Result<Response> {
    let (flashes, consumed) = take_flash(&state, &headers);
    let html = state
        .templates
        .employee_form(&session.username, None, &EmployeeForm::default(), &flashes)?;
    Ok(page(StatusCode::OK, html, consumed))
}

pub async fn add_submit(
    State(state): State<SharedState>,
    CurrentSession(session): CurrentSession,
    Form(form): Form<EmployeeForm>,
) -> Result<Response> {
    let outcome = match form.validate() {
        Ok(input) => state.employees.create(&input).await.map(|_| ()),
        Err(e) => Err(Error::Validation(e)),
    };

    match recover_write_error(outcome)? {
        None => redirect_with_flash(&state, "/dashboard", Flash::success("Employee added successfully")),
        Some(flash) => {
            let html = state
                .templates
                .employee_form(&session.username, None, &form, &[flash])?;
            Ok(page(StatusCode::OK, html, false))
        }
    }
}

/// Edit form pre-filled from the stored record
pub async fn edit_page(
    State(state): State<SharedState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response> {
    match state.employees.get(id).await {
        Ok(employee) => {
            let (flashes, consumed) = take_flash(&state, &headers);
            let html = state.templates.employee_form(
                &session.username,
                Some(id),
                &employee.to_form(),
                &flashes,
            )?;
            Ok(page(StatusCode::OK, html, consumed))
        }
        Err(Error::EmployeeNotFound(_)) => not_found(&state, &session.username, id),
        Err(e) => Err(e),
    }
}

pub async fn edit_submit(
    State(state): State<SharedState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Form(form): Form<EmployeeForm>,
) -> Result<Response> {
    // An unknown id wins over a bad form.
    let outcome = match form.validate() {
        Ok(input) => state.employees.update(id, &input).await.map(|_| ()),
        Err(e) => state.employees.get(id).await.and(Err(Error::Validation(e))),
    };

    match outcome {
        Err(Error::EmployeeNotFound(_)) => not_found(&state, &session.username, id),
        other => match recover_write_error(other)? {
            None => redirect_with_flash(&state, "/dashboard", Flash::success("Employee updated successfully")),
            Some(flash) => {
                let html = state
                    .templates
                    .employee_form(&session.username, Some(id), &form, &[flash])?;
                Ok(page(StatusCode::OK, html, false))
            }
        },
    }
}

/// Delete by id; reports success whether or not the row existed
pub async fn delete(
    State(state): State<SharedState>,
    CurrentSession(_session): CurrentSession,
    Path(id): Path<i64>,
) -> Result<Response> {
    state.employees.delete(id).await?;
    redirect_with_flash(&state, "/dashboard", Flash::info("Employee deleted successfully"))
}

/// Turn the recoverable write failures into a notification for the form.
/// Anything else stays an error and becomes a 500.
fn recover_write_error(outcome: Result<()>) -> Result<Option<Flash>> {
    match outcome {
        Ok(()) => Ok(None),
        Err(Error::Validation(e)) => Ok(Some(Flash::warning(e.to_string()))),
        Err(Error::DuplicateEmail(email)) => {
            tracing::info!("Rejected duplicate email {}", email);
            Ok(Some(Flash::danger(DUPLICATE_EMAIL_MESSAGE)))
        }
        Err(e) => Err(e),
    }
}

fn not_found(state: &SharedState, username: &str, id: i64) -> Result<Response> {
    let html = state.templates.not_found(username, id)?;
    Ok(page(StatusCode::NOT_FOUND, html, false))
}
