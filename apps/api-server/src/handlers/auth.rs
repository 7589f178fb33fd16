//! Authentication handlers - register, sign in/out, current session.

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{web, HttpResponse};
use std::sync::Arc;

use quill_core::domain::Account;
use quill_core::ports::{PasswordService, TokenService};
use quill_shared::dto::{AccountResponse, LoginRequest, RegisterRequest};
use quill_shared::ApiResponse;

use crate::middleware::auth::{Identity, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.name.chars().count() < 3 {
        return Err(AppError::BadRequest(
            "Name must be at least 3 characters long".to_string(),
        ));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    // Check if the email is already taken
    if state.accounts.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = password_service.hash(&req.password)?;

    let account = Account::new(req.name, req.email, password_hash);
    let saved = state.accounts.insert(account).await?;

    tracing::info!(account_id = %saved.id, "account registered");

    // Registration does not sign the account in; the client is sent to the
    // login flow next.
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        account_response(&saved.id.to_string(), &saved.name, &saved.email),
        "Account created successfully! Please sign in with your email and password.",
    )))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find account by email
    let account = state
        .accounts
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    let valid = password_service.verify(&req.password, &account.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    // Mint the session token and set the cookie the route guard and
    // session gate look for.
    let token = token_service.generate_token(account.id, &account.name, &account.email)?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(token_service.expiration_seconds()))
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::ok_with_message(
        account_response(&account.id.to_string(), &account.name, &account.email),
        "Signed in successfully",
    )))
}

/// POST /auth/logout
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::message("Signed out"))
}

/// GET /auth - the sign-in landing. Signed-in visitors never reach this;
/// the route guard bounces them home first.
pub async fn landing() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::message("Sign in to continue"))
}

/// GET /auth/me - the current session's account.
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(account_response(
        &identity.account_id.to_string(),
        &identity.name,
        &identity.email,
    ))))
}

fn account_response(id: &str, name: &str, email: &str) -> AccountResponse {
    AccountResponse {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    }
}
