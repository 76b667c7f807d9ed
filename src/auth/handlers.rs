use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::auth::{
    dto::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse},
    extractors::AuthUser,
    password::{hash_password, verify_password},
    repo::User,
};
use crate::errors::ApiError;
use crate::state::AppState;

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/protected", get(protected))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let (name, email, password) = payload.into_fields()?;
    let email = email.trim().to_lowercase();

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::validation("invalid email"));
    }

    // Uniqueness is checked before insert; the unique index covers the race.
    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&password)?;
    let user = User::create(&state.db, &name, &email, &hash)
        .await
        .map_err(ApiError::from_insert_user)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "user registered successfully".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    // A missing field can never match a stored credential; report it exactly
    // like a wrong password.
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::InvalidCredentials);
    };
    let email = email.trim().to_lowercase();

    let user = User::find_by_email(&state.db, &email).await?.ok_or_else(|| {
        warn!(email = %email, "login unknown email");
        ApiError::InvalidCredentials
    })?;

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.tokens.issue(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { access_token }))
}

#[instrument]
pub async fn protected(AuthUser(user_id): AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("logged in as user {user_id}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn email_regex_rejects_garbage() {
        assert!(!is_valid_email("notanemail"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("@x.com"));
    }
}
