use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use crate::auth::tokens::TokenService;
use crate::errors::ApiError;

/// Extracts and validates the bearer token, yielding the caller's user ID.
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenService: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = TokenService::from_ref(state);

        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthenticated("missing authorization header"))?;

        // Expect "Bearer <token>"
        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthenticated("invalid authorization scheme"))?;

        let claims = tokens.validate(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            ApiError::Unauthenticated("invalid or expired token")
        })?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use axum::http::{Request, StatusCode};

    fn service() -> TokenService {
        TokenService::new(&JwtConfig {
            secret: "dev-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: 5,
        })
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/products");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).expect("request").into_parts();
        parts
    }

    #[tokio::test]
    async fn accepts_valid_bearer_token() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let token = svc.issue(user_id).expect("issue");

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &svc)
            .await
            .expect("extract");
        assert_eq!(extracted, user_id);
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let svc = service();
        let mut parts = parts_with_auth(None);
        let err = AuthUser::from_request_parts(&mut parts, &svc)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_non_bearer_scheme() {
        let svc = service();
        let mut parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        let err = AuthUser::from_request_parts(&mut parts, &svc)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let svc = service();
        let mut parts = parts_with_auth(Some("Bearer not-a-jwt"));
        let err = AuthUser::from_request_parts(&mut parts, &svc)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_token_signed_elsewhere() {
        let ours = service();
        let theirs = TokenService::new(&JwtConfig {
            secret: "other-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: 5,
        });
        let token = theirs.issue(Uuid::new_v4()).expect("issue");

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let err = AuthUser::from_request_parts(&mut parts, &ours)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }
}
