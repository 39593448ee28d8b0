use actix_web::dev::Payload;
use actix_web::{http::header, web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::token::TokenService;
use crate::db::repositories::user::{UserLookup, UserRepository};
use crate::error::AppError;
use crate::models::User;

/// Extracts the authenticated user for protected routes.
///
/// The access token is read from the `access_token` cookie, falling back to
/// an `Authorization: Bearer` header for non-cookie deployments. The token is
/// verified and its subject looked up in the store; a soft-deleted or unknown
/// user fails authentication the same way an invalid token does.
#[derive(Debug)]
pub struct CurrentUser(pub User);

fn token_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie("access_token") {
        return Some(cookie.value().to_string());
    }
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let token = token_from_request(&req).ok_or_else(|| {
                AppError::InvalidToken(
                    "Could not validate credentials. Token not found.".to_string(),
                )
            })?;

            let tokens = req
                .app_data::<web::Data<TokenService>>()
                .ok_or_else(|| AppError::Internal("TokenService not configured".to_string()))?;
            let pool = req
                .app_data::<web::Data<PgPool>>()
                .ok_or_else(|| AppError::Internal("Database pool not configured".to_string()))?;

            let user_id = tokens
                .verify(&token)
                .map_err(|_| AppError::InvalidToken("Invalid credentials".to_string()))?;

            let repo = UserRepository::new(pool.get_ref().clone());
            let user = repo
                .get_user(&UserLookup::by_id(user_id))
                .await
                .map_err(|e| match e {
                    // The subject no longer resolves to a live user.
                    AppError::NotFound(_) => {
                        AppError::InvalidToken("Invalid credentials".to_string())
                    }
                    other => other,
                })?;

            Ok(CurrentUser(user))
        })
    }
}
