use crate::{
    auth::{
        hash_password, verify_password, AccessToken, CurrentUser, LoginForm, RegisterRequest,
        TokenService,
    },
    db::repositories::{
        user::{UserLookup, UserRepository},
        ContributionRepository,
    },
    error::AppError,
    models::{ContributionPublic, NewUserRecord},
};
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. Email and username are case-normalized
/// before storage; the password is hashed and the plaintext discarded.
#[post("")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;
    let register_data = register_data.into_inner();

    let password_hash = hash_password(&register_data.password)?;
    let record = NewUserRecord {
        email: register_data.email.to_lowercase(),
        username: register_data.username.to_lowercase(),
        first_name: register_data.first_name,
        last_name: register_data.last_name,
        password_hash,
    };

    let user = UserRepository::new(pool.get_ref().clone())
        .create_user(record)
        .await?;

    Ok(HttpResponse::Created().json(user.into_public()))
}

/// Login user
///
/// Authenticates with form-encoded username + password. On success the
/// access token is returned in the body and also set as an http-only,
/// SameSite=Lax cookie whose max-age equals the token TTL.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    form: web::Form<LoginForm>,
) -> Result<impl Responder, AppError> {
    let username = form.username.to_lowercase();

    let repo = UserRepository::new(pool.get_ref().clone());
    let user = match repo.get_user(&UserLookup::by_username(&username)).await {
        Ok(user) => user,
        // An unknown username reads the same as a wrong password.
        Err(AppError::NotFound(_)) => return Err(AppError::IncorrectCredentials),
        Err(e) => return Err(e),
    };

    if !verify_password(&form.password, &user.password_hash)? {
        return Err(AppError::IncorrectCredentials);
    }

    let token = tokens.issue(user.user_id)?;
    let cookie = Cookie::build("access_token", token.clone())
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(tokens.ttl_seconds()))
        .path("/")
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(AccessToken {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// Get the current user.
#[get("/me")]
pub async fn me(user: CurrentUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(user.0.into_public()))
}

/// List the current user's contributions, newest first.
#[get("/me/contributions")]
pub async fn my_contributions(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let contributions = ContributionRepository::new(pool.get_ref().clone())
        .get_contributions_by_contributor(user.0.user_id)
        .await?;

    let public: Vec<ContributionPublic> = contributions
        .into_iter()
        .map(|c| c.into_public())
        .collect();
    Ok(HttpResponse::Ok().json(public))
}
