use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthenticatedUser, LoginRequest,
        RegisterRequest, RegisterResponse, TOKEN_COOKIE,
    },
    error::AppError,
    services::users,
};
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(1))
        .finish()
}

/// Register a new user
///
/// Creates a new user account and returns its identifier.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Check if email already exists
    if users::email_exists(&pool, &register_data.email).await? {
        return Err(AppError::BadRequest("Email already exist".into()));
    }

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user
    let id = users::create_user(
        &pool,
        &register_data.name,
        &register_data.email,
        &password_hash,
        &register_data.phone,
    )
    .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".into(),
        id,
    }))
}

/// Login user
///
/// Authenticates a user and sets the httpOnly session cookie.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user = users::find_by_email(&pool, &login_data.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if !verify_password(&login_data.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = generate_token(user.id, &user.email, &user.name, &user.phone)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(json!({ "message": "User logged in successfully." })))
}

/// Logout user
///
/// Clears the session cookie.
#[post("/logout")]
pub async fn logout(_user: AuthenticatedUser) -> Result<impl Responder, AppError> {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "User logged out successfully." })))
}

/// Current principal
///
/// Returns the authenticated user decoded from the token, with no store
/// round trip.
#[get("/profile")]
pub async fn profile(user: AuthenticatedUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "user": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "phone": user.phone,
        }
    })))
}
