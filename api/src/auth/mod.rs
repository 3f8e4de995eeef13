pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use util::config;

/// Subject used in admin tokens. Admins have no row in `users`.
pub const ADMIN_SUBJECT: i64 = 0;

/// Name of the request header carrying the JWT.
pub const TOKEN_HEADER: &str = "token";

/// Generates a JWT and its expiry timestamp for a given user.
pub fn generate_jwt(user_id: i64, admin: bool) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let minutes = i64::try_from(config::jwt_duration_minutes()).unwrap_or(i64::MAX / 60);
    let expiry = Utc::now() + Duration::minutes(minutes);

    let claims = Claims {
        sub: user_id,
        admin,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )?;

    Ok((token, expiry.to_rfc3339()))
}

/// Verifies signature and expiry and returns the claims.
pub fn decode_jwt(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}
