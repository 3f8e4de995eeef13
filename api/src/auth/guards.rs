use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

type GuardRejection = (StatusCode, Json<ApiResponse<()>>);

/// Extracts the caller and stores it in the request extensions for handlers.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), GuardRejection> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|(_, msg)| (StatusCode::UNAUTHORIZED, Json(ApiResponse::error(msg))))?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Any valid token.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (req, _user) = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.0.admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}
