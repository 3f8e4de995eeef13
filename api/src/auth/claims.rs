use serde::{Deserialize, Serialize};

/// JWT payload. `sub` is the user id, or `0` for the configured admin.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
