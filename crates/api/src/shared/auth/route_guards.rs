use crate::error::GemschiError;
use actix_web::HttpRequest;
use gemschihub_infra::GemschiContext;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    exp: usize,  // Expiration time (as UTC timestamp)
    sub: String, // Subject (whom token refers to)
}

/// The caller identified by a verified bearer token
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: String,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(token: &str, ctx: &GemschiContext) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(ctx.config.jwt_secret.as_bytes());
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;

    Ok(claims)
}

fn auth_user_req(req: &HttpRequest, ctx: &GemschiContext) -> Option<AuthUser> {
    let token = req.headers().get("authorization")?;
    let token = parse_authtoken_header(token.to_str().ok()?);
    match decode_token(&token, ctx) {
        Ok(claims) if !claims.sub.trim().is_empty() => Some(AuthUser { id: claims.sub }),
        _ => None,
    }
}

/// Any caller with a valid token
pub fn protect_route(req: &HttpRequest, ctx: &GemschiContext) -> Result<AuthUser, GemschiError> {
    auth_user_req(req, ctx).ok_or_else(|| {
        GemschiError::Unauthorized("Unable to find user from credentials".into())
    })
}

/// Only callers on the admin allowlist
pub fn protect_admin_route(
    req: &HttpRequest,
    ctx: &GemschiContext,
) -> Result<AuthUser, GemschiError> {
    let user = protect_route(req, ctx)?;
    if !ctx.config.is_admin(&user.id) {
        return Err(GemschiError::Forbidden(format!(
            "User: {} is not allowed to perform this action",
            user.id
        )));
    }
    Ok(user)
}
