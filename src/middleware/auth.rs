use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;

use crate::utils::session::{Claims, verify_token};

/// Decodes the session cookie into an `Option<Claims>` and stores it in the
/// request extensions. Never rejects: handlers decide whether a missing
/// identity is an error for their operation.
pub async fn identity(cookie_jar: CookieJar, mut req: Request, next: Next) -> Response {
    let claims: Option<Claims> = cookie_jar
        .get("token")
        .and_then(|cookie| verify_token(cookie.value()).ok());

    req.extensions_mut().insert(claims);

    next.run(req).await
}
