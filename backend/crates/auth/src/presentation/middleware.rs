//! Auth Middleware
//!
//! Resolves the `Authorization: Bearer <token>` header into a
//! [`CurrentUser`] stored in the request extensions. Requests without the
//! header pass through anonymously; handlers decide whether identity is
//! required by extracting `CurrentUser` or `Option<CurrentUser>`.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::CredentialService;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Outcome of reading the Authorization header
#[derive(Debug, PartialEq, Eq)]
pub enum BearerToken<'a> {
    Absent,
    Present(&'a str),
    Malformed,
}

/// Extract the bearer token (scheme is case-insensitive)
pub fn bearer_token(headers: &HeaderMap) -> BearerToken<'_> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return BearerToken::Absent;
    };

    let Ok(value) = value.to_str() else {
        return BearerToken::Malformed;
    };

    match value.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            BearerToken::Present(token.trim())
        }
        _ => BearerToken::Malformed,
    }
}

/// Middleware that attaches the caller's identity when a token is sent.
///
/// A token that is present but malformed, forged or expired is rejected
/// with 401 even on routes that allow anonymous access.
pub async fn identify_viewer<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let current = match bearer_token(req.headers()) {
        BearerToken::Absent => None,
        BearerToken::Malformed => return Err(AuthError::Unauthorized),
        BearerToken::Present(token) => {
            let credentials = CredentialService::new(state.repo.clone(), state.config.clone());
            Some(credentials.verify_token(token)?)
        }
    };

    if let Some(current) = current {
        tracing::debug!(user_id = %current.user_id, "Request authenticated");
        req.extensions_mut().insert(current);
    }

    Ok(next.run(req).await)
}
