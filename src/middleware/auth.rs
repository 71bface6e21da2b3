// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::Session,
    services::AuthGate,
};

pub const SESSION_COOKIE: &str = "sgq_session";

// O middleware em si: sem sessão válida, manda para o login.
pub async fn session_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    match AuthGate::new().check(app_state.auth.as_ref(), token.as_deref()).await {
        AuthGate::Authenticated(session) => {
            // Insere a sessão nos "extensions" da requisição
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        _ => Redirect::to("/login").into_response(),
    }
}

// Extrator para obter a sessão diretamente nos handlers
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or(AppError::InvalidToken)
    }
}

// O cookie expira junto com o token.
pub fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    let seconds = (session.expires_at - Utc::now()).num_seconds().max(0);

    Cookie::build((SESSION_COOKIE, session.access_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(seconds))
        .build()
}

pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
