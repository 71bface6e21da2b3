// src/handlers/auth.rs

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{clear_session_cookie, session_cookie, SESSION_COOKIE},
    models::auth::LoginPayload,
    services::AuthGate,
    views::login,
};

// GET /login: quem já tem sessão vai direto para a página inicial
pub async fn login_page(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    match AuthGate::new().check(app_state.auth.as_ref(), token.as_deref()).await {
        AuthGate::Authenticated(_) => Redirect::to("/").into_response(),
        _ => Html(login::render("", None)).into_response(),
    }
}

// POST /login
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginPayload>,
) -> Response {
    if let Err(e) = payload.validate() {
        let message = AppError::ValidationError(e).user_message();
        return Html(login::render(&payload.email, Some(&message))).into_response();
    }

    let gate = AuthGate::new()
        .submit(app_state.auth.as_ref(), &payload.email, &payload.password)
        .await;

    match gate {
        AuthGate::Authenticated(session) => {
            let jar = jar.add(session_cookie(&session, app_state.secure_cookies));
            (jar, Redirect::to("/")).into_response()
        }
        AuthGate::Unauthenticated { error } => {
            Html(login::render(&payload.email, error.as_deref())).into_response()
        }
        AuthGate::Checking => Html(login::render(&payload.email, None)).into_response(),
    }
}

// POST /logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (clear_session_cookie(jar), Redirect::to("/login"))
}
