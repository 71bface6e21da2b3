// src/handlers/dashboard.rs

use axum::{extract::State, response::Html};

use crate::{
    config::AppState,
    middleware::auth::CurrentSession,
    services::{record_page::LOAD_ERROR, DashboardService},
    views::{dashboard, layout},
};

// GET /
pub async fn home(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Html<String> {
    let service = DashboardService::new(app_state.data_api.clone());

    let content = match service.returns_summary().await {
        Ok(summary) => dashboard::render(Some(&summary), None, &app_state.formatter),
        Err(e) => {
            tracing::error!("Erro ao montar o resumo dos retornados: {}", e);
            dashboard::render(None, Some(LOAD_ERROR), &app_state.formatter)
        }
    };

    Html(layout::shell("/", &session.email, &content))
}
