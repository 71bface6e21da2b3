// src/handlers/records.rs

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::{
    config::AppState,
    middleware::auth::CurrentSession,
    models::{auth::Session, Record},
    services::RecordPage,
    views::{
        layout,
        records::{self, RecordView},
        Tabular,
    },
};

/// Uma página de registros montada no roteador: caminho, entidade e se tem cadastro.
pub trait Page: Send + Sync + 'static {
    type Record: Tabular;
    const PATH: &'static str;
    const ALLOWS_CREATE: bool;
}

#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub editar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub confirmar: Option<String>,
}

// Estado inicial de toda requisição: a lista carregada.
async fn prepare<P: Page>(state: &AppState) -> RecordPage<P::Record> {
    let mut page = RecordPage::new(state.data_api.clone());
    page.load().await;
    page
}

// As opções só servem ao formulário de cadastro, que só aparece quando a página é desenhada.
async fn render_page<P: Page>(
    state: &AppState,
    session: &Session,
    page: &mut RecordPage<P::Record>,
    draft: Option<&HashMap<String, String>>,
) -> Response {
    if P::ALLOWS_CREATE {
        page.load_options().await;
    }
    render::<P>(state, session, page, draft)
}

fn render<P: Page>(
    state: &AppState,
    session: &Session,
    page: &RecordPage<P::Record>,
    draft: Option<&HashMap<String, String>>,
) -> Response {
    let content = records::render(&RecordView {
        path: P::PATH,
        allows_create: P::ALLOWS_CREATE,
        page,
        formatter: &state.formatter,
        draft,
    });
    Html(layout::shell(P::PATH, &session.email, &content)).into_response()
}

// GET /{page}[?editar={id}]
pub async fn show<P: Page>(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<EditQuery>,
) -> Response {
    let mut page = prepare::<P>(&app_state).await;
    if let Some(id) = query.editar.as_deref() {
        page.start_edit(id);
    }
    render_page::<P>(&app_state, &session, &mut page, None).await
}

// POST /{page}
pub async fn create<P: Page>(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Form(raw): Form<HashMap<String, String>>,
) -> Response {
    let mut page = prepare::<P>(&app_state).await;
    match page.create(&raw).await {
        Ok(()) => Redirect::to(P::PATH).into_response(),
        Err(_) => render_page::<P>(&app_state, &session, &mut page, Some(&raw)).await,
    }
}

// POST /{page}/{id}: abre a edição, aplica os campos enviados e salva.
pub async fn save<P: Page>(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Form(raw): Form<HashMap<String, String>>,
) -> Response {
    let mut page = prepare::<P>(&app_state).await;

    if !page.start_edit(&id) {
        // com a lista fora do ar, o banner de carga já explica
        if page.error().is_none() {
            page.report_missing();
        }
        return render_page::<P>(&app_state, &session, &mut page, None).await;
    }

    for field in <P::Record as Record>::EDIT_FIELDS {
        let Some(value) = raw.get(field.name) else { continue };
        if page.change_field(field.name, value).is_err() {
            return render_page::<P>(&app_state, &session, &mut page, None).await;
        }
    }

    match page.save_edit().await {
        Ok(()) => Redirect::to(P::PATH).into_response(),
        Err(_) => render_page::<P>(&app_state, &session, &mut page, None).await,
    }
}

// GET /{page}/{id}/excluir
pub async fn confirm_delete<P: Page>(
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Html<String> {
    Html(layout::shell(P::PATH, &session.email, &records::confirm_delete(P::PATH, &id)))
}

// POST /{page}/{id}/excluir
pub async fn delete<P: Page>(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let confirmed = form.confirmar.as_deref() == Some("sim");
    let mut page = prepare::<P>(&app_state).await;

    match page.remove(&id, |_| confirmed).await {
        Ok(_) => Redirect::to(P::PATH).into_response(),
        Err(_) => render_page::<P>(&app_state, &session, &mut page, None).await,
    }
}
