// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::{
    config::AppState,
    handlers::{
        self,
        records::{self, Page},
    },
    middleware::auth::session_guard,
    models::{
        bpmn::BpmnDocument, instruction::ArchivedInstruction, movement::Movement,
        returned::ReturnedItem, tco::CostOfOwnership, toner::Toner, unit::Unit,
        warranty::Warranty,
    },
};

macro_rules! page {
    ($name:ident, $record:ty, $path:literal, $create:literal) => {
        pub enum $name {}

        impl Page for $name {
            type Record = $record;
            const PATH: &'static str = $path;
            const ALLOWS_CREATE: bool = $create;
        }
    };
}

page!(CadastroToners, Toner, "/cadastro-toners", true);
page!(CadastroUnidades, Unit, "/cadastro-unidades", true);
page!(RegistroRetornados, ReturnedItem, "/registro-retornados", true);
page!(ConsultaToners, Toner, "/consulta-toners", false);
page!(ConsultaUnidades, Unit, "/consulta-unidades", false);
page!(ConsultaRetornados, ReturnedItem, "/consulta-retornados", false);
page!(RegistroMovimentacoes, Movement, "/registro-movimentacoes", true);
page!(RegistroGarantias, Warranty, "/registro-garantias", true);
page!(RegistroBpmns, BpmnDocument, "/registro-bpmns", true);
page!(ArquivamentoIts, ArchivedInstruction, "/arquivamento-its", true);
page!(Tco, CostOfOwnership, "/tco", true);

type Mount = fn(Router<AppState>) -> Router<AppState>;

// As rotas de uma página: lista (e cadastro), edição e exclusão
fn record_routes<P: Page>(router: Router<AppState>) -> Router<AppState> {
    let mut list = get(records::show::<P>);
    if P::ALLOWS_CREATE {
        list = list.post(records::create::<P>);
    }

    router
        .route(P::PATH, list)
        .route(&format!("{}/{{id}}", P::PATH), post(records::save::<P>))
        .route(
            &format!("{}/{{id}}/excluir", P::PATH),
            get(records::confirm_delete::<P>).post(records::delete::<P>),
        )
}

pub fn build_router(app_state: AppState) -> Router {
    let pages: [Mount; 11] = [
        record_routes::<CadastroToners>,
        record_routes::<CadastroUnidades>,
        record_routes::<RegistroRetornados>,
        record_routes::<ConsultaToners>,
        record_routes::<ConsultaUnidades>,
        record_routes::<ConsultaRetornados>,
        record_routes::<RegistroMovimentacoes>,
        record_routes::<RegistroGarantias>,
        record_routes::<RegistroBpmns>,
        record_routes::<ArquivamentoIts>,
        record_routes::<Tco>,
    ];

    // Tudo aqui exige sessão válida
    let protected_routes = pages
        .into_iter()
        .fold(Router::new().route("/", get(handlers::dashboard::home)), |router, mount| mount(router))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", post(handlers::auth::logout))
        .merge(protected_routes)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::format::Formatter,
        db::memory::{InMemoryDataApi, Operation},
        services::auth::{FakeAuth, INVALID_CREDENTIALS_MESSAGE},
        views::layout::MENU_ITEMS,
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use chrono::FixedOffset;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const FORM: &str = "application/x-www-form-urlencoded";

    fn app(api: Arc<InMemoryDataApi>) -> Router {
        let formatter = Formatter::new(FixedOffset::west_opt(3 * 3600).unwrap());
        build_router(AppState::new(api, Arc::new(FakeAuth::admin()), formatter, false))
    }

    fn seeded() -> Arc<InMemoryDataApi> {
        let api = InMemoryDataApi::new();
        api.seed("toners", json!({
            "id": "0b9f3c1e-2a44-4c4f-8d7e-6f5a4b3c2d10", "modelo": "HP 85A",
            "peso_cheio": 720, "peso_vazio": 600, "impressoras_compativeis": "P1102",
            "cor": "Black", "area_impressa_iso": 0.05, "capacidade_folhas": 1600,
            "tipo": "Original", "preco_folha": 0.05, "created_at": "2026-01-01T00:00:00Z"
        }));
        api.seed("retornados", json!({
            "id": "1", "id_cliente": 10, "toner_id": "0b9f3c1e-2a44-4c4f-8d7e-6f5a4b3c2d10",
            "peso_retornado": 650, "unidade_id": "u", "destino_final": "Estoque",
            "created_at": "2026-02-01T13:00:00Z"
        }));
        api.seed("retornados", json!({
            "id": "2", "id_cliente": 20, "toner_id": "0b9f3c1e-2a44-4c4f-8d7e-6f5a4b3c2d10",
            "peso_retornado": 610, "unidade_id": "u", "destino_final": "Descarte",
            "created_at": "2026-02-02T13:00:00Z"
        }));
        Arc::new(api)
    }

    fn get_authed(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, format!("sgq_session={}", FakeAuth::TOKEN))
            .body(Body::empty())
            .unwrap()
    }

    fn post_form(uri: &str, body: &str, authed: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM);
        if authed {
            builder = builder.header(header::COOKIE, format!("sgq_session={}", FakeAuth::TOKEN));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> Option<&str> {
        response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    fn row<'a>(api: &'a [crate::db::Row], id: &str) -> Option<&'a crate::db::Row> {
        api.iter().find(|r| r.get("id") == Some(&Value::from(id)))
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app(seeded())
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn pages_without_session_redirect_to_login() {
        for path in ["/", "/tco", "/consulta-retornados"] {
            let response = app(seeded())
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
            assert_eq!(location(&response), Some("/login"));
        }
    }

    #[tokio::test]
    async fn every_menu_page_renders() {
        for item in MENU_ITEMS {
            let response = app(seeded()).oneshot(get_authed(item.path)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", item.path);
            let html = body_text(response).await;
            assert!(html.contains(&format!("<title>SGQ - {}</title>", item.label)), "{}", item.path);
        }
    }

    #[tokio::test]
    async fn returned_item_in_stock_shows_recovered_value() {
        let response = app(seeded()).oneshot(get_authed("/consulta-retornados")).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains("R$\u{a0}500,00"));
        // linha mais recente primeiro
        assert!(html.find(r#"data-id="2""#).unwrap() < html.find(r#"data-id="1""#).unwrap());
    }

    #[tokio::test]
    async fn save_sends_only_mutable_fields_and_redirects() {
        let api = seeded();
        let response = app(api.clone())
            .oneshot(post_form(
                "/consulta-retornados/1",
                "id_cliente=11&peso_retornado=600&destino_final=Uso+Interno",
                true,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/consulta-retornados"));

        let update = api.writes().into_iter().find(|w| w.operation == Operation::Update).unwrap();
        let mut keys: Vec<_> = update.fields.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["destino_final", "id_cliente", "peso_retornado"]);

        let rows = api.rows("retornados");
        let saved = row(&rows, "1").unwrap();
        assert_eq!(saved.get("destino_final"), Some(&Value::from("Uso Interno")));
        assert_eq!(saved.get("id_cliente"), Some(&Value::from(11)));
    }

    #[tokio::test]
    async fn failed_save_keeps_editing_and_shows_backend_message() {
        let api = seeded();
        api.fail_next(Operation::Update, "constraint violation");

        let response = app(api.clone())
            .oneshot(post_form(
                "/consulta-retornados/1",
                "id_cliente=11&peso_retornado=600&destino_final=Descarte",
                true,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(location(&response).is_none());
        let html = body_text(response).await;
        assert!(html.contains("Erro ao atualizar registro: constraint violation"));
        assert!(html.contains(r#"action="/consulta-retornados/1""#));
        assert!(html.contains(r#"name="id_cliente" value="11""#));

        let rows = api.rows("retornados");
        assert_eq!(row(&rows, "1").unwrap().get("id_cliente"), Some(&Value::from(10)));
    }

    #[tokio::test]
    async fn invalid_numeric_input_is_reported_without_writing() {
        let api = seeded();
        let response = app(api.clone())
            .oneshot(post_form("/consulta-retornados/1", "id_cliente=abc", true))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Valor inválido para o campo &#39;ID Cliente&#39;"));
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn saving_a_missing_row_shows_the_update_banner() {
        let api = seeded();
        let response = app(api.clone())
            .oneshot(post_form(
                "/consulta-unidades/3c2d1e0f-9a8b-4c7d-8e6f-5a4b3c2d1e0f",
                "unidade=Filial",
                true,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(location(&response).is_none());
        let html = body_text(response).await;
        assert!(html.contains("Erro ao atualizar registro: Registro não encontrado."));
        assert!(html.contains("<title>SGQ - Consulta de Unidades</title>"));
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn options_are_queried_only_when_the_form_is_drawn() {
        let api = seeded();
        app(api.clone()).oneshot(get_authed("/registro-retornados")).await.unwrap();
        assert_eq!(api.selected_tables(), ["retornados", "toners", "unidades"]);

        let api = seeded();
        let response = app(api.clone())
            .oneshot(post_form("/registro-retornados/1", "id_cliente=12", true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(api.selected_tables().iter().all(|t| t == "retornados"));

        let api = seeded();
        let response = app(api.clone())
            .oneshot(post_form("/registro-retornados/2/excluir", "confirmar=sim", true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(api.selected_tables().iter().all(|t| t == "retornados"));
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let api = seeded();

        let response = app(api.clone())
            .oneshot(get_authed("/consulta-retornados/1/excluir"))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Tem certeza que deseja excluir este registro?"));

        let response = app(api.clone())
            .oneshot(post_form("/consulta-retornados/1/excluir", "", true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(api.rows("retornados").len(), 2);

        let response = app(api.clone())
            .oneshot(post_form("/consulta-retornados/1/excluir", "confirmar=sim", true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let rows = api.rows("retornados");
        assert_eq!(rows.len(), 1);
        assert!(row(&rows, "2").is_some());
    }

    #[tokio::test]
    async fn failed_delete_keeps_row_visible() {
        let api = seeded();
        api.fail_next(Operation::Delete, "foreign key violation");

        let response = app(api.clone())
            .oneshot(post_form("/consulta-retornados/1/excluir", "confirmar=sim", true))
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("Erro ao excluir registro: foreign key violation"));
        assert!(html.contains(r#"data-id="1""#));
    }

    #[tokio::test]
    async fn create_inserts_and_redirects() {
        let api = seeded();
        let response = app(api.clone())
            .oneshot(post_form("/cadastro-unidades", "unidade=Matriz", true))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/cadastro-unidades"));
        assert_eq!(api.rows("unidades")[0].get("unidade"), Some(&Value::from("Matriz")));
    }

    #[tokio::test]
    async fn query_pages_have_no_create_route() {
        let response = app(seeded())
            .oneshot(post_form("/consulta-toners", "modelo=X", true))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn wrong_login_stays_on_form_with_fixed_message() {
        let response = app(seeded())
            .oneshot(post_form("/login", "email=admin%40admin&password=errada", false))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(location(&response).is_none());
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(body_text(response).await.contains(INVALID_CREDENTIALS_MESSAGE));
    }

    #[tokio::test]
    async fn right_login_sets_cookie_and_goes_home() {
        let response = app(seeded())
            .oneshot(post_form("/login", "email=admin%40admin&password=admin", false))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/"));
        let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with(&format!("sgq_session={}", FakeAuth::TOKEN)));
        assert!(cookie.contains("HttpOnly"));
        // a sessão falsa vale um dia
        let max_age: i64 = cookie
            .split("; ")
            .find_map(|attr| attr.strip_prefix("Max-Age="))
            .unwrap()
            .parse()
            .unwrap();
        assert!(max_age > 86_400 - 60 && max_age <= 86_400);
    }

    #[tokio::test]
    async fn login_page_skips_form_when_already_signed_in() {
        let response = app(seeded()).oneshot(get_authed("/login")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/"));
    }

    #[tokio::test]
    async fn dashboard_summarises_returns() {
        let response = app(seeded()).oneshot(get_authed("/")).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains("<title>SGQ - Dashboard</title>"));
        assert!(html.contains("R$\u{a0}500,00"));
    }
}
