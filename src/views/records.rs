// src/views/records.rs

use std::collections::HashMap;

use serde_json::Value;

use super::{
    columns::Tabular,
    html::{error_banner, escape, icon},
};
use crate::{
    common::format::Formatter,
    models::{record::to_row, Field, FieldKind},
    services::record_page::{SelectOption, DELETE_CONFIRMATION, LOAD_ERROR},
    services::RecordPage,
};

const EDIT_FORM_ID: &str = "edit-form";

const INPUT_CLASS: &str =
    "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-[#3f4c6b]";

/// O que a tela de registros precisa saber além do estado da página.
pub struct RecordView<'a, R: Tabular> {
    pub path: &'a str,
    pub allows_create: bool,
    pub page: &'a RecordPage<R>,
    pub formatter: &'a Formatter,
    /// Valores digitados no cadastro, reapresentados quando ele falha.
    pub draft: Option<&'a HashMap<String, String>>,
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn input(field: &Field, value: &str, options: &[SelectOption], form: Option<&str>) -> String {
    let form_attr = form.map(|id| format!(r#" form="{}""#, id)).unwrap_or_default();
    let name = escape(field.name);

    match field.kind {
        FieldKind::Text => format!(
            r#"<input type="text" name="{name}" value="{value}" class="{INPUT_CLASS}"{form_attr}>"#,
            value = escape(value),
        ),
        FieldKind::Integer => format!(
            r#"<input type="number" step="1" name="{name}" value="{value}" class="{INPUT_CLASS}"{form_attr}>"#,
            value = escape(value),
        ),
        FieldKind::Decimal => format!(
            r#"<input type="text" inputmode="decimal" name="{name}" value="{value}" class="{INPUT_CLASS}"{form_attr}>"#,
            value = escape(value),
        ),
        FieldKind::Choice(choices) => {
            let opts: String = choices
                .iter()
                .map(|choice| {
                    let selected = if *choice == value { " selected" } else { "" };
                    format!(r#"<option value="{0}"{1}>{0}</option>"#, escape(choice), selected)
                })
                .collect();
            format!(r#"<select name="{name}" class="{INPUT_CLASS}"{form_attr}>{opts}</select>"#)
        }
        FieldKind::Reference(_) => {
            let opts: String = options
                .iter()
                .map(|opt| {
                    let selected = if opt.value == value { " selected" } else { "" };
                    format!(
                        r#"<option value="{}"{}>{}</option>"#,
                        escape(&opt.value),
                        selected,
                        escape(&opt.label)
                    )
                })
                .collect();
            format!(
                r#"<select name="{name}" class="{INPUT_CLASS}"{form_attr}><option value="">Selecione...</option>{opts}</select>"#
            )
        }
    }
}

fn create_form<R: Tabular>(view: &RecordView<'_, R>) -> String {
    let inputs: String = R::NEW_FIELDS
        .iter()
        .map(|field| {
            let value = view
                .draft
                .and_then(|draft| draft.get(field.name))
                .map(String::as_str)
                .unwrap_or("");
            format!(
                r#"<div><label class="block text-sm font-medium text-gray-700 mb-1">{}</label>{}</div>"#,
                escape(field.label),
                input(field, value, view.page.options(field.name), None)
            )
        })
        .collect();

    format!(
        r#"<form method="post" action="{path}" class="bg-white rounded-lg shadow p-6 mb-6">
  <div class="grid grid-cols-1 md:grid-cols-3 gap-4">{inputs}</div>
  <button type="submit" class="mt-4 px-4 py-2 bg-[#3f4c6b] text-white rounded-md hover:bg-[#2c3e50] disabled:opacity-50">Cadastrar</button>
</form>"#,
        path = escape(view.path),
        inputs = inputs,
    )
}

fn table<R: Tabular>(view: &RecordView<'_, R>) -> String {
    let columns = R::columns();
    let path = escape(view.path);
    let editing_id = view.page.editing_id();
    let buffer = view.page.edit_buffer();
    let buffer_row = buffer.and_then(|b| to_row(b).ok()).unwrap_or_default();

    let header: String = columns
        .iter()
        .map(|c| {
            format!(
                r#"<th class="px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase">{}</th>"#,
                escape(c.title)
            )
        })
        .collect();

    let mut body = String::new();
    for row in view.page.rows() {
        let id = escape(row.id());
        let editing = editing_id == Some(row.id());
        let row_buffer = if editing { buffer } else { None };

        let cells: String = columns
            .iter()
            .map(|column| {
                let field = column.field.filter(|_| editing).and_then(R::edit_field);
                let content = match field {
                    Some(field) => input(
                        field,
                        &value_text(buffer_row.get(field.name)),
                        view.page.options(field.name),
                        Some(EDIT_FORM_ID),
                    ),
                    None => escape(&(column.render)(row, row_buffer, view.formatter)),
                };
                format!(r#"<td class="px-4 py-3 text-sm text-gray-700 whitespace-nowrap">{}</td>"#, content)
            })
            .collect();

        let actions = if editing {
            format!(
                r#"<button type="submit" form="{EDIT_FORM_ID}" title="Salvar" class="text-green-600 hover:text-green-800 disabled:opacity-50">{}</button>
<a href="{path}" title="Cancelar" class="text-gray-600 hover:text-gray-800">{}</a>"#,
                icon("check", "h-5 w-5"),
                icon("x", "h-5 w-5"),
            )
        } else {
            format!(
                r#"<a href="{path}?editar={id}" title="Editar" class="text-blue-600 hover:text-blue-800">{}</a>
<a href="{path}/{id}/excluir" title="Excluir" class="text-red-600 hover:text-red-800">{}</a>"#,
                icon("pencil", "h-5 w-5"),
                icon("trash-2", "h-5 w-5"),
            )
        };

        body.push_str(&format!(
            r#"<tr class="hover:bg-gray-50" data-id="{id}">{cells}<td class="px-4 py-3"><div class="flex space-x-2">{actions}</div></td></tr>
"#
        ));
    }

    // lista vazia por falha de carga não é "nenhum registro": o banner já avisa
    if view.page.rows().is_empty() && view.page.error() != Some(LOAD_ERROR) {
        body = format!(
            r#"<tr><td colspan="{}" class="px-4 py-6 text-center text-sm text-gray-500">Nenhum registro encontrado.</td></tr>"#,
            columns.len() + 1
        );
    }

    let edit_form = match editing_id {
        Some(id) => format!(
            r#"<form id="{EDIT_FORM_ID}" method="post" action="{path}/{}"></form>"#,
            escape(id)
        ),
        None => String::new(),
    };

    format!(
        r#"{edit_form}<div class="bg-white rounded-lg shadow overflow-x-auto">
<table class="min-w-full divide-y divide-gray-200">
<thead class="bg-gray-50"><tr>{header}<th class="px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase">Ações</th></tr></thead>
<tbody class="divide-y divide-gray-200">
{body}</tbody>
</table>
</div>"#
    )
}

/// Conteúdo de uma página de registros: banner de erro, cadastro e tabela.
pub fn render<R: Tabular>(view: &RecordView<'_, R>) -> String {
    let form = if view.allows_create { create_form(view) } else { String::new() };
    format!("{}{}{}", error_banner(view.page.error()), form, table(view))
}

/// Pergunta de confirmação antes da exclusão.
pub fn confirm_delete(path: &str, id: &str) -> String {
    format!(
        r#"<div class="bg-white rounded-lg shadow p-6 max-w-lg">
  <p class="text-gray-800 mb-6">{message}</p>
  <form method="post" action="{path}/{id}/excluir" class="flex space-x-3">
    <input type="hidden" name="confirmar" value="sim">
    <button type="submit" class="px-4 py-2 bg-red-600 text-white rounded-md hover:bg-red-700 disabled:opacity-50">Excluir</button>
    <a href="{path}" class="px-4 py-2 bg-gray-200 text-gray-800 rounded-md hover:bg-gray-300">Cancelar</a>
  </form>
</div>"#,
        message = escape(DELETE_CONFIRMATION),
        path = escape(path),
        id = escape(id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::InMemoryDataApi,
        models::{returned::ReturnedItem, unit::Unit},
    };
    use chrono::FixedOffset;
    use serde_json::json;
    use std::sync::Arc;

    fn fmt() -> Formatter {
        Formatter::new(FixedOffset::west_opt(3 * 3600).unwrap())
    }

    fn api() -> InMemoryDataApi {
        let api = InMemoryDataApi::new();
        api.seed("toners", json!({
            "id": "7f1c7a57-4d61-4a3e-9d55-0f5f0a3c1b11", "modelo": "HP <85A>",
            "peso_cheio": 720, "peso_vazio": 600, "impressoras_compativeis": "P1102",
            "cor": "Black", "area_impressa_iso": 0.05, "capacidade_folhas": 1600,
            "tipo": "Original", "preco_folha": 0.05, "created_at": "2026-01-01T00:00:00Z"
        }));
        api.seed("retornados", json!({
            "id": "1", "id_cliente": 10, "toner_id": "7f1c7a57-4d61-4a3e-9d55-0f5f0a3c1b11",
            "peso_retornado": 650, "unidade_id": "u", "destino_final": "Estoque",
            "created_at": "2026-02-01T13:00:00Z"
        }));
        api
    }

    #[tokio::test]
    async fn lists_rows_with_actions_and_escaped_text() {
        let mut page = RecordPage::<ReturnedItem>::new(Arc::new(api()));
        page.load().await;

        let html = render(&RecordView {
            path: "/consulta-retornados",
            allows_create: false,
            page: &page,
            formatter: &fmt(),
            draft: None,
        });

        assert!(html.contains("HP &lt;85A&gt;"));
        assert!(html.contains("R$\u{a0}500,00"));
        assert!(html.contains(r#"href="/consulta-retornados?editar=1""#));
        assert!(html.contains(r#"href="/consulta-retornados/1/excluir""#));
        assert!(!html.contains("Cadastrar"));
        assert!(!html.contains(EDIT_FORM_ID));
    }

    #[tokio::test]
    async fn editing_row_turns_editable_cells_into_inputs() {
        let mut page = RecordPage::<ReturnedItem>::new(Arc::new(api()));
        page.load().await;
        page.start_edit("1");

        let html = render(&RecordView {
            path: "/consulta-retornados",
            allows_create: false,
            page: &page,
            formatter: &fmt(),
            draft: None,
        });

        assert!(html.contains(r#"<form id="edit-form" method="post" action="/consulta-retornados/1"></form>"#));
        assert!(html.contains(r#"name="id_cliente" value="10""#));
        assert!(html.contains(r#"<option value="Estoque" selected>Estoque</option>"#));
        assert!(html.contains(r#"title="Cancelar""#));
    }

    #[tokio::test]
    async fn create_form_lists_reference_options() {
        let mut page = RecordPage::<ReturnedItem>::new(Arc::new(api()));
        page.load_options().await;

        let html = render(&RecordView {
            path: "/registro-retornados",
            allows_create: true,
            page: &page,
            formatter: &fmt(),
            draft: None,
        });

        assert!(html.contains(r#"<form method="post" action="/registro-retornados""#));
        assert!(html.contains(r#"<option value="7f1c7a57-4d61-4a3e-9d55-0f5f0a3c1b11">HP &lt;85A&gt;</option>"#));
        assert!(html.contains("Nenhum registro encontrado."));
    }

    #[tokio::test]
    async fn failed_load_shows_banner_without_empty_state() {
        let api = api();
        api.fail_next(crate::db::memory::Operation::Select, "timeout");
        let mut page = RecordPage::<ReturnedItem>::new(Arc::new(api));
        assert!(!page.load().await);

        let html = render(&RecordView {
            path: "/consulta-retornados",
            allows_create: false,
            page: &page,
            formatter: &fmt(),
            draft: None,
        });

        assert!(html.contains(LOAD_ERROR));
        assert!(!html.contains("Nenhum registro encontrado."));
    }

    #[tokio::test]
    async fn draft_values_are_shown_again() {
        let page = RecordPage::<Unit>::new(Arc::new(InMemoryDataApi::new()));
        let draft = HashMap::from([("unidade".to_string(), "Filial \"Sul\"".to_string())]);

        let html = render(&RecordView {
            path: "/cadastro-unidades",
            allows_create: true,
            page: &page,
            formatter: &fmt(),
            draft: Some(&draft),
        });

        assert!(html.contains(r#"value="Filial &quot;Sul&quot;""#));
    }

    #[test]
    fn confirmation_posts_explicit_answer() {
        let html = confirm_delete("/tco", "abc");
        assert!(html.contains(DELETE_CONFIRMATION));
        assert!(html.contains(r#"action="/tco/abc/excluir""#));
        assert!(html.contains(r#"name="confirmar" value="sim""#));
    }
}
