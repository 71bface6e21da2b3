// src/views/dashboard.rs

use super::{
    html::{error_banner, escape, icon},
    layout::MENU_ITEMS,
};
use crate::{common::format::Formatter, services::dashboard_service::ReturnsSummary};

fn card(label: &str, value: &str) -> String {
    format!(
        r#"<div class="bg-white rounded-lg shadow p-5">
  <p class="text-sm text-gray-500">{}</p>
  <p class="text-2xl font-semibold text-gray-900">{}</p>
</div>"#,
        escape(label),
        escape(value)
    )
}

/// Página inicial: resumo dos retornados e atalhos para as páginas.
pub fn render(summary: Option<&ReturnsSummary>, error: Option<&str>, fmt: &Formatter) -> String {
    let cards = match summary {
        Some(summary) => {
            let mut cards = vec![
                card("Retornados", &summary.total.to_string()),
                card("Valor Recuperado", &fmt.currency(summary.recovered_value)),
            ];
            cards.extend(
                summary
                    .by_destination
                    .iter()
                    .map(|(destination, count)| card(destination.as_ref(), &count.to_string())),
            );
            cards.concat()
        }
        None => String::new(),
    };

    let shortcuts: String = MENU_ITEMS
        .iter()
        .map(|item| {
            format!(
                r#"<a href="{}" class="flex items-center p-4 bg-white rounded-lg shadow hover:bg-gray-50">{}<span>{}</span></a>"#,
                item.path,
                icon(item.icon, "mr-3 h-5 w-5 text-[#3f4c6b]"),
                escape(item.label)
            )
        })
        .collect();

    format!(
        r#"{banner}<div class="grid grid-cols-2 md:grid-cols-3 gap-4 mb-8">{cards}</div>
<div class="grid grid-cols-1 md:grid-cols-3 gap-4">{shortcuts}</div>"#,
        banner = error_banner(error),
    )
}
