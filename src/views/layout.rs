// src/views/layout.rs

use super::html::{escape, icon};

/// Item do menu lateral. A mesma lista alimenta os links e o título do cabeçalho.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const fn item(path: &'static str, label: &'static str, icon: &'static str) -> MenuItem {
    MenuItem { path, label, icon }
}

pub const MENU_ITEMS: &[MenuItem] = &[
    item("/cadastro-toners", "Cadastro de Toners", "database"),
    item("/cadastro-unidades", "Cadastro de Unidades", "box"),
    item("/registro-retornados", "Registro de Retornados", "box"),
    item("/consulta-toners", "Consulta de Toners", "database"),
    item("/consulta-unidades", "Consulta de Unidades", "box"),
    item("/consulta-retornados", "Consulta de Retornados", "box"),
    item("/registro-movimentacoes", "Registro de Movimentações", "truck"),
    item("/registro-garantias", "Registro de Garantias", "shield"),
    item("/registro-bpmns", "Registro de BPMNs", "file-text"),
    item("/arquivamento-its", "Arquivamento de ITs", "file-text"),
    item("/tco", "TCO", "file-spreadsheet"),
];

pub const FALLBACK_TITLE: &str = "Dashboard";

pub fn title_for(path: &str) -> &'static str {
    MENU_ITEMS
        .iter()
        .find(|item| item.path == path)
        .map(|item| item.label)
        .unwrap_or(FALLBACK_TITLE)
}

fn menu(current_path: &str) -> String {
    MENU_ITEMS
        .iter()
        .map(|item| {
            let class = if item.path == current_path {
                "bg-[#2c3e50] text-white"
            } else {
                "text-gray-300 hover:bg-[#2c3e50] hover:text-white"
            };
            format!(
                r#"<a href="{path}" class="flex items-center px-4 py-2 text-sm rounded-md {class}">{icon}<span>{label}</span></a>"#,
                path = item.path,
                class = class,
                icon = icon(item.icon, "mr-3 h-5 w-5"),
                label = escape(item.label),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// Desabilita o botão de envio enquanto a requisição está em andamento.
const SUBMIT_GUARD: &str = r#"<script>
document.addEventListener('submit', function (event) {
  event.target.querySelectorAll('button[type=submit]').forEach(function (button) {
    button.disabled = true;
  });
  document.querySelectorAll('button[type=submit][form="' + event.target.id + '"]').forEach(function (button) {
    button.disabled = true;
  });
});
lucide.createIcons();
</script>"#;

/// Documento HTML completo, sem o menu (tela de login).
pub fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="https://cdn.tailwindcss.com"></script>
<script src="https://unpkg.com/lucide@latest"></script>
</head>
<body class="bg-gray-100">
{body}
{guard}
</body>
</html>"#,
        title = escape(title),
        body = body,
        guard = SUBMIT_GUARD,
    )
}

/// Moldura das páginas autenticadas: menu lateral, cabeçalho e conteúdo.
pub fn shell(current_path: &str, user_email: &str, content: &str) -> String {
    let title = title_for(current_path);
    let body = format!(
        r#"<div class="flex h-screen">
  <aside class="w-64 bg-[#3f4c6b] flex flex-col">
    <a href="/" class="h-16 flex items-center px-4 text-white text-xl font-bold">SGQ</a>
    <nav class="flex-1 px-2 space-y-1 overflow-y-auto">
{menu}
    </nav>
    <form method="post" action="/logout" class="p-4">
      <button type="submit" class="flex items-center w-full px-4 py-2 text-sm text-gray-300 rounded-md hover:bg-[#2c3e50] hover:text-white">{logout_icon}Sair</button>
    </form>
  </aside>
  <div class="flex-1 flex flex-col overflow-hidden">
    <header class="bg-white shadow h-16 flex items-center justify-between px-6">
      <h1 class="text-2xl font-semibold text-gray-900">{title}</h1>
      <span class="text-sm text-gray-500">{email}</span>
    </header>
    <main class="flex-1 overflow-auto p-6">
{content}
    </main>
  </div>
</div>"#,
        menu = menu(current_path),
        logout_icon = icon("log-out", "mr-3 h-5 w-5"),
        title = escape(title),
        email = escape(user_email),
        content = content,
    );
    document(&format!("SGQ - {}", title), &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_lookup_falls_back_to_dashboard() {
        assert_eq!(title_for("/tco"), "TCO");
        assert_eq!(title_for("/consulta-retornados"), "Consulta de Retornados");
        assert_eq!(title_for("/"), "Dashboard");
        assert_eq!(title_for("/nao-existe"), "Dashboard");
    }

    #[test]
    fn menu_has_eleven_unique_paths() {
        assert_eq!(MENU_ITEMS.len(), 11);
        let mut paths: Vec<_> = MENU_ITEMS.iter().map(|i| i.path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 11);
    }

    #[test]
    fn shell_highlights_current_entry() {
        let html = shell("/tco", "admin@admin", "<p>conteúdo</p>");
        assert!(html.contains(r#"<a href="/tco" class="flex items-center px-4 py-2 text-sm rounded-md bg-[#2c3e50] text-white">"#));
        assert!(html.contains("<title>SGQ - TCO</title>"));
        assert!(html.contains(r#"action="/logout""#));
        assert!(html.contains("<p>conteúdo</p>"));
    }
}
