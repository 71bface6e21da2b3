// src/views/html.rs

/// Escapa texto para uso em conteúdo e atributos HTML.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(
            r#"<div class="mb-4 p-4 text-red-700 bg-red-100 rounded-lg" role="alert">{}</div>"#,
            escape(message)
        ),
        None => String::new(),
    }
}

pub fn icon(name: &str, class: &str) -> String {
    format!(r#"<i data-lucide="{}" class="{}"></i>"#, escape(name), escape(class))
}
