// src/views/login.rs

use super::{
    html::{error_banner, escape},
    layout::document,
};

const INPUT_CLASS: &str =
    "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-[#3f4c6b]";

/// Tela de login. O e-mail digitado volta preenchido quando a tentativa falha.
pub fn render(email: &str, error: Option<&str>) -> String {
    let body = format!(
        r#"<div class="min-h-screen flex items-center justify-center">
  <div class="w-full max-w-md bg-white rounded-lg shadow p-8">
    <h1 class="text-2xl font-bold text-center text-[#3f4c6b] mb-6">SGQ - Login</h1>
    {banner}
    <form method="post" action="/login" class="space-y-4">
      <div>
        <label for="email" class="block text-sm font-medium text-gray-700 mb-1">E-mail</label>
        <input id="email" type="email" name="email" value="{email}" required class="{INPUT_CLASS}">
      </div>
      <div>
        <label for="password" class="block text-sm font-medium text-gray-700 mb-1">Senha</label>
        <input id="password" type="password" name="password" required class="{INPUT_CLASS}">
      </div>
      <button type="submit" class="w-full px-4 py-2 bg-[#3f4c6b] text-white rounded-md hover:bg-[#2c3e50] disabled:opacity-50">Entrar</button>
    </form>
  </div>
</div>"#,
        banner = error_banner(error),
        email = escape(email),
    );
    document("SGQ - Login", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_keeps_email_and_shows_error() {
        let html = render("admin@admin", Some("Credenciais inválidas."));
        assert!(html.contains(r#"value="admin@admin""#));
        assert!(html.contains("Credenciais inválidas."));
        assert!(html.contains(r#"action="/login""#));
    }

    #[test]
    fn login_form_without_error_has_no_banner() {
        let html = render("", None);
        assert!(!html.contains(r#"role="alert""#));
    }
}
