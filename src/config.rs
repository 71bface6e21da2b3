// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::FixedOffset;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::format::Formatter,
    db::{DataApi, PgDataApi, UserRepository},
    services::{AuthApi, AuthService},
};

/// Configuração lida do ambiente (`.env` incluso).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub admin_email: String,
    pub admin_password: String,
    pub utc_offset_hours: i32,
    pub session_days: i64,
    pub secure_cookies: bool,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: var_or("SGQ_BIND_ADDR", "0.0.0.0:3000"),
            admin_email: var_or("SGQ_ADMIN_EMAIL", "admin@admin"),
            admin_password: var_or("SGQ_ADMIN_PASSWORD", "admin"),
            utc_offset_hours: var_or("SGQ_UTC_OFFSET_HOURS", "-3")
                .parse()
                .context("SGQ_UTC_OFFSET_HOURS deve ser um número inteiro")?,
            session_days: var_or("SGQ_SESSION_DAYS", "7")
                .parse()
                .context("SGQ_SESSION_DAYS deve ser um número inteiro")?,
            secure_cookies: var_or("SGQ_SECURE_COOKIES", "false") == "true",
        })
    }

    pub fn formatter(&self) -> anyhow::Result<Formatter> {
        let offset = FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .context("SGQ_UTC_OFFSET_HOURS fora do intervalo")?;
        Ok(Formatter::new(offset))
    }
}

// O estado compartilhado, acessível em todos os handlers.
// Os clientes de dados e de autenticação são injetados, nunca globais.
#[derive(Clone)]
pub struct AppState {
    pub data_api: Arc<dyn DataApi>,
    pub auth: Arc<dyn AuthApi>,
    pub formatter: Formatter,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(
        data_api: Arc<dyn DataApi>,
        auth: Arc<dyn AuthApi>,
        formatter: Formatter,
        secure_cookies: bool,
    ) -> Self {
        Self { data_api, auth, formatter, secure_cookies }
    }

    /// Conecta ao banco com as mesmas opções de pool em todo ambiente.
    pub async fn connect_pool(config: &Config) -> anyhow::Result<PgPool> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?; // <-- Se falhar, retorna um Err em vez de dar panic

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(db_pool)
    }

    /// Monta o gráfico de dependências sobre um pool já migrado.
    pub async fn from_pool(config: &Config, db_pool: PgPool) -> anyhow::Result<Self> {
        let auth_service = AuthService::new(
            UserRepository::new(db_pool.clone()),
            config.jwt_secret.clone(),
            config.session_days,
        );
        auth_service
            .ensure_user(&config.admin_email, &config.admin_password)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao garantir o usuário padrão: {}", e))?;

        Ok(Self::new(
            Arc::new(PgDataApi::new(db_pool)),
            Arc::new(auth_service),
            config.formatter()?,
            config.secure_cookies,
        ))
    }
}
