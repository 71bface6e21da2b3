// src/services/auth.rs

use async_trait::async_trait;
use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, Session, User},
};

pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Credenciais inválidas. Use admin@admin / admin para acessar.";

/// Superfície de autenticação consumida pelo gate e pelo middleware.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Sessão correspondente ao token, ou `None` se ausente/expirada.
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AppError>;
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    session_days: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, session_days: i64) -> Self {
        Self { user_repo, jwt_secret, session_days }
    }

    /// Garante que o login compartilhado exista (criado na primeira subida).
    pub async fn ensure_user(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        let password_clone = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo.create_user(email, &password_hash).await?;
        tracing::info!("👤 Usuário {} criado para o login compartilhado.", email);
        Ok(())
    }

    fn create_session(&self, user: &User) -> Result<Session, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(self.session_days);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?;

        Ok(Session {
            access_token,
            user_id: user.id,
            email: user.email.clone(),
            expires_at,
        })
    }

    fn decode_token(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .ok()
    }
}

#[async_trait]
impl AuthApi for AuthService {
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError> {
        let Some(claims) = self.decode_token(access_token) else {
            return Ok(None);
        };

        // O usuário pode ter sido removido depois da emissão do token
        let user = self.user_repo.find_by_id(claims.sub).await?;
        Ok(user.map(|user| Session {
            access_token: access_token.to_string(),
            user_id: user.id,
            email: user.email,
            expires_at: DateTime::from_timestamp(claims.exp as i64, 0).unwrap_or_else(Utc::now),
        }))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_session(&user)
    }
}

/// Gate de autenticação: `Checking` até consultar a sessão existente,
/// depois `Authenticated` ou `Unauthenticated` (com a mensagem do último erro).
#[derive(Debug, Clone, PartialEq)]
pub enum AuthGate {
    Checking,
    Authenticated(Session),
    Unauthenticated { error: Option<String> },
}

impl AuthGate {
    pub fn new() -> Self {
        AuthGate::Checking
    }

    pub async fn check(self, auth: &dyn AuthApi, token: Option<&str>) -> Self {
        if let AuthGate::Authenticated(_) = self {
            return self;
        }

        let session = match token {
            Some(token) => auth.get_session(token).await.unwrap_or_else(|e| {
                tracing::warn!("Falha ao consultar a sessão: {}", e);
                None
            }),
            None => None,
        };

        match session {
            Some(session) => AuthGate::Authenticated(session),
            None => AuthGate::Unauthenticated { error: None },
        }
    }

    /// Qualquer falha volta para `Unauthenticated` com a mensagem fixa;
    /// o formulário continua disponível indefinidamente.
    pub async fn submit(self, auth: &dyn AuthApi, email: &str, password: &str) -> Self {
        if let AuthGate::Authenticated(_) = self {
            return self;
        }

        match auth.sign_in_with_password(email, password).await {
            Ok(session) => {
                tracing::info!("🔓 Login de {}", session.email);
                AuthGate::Authenticated(session)
            }
            Err(e) => {
                tracing::warn!("Tentativa de login recusada para {}: {}", email, e);
                AuthGate::Unauthenticated {
                    error: Some(INVALID_CREDENTIALS_MESSAGE.to_string()),
                }
            }
        }
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}

/// `AuthApi` de testes com um único par de credenciais.
#[cfg(test)]
pub struct FakeAuth {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
impl FakeAuth {
    pub const TOKEN: &'static str = "token-valido";

    pub fn admin() -> Self {
        Self { email: "admin@admin".into(), password: "admin".into() }
    }

    fn session(&self) -> Session {
        Session {
            access_token: Self::TOKEN.to_string(),
            user_id: uuid::Uuid::nil(),
            email: self.email.clone(),
            expires_at: Utc::now() + chrono::Duration::days(1),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl AuthApi for FakeAuth {
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError> {
        Ok((access_token == Self::TOKEN).then(|| self.session()))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AppError> {
        if email == self.email && password == self.password {
            Ok(self.session())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}
