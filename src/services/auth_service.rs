//! Servicio de autenticación
//!
//! Alta y login del personal de back office. El hash de contraseñas usa
//! bcrypt; las sesiones son JWT sin estado.

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::{errors::AppError, jwt};
use sqlx::PgPool;

pub struct AuthService {
    repository: UserRepository,
    config: EnvironmentConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            config,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "El email ya está registrado".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))?;

        self.repository
            .create(request.email, password_hash, request.full_name)
            .await
    }

    pub async fn login(&self, request: LoginRequest) -> Result<(User, String), AppError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando hash: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = jwt::generate_token(user.id, &self.config)?;
        Ok((user, token))
    }
}
