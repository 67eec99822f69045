use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::dto::common::ApiResponse;
use crate::models::user::User;
use crate::services::auth_service::AuthService;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use validator::Validate;

pub struct AuthController {
    service: AuthService,
}

fn to_user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        created_at: user.created_at,
    }
}

impl AuthController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            service: AuthService::new(pool, config),
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let user = self.service.register(request).await?;
        Ok(ApiResponse::success_with_message(
            to_user_response(user),
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let (user, token) = self.service.login(request).await?;
        Ok(LoginResponse {
            token,
            user: to_user_response(user),
        })
    }
}
