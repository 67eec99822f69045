//! Middleware de autenticación JWT
//!
//! Extrae el token Bearer, lo verifica y deja el usuario autenticado como
//! extensión de la request. Los handlers lo reciben como parámetro
//! explícito: ninguna operación depende de un "usuario actual" ambiental.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    repositories::user_repository::UserRepository, state::AppState, utils::errors::AppError,
    utils::jwt,
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let claims = jwt::verify_token(auth_header, &state.config)?;
    let user_id = jwt::user_id_from_claims(&claims)?;

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id: user.id });

    Ok(next.run(request).await)
}
