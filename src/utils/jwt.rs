//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para manejo de JWT tokens.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, utils::errors::AppError};

/// Claims del JWT token
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub exp: usize,  // expiration timestamp
    pub iat: usize,  // issued at timestamp
}

/// Generar JWT token para un usuario
pub fn generate_token(user_id: Uuid, config: &EnvironmentConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar JWT token
pub fn verify_token(token: &str, config: &EnvironmentConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<JwtClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer el user id de unos claims ya verificados
pub fn user_id_from_claims(claims: &JwtClaims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido en el token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::EnvironmentConfig;

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            port: 3000,
            host: "localhost".to_string(),
            jwt_secret: "secreto-de-pruebas".to_string(),
            jwt_expiration: 3600,
            cors_origins: vec![],
        }
    }

    #[test]
    fn test_generate_and_verify_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = generate_token(user_id, &config).unwrap();
        assert!(!token.is_empty());

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(user_id_from_claims(&claims).unwrap(), user_id);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let config = test_config();
        let token = generate_token(Uuid::new_v4(), &config).unwrap();

        let mut other = test_config();
        other.jwt_secret = "otro-secreto".to_string();
        assert!(verify_token(&token, &other).is_err());
    }
}
